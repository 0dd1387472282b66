//! Idiom dictionary storage.
//!
//! `Dictionary` holds the insertion-ordered idiom entries. It loads from the
//! tab-separated text dataset or from the compiled `JLDX` binary, and the
//! indexes in [`index`] are built on top of it.

mod dict_io;
mod entry;
pub mod index;
mod source;
#[cfg(test)]
mod tests;

pub use dict_io::is_compiled;
pub use entry::IdiomEntry;
pub use index::{CharIndex, PinyinIndex};

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use tracing::{debug, debug_span, warn};

use crate::unicode;

/// Error raised while loading or saving a dictionary.
///
/// Covers both the text dataset and the compiled binary store. Loading never
/// repairs data: anything unexpected is reported to the caller.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("dictionary not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("dictionary contains no idioms")]
    Empty,

    #[error("dictionary text is not valid UTF-8")]
    InvalidUtf8,

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("invalid header (too short or truncated)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected JLDX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch (expected {expected:08x}, got {actual:08x})")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

/// Counts reported by `idiomtool info` and the CLI's load message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictStats {
    pub idioms: usize,
    pub with_pinyin: usize,
    pub leading_chars: usize,
}

/// The static idiom collection. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<IdiomEntry>,
    by_text: HashMap<String, usize>,
}

impl Dictionary {
    /// Build a dictionary from entries in insertion order.
    ///
    /// Every entry is validated. Repeated idiom texts keep the first
    /// occurrence. An empty input is an error.
    pub fn from_entries(
        entries: impl IntoIterator<Item = IdiomEntry>,
    ) -> Result<Self, LoadError> {
        let _span = debug_span!("dictionary_from_entries").entered();
        let mut kept: Vec<IdiomEntry> = Vec::new();
        let mut by_text: HashMap<String, usize> = HashMap::new();
        let mut duplicates = 0usize;
        let mut non_han = 0usize;

        for (index, entry) in entries.into_iter().enumerate() {
            entry
                .validate()
                .map_err(|reason| LoadError::InvalidRecord { index, reason })?;
            if by_text.contains_key(&entry.text) {
                duplicates += 1;
                continue;
            }
            if !unicode::is_han_text(&entry.text) {
                non_han += 1;
            }
            by_text.insert(entry.text.clone(), kept.len());
            kept.push(entry);
        }

        if kept.is_empty() {
            return Err(LoadError::Empty);
        }
        if duplicates > 0 {
            warn!(duplicates, "skipped repeated idioms (first occurrence kept)");
        }
        if non_han > 0 {
            debug!(non_han, "idioms with non-Han characters");
        }
        debug!(idiom_count = kept.len());

        Ok(Self {
            entries: kept,
            by_text,
        })
    }

    /// Parse the tab-separated text dataset.
    pub fn from_text(content: &str) -> Result<Self, LoadError> {
        Self::from_entries(source::parse_text(content)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&IdiomEntry> {
        self.entries.get(id)
    }

    /// Exact lookup by idiom text.
    pub fn lookup(&self, text: &str) -> Option<&IdiomEntry> {
        self.by_text.get(text).map(|&id| &self.entries[id])
    }

    pub fn entries(&self) -> &[IdiomEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &IdiomEntry> {
        self.entries.iter()
    }

    pub fn stats(&self) -> DictStats {
        let with_pinyin = self.entries.iter().filter(|e| e.has_pinyin()).count();
        let mut leading: Vec<char> = self.entries.iter().filter_map(|e| e.first_char()).collect();
        leading.sort_unstable();
        leading.dedup();
        DictStats {
            idioms: self.entries.len(),
            with_pinyin,
            leading_chars: leading.len(),
        }
    }
}
