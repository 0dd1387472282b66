//! Idiom matching: given an idiom, find the idioms that may follow it.
//!
//! A [`Matcher`] owns the loaded [`Dictionary`] together with the indexes
//! built from it. It is immutable after construction, so one instance can be
//! shared freely (including across threads behind an `Arc`).

mod chain;
mod rank;
#[cfg(test)]
mod tests;

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::dict::{CharIndex, Dictionary, IdiomEntry, PinyinIndex};
use crate::settings::MatcherSettings;
use crate::unicode;

pub use chain::ChainLink;

/// Which part of the previous idiom the next one has to continue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Next idiom starts with the very character the previous one ends with.
    #[default]
    Char,
    /// Next idiom starts with a character read the same way (toneless).
    Pinyin,
}

/// Order of candidates sharing the same leading key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ranking {
    /// Dictionary insertion order.
    #[default]
    Insertion,
    /// Most continuable candidates first, insertion order on ties.
    Chainable,
}

macro_rules! str_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(MatchMode { Char => "char", Pinyin => "pinyin" });
str_enum!(Ranking { Insertion => "insertion", Chainable => "chainable" });

/// Invalid query arguments, reported before any lookup happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("idiom must not be empty")]
    EmptyIdiom,
    #[error("top_n must be at least 1")]
    ZeroTopN,
    #[error("chain length must be at least 1")]
    ZeroSteps,
}

/// The key a query resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKey<'a> {
    Char(char),
    Syllable(&'a str),
}

impl fmt::Display for MatchKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKey::Char(c) => write!(f, "{c}"),
            MatchKey::Syllable(s) => f.write_str(s),
        }
    }
}

/// Outcome of one lookup, with the numbers the CLI reports.
#[derive(Debug, Clone)]
pub struct GuessReport<'a> {
    /// Ranked candidates, at most `top_n`.
    pub candidates: Vec<&'a IdiomEntry>,
    /// Matches found before truncation.
    pub total: usize,
    /// Wall-clock time spent in the lookup.
    pub elapsed: Duration,
    pub key: MatchKey<'a>,
}

impl GuessReport<'_> {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

pub struct Matcher {
    dict: Dictionary,
    chars: CharIndex,
    pinyin: PinyinIndex,
    mode: MatchMode,
    ranking: Ranking,
}

impl Matcher {
    pub fn new(dict: Dictionary, settings: &MatcherSettings) -> Self {
        Self::with_options(dict, settings.mode, settings.ranking)
    }

    pub fn with_options(dict: Dictionary, mode: MatchMode, ranking: Ranking) -> Self {
        let _span = debug_span!("matcher_new", %mode, %ranking).entered();
        let chars = CharIndex::build(&dict);
        let pinyin = match mode {
            MatchMode::Char => PinyinIndex::default(),
            MatchMode::Pinyin => PinyinIndex::build(&dict),
        };
        Self {
            dict,
            chars,
            pinyin,
            mode,
            ranking,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    pub fn char_index(&self) -> &CharIndex {
        &self.chars
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn ranking(&self) -> Ranking {
        self.ranking
    }

    /// Exact lookup of an idiom's entry.
    pub fn lookup(&self, text: &str) -> Option<&IdiomEntry> {
        self.dict.lookup(unicode::normalize_idiom(text))
    }

    /// Idioms that may follow `idiom`, best first, at most `top_n`.
    ///
    /// No match is an empty vector, not an error.
    pub fn guess(&self, idiom: &str, top_n: usize) -> Result<Vec<&IdiomEntry>, ValidationError> {
        Ok(self.guess_report(idiom, top_n)?.candidates)
    }

    /// Like [`guess`](Self::guess), also returning the match count and timing.
    pub fn guess_report(
        &self,
        idiom: &str,
        top_n: usize,
    ) -> Result<GuessReport<'_>, ValidationError> {
        let idiom = validate_idiom(idiom)?;
        if top_n == 0 {
            return Err(ValidationError::ZeroTopN);
        }

        let _span = debug_span!("guess", idiom, top_n).entered();
        let started = Instant::now();

        let (key, last) = self.query_key(idiom);
        let mut ids = self.ranked_ids(key, last);
        let total = ids.len();
        ids.truncate(top_n);
        let candidates: Vec<&IdiomEntry> = ids.iter().map(|&id| self.entry(id)).collect();

        let elapsed = started.elapsed();
        debug!(%key, total, returned = candidates.len());
        Ok(GuessReport {
            candidates,
            total,
            elapsed,
            key,
        })
    }

    /// Number of idioms that could follow `entry`.
    pub fn continuations(&self, entry: &IdiomEntry) -> usize {
        self.entry_key(entry)
            .map_or(0, |(key, last)| self.candidate_ids(key, last).len())
    }

    fn entry(&self, id: usize) -> &IdiomEntry {
        &self.dict.entries()[id]
    }

    /// Key for a free-form query, with the last char it was derived from.
    /// The idiom is non-empty here.
    fn query_key<'a>(&'a self, idiom: &str) -> (MatchKey<'a>, char) {
        if let Some(entry) = self.dict.lookup(idiom) {
            if let Some(found) = self.entry_key(entry) {
                return found;
            }
        }
        // `validate_idiom` guarantees at least one char.
        let last = unicode::last_char(idiom).unwrap_or_default();
        (self.char_key(last), last)
    }

    /// Key an idiom's continuation must match, with the idiom's last char.
    fn entry_key<'a>(&'a self, entry: &'a IdiomEntry) -> Option<(MatchKey<'a>, char)> {
        let last = entry.last_char()?;
        let key = match (self.mode, entry.last_syllable()) {
            (MatchMode::Pinyin, Some(syllable)) => MatchKey::Syllable(syllable),
            _ => self.char_key(last),
        };
        Some((key, last))
    }

    fn char_key(&self, c: char) -> MatchKey<'_> {
        match self.mode {
            MatchMode::Char => MatchKey::Char(c),
            // Unknown readings fall back to the exact character.
            MatchMode::Pinyin => self
                .pinyin
                .reading(c)
                .map_or(MatchKey::Char(c), MatchKey::Syllable),
        }
    }

    /// Ids matching `key` in insertion order. A syllable key also takes
    /// every idiom starting with `last` itself, with or without pinyin.
    fn candidate_ids(&self, key: MatchKey<'_>, last: char) -> Vec<usize> {
        match key {
            MatchKey::Char(c) => self.chars.bucket(c).to_vec(),
            MatchKey::Syllable(s) => merge_ids(self.pinyin.bucket(s), self.chars.bucket(last)),
        }
    }

    /// All ids matching `key`, ordered by the configured ranking.
    fn ranked_ids(&self, key: MatchKey<'_>, last: char) -> Vec<usize> {
        let mut ids = self.candidate_ids(key, last);
        rank::apply(self, self.ranking, &mut ids);
        ids
    }
}

/// Union of two ascending id lists, ascending and without repeats.
fn merge_ids(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut ids = Vec::with_capacity(a.len() + b.len());
    ids.extend_from_slice(a);
    ids.extend_from_slice(b);
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn validate_idiom(idiom: &str) -> Result<&str, ValidationError> {
    let idiom = unicode::normalize_idiom(idiom);
    if idiom.is_empty() {
        return Err(ValidationError::EmptyIdiom);
    }
    Ok(idiom)
}
