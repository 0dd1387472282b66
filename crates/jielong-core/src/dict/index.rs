//! Leading-character and leading-syllable indexes over a [`Dictionary`].
//!
//! Buckets store entry ids in dictionary insertion order, so iterating a
//! bucket yields candidates in the order they appear in the dataset.

use std::collections::HashMap;

use tracing::{debug, debug_span};

use super::Dictionary;

/// Maps the first character of each idiom to the ids of idioms starting
/// with it. Every entry sits in exactly one bucket.
#[derive(Debug, Clone, Default)]
pub struct CharIndex {
    buckets: HashMap<char, Vec<usize>>,
}

impl CharIndex {
    pub fn build(dict: &Dictionary) -> Self {
        let _span = debug_span!("build_char_index", idiom_count = dict.len()).entered();
        let mut buckets: HashMap<char, Vec<usize>> = HashMap::new();
        for (id, entry) in dict.iter().enumerate() {
            if let Some(c) = entry.first_char() {
                buckets.entry(c).or_default().push(id);
            }
        }
        debug!(bucket_count = buckets.len());
        Self { buckets }
    }

    /// Ids of idioms starting with `c`; empty when none do.
    pub fn bucket(&self, c: char) -> &[usize] {
        self.buckets.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, c: char) -> bool {
        self.buckets.contains_key(&c)
    }

    /// Number of distinct leading characters.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &[usize])> {
        self.buckets.iter().map(|(&c, ids)| (c, ids.as_slice()))
    }
}

/// Maps the toneless syllable of each idiom's first character to idiom ids,
/// and keeps a per-character reading table learned from the dataset.
///
/// Idioms without pinyin are left out. For polyphonic characters the first
/// reading seen in insertion order wins.
#[derive(Debug, Clone, Default)]
pub struct PinyinIndex {
    buckets: HashMap<String, Vec<usize>>,
    readings: HashMap<char, String>,
}

impl PinyinIndex {
    pub fn build(dict: &Dictionary) -> Self {
        let _span = debug_span!("build_pinyin_index", idiom_count = dict.len()).entered();
        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
        let mut readings: HashMap<char, String> = HashMap::new();

        for (id, entry) in dict.iter().enumerate() {
            let Some(first) = entry.first_syllable() else {
                continue;
            };
            buckets.entry(first.to_string()).or_default().push(id);
            for (c, syllable) in entry.text.chars().zip(&entry.pinyin) {
                readings.entry(c).or_insert_with(|| syllable.clone());
            }
        }

        debug!(
            bucket_count = buckets.len(),
            reading_count = readings.len()
        );
        Self { buckets, readings }
    }

    pub fn bucket(&self, syllable: &str) -> &[usize] {
        self.buckets.get(syllable).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Reading of `c` as learned from the dataset.
    pub fn reading(&self, c: char) -> Option<&str> {
        self.readings.get(&c).map(String::as_str)
    }

    /// Number of distinct leading syllables.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
