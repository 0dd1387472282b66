use serde::{Deserialize, Serialize};

use crate::unicode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdiomEntry {
    pub text: String,
    /// Toneless syllables, one per character. Empty when the dataset has no
    /// readings for this idiom.
    pub pinyin: Vec<String>,
    pub definition: String,
}

impl IdiomEntry {
    pub fn new(text: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pinyin: Vec::new(),
            definition: definition.into(),
        }
    }

    pub fn with_pinyin(mut self, pinyin: &[&str]) -> Self {
        self.pinyin = pinyin.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn first_char(&self) -> Option<char> {
        unicode::first_char(&self.text)
    }

    pub fn last_char(&self) -> Option<char> {
        unicode::last_char(&self.text)
    }

    pub fn has_pinyin(&self) -> bool {
        !self.pinyin.is_empty()
    }

    pub fn first_syllable(&self) -> Option<&str> {
        self.pinyin.first().map(String::as_str)
    }

    pub fn last_syllable(&self) -> Option<&str> {
        self.pinyin.last().map(String::as_str)
    }

    /// Check the invariants every stored entry must hold.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.text.is_empty() {
            return Err("idiom text is empty".to_string());
        }
        if self.text.chars().any(char::is_whitespace) {
            return Err(format!("idiom {:?} contains whitespace", self.text));
        }
        if self.definition.trim().is_empty() {
            return Err(format!("idiom {:?} has an empty definition", self.text));
        }
        if self.has_pinyin() {
            let char_count = self.text.chars().count();
            if self.pinyin.len() != char_count {
                return Err(format!(
                    "idiom {:?} has {} characters but {} pinyin syllables",
                    self.text,
                    char_count,
                    self.pinyin.len()
                ));
            }
            if let Some(bad) = self.pinyin.iter().find(|s| !is_syllable(s)) {
                return Err(format!(
                    "idiom {:?} has an invalid pinyin syllable {:?}",
                    self.text, bad
                ));
            }
        }
        Ok(())
    }
}

/// Toneless syllable: lowercase letters, with `ü` or `v` allowed for lü/nü.
fn is_syllable(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase() || c == 'ü')
}
