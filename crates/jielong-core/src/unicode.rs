//! Character-level helpers for Chinese idiom text.

/// CJK Unified Ideographs plus Extension A and B. Compatibility ideographs
/// and the later extensions never show up in idiom datasets.
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// True when every character of a non-empty string is a Han ideograph.
pub fn is_han_text(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_han)
}

pub fn first_char(s: &str) -> Option<char> {
    s.chars().next()
}

pub fn last_char(s: &str) -> Option<char> {
    s.chars().next_back()
}

/// Strip surrounding whitespace (including the ideographic space U+3000,
/// which `str::trim` already treats as whitespace).
pub fn normalize_idiom(s: &str) -> &str {
    s.trim()
}
