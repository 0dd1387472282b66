//! Tab-separated text dataset.
//!
//! One idiom per line, either `text \t pin'yin \t definition` or
//! `text \t definition`. Blank lines and `#` comments are skipped.

use tracing::{debug, debug_span};

use super::{IdiomEntry, LoadError};

const PINYIN_SEPARATOR: char = '\'';

pub(super) fn parse_text(content: &str) -> Result<Vec<IdiomEntry>, LoadError> {
    let _span = debug_span!("parse_text", bytes = content.len()).entered();
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);

    let mut entries = Vec::new();
    let mut total_lines = 0usize;
    let mut skipped = 0usize;

    for (idx, raw) in content.lines().enumerate() {
        total_lines += 1;
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            skipped += 1;
            continue;
        }
        entries.push(parse_line(line).map_err(|reason| LoadError::Parse {
            line: idx + 1,
            reason,
        })?);
    }

    debug!(total_lines, skipped, entry_count = entries.len());
    Ok(entries)
}

fn parse_line(line: &str) -> Result<IdiomEntry, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    let (text, pinyin, definition) = match fields.as_slice() {
        [text, definition] => (*text, None, *definition),
        [text, pinyin, definition] => (*text, Some(*pinyin), *definition),
        _ => {
            return Err(format!(
                "expected 2 or 3 tab-separated fields, found {}",
                fields.len()
            ))
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err("empty idiom".to_string());
    }
    let definition = definition.trim();
    if definition.is_empty() {
        return Err(format!("empty definition for {text:?}"));
    }

    let pinyin = match pinyin.map(str::trim) {
        None | Some("") => Vec::new(),
        Some(p) => p
            .split(PINYIN_SEPARATOR)
            .map(|s| s.trim().to_lowercase())
            .collect(),
    };

    let entry = IdiomEntry {
        text: text.to_string(),
        pinyin,
        definition: definition.to_string(),
    };
    entry.validate()?;
    Ok(entry)
}
