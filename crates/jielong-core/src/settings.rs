//! Settings loaded from TOML.
//!
//! Defaults are embedded via `include_str!("default_settings.toml")` and
//! checked by the build script. Settings are parsed into a plain value and
//! handed to whoever needs them; there is no process-wide instance.

use std::path::PathBuf;

use serde::Deserialize;

use crate::matcher::{MatchMode, Ranking};

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub matcher: MatcherSettings,
    pub chain: ChainSettings,
    pub dictionary: DictionarySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatcherSettings {
    pub top: usize,
    pub mode: MatchMode,
    pub ranking: Ranking,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainSettings {
    pub max_steps: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionarySettings {
    pub path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        // The embedded file is validated at build time and covered by tests.
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Settings::default().matcher
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(matcher.top);
    check_positive_usize!(chain.max_steps);

    if s.dictionary.path.as_os_str().is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "dictionary.path".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(())
}
