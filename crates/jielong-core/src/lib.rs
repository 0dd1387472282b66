//! Idiom chain (成语接龙) lookup.
//!
//! Load a dictionary once, wrap it in a [`Matcher`], and ask it for idioms
//! that can follow a given one.

pub mod dict;
pub mod matcher;
pub mod settings;
#[cfg(test)]
mod testutil;
pub mod unicode;

pub use dict::{Dictionary, IdiomEntry, LoadError};
pub use matcher::{ChainLink, GuessReport, MatchMode, Matcher, Ranking, ValidationError};
pub use settings::Settings;
