//! The `jielong` query: candidates for the next idiom, or a whole chain.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, debug_span};
use unicode_width::UnicodeWidthStr;

use jielong_core::settings::{self, Settings, SettingsError};
use jielong_core::unicode::normalize_idiom;
use jielong_core::{
    ChainLink, Dictionary, GuessReport, IdiomEntry, LoadError, MatchMode, Matcher, Ranking,
    ValidationError,
};

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Error reading settings {}: {source}", path.display())]
    SettingsRead { path: PathBuf, source: io::Error },
    #[error("Error in settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("Error loading dictionary: {0}")]
    Load(#[from] LoadError),
    #[error("Error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Error encoding JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Command-line overrides. `None` falls back to the settings value.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub idiom: String,
    pub top: Option<usize>,
    pub db: Option<PathBuf>,
    pub mode: Option<MatchMode>,
    pub ranking: Option<Ranking>,
    /// `Some(None)` plays a chain of `chain.max_steps` links.
    pub chain: Option<Option<usize>>,
    pub json: bool,
    pub quiet: bool,
}

/// Embedded defaults, or the given TOML file.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, QueryError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let content = fs::read_to_string(path).map_err(|source| QueryError::SettingsRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(settings::parse_settings_toml(&content)?)
}

/// Run one query and return everything destined for stdout.
pub fn run(opts: &QueryOptions, settings: &Settings) -> Result<String, QueryError> {
    let db = opts.db.as_deref().unwrap_or(&settings.dictionary.path);
    let mode = opts.mode.unwrap_or(settings.matcher.mode);
    let ranking = opts.ranking.unwrap_or(settings.matcher.ranking);
    let _span = debug_span!("query", db = %db.display(), %mode, %ranking).entered();

    let dict = Dictionary::open(db)?;
    debug!(idioms = dict.len(), "dictionary loaded");
    let matcher = Matcher::with_options(dict, mode, ranking);
    let query = normalize_idiom(&opts.idiom);

    if let Some(steps) = opts.chain {
        let steps = steps.unwrap_or(settings.chain.max_steps);
        let links = matcher.chain(&opts.idiom, steps)?;
        return if opts.json {
            chain_json(query, mode, ranking, &links)
        } else {
            Ok(format_chain(query, &links, opts.quiet))
        };
    }

    let top = opts.top.unwrap_or(settings.matcher.top);
    let report = matcher.guess_report(&opts.idiom, top)?;
    if opts.json {
        guess_json(query, mode, ranking, &report)
    } else {
        Ok(format_guess(query, &report, opts.quiet))
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// `[idiom] : [definition]`, the bracketed idiom padded to `width` columns.
fn entry_line(entry: &IdiomEntry, width: usize) -> String {
    let idiom = format!("[{}]", entry.text);
    let pad = width.saturating_sub(idiom.width());
    format!("{idiom}{} : [{}]", " ".repeat(pad), entry.definition)
}

fn column_width<'a>(entries: impl Iterator<Item = &'a IdiomEntry>) -> usize {
    entries.map(|e| e.text.width() + 2).max().unwrap_or(0)
}

/// One `[idiom] : [definition]` line per entry, aligned on the colon.
pub fn format_entries(entries: &[&IdiomEntry]) -> String {
    let width = column_width(entries.iter().copied());
    let mut out = String::new();
    for e in entries {
        out.push_str(&entry_line(e, width));
        out.push('\n');
    }
    out
}

pub fn format_guess(query: &str, report: &GuessReport<'_>, quiet: bool) -> String {
    if report.is_empty() {
        return format!("No matching idiom found for {query}\n");
    }
    let mut out = format_entries(&report.candidates);
    if !quiet {
        out.push_str(&format!(
            "Found {} matches in {:.3} ms\n",
            report.total,
            elapsed_ms(report)
        ));
    }
    out
}

pub fn format_chain(start: &str, links: &[ChainLink<'_>], quiet: bool) -> String {
    if links.is_empty() {
        return format!("No matching idiom found for {start}\n");
    }
    let width = column_width(links.iter().map(|l| l.entry));
    let mut out = format!("{start}\n");
    for (i, link) in links.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, entry_line(link.entry, width)));
    }
    if !quiet {
        out.push_str(&format!("Chain of {} idioms\n", links.len()));
    }
    out
}

fn elapsed_ms(report: &GuessReport<'_>) -> f64 {
    report.elapsed.as_secs_f64() * 1000.0
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct EntryJson<'a> {
    idiom: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pinyin: Option<String>,
    definition: &'a str,
}

impl<'a> From<&'a IdiomEntry> for EntryJson<'a> {
    fn from(e: &'a IdiomEntry) -> Self {
        Self {
            idiom: &e.text,
            pinyin: e.has_pinyin().then(|| e.pinyin.join("'")),
            definition: &e.definition,
        }
    }
}

#[derive(Serialize)]
struct GuessJson<'a> {
    query: &'a str,
    mode: MatchMode,
    ranking: Ranking,
    total: usize,
    elapsed_ms: f64,
    results: Vec<EntryJson<'a>>,
}

#[derive(Serialize)]
struct ChainLinkJson<'a> {
    #[serde(flatten)]
    entry: EntryJson<'a>,
    choices: usize,
}

#[derive(Serialize)]
struct ChainJson<'a> {
    start: &'a str,
    mode: MatchMode,
    ranking: Ranking,
    links: Vec<ChainLinkJson<'a>>,
}

fn guess_json(
    query: &str,
    mode: MatchMode,
    ranking: Ranking,
    report: &GuessReport<'_>,
) -> Result<String, QueryError> {
    let out = GuessJson {
        query,
        mode,
        ranking,
        total: report.total,
        elapsed_ms: elapsed_ms(report),
        results: report.candidates.iter().map(|&e| e.into()).collect(),
    };
    Ok(serde_json::to_string_pretty(&out)? + "\n")
}

fn chain_json(
    start: &str,
    mode: MatchMode,
    ranking: Ranking,
    links: &[ChainLink<'_>],
) -> Result<String, QueryError> {
    let out = ChainJson {
        start,
        mode,
        ranking,
        links: links
            .iter()
            .map(|l| ChainLinkJson {
                entry: l.entry.into(),
                choices: l.choices,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&out)? + "\n")
}
