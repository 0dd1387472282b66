use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use jielong_cli::commands::query_ops::{self, QueryOptions};
use jielong_cli::trace_init;
use jielong_core::{MatchMode, Ranking};

#[derive(Parser)]
#[command(
    name = "jielong",
    version,
    about = "Find idioms that continue a Chinese idiom chain (成语接龙)"
)]
struct Cli {
    /// Input idiom
    idiom: String,
    /// Number of results to show (default from settings)
    #[arg(short = 'n', long, value_parser = positive_count)]
    top: Option<usize>,
    /// Dictionary file, text (TSV) or compiled (default from settings)
    #[arg(short, long)]
    db: Option<PathBuf>,
    /// Matching rule
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Candidate ordering
    #[arg(long, value_enum)]
    rank: Option<RankArg>,
    /// Play a chain of idioms instead of listing candidates; `--chain=STEPS`
    /// caps its length (default from settings)
    #[arg(
        long,
        value_name = "STEPS",
        num_args = 0..=1,
        require_equals = true,
        value_parser = positive_count
    )]
    chain: Option<Option<usize>>,
    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Settings TOML file (default: embedded settings)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Write JSON trace lines to DIR/jielong-trace.jsonl
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
    /// Omit the match statistics line
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Same character
    Char,
    /// Same toneless pinyin syllable
    Pinyin,
}

impl From<ModeArg> for MatchMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Char => MatchMode::Char,
            ModeArg::Pinyin => MatchMode::Pinyin,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RankArg {
    /// Dictionary order
    Insertion,
    /// Most continuable first
    Chainable,
}

impl From<RankArg> for Ranking {
    fn from(arg: RankArg) -> Self {
        match arg {
            RankArg::Insertion => Ranking::Insertion,
            RankArg::Chainable => Ranking::Chainable,
        }
    }
}

fn positive_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match trace_init::init_tracing(cli.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error opening trace log: {e}");
            return ExitCode::FAILURE;
        }
    };

    let opts = QueryOptions {
        idiom: cli.idiom,
        top: cli.top,
        db: cli.db,
        mode: cli.mode.map(Into::into),
        ranking: cli.rank.map(Into::into),
        chain: cli.chain,
        json: cli.json,
        quiet: cli.quiet,
    };

    let result = query_ops::load_settings(cli.settings.as_deref())
        .and_then(|settings| query_ops::run(&opts, &settings));
    match result {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "query failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
