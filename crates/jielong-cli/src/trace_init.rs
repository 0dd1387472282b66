use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

pub const TRACE_FILE: &str = "jielong-trace.jsonl";

/// Install the global subscriber.
///
/// Without `log_dir`, compact events go to stderr filtered by `RUST_LOG`
/// (default `warn`). With it, JSON lines are appended to
/// `<log_dir>/jielong-trace.jsonl` through a non-blocking writer; keep the
/// returned guard alive until exit so buffered lines get flushed.
///
/// A second call leaves the first subscriber in place.
pub fn init_tracing(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, InitError> {
    let Some(dir) = log_dir else {
        let _ = tracing_subscriber::fmt()
            .compact()
            .with_writer(io::stderr)
            .with_target(false)
            .with_env_filter(env_filter("warn"))
            .try_init();
        return Ok(None);
    };

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(TRACE_FILE)
        .build(dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(env_filter("jielong_core=debug,jielong_cli=debug"))
        .try_init();
    Ok(Some(guard))
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
