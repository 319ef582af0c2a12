//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--verbose` forces `debug`
//! 2. `TASK_ANALYZER_LOG` environment variable (e.g. "info", "trace")
//! 3. default to `warn`
//!
//! Logs go to stderr so they never mix with command output.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

/// Environment variable holding the log level
pub const LOG_ENV: &str = "TASK_ANALYZER_LOG";

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        std::env::var(LOG_ENV)
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(Level::WARN)
    };

    fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}

fn parse_level_str(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}
