//! Logging setup
//!
//! Commands log to stderr. The TUI owns the terminal, so it logs to a file
//! and only when READLIST_LOG is set.

use std::fs::File;

use readlist_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log level
const LOG_ENV: &str = "READLIST_LOG";

/// Build a filter scoped to this workspace's crates
fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::new(format!("readlist_core={0},readlist_cli={0}", level))
}

/// Initialize stderr logging for commands
///
/// Defaults to warnings only; READLIST_LOG raises the level.
pub fn init_cli() {
    let level = std::env::var(LOG_ENV).unwrap_or_else(|_| "warn".to_string());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(&level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize logging for TUI mode
///
/// Only initializes if READLIST_LOG is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log).
pub fn init_tui(config: &Config) {
    let Ok(level) = std::env::var(LOG_ENV) else {
        return;
    };

    let log_path = config.log_path();
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(&level))
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("TUI logging initialized to {:?}", log_path);
}
