//! Tracing setup
//!
//! CLI mode logs to stderr. TUI mode owns the terminal, so events go to
//! ~/.cache/anistream/anistream.log instead.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `anistream=trace`)
pub const LOG_ENV: &str = "ANISTREAM_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log file path used in TUI mode
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("anistream").join("anistream.log"))
}

/// Log to stderr (CLI mode)
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log to the cache file (TUI mode). Logging is skipped if the file cannot be opened.
pub fn init_file() -> Option<PathBuf> {
    let path = log_path()?;
    let file = open_log(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

fn open_log(path: &PathBuf) -> Option<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
