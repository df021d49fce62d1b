use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber; call once per process.
/// Logs go to `log_file` when given. Without one nothing is written, so a
/// full-screen UI is never overdrawn by log lines.
pub fn init_file_tracing(log_file: Option<&Path>) -> io::Result<()> {
    let filter = env_filter("info");
    let Some(path) = log_file else {
        tracing_subscriber::registry().with(filter).init();
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

pub fn init_stderr_tracing(quiet: bool) {
    let filter = env_filter(if quiet { "error" } else { "warn" });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
