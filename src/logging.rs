use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use crate::config::ENV_LOG;

fn filter(default_level: &str) -> String {
    std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_level.to_string())
}

/// Log to a file; the terminal belongs to the browser
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {:?}", dir))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .with_env_filter(filter("info"))
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))
}

/// Log warnings to stderr, leaving stdout for command output
pub fn init_stderr() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_env_filter(filter("warn"))
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))
}
