use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Where log lines may go when no log file is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// One-shot commands can write to stderr.
    Stderr,
    /// The TUI owns the terminal, so logs are dropped unless a file is set.
    FileOnly,
}

pub fn init_tracing(config: &AppConfig, sink: LogSink) -> Result<()> {
    let env_filter = build_filter(config.log_filter())?;

    if let Some(path) = config.log_file() {
        let file = open_log_file(path)?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init();
        return Ok(());
    }

    if sink == LogSink::Stderr {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init();
    }
    Ok(())
}

pub(crate) fn build_filter(filter: &str) -> Result<EnvFilter> {
    let directive: Directive = filter
        .parse()
        .with_context(|| format!("invalid log filter '{filter}'"))?;
    Ok(EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy())
}

pub(crate) fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create log directory at {}", parent.display())
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file at {}", path.display()))
}
