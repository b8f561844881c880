#![forbid(unsafe_code)]

//! File logging for the demo.
//!
//! The terminal belongs to the UI, so logs only go to a file, and only when
//! `GROWTEXT_LOG` names one. The filter comes from `GROWTEXT_LOG_LEVEL`, then
//! `RUST_LOG`, then defaults to `info`.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_FILE_ENV: &str = "GROWTEXT_LOG";
pub const LOG_LEVEL_ENV: &str = "GROWTEXT_LOG_LEVEL";

const DEFAULT_FILTER: &str = "info";

/// Where logs go and at what level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub path: PathBuf,
    pub filter: String,
}

impl LogSettings {
    /// `None` when logging is off.
    pub fn from_env_with<F>(get_env: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = get_env(LOG_FILE_ENV).filter(|p| !p.trim().is_empty())?;
        let filter = get_env(LOG_LEVEL_ENV)
            .or_else(|| get_env("RUST_LOG"))
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        Some(Self {
            path: PathBuf::from(path),
            filter,
        })
    }

    /// The filter, falling back to the default when it does not parse.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Held for the life of the program; names the active log file.
#[derive(Debug)]
pub struct LoggingGuard {
    path: PathBuf,
}

impl LoggingGuard {
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

/// Install the global subscriber if `GROWTEXT_LOG` is set.
pub fn init_from_env() -> io::Result<Option<LoggingGuard>> {
    match LogSettings::from_env_with(|key| std::env::var(key).ok()) {
        Some(settings) => init(&settings).map(Some),
        None => Ok(None),
    }
}

/// Append to `settings.path` with `settings.filter`.
pub fn init(settings: &LogSettings) -> io::Result<LoggingGuard> {
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.path)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(settings.env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    if let Err(e) = installed {
        // A subscriber is already in place; keep it.
        tracing::debug!(error = %e, "logging already initialized");
    }
    tracing::info!(path = %settings.path.display(), filter = %settings.filter, "logging started");
    Ok(LoggingGuard {
        path: settings.path.clone(),
    })
}
