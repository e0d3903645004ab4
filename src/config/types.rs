//! Configuration types and logging options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and library configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_CACHE_FILE, DEFAULT_REDIRECT_BUDGET, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Verbosity selected with `--log-level`.
///
/// Redirect hops and cache hits are announced at `Info`, so `Warn` and `Error`
/// leave stdout and stderr with nothing but the rendered output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    /// Default; includes redirect and cache announcements
    Info,
    /// Adds connection, byte-count and cache file activity
    Debug,
    /// Adds the literal request text of every hop
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Shape of each log line on stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Colored level with an emoji prefix
    Plain,
    /// One `{"ts","level","target","msg"}` object per line
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use go2web::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     cache_path: Some(PathBuf::from("/tmp/go2web.json")),
///     timeout_seconds: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Response cache file; `None` keeps the cache in memory only
    pub cache_path: Option<PathBuf>,

    /// Deadline for each request/response exchange in seconds
    pub timeout_seconds: u64,

    /// Redirect budget for a single resolution
    pub max_redirects: usize,

    /// Client identifier sent as `User-Agent`
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Request deadline as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_path: Some(PathBuf::from(DEFAULT_CACHE_FILE)),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_redirects: DEFAULT_REDIRECT_BUDGET,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
