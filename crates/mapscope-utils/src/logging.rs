//! # Logging Utilities
//!
//! Subscriber setup for applications built on `mapscope-core`.
//!
//! The core crate only emits `tracing` events (parse progress at `debug`,
//! every skipped line at `trace`, degraded statistics at `warn`). This
//! module installs a subscriber that prints them:
//! - pretty or JSON output
//! - filtering through `RUST_LOG` / [`EnvFilter`]
//! - optional copy to a daily-rolling log file
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mapscope_utils::init_logging;
//!
//! // Reads RUST_LOG, MAPSCOPE_LOG_FORMAT and MAPSCOPE_LOG_FILE
//! let _guard = init_logging().expect("Failed to initialize logging");
//! tracing::info!("Comparing builds");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: level or filter directives (e.g. `debug`, `mapscope_core=trace`)
//! - `MAPSCOPE_LOG_FORMAT`: `pretty` (default) or `json`
//! - `MAPSCOPE_LOG_FILE`: also write logs to this file (rotated daily)

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use chrono::Utc;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the output format
pub const FORMAT_ENV: &str = "MAPSCOPE_LOG_FORMAT";
/// Environment variable naming an extra log file
pub const FILE_ENV: &str = "MAPSCOPE_LOG_FILE";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat
{
    /// Human-readable, coloured on the console
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" | "human" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(s.to_string())),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel
{
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    /// Includes every skipped report line
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(s.to_string())),
        }
    }
}

/// Everything needed to install a subscriber
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogConfig
{
    /// Default level when `filter` is unset
    pub level: LogLevel,
    /// `EnvFilter` directives; take precedence over `level`
    pub filter: Option<String>,
    pub format: LogFormat,
    /// Also append to this file, rotated daily
    pub file: Option<PathBuf>,
}

impl LogConfig
{
    /// Build a configuration from `RUST_LOG`, `MAPSCOPE_LOG_FORMAT` and
    /// `MAPSCOPE_LOG_FILE`
    ///
    /// ## Errors
    ///
    /// Returns [`LoggingError::InvalidFormat`] for an unknown format name.
    pub fn from_env() -> Result<Self, LoggingError>
    {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`LogConfig::from_env`] with a custom variable source
    ///
    /// ## Errors
    ///
    /// Returns [`LoggingError::InvalidFormat`] for an unknown format name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggingError>
    {
        let format = lookup(FORMAT_ENV).map(|s| s.parse()).transpose()?.unwrap_or_default();

        // RUST_LOG may hold a bare level or full filter directives
        let (level, filter) = match lookup("RUST_LOG") {
            Some(value) => match value.parse::<LogLevel>() {
                Ok(level) => (level, None),
                Err(_) => (LogLevel::default(), Some(value)),
            },
            None => (LogLevel::default(), None),
        };

        Ok(Self {
            level,
            filter,
            format,
            file: lookup(FILE_ENV).filter(|s| !s.is_empty()).map(PathBuf::from),
        })
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self
    {
        self.level = level;
        self.filter = None;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self
    {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self
    {
        self.file = Some(file.into());
        self
    }

    /// Log to `directory/<YYYY-MM-DD>-mapscope.log`, named after today's
    /// UTC date
    #[must_use]
    pub fn with_session_file(self, directory: impl AsRef<Path>) -> Self
    {
        self.with_file(session_log_path(directory))
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError>
    {
        match &self.filter {
            Some(directives) => {
                EnvFilter::try_new(directives).map_err(|err| LoggingError::InvalidLevel(format!("{directives}: {err}")))
            }
            None => Ok(EnvFilter::new(Level::from(self.level).to_string())),
        }
    }
}

/// Keeps the file writer alive; buffered lines are flushed when dropped
#[derive(Debug)]
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize logging from the environment
///
/// ## Errors
///
/// Returns an error if the environment holds invalid values, the log file
/// directory can't be created or a subscriber is already installed.
pub fn init_logging() -> Result<LogGuard, LoggingError>
{
    init_logging_with(&LogConfig::from_env()?)
}

/// Initialize logging with an explicit level and format, console only
///
/// ## Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<LogGuard, LoggingError>
{
    init_logging_with(&LogConfig::default().with_level(level).with_format(format))
}

/// Initialize logging from a [`LogConfig`]
///
/// ## Errors
///
/// Returns an error if the filter directives are invalid, the log file
/// directory can't be created or a subscriber is already installed.
pub fn init_logging_with(config: &LogConfig) -> Result<LogGuard, LoggingError>
{
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = vec![console_layer(config.format, config.env_filter()?)];

    let file_guard = match &config.file {
        Some(path) => {
            let (directory, file_name) = split_log_path(path)?;
            std::fs::create_dir_all(&directory)?;
            let appender = tracing_appender::rolling::daily(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(file_layer(config.format, config.env_filter()?, writer));
            Some(guard)
        }
        None => None,
    };

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|err| LoggingError::InitializationFailed(err.to_string()))?;

    Ok(LogGuard { _file: file_guard })
}

/// Console output goes to stderr so reports printed on stdout stay clean.
fn console_layer(format: LogFormat, filter: EnvFilter) -> Box<dyn Layer<Registry> + Send + Sync>
{
    let layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(io::stderr);
    match format {
        LogFormat::Pretty => layer.with_ansi(true).with_filter(filter).boxed(),
        LogFormat::Json => layer.json().with_current_span(true).with_filter(filter).boxed(),
    }
}

fn file_layer(format: LogFormat, filter: EnvFilter, writer: NonBlocking) -> Box<dyn Layer<Registry> + Send + Sync>
{
    let layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false)
        .with_writer(writer);
    match format {
        LogFormat::Pretty => layer.with_filter(filter).boxed(),
        LogFormat::Json => layer.json().with_current_span(true).with_filter(filter).boxed(),
    }
}

/// Dated log file path inside `directory`
pub fn session_log_path(directory: impl AsRef<Path>) -> PathBuf
{
    let today = Utc::now().format("%Y-%m-%d");
    directory.as_ref().join(format!("{today}-mapscope.log"))
}

/// Directory and file name of a log path; a bare name logs to `.`.
fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf), LoggingError>
{
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(path.display().to_string()))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, PathBuf::from(file_name)))
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Unknown value for `MAPSCOPE_LOG_FORMAT`
    #[error("Invalid log format: {0}. Use 'pretty' or 'json'")]
    InvalidFormat(String),

    /// Unknown level or malformed filter directives
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Log file path has no file name
    #[error("Invalid log file path: {0}")]
    InvalidPath(String),

    /// A global subscriber is already installed
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// Creating the log directory failed
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}
