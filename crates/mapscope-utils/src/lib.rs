//! # mapscope Utilities
//!
//! Shared logging setup and its configuration for mapscope applications.
//!
//! `mapscope-core` only emits `tracing` events and never installs a
//! subscriber. This crate is the entry point for binaries built on it: call
//! one of the `init_logging*` functions once at startup and keep the
//! returned [`LogGuard`] alive until exit.
//!
//! ```rust,no_run
//! use mapscope_utils::{init_logging_with, LogConfig, LogLevel};
//!
//! let config = LogConfig::default().with_level(LogLevel::Debug).with_session_file("logs");
//! let _guard = init_logging_with(&config).expect("Failed to initialize logging");
//! ```
//!
//! `examples/inspect_map.rs` shows a complete program.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{
    init_logging, init_logging_with, init_logging_with_level, session_log_path, LogConfig, LogFormat, LogGuard, LogLevel, LoggingError,
};
pub use tracing::{debug, error, info, trace, warn};
