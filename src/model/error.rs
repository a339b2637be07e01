//! Error types for viewkit.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level CLI error wrapping all domain-specific failures
//!   - [`LoadError`] - Page loader failures surfaced through pagination
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing initialization failures
//!   - `std::io::Error` / `serde_json::Error` - CLI input failures
//!
//! # Error Recovery Strategy
//!
//! Load errors are **non-fatal** for views: the pagination controller records them in
//! its error state, schedules a redraw so the error is displayed, and hands the same error
//! back to the caller. Nothing is retried or swallowed. Validators never produce errors;
//! malformed input simply fails validation.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Top-level application error for the `viewkit` binary.
///
/// All domain-specific error types convert to `AppError` via `From`, enabling clean
/// propagation with the `?` operator.
///
/// # Examples
///
/// ```no_run
/// use viewkit::model::error::{AppError, LoadError};
///
/// fn run() -> Result<(), AppError> {
///     // LoadError converts to AppError via From
///     load()?;
///     Ok(())
/// }
/// # fn load() -> Result<(), LoadError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// A page load failed while paginating.
    #[error("Page load failed: {0}")]
    Load(#[from] LoadError),

    /// Failed to read an input file.
    #[error("Failed to read {path}: {source}")]
    Input {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input file did not contain a JSON array.
    #[error("Invalid JSON in {path}: {reason}")]
    InvalidJson {
        /// The offending file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Runtime or terminal I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure reported by a page loader.
///
/// The `Display` output is what the pagination controller stores as its error message,
/// so every variant renders a message suitable for showing to an operator.
///
/// # Examples
///
/// ```
/// use viewkit::model::error::LoadError;
///
/// let err = LoadError::Request("503 Service Unavailable".to_string());
/// assert_eq!(err.to_string(), "503 Service Unavailable");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The underlying request failed; carries the failure reason verbatim.
    #[error("{0}")]
    Request(String),

    /// `next_page` was called before any `first_page` established the filter.
    #[error("next page requested before the first page was loaded")]
    NotStarted,

    /// The response could not be interpreted as a page of items.
    #[error("malformed page response: {0}")]
    Malformed(String),
}

impl LoadError {
    /// Convenience constructor for request failures.
    pub fn request(reason: impl Into<String>) -> Self {
        LoadError::Request(reason.into())
    }
}
