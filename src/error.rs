//! Centralized error handling for slimframe.
//!
//! Every fallible library operation returns [`Result<T>`], whose error type is
//! the [`SlimError`] enum. Matching on the variant tells the caller whether the
//! problem lies in the configuration it supplied, in the shape of its data, or
//! in the underlying data engine:
//!
//! ```
//! use slimframe::error::SlimError;
//!
//! fn describe(err: &SlimError) -> &'static str {
//!     match err {
//!         SlimError::Config { .. } => "bad configuration",
//!         SlimError::MissingValues { .. } | SlimError::UnsupportedColumn { .. } => "bad data",
//!         _ => "internal",
//!     }
//! }
//! ```
//!
//! `From` conversions exist for the error types of the crates we sit on
//! (polars, serde_json, std::io, anyhow), so `?` works across those boundaries.
//! The [`ResultExt`] trait adds `.context()` for wrapping an error with a
//! description of what was being attempted.

use std::fmt;

/// Main error type for slimframe operations.
#[derive(Debug)]
pub enum SlimError {
    /// A configuration value is outside its allowed set.
    Config {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// An evaluator was handed a column of a kind it cannot process.
    ColumnKindMismatch {
        column: String,
        expected: &'static str,
        actual: String,
    },

    /// The column's storage type has no narrowing rules (e.g. unsigned integers).
    UnsupportedColumn { column: String, dtype: String },

    /// A numeric column contains nulls, which have no defined narrowing.
    MissingValues { column: String, nulls: usize },

    /// Data processing errors raised by polars.
    DataProcessing(String),

    /// I/O errors (reading or writing datasets and config files).
    Io(std::io::Error),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for SlimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config {
                field,
                value,
                expected,
            } => write!(
                f,
                "Configuration error: {field} = {value} is invalid, expected {expected}"
            ),
            Self::ColumnKindMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "Column '{column}' has kind {actual}, but {expected} was expected"
            ),
            Self::UnsupportedColumn { column, dtype } => write!(
                f,
                "Column '{column}' has unsupported type {dtype}; no narrowing rules exist for it"
            ),
            Self::MissingValues { column, nulls } => write!(
                f,
                "Column '{column}' contains {nulls} missing value(s); numeric columns must be complete"
            ),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SlimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SlimError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for SlimError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for SlimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for SlimError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for slimframe operations.
pub type Result<T> = std::result::Result<T, SlimError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<SlimError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: SlimError = e.into();
            SlimError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: SlimError = e.into();
            SlimError::Other(format!("{}: {}", f(), err))
        })
    }
}
