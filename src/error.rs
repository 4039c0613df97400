//! Error types for the textprep library.
//!
//! All fallible operations in the crate return [`Result`], whose error type
//! is the [`TextPrepError`] enum. Constructor helpers are provided for the
//! common categories so call sites stay short.
//!
//! # Examples
//!
//! ```
//! use textprep::error::{Result, TextPrepError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TextPrepError::analysis("engine returned no tokens"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for textprep operations.
#[derive(Error, Debug)]
pub enum TextPrepError {
    /// I/O errors (cache files, directories).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (external engine, annotation contracts).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Cache-related errors (persistence, corrupt cache files).
    #[error("Cache error: {0}")]
    Cache(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`TextPrepError`].
pub type Result<T> = std::result::Result<T, TextPrepError>;

impl TextPrepError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TextPrepError::Analysis(msg.into())
    }

    /// Create a new cache error.
    pub fn cache<S: Into<String>>(msg: S) -> Self {
        TextPrepError::Cache(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TextPrepError::Other(msg.into())
    }
}
