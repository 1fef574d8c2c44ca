//! Error types for the Veritas library.
//!
//! All fallible operations in Veritas return [`Result`], with the
//! [`VeritasError`] enum describing what went wrong. Constructor helpers
//! exist for the common categories so call sites stay terse.
//!
//! # Examples
//!
//! ```
//! use veritas::error::{Result, VeritasError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VeritasError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Veritas operations.
#[derive(Error, Debug)]
pub enum VeritasError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dataset-related errors (merging, master dataset loading)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Text analysis errors (normalization, tokenization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Model training errors
    #[error("Training error: {0}")]
    Training(String),

    /// Artifact persistence errors (saving/loading model or vectorizer)
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Inference-time errors
    #[error("Inference error: {0}")]
    Inference(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VeritasError.
pub type Result<T> = std::result::Result<T, VeritasError>;

impl VeritasError {
    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        VeritasError::Dataset(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        VeritasError::Analysis(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        VeritasError::Training(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        VeritasError::Artifact(msg.into())
    }

    /// Create a new inference error.
    pub fn inference<S: Into<String>>(msg: S) -> Self {
        VeritasError::Inference(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        VeritasError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        VeritasError::Other(format!("Not found: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        VeritasError::Other(msg.into())
    }
}
