//! Error types for pdf-outline library.

use std::io;
use thiserror::Error;

/// Result type alias for pdf-outline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a document outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading block files or writing outlines.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A block carries a missing or invalid geometric/stylistic attribute.
    #[error("Malformed block {index}: {reason}")]
    MalformedBlock {
        /// Position of the block in reading order
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// The classifier could not produce a prediction.
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// The document contains no text blocks.
    #[error("Document {0} contains no text blocks")]
    EmptyDocument(String),

    /// Classification of a document exceeded its time budget.
    #[error("Document {document} exceeded its classification budget of {budget_ms} ms")]
    DocumentTimeout {
        /// Document identifier
        document: String,
        /// Configured budget in milliseconds
        budget_ms: u64,
    },

    /// Invalid threshold profile or pipeline options.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
