//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the engine for caller contract violations and bad input records.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid record '{lemma}': {reason}")]
    InvalidRecord { lemma: String, reason: String },
}

/// Errors that can occur while reading an import or a saved progress file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid progress file: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("progress file must contain a JSON array of words")]
    NotAnArray,

    #[error("empty input")]
    EmptyInput,
}

/// Failure reported by an external text generator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerationError {
    #[error("text generator unavailable: {0}")]
    Unavailable(String),

    #[error("text generator returned an unusable response: {0}")]
    BadResponse(String),
}
