//! Error types for the bacon-parse crate.

use thiserror::Error;

/// A literal that isn't one of the accepted forms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} at offset {offset}")]
pub struct LiteralError {
    /// Byte offset into the literal text.
    pub offset: usize,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Row {row}: invalid cast literal: {source}")]
    InvalidLiteral {
        row: usize,
        #[source]
        source: LiteralError,
    },

    #[error("Row {row}: cast does not match the expected shape: {source}")]
    InvalidCast {
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Row {row} has no cast column")]
    MissingColumn { row: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ParseError>;
