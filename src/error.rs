//! Error types for gstree

use crate::tree::types::DocId;
use thiserror::Error;

/// Errors returned by tree construction and the record reader
#[derive(Error, Debug)]
pub enum GstError {
    #[error("invalid character {ch:?} at offset {offset}: reserved as document terminator")]
    InvalidCharacter { ch: char, offset: usize },

    #[error("malformed input at byte {offset}: {source}")]
    MalformedInput {
        offset: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("document of {len} characters exceeds the configured limit of {limit}")]
    DocumentTooLarge { len: usize, limit: usize },

    #[error("unknown document id: {0}")]
    UnknownDocument(DocId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for gstree operations
pub type Result<T> = std::result::Result<T, GstError>;

impl GstError {
    /// Build a `MalformedInput` error from a failed UTF-8 decode
    pub fn malformed(source: std::str::Utf8Error) -> Self {
        GstError::MalformedInput {
            offset: source.valid_up_to(),
            source,
        }
    }
}
