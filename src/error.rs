//! Error types for box tree decoding.

use std::io;
use thiserror::Error;

/// Result type for box tree decoding.
pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying source could not be read or seeked.
    #[error("io: {0}")]
    Io(#[from] io::Error),

    /// A read asked for more bytes than the source holds.
    #[error("unexpected end of stream at offset {position}")]
    UnexpectedEndOfStream { position: u64 },

    /// Declared size smaller than the header that declared it.
    #[error("invalid box size {size} for '{tag}' at offset {start}")]
    InvalidSize { tag: String, start: u64, size: u64 },

    #[error("invalid fixed-point value '{0}'")]
    InvalidFixedPoint(String),

    /// A decoder consumed bytes belonging to the next sibling.
    #[error("'{tag}' at offset {start} overran its declared end by {excess} bytes")]
    Overrun { tag: String, start: u64, excess: u64 },

    #[error("malformed '{tag}' payload: {reason}")]
    Malformed { tag: String, reason: String },
}

impl ParseError {
    pub fn malformed(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Only source I/O failures abort a parse; everything else is local to one box.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
