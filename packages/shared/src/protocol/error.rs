//! Protocol error types.

use thiserror::Error;

/// Reasons a text frame is not a valid protocol unit
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Empty or whitespace-only input
    #[error("empty message")]
    Empty,

    /// A header field does not start with `[`
    #[error("expected '[' at start of header field")]
    MissingOpeningBracket,

    /// A header field is opened but never closed with `]`
    #[error("header field is missing its closing ']'")]
    UnterminatedField,

    /// Fewer than the three required header fields
    #[error("header must contain [command][time][sender]")]
    MissingField,

    /// Text after the header that is not a ` - ` content separator
    #[error("unexpected text after header: {0:?}")]
    UnexpectedTrailer(String),

    /// Command name outside LOGIN / CHAT / FLOWER / SYSTEM
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
