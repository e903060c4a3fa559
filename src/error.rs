//! Parse error taxonomy
//!
//!     Rules report a missing precondition as a soft `Ok(false)` so composite
//!     rules can try the next alternative. Only truly unrecoverable
//!     conditions become a `ParseError`, which unwinds the whole combinator
//!     stack; tokens already emitted at that point are not guaranteed
//!     meaningful and callers should discard them.

use thiserror::Error;

/// A hard error that aborts the entire parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No matching close fragment was found for an opening delimiter.
    #[error("unterminated delimiter `{delimiter}` starting at byte {offset}")]
    UnterminatedDelimiter { delimiter: String, offset: usize },

    /// An identifier violates the underscore-boundary rule.
    #[error("identifier `{identifier}` cannot begin or end with an underscore")]
    InvalidIdentifier { identifier: String },

    /// An escape marker was followed by a character outside the valid set.
    #[error("invalid escape sequence `\\{escape}`")]
    InvalidEscape { escape: char },

    /// A required follow-on token was absent.
    #[error("missing required token: expected {expected}")]
    MissingRequiredToken { expected: &'static str },

    /// A type or identifier token contains a disallowed character.
    #[error("invalid character in `{token}`")]
    InvalidCharacterClass { token: String },
}

pub type ParseResult<T> = Result<T, ParseError>;
