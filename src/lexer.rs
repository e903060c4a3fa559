//! Lexer configuration
//!
//!     A lexer pairs a separator predicate with the set of trivia values the
//!     parser may skip. It owns no state of its own: partitioning the same
//!     input with the same lexer always yields the same fragment list, and a
//!     lexer value can be shared read-only across parallel parses.

use crate::fragment::{partition, Fragment};

/// A separator predicate plus the trivia set recognized during parsing.
#[derive(Clone)]
pub struct Lexer {
    /// Whitespace-class values skipped (and separately tokenized) by
    /// trivia removal. Each trivia value is a single separator character.
    pub trivia: Vec<char>,
    is_separator: fn(char) -> bool,
}

impl Lexer {
    pub fn new(trivia: Vec<char>, is_separator: fn(char) -> bool) -> Self {
        Self {
            trivia,
            is_separator,
        }
    }

    /// Partition `input` according to this lexer's separator predicate.
    pub fn partition<'a>(&self, input: &'a str) -> Vec<Fragment<'a>> {
        partition(input, self.is_separator)
    }

    /// True when `c` is one of this lexer's trivia values.
    pub fn is_trivia(&self, c: char) -> bool {
        self.trivia.contains(&c)
    }

    /// Splits on whitespace, punctuation, and symbols. Underscore stays part
    /// of its word so identifiers like `_foo` survive as one fragment.
    pub fn code() -> Self {
        Self::new(vec![' ', '\n'], |c| {
            c.is_whitespace() || (c.is_ascii_punctuation() && c != '_')
        })
    }

    /// Like [`Lexer::code`] but backticks are not separators, so backtick
    /// fences and backtick-quoted words survive as single fragments.
    pub fn backtick_escaped_code() -> Self {
        Self::new(vec![' ', '\n'], |c| {
            c.is_whitespace() || (c.is_ascii_punctuation() && c != '_' && c != '`')
        })
    }

    /// Splits on whitespace and the bracketing characters markdown links and
    /// autolinks are built from.
    pub fn markdown() -> Self {
        Self::new(vec!['\n', ' '], |c| {
            c.is_whitespace() || matches!(c, '[' | ']' | '(' | ')' | '<' | '>')
        })
    }
}
