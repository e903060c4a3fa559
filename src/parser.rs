//! Parser state
//!
//!     One `ParserState` lives for exactly one parse invocation: it owns the
//!     fragment list, the cursor into it, and the accumulated token stream.
//!     The fragment list and cursor are computed eagerly at construction and
//!     then mutated in place as rules consume input. The cursor only
//!     increases or is explicitly repositioned by a rule (for example when
//!     jumping past a matched delimiter region); it never exceeds the
//!     fragment count. The token list is append-only during a parse pass.
//!
//!     Cursor bounds are not validated implicitly. Rules must check
//!     `cursor < fragments.len()` before dereferencing; indexing out of
//!     bounds is a programming error and panics rather than becoming a
//!     recoverable parse condition.

use crate::fragment::{linear_position, Fragment, LinearPosition};
use crate::lexer::Lexer;
use crate::token::Token;

/// Mutable state threaded through the whole rule tree of one parse.
pub struct ParserState<'a> {
    pub input: &'a str,
    pub lexer: Lexer,
    pub fragments: Vec<Fragment<'a>>,
    /// The current read position within the fragment list.
    pub cursor: usize,
    pub tokens: Vec<Token<'a>>,
}

impl<'a> ParserState<'a> {
    /// Partitions `input` and positions the cursor at the first fragment.
    pub fn new(input: &'a str, lexer: Lexer) -> Self {
        let fragments = lexer.partition(input);
        Self {
            input,
            lexer,
            fragments,
            cursor: 0,
            tokens: Vec::new(),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.fragments.len()
    }

    /// The fragment under the cursor, if any.
    pub fn current(&self) -> Option<Fragment<'a>> {
        self.fragments.get(self.cursor).copied()
    }

    /// The fragment `n` positions past the cursor, if any.
    pub fn peek(&self, n: usize) -> Option<Fragment<'a>> {
        self.fragments.get(self.cursor + n).copied()
    }

    /// Moves the cursor forward by `n` fragments without emitting tokens.
    pub fn advance(&mut self, n: usize) {
        self.cursor += n;
    }

    /// Consumes leading trivia runs, emitting one `Trivia` token per run of
    /// a repeated trivia value. Loops until the fragment at the front is not
    /// a trivia value. Returns whether anything was consumed; calling this
    /// again immediately consumes nothing.
    pub fn remove_trivia(&mut self) -> bool {
        let mut removed = false;
        while let Some(element) = self.trivia_at(self.cursor) {
            let mut count = 1;
            while self.trivia_at(self.cursor + count) == Some(element) {
                count += 1;
            }
            self.tokens.push(Token::Trivia { element, count });
            self.cursor += count;
            removed = true;
        }
        removed
    }

    /// The trivia character at fragment `index`, when that fragment is a
    /// single-character trivia value.
    fn trivia_at(&self, index: usize) -> Option<char> {
        let c = self.fragments.get(index)?.single_char()?;
        self.lexer.is_trivia(c).then_some(c)
    }

    /// Line/column of a byte offset in the input, by direct newline scan.
    pub fn position_of(&self, offset: usize) -> LinearPosition {
        linear_position(self.input, offset)
    }
}
