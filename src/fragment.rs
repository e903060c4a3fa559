//! Fragments and the partitioner
//!
//!     A fragment is a minimal, non-overlapping view over the original input,
//!     produced once by partitioning and never mutated afterwards. The byte
//!     range of every fragment is preserved so that location tracking keeps
//!     working for the tooling that consumes the token stream. It is critical
//!     that no later stage loses this information: concatenating all fragments
//!     in order must reproduce the source exactly.
//!
//! The Partitioner
//!
//!     Partitioning is a single left-to-right scan driven by a separator
//!     predicate. Every maximal run of non-separator characters becomes one
//!     fragment and every separator character becomes its own single-character
//!     fragment. Separators are never merged with their neighbors or with each
//!     other, and empty fragments are never emitted.

use serde::Serialize;
use std::fmt;

/// An immutable view over a region of the original input.
#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fragment<'a> {
    /// Byte offset of this fragment within the original input.
    pub start: usize,
    /// The fragment's text, borrowed from the original input.
    pub text: &'a str,
}

impl<'a> Fragment<'a> {
    pub fn new(start: usize, text: &'a str) -> Self {
        Self { start, text }
    }

    /// Byte offset one past the end of this fragment.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// The fragment's single character, if it holds exactly one.
    pub fn single_char(&self) -> Option<char> {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Debug for Fragment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.text, self.start)
    }
}

/// Splits `input` into fragments using `is_separator`.
///
/// Every maximal run of non-separator characters is one fragment; every
/// separator character occupies its own fragment. The output is stable and
/// lossless: the same input and predicate always produce the same fragments,
/// and joining them in order reproduces `input` exactly.
pub fn partition<'a>(input: &'a str, is_separator: impl Fn(char) -> bool) -> Vec<Fragment<'a>> {
    let mut parts = Vec::new();
    let mut run_start = 0;
    for (index, ch) in input.char_indices() {
        if is_separator(ch) {
            if run_start < index {
                parts.push(Fragment::new(run_start, &input[run_start..index]));
            }
            let sep_end = index + ch.len_utf8();
            parts.push(Fragment::new(index, &input[index..sep_end]));
            run_start = sep_end;
        }
    }
    if run_start < input.len() {
        parts.push(Fragment::new(run_start, &input[run_start..]));
    }
    parts
}

/// Generic-element counterpart of [`partition`] for inputs that are not text.
///
/// The same contract holds: maximal runs of non-separator elements are one
/// slice, each separator element is its own single-element slice, and no
/// empty slices are emitted.
pub fn partition_slice<'a, T: PartialEq>(
    input: &'a [T],
    is_separator: impl Fn(&T) -> bool,
) -> Vec<&'a [T]> {
    let mut parts = Vec::new();
    let mut run_start = 0;
    for (index, element) in input.iter().enumerate() {
        if is_separator(element) {
            if run_start < index {
                parts.push(&input[run_start..index]);
            }
            parts.push(&input[index..index + 1]);
            run_start = index + 1;
        }
    }
    if run_start < input.len() {
        parts.push(&input[run_start..]);
    }
    parts
}

/// A line/column position recovered from a byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LinearPosition {
    /// 1-based line number.
    pub line: usize,
    /// 0-based column within the line, counted in characters.
    pub column: usize,
}

/// Computes the line/column position of `offset` by scanning for newlines.
///
/// This is O(n) per lookup; callers that need many lookups should precompute
/// line-start offsets instead of calling this per index.
pub fn linear_position(input: &str, offset: usize) -> LinearPosition {
    let mut line = 1;
    let mut column = 0;
    for (index, ch) in input.char_indices() {
        if index >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    LinearPosition { line, column }
}
