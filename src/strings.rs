//! String literal sub-parser
//!
//!     Strings get their own rule because their interior does not follow the
//!     fragment grammar: escape sequences and interpolations are positioned
//!     at character level, not at separator boundaries. The rule resolves
//!     the full literal span with the balanced same-delimiter matcher, then
//!     either emits the whole interior as one `string.literal` token (no
//!     escape marker present) or walks the interior character by character,
//!     cutting synthetic sub-fragments for static runs, two-character
//!     escapes, and `\( ... )` interpolation spans.
//!
//!     Interpolation content is captured as an opaque span and not
//!     re-tokenized here; consumers that want its structure feed it back
//!     through a grammar of their own.

use crate::component::{Component, StringComponent};
use crate::error::{ParseError, ParseResult};
use crate::fragment::Fragment;
use crate::matcher::break_even;
use crate::parser::ParserState;
use crate::rule::Rule;
use crate::token::{Payload, Token};

const QUOTE: &str = "\"";
const VALID_ESCAPES: [char; 4] = ['n', 's', 'b', 't'];

/// Recognizes one double-quoted string literal at the cursor.
pub struct StringLiteral;

impl Rule for StringLiteral {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        match state.current() {
            Some(fragment) if fragment.text == QUOTE => {}
            _ => return Ok(false),
        }

        let range = break_even(&state.fragments[state.cursor..], QUOTE).ok_or_else(|| {
            ParseError::UnterminatedDelimiter {
                delimiter: QUOTE.to_string(),
                offset: state.fragments[state.cursor].start,
            }
        })?;
        let open = state.fragments[state.cursor];
        let close_index = state.cursor + range.end - 1;
        let close = state.fragments[close_index];

        let interior_start = open.end();
        let interior_end = close.start;
        let interior = &state.input[interior_start..interior_end];

        if !interior.contains('\\') {
            state.tokens.push(Token::Parameter(
                Component::String(StringComponent::Literal),
                Payload::Fragment(Fragment::new(interior_start, interior)),
            ));
            state.cursor = close_index + 1;
            return Ok(true);
        }

        state.tokens.push(Token::Parameter(
            Component::String(StringComponent::Open),
            Payload::Fragment(open),
        ));
        walk_interior(state, interior_start, interior_end)?;
        state.tokens.push(Token::Parameter(
            Component::String(StringComponent::Close),
            Payload::Fragment(close),
        ));
        state.cursor = close_index + 1;
        Ok(true)
    }
}

/// Character-level walk over the literal interior, emitting static runs,
/// escapes, and interpolation spans as synthetic sub-fragments.
fn walk_interior(state: &mut ParserState<'_>, start: usize, end: usize) -> ParseResult<()> {
    let input = state.input;
    let mut run_start = start;
    let mut offset = start;
    while offset < end {
        let c = match input[offset..].chars().next() {
            Some(c) => c,
            None => break,
        };
        if c != '\\' {
            offset += c.len_utf8();
            continue;
        }

        if run_start < offset {
            state.tokens.push(Token::Parameter(
                Component::String(StringComponent::Static),
                Payload::Fragment(Fragment::new(run_start, &input[run_start..offset])),
            ));
        }

        let next = input[offset + 1..end]
            .chars()
            .next()
            .ok_or(ParseError::MissingRequiredToken {
                expected: "escape sequence",
            })?;
        if next == '(' {
            let close = matching_paren(input, offset + 1, end).ok_or_else(|| {
                ParseError::UnterminatedDelimiter {
                    delimiter: ")".to_string(),
                    offset: offset + 1,
                }
            })?;
            state.tokens.push(Token::Parameter(
                Component::String(StringComponent::Interpolated),
                Payload::Fragment(Fragment::new(offset, &input[offset..close + 1])),
            ));
            offset = close + 1;
        } else if VALID_ESCAPES.contains(&next) {
            let span = offset + 1 + next.len_utf8();
            state.tokens.push(Token::Parameter(
                Component::String(StringComponent::Escaped),
                Payload::Fragment(Fragment::new(offset, &input[offset..span])),
            ));
            offset = span;
        } else {
            return Err(ParseError::InvalidEscape { escape: next });
        }
        run_start = offset;
    }

    if run_start < end {
        state.tokens.push(Token::Parameter(
            Component::String(StringComponent::Static),
            Payload::Fragment(Fragment::new(run_start, &input[run_start..end])),
        ));
    }
    Ok(())
}

/// Byte index of the `)` matching the `(` at `open`, counting nested pairs,
/// scanning no further than `limit`.
fn matching_paren(input: &str, open: usize, limit: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in input[open..limit].char_indices() {
        if c == '(' {
            depth += 1;
        } else if c == ')' {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(open + index);
            }
        }
    }
    None
}
