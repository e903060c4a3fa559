//! Markdown grammar
//!
//!     Line-oriented markdown elements over the bracket-splitting lexer:
//!     headers, fenced code blocks, inline links, autolinked email
//!     addresses, and a default body rule that soaks up prose until the
//!     next structural marker. Each rule is a direct composition of the
//!     nested-delimiter matchers; nothing here re-implements matching.

use crate::component::{Component, MarkdownComponent};
use crate::error::{ParseError, ParseResult};
use crate::fragment::Fragment;
use crate::lexer::Lexer;
use crate::matcher::break_pair;
use crate::parser::ParserState;
use crate::rule::{Grammar, Remaining, Repeat, Rule, RuleSet, Word};
use crate::token::{Payload, Token};
use once_cell::sync::Lazy;
use regex::Regex;

const FENCE: &str = "```";
const MAX_HEADER_DEPTH: usize = 6;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern")
});

/// Index of the next `\n` fragment at or after the cursor, or the fragment
/// count when the line is the last one.
fn line_end(state: &ParserState<'_>) -> usize {
    state.fragments[state.cursor..]
        .iter()
        .position(|f| f.text == "\n")
        .map(|relative| state.cursor + relative)
        .unwrap_or(state.fragments.len())
}

/// An ATX header: a run of `#` up to depth six, then the rest of the line as
/// the header text. Deeper runs consume the line without producing a token.
pub struct Header;

impl Rule for Header {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        let fragment = match state.current() {
            Some(f) if f.text.starts_with('#') => f,
            _ => return Ok(false),
        };
        let depth = fragment.text.chars().take_while(|c| *c == '#').count();
        let end_index = line_end(state);
        if depth > MAX_HEADER_DEPTH {
            state.cursor = end_index;
            return Ok(true);
        }

        let line_end_byte = state
            .fragments
            .get(end_index)
            .map(|f| f.start)
            .unwrap_or(state.input.len());
        // `#` is one byte, so the marker run ends `depth` bytes in; the
        // header text is the rest of the line without its leading spaces.
        let raw = &state.input[fragment.start + depth..line_end_byte];
        let text = raw.trim_start_matches(' ');
        let start = fragment.start + depth + (raw.len() - text.len());
        state.tokens.push(Token::Tagged(
            Component::Markdown(MarkdownComponent::Header(depth)),
            Payload::Fragment(Fragment::new(start, text)),
        ));
        state.cursor = end_index;
        Ok(true)
    }
}

/// A fenced code block: a ```` ``` ```` fragment (optionally fused with a
/// language id), content lines, and a closing fence at the start of a line.
pub struct CodeBlock;

impl Rule for CodeBlock {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        let fence = match state.current() {
            Some(f) if f.text.starts_with(FENCE) => f,
            _ => return Ok(false),
        };
        let id = (fence.text.len() > FENCE.len()).then(|| fence.text[FENCE.len()..].to_string());

        let close = state.fragments[state.cursor + 1..]
            .iter()
            .enumerate()
            .position(|(relative, f)| {
                let index = state.cursor + 1 + relative;
                f.text == FENCE && state.fragments[index - 1].text == "\n"
            })
            .map(|relative| state.cursor + 1 + relative);
        let close = match close {
            Some(index) => index,
            None => return Ok(false),
        };

        // Skip the newline after the opening fence and the one before the
        // closing fence; what remains is the block content.
        let content_start = (state.cursor + 2).min(close);
        let content_end = close.saturating_sub(1).max(content_start);
        state.tokens.push(Token::Tagged(
            Component::Markdown(MarkdownComponent::CodeBlock(id)),
            Payload::Slice(state.fragments[content_start..content_end].to_vec()),
        ));
        state.cursor = close + 1;
        Ok(true)
    }
}

/// An inline `[label](url)` link: two chained bracket matches, the second
/// required to start immediately after the first closes.
pub struct Link;

impl Rule for Link {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        let open = match state.current() {
            Some(f) if f.text == "[" => f,
            _ => return Ok(false),
        };
        let label = break_pair(&state.fragments[state.cursor..], "[", "]").ok_or_else(|| {
            ParseError::UnterminatedDelimiter {
                delimiter: "]".to_string(),
                offset: open.start,
            }
        })?;
        let label_close = state.cursor + label.end - 1;

        match state.fragments.get(label_close + 1) {
            Some(f) if f.text == "(" => {}
            _ => return Ok(false),
        }
        let url = break_pair(&state.fragments[label_close + 1..], "(", ")").ok_or_else(|| {
            ParseError::UnterminatedDelimiter {
                delimiter: ")".to_string(),
                offset: state.fragments[label_close + 1].start,
            }
        })?;
        let url_close = label_close + 1 + url.end - 1;

        let span = &state.fragments[state.cursor..url_close + 1];
        if span.iter().any(|f| f.text == "\n") {
            return Ok(false);
        }
        let label_text: String = state.fragments[state.cursor + 1..label_close]
            .iter()
            .map(|f| f.text)
            .collect();
        let url_text: String = state.fragments[label_close + 2..url_close]
            .iter()
            .map(|f| f.text)
            .collect();
        state.tokens.push(Token::Tagged(
            Component::Markdown(MarkdownComponent::Link {
                label: (!label_text.is_empty()).then_some(label_text),
                url: (!url_text.is_empty()).then_some(url_text),
            }),
            Payload::Slice(span.to_vec()),
        ));
        state.cursor = url_close + 1;
        Ok(true)
    }
}

/// An `<addr>` autolink whose interior matches the email pattern.
pub struct Email;

impl Rule for Email {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        let open = match state.current() {
            Some(f) if f.text == "<" => f,
            _ => return Ok(false),
        };
        let range = break_pair(&state.fragments[state.cursor..], "<", ">").ok_or_else(|| {
            ParseError::UnterminatedDelimiter {
                delimiter: ">".to_string(),
                offset: open.start,
            }
        })?;
        if range.len() <= 2 {
            return Ok(false);
        }
        let close = state.cursor + range.end - 1;
        let address: String = state.fragments[state.cursor + 1..close]
            .iter()
            .map(|f| f.text)
            .collect();
        if !EMAIL.is_match(&address) {
            return Ok(false);
        }
        state.tokens.push(Token::Tagged(
            Component::Markdown(MarkdownComponent::Email(address)),
            Payload::Slice(state.fragments[state.cursor..close + 1].to_vec()),
        ));
        state.cursor = close + 1;
        Ok(true)
    }
}

/// The default prose rule: everything up to the next newline or structural
/// marker becomes one body token.
pub struct Body;

impl Body {
    fn is_marker(fragment: Fragment<'_>) -> bool {
        fragment.text == "\n"
            || fragment.text == "["
            || fragment.text == "<"
            || fragment.text.starts_with('#')
            || fragment.text.starts_with(FENCE)
    }
}

impl Rule for Body {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        let mut run: Vec<Fragment<'_>> = Vec::new();
        while let Some(fragment) = state.current() {
            if Self::is_marker(fragment) {
                break;
            }
            run.push(fragment);
            state.advance(1);
        }
        if run.is_empty() {
            return Ok(false);
        }
        state.tokens.push(Token::Tagged(
            Component::Markdown(MarkdownComponent::Body),
            Payload::Slice(run),
        ));
        Ok(true)
    }
}

/// The complete markdown tokenizer.
pub fn grammar() -> Grammar {
    Grammar::new(
        Lexer::markdown(),
        RuleSet::new()
            .then(Repeat::new(
                RuleSet::new()
                    .then(Header)
                    .then(CodeBlock)
                    .then(Link)
                    .then(Email)
                    .then(Body)
                    .then(Word),
            ))
            .then(Remaining::unknown()),
    )
}
