//! Rule combinators
//!
//!     A rule is the polymorphic unit of grammar: it inspects the parser
//!     state, consumes fragments on success, and reports a match. Composite
//!     rules delegate to an ordered sub-rule list collected through the
//!     [`RuleSet`] builder. Match reporting is three-valued: `Ok(true)` for
//!     a match, `Ok(false)` for a soft no-match (try the next alternative),
//!     and `Err` for a hard parse error that unwinds the whole call tree.
//!
//!     Token emission is not transactional. A sequence that fails part-way
//!     leaves the tokens emitted by its earlier sub-rules in place; callers
//!     that receive a hard error should discard the token stream.

use crate::component::{BracketComponent, Component};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Lexer;
use crate::matcher::break_pair;
use crate::parser::ParserState;
use crate::token::{Payload, Token};

/// A composable unit of grammar.
pub trait Rule: Send + Sync {
    /// Applies this rule at the current cursor, mutating `state.tokens` and
    /// `state.cursor` on success.
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool>;
}

/// An ordered list of rules, assembled by ordinary function calls.
///
/// Applying a rule set runs sequence semantics: trivia is removed, each rule
/// runs in order, and the first soft failure aborts the rest (fail-fast, no
/// rollback of tokens already emitted).
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule.
    pub fn then(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends a rule when one is given; the optional/either branches of the
    /// original builder syntax reduce to this.
    pub fn maybe(mut self, rule: Option<impl Rule + 'static>) -> Self {
        if let Some(rule) = rule {
            self.rules.push(Box::new(rule));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn items(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Sequence semantics: trivia, each rule in order, fail-fast.
    pub fn apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        state.remove_trivia();
        for rule in &self.rules {
            if !rule.try_apply(state)? {
                return Ok(false);
            }
            state.remove_trivia();
        }
        Ok(true)
    }

    /// Alternative semantics: rules in order, first match wins.
    pub fn apply_first(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        for rule in &self.rules {
            if rule.try_apply(state)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Rule for RuleSet {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        self.apply(state)
    }
}

/// A named bag of sub-rules with no control flow of its own; equivalent to a
/// sequence, used purely for logical grouping.
pub struct Group {
    pub name: &'static str,
    rules: RuleSet,
}

impl Group {
    pub fn new(name: &'static str, rules: RuleSet) -> Self {
        Self { name, rules }
    }
}

impl Rule for Group {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        self.rules.apply(state)
    }
}

/// Runs its sub-rules in a loop until the cursor reaches the fragment-list
/// end. Each iteration tries the sub-rules in order and restarts from the
/// top as soon as one succeeds (first match wins, not longest match). When
/// no sub-rule matches and the cursor has not moved, the loop advances by
/// one fragment so it always makes progress.
pub struct Repeat {
    rules: RuleSet,
}

impl Repeat {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }
}

impl Rule for Repeat {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        while !state.is_at_end() {
            state.remove_trivia();
            if state.is_at_end() {
                break;
            }
            let before = state.cursor;
            let matched = self.rules.apply_first(state)?;
            if !matched && state.cursor == before {
                state.advance(1);
            }
        }
        Ok(true)
    }
}

type RuleFactory = Box<dyn Fn(usize) -> RuleSet + Send + Sync>;

/// A delimiter-bounded break: locates the region from `open` to `close`,
/// runs header rules against the fragments before it, then content rules
/// inside it, bracketing the region with `bracket.start` / `bracket.end`
/// parameter tokens.
pub struct Break {
    open: &'static str,
    close: &'static str,
    header: RuleFactory,
    content: RuleFactory,
}

impl Break {
    /// `header` is built from the region's start index, `content` from the
    /// index one past its closing fragment.
    pub fn new(
        open: &'static str,
        close: &'static str,
        header: impl Fn(usize) -> RuleSet + Send + Sync + 'static,
        content: impl Fn(usize) -> RuleSet + Send + Sync + 'static,
    ) -> Self {
        Self {
            open,
            close,
            header: Box::new(header),
            content: Box::new(content),
        }
    }
}

impl Rule for Break {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        state.remove_trivia();
        let relative = break_pair(&state.fragments[state.cursor..], self.open, self.close)
            .ok_or_else(|| ParseError::UnterminatedDelimiter {
                delimiter: self.close.to_string(),
                offset: state
                    .current()
                    .map(|f| f.start)
                    .unwrap_or(state.input.len()),
            })?;
        let open_index = state.cursor + relative.start;
        let close_index = state.cursor + relative.end - 1;

        // Header rules parse whatever sits between the cursor and the
        // opening fragment, e.g. a type annotation before a body.
        let header = (self.header)(open_index);
        for rule in header.items() {
            state.remove_trivia();
            rule.try_apply(state)?;
            state.remove_trivia();
        }

        // Whatever the header rules left unconsumed still has to reach the
        // token stream before the cursor jumps to the opener.
        while state.cursor < open_index {
            if !state.remove_trivia() {
                if let Some(fragment) = state.current() {
                    state.tokens.push(Token::Fragment(fragment));
                }
                state.advance(1);
            }
        }

        state.cursor = open_index;
        let opener = state.fragments[open_index];
        state.tokens.push(Token::Parameter(
            Component::Bracket(BracketComponent::Start),
            Payload::Fragment(opener),
        ));
        state.advance(1);

        let content = (self.content)(close_index + 1);
        while state.cursor < close_index {
            state.remove_trivia();
            if state.cursor >= close_index {
                break;
            }
            if !content.apply_first(state)? {
                state.advance(1);
            }
        }

        state.cursor = close_index;
        let closer = state.fragments[close_index];
        state.tokens.push(Token::Parameter(
            Component::Bracket(BracketComponent::End),
            Payload::Fragment(closer),
        ));
        state.advance(1);
        Ok(true)
    }
}

/// Wraps an arbitrary state-mutating function as a rule; the escape hatch
/// for declarative hook points such as keyword dispatchers.
pub struct Perform<F>(pub F);

impl<F> Rule for Perform<F>
where
    F: Fn(&mut ParserState<'_>) -> ParseResult<bool> + Send + Sync,
{
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        (self.0)(state)
    }
}

/// Captures all fragments from the cursor to the end as one tagged slice
/// without consuming them. Always reports a soft no-match, so it can serve
/// as a catch-all tail without terminating a surrounding loop early.
pub struct Remaining {
    component: Component,
}

impl Remaining {
    pub fn new(component: Component) -> Self {
        Self { component }
    }

    pub fn unknown() -> Self {
        Self::new(Component::Unknown)
    }
}

impl Rule for Remaining {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        if !state.is_at_end() {
            let rest = state.fragments[state.cursor..].to_vec();
            state
                .tokens
                .push(Token::Parameter(self.component.clone(), Payload::Slice(rest)));
        }
        Ok(false)
    }
}

/// Advances the cursor by a fixed amount; always succeeds.
pub struct Offset {
    pub amount: usize,
}

impl Offset {
    pub fn new(amount: usize) -> Self {
        Self { amount }
    }
}

impl Rule for Offset {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        state.advance(self.amount);
        Ok(true)
    }
}

/// Emits the fragment under the cursor as a raw token and advances. The
/// catch-all that keeps repetition loops progressing and token streams
/// lossless.
pub struct Word;

impl Rule for Word {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        match state.current() {
            Some(fragment) => {
                state.tokens.push(Token::Fragment(fragment));
                state.advance(1);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// The pluggable tokenizer seam: anything that turns input text into a token
/// stream. The combinator engine implements this through [`Grammar`]; an
/// external full-fidelity tokenizer can stand behind the same interface.
pub trait Tokenize {
    fn tokenize<'a>(&self, input: &'a str) -> ParseResult<Vec<Token<'a>>>;
}

/// A lexer plus a top-level rule set: a complete, reusable tokenizer.
pub struct Grammar {
    lexer: Lexer,
    rules: RuleSet,
}

impl Grammar {
    pub fn new(lexer: Lexer, rules: RuleSet) -> Self {
        Self { lexer, rules }
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }
}

impl Tokenize for Grammar {
    fn tokenize<'a>(&self, input: &'a str) -> ParseResult<Vec<Token<'a>>> {
        let mut state = ParserState::new(input, self.lexer.clone());
        // The top-level match result is informational; the tokens are the
        // output. Hard errors still abort.
        self.rules.apply(&mut state)?;
        Ok(state.tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Fragment;

    fn state(input: &str) -> ParserState<'_> {
        ParserState::new(input, Lexer::code())
    }

    /// A rule that matches a fixed fragment text and consumes it silently.
    struct Expect(&'static str);

    impl Rule for Expect {
        fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
            match state.current() {
                Some(f) if f.text == self.0 => {
                    state.advance(1);
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    #[test]
    fn test_sequence_fails_fast() {
        let rules = RuleSet::new().then(Expect("a")).then(Expect("x")).then(Expect("b"));
        let mut s = state("a b");
        assert!(!rules.apply(&mut s).unwrap());
        // "a" was consumed before the failure; emission is not rolled back.
        assert_eq!(s.cursor, 1);
    }

    #[test]
    fn test_sequence_removes_trivia_between_rules() {
        let rules = RuleSet::new().then(Expect("a")).then(Expect("b"));
        let mut s = state("  a  b");
        assert!(rules.apply(&mut s).unwrap());
        assert!(s.is_at_end());
    }

    #[test]
    fn test_repeat_always_progresses() {
        // No sub-rule ever matches; the loop must still reach the end.
        let repeat = Repeat::new(RuleSet::new().then(Expect("never")));
        let mut s = state("a b c");
        assert!(repeat.try_apply(&mut s).unwrap());
        assert!(s.is_at_end());
    }

    #[test]
    fn test_repeat_restarts_from_the_top() {
        let repeat = Repeat::new(RuleSet::new().then(Expect("a")).then(Word));
        let mut s = state("aba");
        // "aba" is a single fragment; Word consumes it after Expect fails.
        assert!(repeat.try_apply(&mut s).unwrap());
        assert_eq!(s.tokens, vec![Token::Fragment(Fragment::new(0, "aba"))]);
    }

    #[test]
    fn test_break_brackets_the_region() {
        let rule = Break::new(
            "{",
            "}",
            |_| RuleSet::new(),
            |_| RuleSet::new().then(Word),
        );
        let mut s = state("{ a }");
        assert!(rule.try_apply(&mut s).unwrap());
        assert_eq!(s.tokens.len(), 5); // start, trivia, word, trivia, end
        assert_eq!(
            s.tokens.first().map(|t| t.component().description()),
            Some("bracket.start".to_string())
        );
        assert_eq!(
            s.tokens.last().map(|t| t.component().description()),
            Some("bracket.end".to_string())
        );
        assert!(s.is_at_end());
    }

    #[test]
    fn test_break_unterminated_is_hard() {
        let rule = Break::new("{", "}", |_| RuleSet::new(), |_| RuleSet::new());
        let mut s = state("{ a");
        assert_eq!(
            rule.try_apply(&mut s),
            Err(ParseError::UnterminatedDelimiter {
                delimiter: "}".to_string(),
                offset: 0,
            })
        );
    }

    #[test]
    fn test_remaining_captures_without_consuming() {
        let rule = Remaining::unknown();
        let mut s = state("a b");
        assert!(!rule.try_apply(&mut s).unwrap());
        assert_eq!(s.cursor, 0);
        assert_eq!(
            s.tokens,
            vec![Token::Parameter(
                Component::Unknown,
                Payload::Slice(vec![
                    Fragment::new(0, "a"),
                    Fragment::new(1, " "),
                    Fragment::new(2, "b"),
                ])
            )]
        );
    }

    #[test]
    fn test_remaining_at_end_emits_nothing() {
        let rule = Remaining::unknown();
        let mut s = state("a");
        s.advance(1);
        assert!(!rule.try_apply(&mut s).unwrap());
        assert!(s.tokens.is_empty());
    }

    #[test]
    fn test_group_behaves_like_a_sequence() {
        let group = Group::new(
            "pair",
            RuleSet::new().then(Expect("a")).then(Expect("b")),
        );
        assert_eq!(group.name, "pair");
        let mut s = state("a b");
        assert!(group.try_apply(&mut s).unwrap());
        assert!(s.is_at_end());
    }

    #[test]
    fn test_offset_always_succeeds() {
        let mut s = state("a b c");
        assert!(Offset::new(2).try_apply(&mut s).unwrap());
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn test_perform_wraps_a_closure() {
        let rule = Perform(|state: &mut ParserState<'_>| {
            state.advance(1);
            Ok(true)
        });
        let mut s = state("a b");
        assert!(rule.try_apply(&mut s).unwrap());
        assert_eq!(s.cursor, 1);
    }

    #[test]
    fn test_grammar_collects_tokens() {
        let grammar = Grammar::new(
            Lexer::code(),
            RuleSet::new().then(Repeat::new(RuleSet::new().then(Word))),
        );
        let tokens = grammar.tokenize("a b").unwrap();
        let joined: String = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(joined, "a b");
    }
}
