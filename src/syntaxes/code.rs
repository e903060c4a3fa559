//! Code grammar
//!
//!     A tokenizer for a small curly-brace dialect: an optional hashbang
//!     line, keyword-introduced declarations (`struct Point { ... }`,
//!     `var x: Int = "y"`), and string literals. Declarations dispatch on
//!     their keyword to a follow-on rule set: type keywords parse a braced
//!     body through a delimiter break, property keywords parse an optional
//!     explicit type and an assignment.

use crate::component::{
    Component, IdentifierComponent, PreprocessorComponent, SymbolComponent, TypeComponent,
    WordComponent,
};
use crate::error::{ParseError, ParseResult};
use crate::fragment::Fragment;
use crate::lexer::Lexer;
use crate::parser::ParserState;
use crate::rule::{Break, Grammar, Remaining, Repeat, Rule, RuleSet, Word};
use crate::strings::StringLiteral;
use crate::token::{Payload, Token};

/// Keywords that introduce a declaration.
pub const DECLARATION_KEYWORDS: [&str; 7] =
    ["struct", "class", "actor", "let", "var", "func", "typealias"];

/// Consumes the maximal run of byte-adjacent non-trivia fragments starting
/// at the cursor. Separators inside the run (`/` in a path, `.` in a file
/// name) stay part of it; the run ends at the first trivia fragment.
fn word_run<'a>(state: &mut ParserState<'a>) -> Vec<Fragment<'a>> {
    let mut run: Vec<Fragment<'a>> = Vec::new();
    while let Some(fragment) = state.current() {
        if fragment
            .single_char()
            .is_some_and(|c| state.lexer.is_trivia(c))
        {
            break;
        }
        run.push(fragment);
        state.advance(1);
    }
    run
}

/// Recognizes a leading `#!` line: the hashbang marker, the processor path,
/// and space-separated arguments up to the end of the line. Reports a match
/// even when no hashbang is present, so it can head a sequence harmlessly.
pub struct Preprocessor;

impl Rule for Preprocessor {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        let (hash, bang) = match (state.current(), state.peek(1)) {
            (Some(h), Some(b)) if h.text == "#" && b.text == "!" && h.end() == b.start => (h, b),
            _ => return Ok(true),
        };
        state.tokens.push(Token::Parameter(
            Component::Preprocessor(PreprocessorComponent::Hashbang),
            Payload::Slice(vec![hash, bang]),
        ));
        state.advance(2);

        let processor = word_run(state);
        if !processor.is_empty() {
            state.tokens.push(Token::Parameter(
                Component::Preprocessor(PreprocessorComponent::Processor),
                Payload::Slice(processor),
            ));
        }

        while let Some(fragment) = state.current() {
            if fragment.text == "\n" {
                break;
            }
            if let Some(element) = fragment
                .single_char()
                .filter(|c| state.lexer.is_trivia(*c))
            {
                let mut count = 1;
                while state.peek(count).and_then(|f| f.single_char()) == Some(element) {
                    count += 1;
                }
                state.tokens.push(Token::Trivia { element, count });
                state.advance(count);
            } else {
                let argument = word_run(state);
                state.tokens.push(Token::Parameter(
                    Component::Preprocessor(PreprocessorComponent::Argument),
                    Payload::Slice(argument),
                ));
            }
        }
        Ok(true)
    }
}

type ContentFactory = Box<dyn Fn(&str) -> RuleSet + Send + Sync>;

/// A keyword-triggered declaration: the keyword, a validated identifier, and
/// keyword-specific follow-on rules.
pub struct Declaration {
    keywords: Vec<&'static str>,
    contents: ContentFactory,
}

impl Declaration {
    pub fn new(
        keywords: Vec<&'static str>,
        contents: impl Fn(&str) -> RuleSet + Send + Sync + 'static,
    ) -> Self {
        Self {
            keywords,
            contents: Box::new(contents),
        }
    }
}

impl Rule for Declaration {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        let keyword = match state.current() {
            Some(fragment) if self.keywords.iter().any(|k| *k == fragment.text) => fragment,
            _ => return Ok(false),
        };
        state.tokens.push(Token::Parameter(
            Component::Word(WordComponent::Declaration(IdentifierComponent::Custom(
                keyword.text.to_string(),
            ))),
            Payload::Fragment(keyword),
        ));
        state.advance(1);
        state.remove_trivia();

        let identifier = state
            .current()
            .ok_or(ParseError::MissingRequiredToken {
                expected: "identifier",
            })?;
        validate_identifier(identifier.text)?;
        state.tokens.push(Token::Parameter(
            Component::Identifier(IdentifierComponent::from_keyword(keyword.text)),
            Payload::Fragment(identifier),
        ));
        state.advance(1);

        // Follow-on rules are advisory: a property without an assignment is
        // still a declaration. Hard errors do propagate.
        (self.contents)(keyword.text).apply(state)?;
        Ok(true)
    }
}

/// A lone `_` is a valid discard name; anything longer must not lead or
/// trail with an underscore.
fn validate_identifier(identifier: &str) -> ParseResult<()> {
    if identifier.chars().count() > 1
        && (identifier.starts_with('_') || identifier.ends_with('_'))
    {
        return Err(ParseError::InvalidIdentifier {
            identifier: identifier.to_string(),
        });
    }
    Ok(())
}

/// An optional `: Type` annotation. Reports a match without consuming when
/// no colon is present, so it only ever runs in sequence position (never as
/// an alternative, where a non-consuming match would stall the loop).
pub struct ExplicitType {
    component: TypeComponent,
}

impl ExplicitType {
    pub fn new(component: TypeComponent) -> Self {
        Self { component }
    }
}

impl Rule for ExplicitType {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        match state.current() {
            Some(fragment) if fragment.text == ":" => {}
            _ => return Ok(true),
        }
        state.tokens.push(Token::Delimiter {
            from: Component::Identifier(self.component.identifier()),
            to: Component::Type(self.component.clone()),
            element: ':',
        });
        state.advance(1);
        state.remove_trivia();

        let name = state
            .current()
            .ok_or(ParseError::MissingRequiredToken { expected: "type" })?;
        if !name.text.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(ParseError::InvalidCharacterClass {
                token: name.text.to_string(),
            });
        }
        state.tokens.push(Token::Parameter(
            Component::Type(self.component.clone()),
            Payload::Fragment(name),
        ));
        state.advance(1);
        Ok(true)
    }
}

/// An `=` followed by a value parsed by the first matching value rule.
pub struct Assignment {
    values: RuleSet,
}

impl Assignment {
    pub fn new(values: RuleSet) -> Self {
        Self { values }
    }
}

impl Rule for Assignment {
    fn try_apply(&self, state: &mut ParserState<'_>) -> ParseResult<bool> {
        match state.current() {
            Some(fragment) if fragment.text == "=" => {}
            _ => return Ok(false),
        }
        state.tokens.push(Token::Tagged(
            Component::Symbol(SymbolComponent::Assignment),
            Payload::Element('='),
        ));
        state.advance(1);
        state.remove_trivia();
        self.values.apply_first(state)?;
        Ok(true)
    }
}

fn value_rules() -> RuleSet {
    RuleSet::new().then(StringLiteral).then(Word)
}

fn member_rules() -> RuleSet {
    RuleSet::new()
        .then(declaration())
        .then(StringLiteral)
        .then(Word)
}

fn property_contents() -> RuleSet {
    RuleSet::new()
        .then(ExplicitType::new(TypeComponent::Property))
        .then(Assignment::new(value_rules()))
}

/// A braced type body; the explicit-type header picks up a `: Protocol`
/// conformance clause between the name and the brace.
fn type_body(keyword: &str) -> Break {
    let component = TypeComponent::from_keyword(keyword);
    Break::new(
        "{",
        "}",
        move |_| RuleSet::new().then(ExplicitType::new(component.clone())),
        |_| member_rules(),
    )
}

fn parameter_list() -> Break {
    Break::new("(", ")", |_| RuleSet::new(), |_| RuleSet::new().then(Word))
}

fn function_body() -> Break {
    Break::new(
        "{",
        "}",
        |_| RuleSet::new().then(ExplicitType::new(TypeComponent::Function)),
        |_| member_rules(),
    )
}

/// The declaration rule with the full keyword dispatch table.
pub fn declaration() -> Declaration {
    Declaration::new(DECLARATION_KEYWORDS.to_vec(), |keyword| match keyword {
        "let" | "var" => property_contents(),
        "typealias" => RuleSet::new().then(Assignment::new(value_rules())),
        "func" => RuleSet::new().then(parameter_list()).then(function_body()),
        _ => RuleSet::new().then(type_body(keyword)),
    })
}

/// The complete code tokenizer.
pub fn grammar() -> Grammar {
    Grammar::new(
        Lexer::backtick_escaped_code(),
        RuleSet::new()
            .then(Preprocessor)
            .then(Repeat::new(member_rules()))
            .then(Remaining::unknown()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Tokenize;

    fn descriptions(tokens: &[Token<'_>]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| t.component().description())
            .collect()
    }

    #[test]
    fn test_preprocessor_without_hashbang_is_a_no_op() {
        let mut state = ParserState::new("var x", Lexer::backtick_escaped_code());
        assert!(Preprocessor.try_apply(&mut state).unwrap());
        assert_eq!(state.cursor, 0);
        assert!(state.tokens.is_empty());
    }

    #[test]
    fn test_preprocessor_stops_at_the_line_end() {
        let mut state = ParserState::new("#!bin/sh\nvar x", Lexer::backtick_escaped_code());
        assert!(Preprocessor.try_apply(&mut state).unwrap());
        assert_eq!(state.current().map(|f| f.text), Some("\n"));
        assert_eq!(
            descriptions(&state.tokens),
            vec!["preprocessor.hashbang", "preprocessor.processor"]
        );
        assert_eq!(state.tokens[1].text(), "bin/sh");
    }

    #[test]
    fn test_property_declaration_with_type_and_assignment() {
        let tokens = grammar().tokenize("var x: Int = \"y\"").unwrap();
        assert_eq!(
            descriptions(&tokens),
            vec![
                "word.declaration.var",
                "trivial",
                "identifier.property",
                "delimiter",
                "trivial",
                "type.property",
                "trivial",
                "symbol.assignment",
                "trivial",
                "string.literal",
            ]
        );
        assert_eq!(tokens[9].text(), "y");
    }

    #[test]
    fn test_type_declaration_brackets_its_body() {
        let tokens = grammar().tokenize("struct Point { var x = \"0\" }").unwrap();
        let kinds = descriptions(&tokens);
        assert_eq!(kinds[0], "word.declaration.struct");
        assert_eq!(kinds[2], "identifier.struct");
        assert!(kinds.contains(&"bracket.start".to_string()));
        assert!(kinds.contains(&"bracket.end".to_string()));
        assert!(kinds.contains(&"word.declaration.var".to_string()));
    }

    #[test]
    fn test_conformance_clause_is_a_typed_header() {
        let tokens = grammar().tokenize("struct Point: Shape { }").unwrap();
        let kinds = descriptions(&tokens);
        assert!(kinds.contains(&"type.struct".to_string()));
        let colon = tokens
            .iter()
            .position(|t| t.component().description() == "delimiter")
            .unwrap();
        assert_eq!(tokens[colon].text(), ":");
    }

    #[test]
    fn test_underscore_bounded_identifiers_are_rejected() {
        for input in ["var _foo", "var foo_"] {
            assert!(matches!(
                grammar().tokenize(input),
                Err(ParseError::InvalidIdentifier { .. })
            ));
        }
    }

    #[test]
    fn test_lone_underscore_is_a_valid_identifier() {
        let tokens = grammar().tokenize("var _").unwrap();
        assert_eq!(tokens[2].text(), "_");
        assert_eq!(tokens[2].component().description(), "identifier.property");
    }

    #[test]
    fn test_missing_identifier_is_hard() {
        assert_eq!(
            grammar().tokenize("var"),
            Err(ParseError::MissingRequiredToken {
                expected: "identifier",
            })
        );
    }

    #[test]
    fn test_type_annotation_rejects_symbol_characters() {
        // The backtick survives partitioning as part of the word, so the
        // character-class check is what has to catch it.
        assert!(matches!(
            grammar().tokenize("var x: In`t"),
            Err(ParseError::InvalidCharacterClass { .. })
        ));
    }
}
