//! End-to-end tests for the markdown grammar
//!
//! These run the assembled tokenizer over whole documents and assert the
//! exact token sequence by component description:
//! - headers carry their depth in the component (markdown.h1 .. markdown.h6)
//! - fenced code blocks keep their optional language id
//! - links, emails, and body prose interleave within a line

use crumb::component::{Component, MarkdownComponent};
use crumb::error::ParseError;
use crumb::rule::Tokenize;
use crumb::syntaxes::markdown;
use crumb::token::Token;
use rstest::rstest;

fn kinds(tokens: &[Token<'_>]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.component().description())
        .collect()
}

#[rstest]
#[case("# One", 1)]
#[case("### Three", 3)]
#[case("###### Six", 6)]
fn test_header_depths(#[case] input: &str, #[case] depth: usize) {
    let tokens = markdown::grammar().tokenize(input).unwrap();
    assert_eq!(kinds(&tokens), vec![format!("markdown.h{depth}")]);
}

#[test]
fn test_header_text_excludes_marker_and_padding() {
    let tokens = markdown::grammar().tokenize("##   Spaced out").unwrap();
    assert_eq!(tokens[0].text(), "Spaced out");
}

#[test]
fn test_depth_cap_skips_the_line_quietly() {
    let tokens = markdown::grammar()
        .tokenize("######## Eight deep\nstill here")
        .unwrap();
    let found = kinds(&tokens);
    assert!(!found.iter().any(|k| k.starts_with("markdown.h")));
    assert!(found.contains(&"markdown.body".to_string()));
}

#[test]
fn test_body_and_link_interleave_on_one_line() {
    let tokens = markdown::grammar()
        .tokenize("see [the docs](https://example.com) for more")
        .unwrap();
    // The leading prose keeps its trailing space; the space after the link
    // is a fresh trivia run.
    assert_eq!(
        kinds(&tokens),
        vec![
            "markdown.body",
            "markdown.link",
            "trivial",
            "markdown.body",
        ]
    );
    assert_eq!(tokens[0].text(), "see ");
    assert_eq!(tokens[1].text(), "[the docs](https://example.com)");
}

#[test]
fn test_link_components_carry_label_and_url() {
    let tokens = markdown::grammar().tokenize("[home](/index.html)").unwrap();
    match &tokens[0] {
        Token::Tagged(Component::Markdown(MarkdownComponent::Link { label, url }), _) => {
            assert_eq!(label.as_deref(), Some("home"));
            assert_eq!(url.as_deref(), Some("/index.html"));
        }
        other => panic!("expected a link token, got {other:?}"),
    }
}

#[test]
fn test_email_autolink_in_prose() {
    let tokens = markdown::grammar()
        .tokenize("write to <team@example.org> today")
        .unwrap();
    let found = kinds(&tokens);
    assert!(found.contains(&"markdown.email".to_string()));
    let email = tokens
        .iter()
        .find(|t| t.component().description() == "markdown.email")
        .unwrap();
    assert_eq!(email.text(), "<team@example.org>");
}

#[test]
fn test_angle_span_that_is_not_an_email() {
    let tokens = markdown::grammar().tokenize("a <tag> b").unwrap();
    assert!(!kinds(&tokens).contains(&"markdown.email".to_string()));
    let joined: String = tokens.iter().map(|t| t.text()).collect();
    assert_eq!(joined, "a <tag> b");
}

#[test]
fn test_unterminated_email_bracket_is_hard() {
    assert!(matches!(
        markdown::grammar().tokenize("<user@example.org"),
        Err(ParseError::UnterminatedDelimiter { .. })
    ));
}

#[test]
fn test_code_block_with_language_id() {
    let tokens = markdown::grammar()
        .tokenize("```swift\nlet x = 1\n```")
        .unwrap();
    assert_eq!(kinds(&tokens), vec!["markdown.codeblock.swift"]);
    assert_eq!(tokens[0].text(), "let x = 1");
}

#[test]
fn test_document_with_mixed_elements() {
    let document = "# Notes\n\
                    intro line\n\
                    ```sh\n\
                    ls\n\
                    ```\n\
                    bye";
    let tokens = markdown::grammar().tokenize(document).unwrap();
    let found = kinds(&tokens);
    assert_eq!(
        found
            .iter()
            .filter(|k| k.starts_with("markdown."))
            .collect::<Vec<_>>(),
        vec![
            "markdown.h1",
            "markdown.body",
            "markdown.codeblock.sh",
            "markdown.body",
        ]
    );
}
