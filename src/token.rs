//! Token model
//!
//!     A token is one emitted, classified unit of output. Tokens either carry
//!     their source fragments directly (trivia runs, raw fragments, slices)
//!     or pair a component tag with a payload. Every token can reproduce its
//!     literal source text, which keeps the full output stream losslessly
//!     re-joinable except where a classified token deliberately replaces a
//!     wider literal span (a multi-fragment string literal collapses to fewer
//!     tokens over the same covered range).

use crate::component::Component;
use crate::fragment::Fragment;
use serde::Serialize;

/// The data carried by a classified token.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Payload<'a> {
    Element(char),
    Fragment(Fragment<'a>),
    Slice(Vec<Fragment<'a>>),
}

impl Payload<'_> {
    /// The literal source text of this payload.
    pub fn text(&self) -> String {
        match self {
            Payload::Element(c) => c.to_string(),
            Payload::Fragment(fragment) => fragment.text.to_string(),
            Payload::Slice(fragments) => fragments.iter().map(|f| f.text).collect(),
        }
    }
}

/// One emitted unit of tokenizer output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Token<'a> {
    /// A run of `count` repeated whitespace-class elements.
    Trivia { element: char, count: usize },
    /// A single unclassified element.
    Element(char),
    /// An unclassified fragment.
    Fragment(Fragment<'a>),
    /// An unclassified contiguous run of fragments.
    Slice(Vec<Fragment<'a>>),
    /// A classified value.
    Tagged(Component, Payload<'a>),
    /// A single boundary element bridging two classified contexts, such as
    /// the `:` between an identifier and its type.
    Delimiter {
        from: Component,
        to: Component,
        element: char,
    },
    /// A classified payload carrying semantic weight, such as a parsed type
    /// name.
    Parameter(Component, Payload<'a>),
}

impl Token<'_> {
    /// The literal source text this token stands for.
    pub fn text(&self) -> String {
        match self {
            Token::Trivia { element, count } => element.to_string().repeat(*count),
            Token::Element(c) => c.to_string(),
            Token::Fragment(fragment) => fragment.text.to_string(),
            Token::Slice(fragments) => fragments.iter().map(|f| f.text).collect(),
            Token::Tagged(_, payload) => payload.text(),
            Token::Delimiter { element, .. } => element.to_string(),
            Token::Parameter(_, payload) => payload.text(),
        }
    }

    /// The component classifying this token. Structural tokens report the
    /// structural families (`trivial`, `delimiter`, `unknown`).
    pub fn component(&self) -> Component {
        match self {
            Token::Trivia { .. } => Component::Trivial,
            Token::Element(_) | Token::Fragment(_) | Token::Slice(_) => Component::Unknown,
            Token::Tagged(component, _) | Token::Parameter(component, _) => component.clone(),
            Token::Delimiter { .. } => Component::Delimiter,
        }
    }
}
