//! # crumb
//!
//! A composable tokenizing engine.
//!
//! The pipeline is small and explicit: a lexer partitions input into
//! fragments (minimal slices split on a separator predicate), a grammar of
//! combinator rules walks the fragment list through one mutable parser
//! state, and the output is a flat token stream that can reproduce the
//! source text.
//!
//! Layout
//!
//! src/
//!   ├── fragment     Partitioner, fragments, linear positions
//!   ├── lexer        Separator predicates and trivia sets
//!   ├── component    Classification tags (dotted-path descriptions)
//!   ├── token        The emitted token model
//!   ├── parser       Per-parse mutable state
//!   ├── matcher      Balanced nested-delimiter matching
//!   ├── rule         The rule trait and combinators
//!   ├── strings      The string-literal sub-parser
//!   └── syntaxes     Concrete code and markdown grammars
//!
//! Grammars compose bottom-up: everything under `syntaxes` is assembled
//! from the layers above it and none of those layers know about any
//! concrete grammar.

pub mod component;
pub mod error;
pub mod fragment;
pub mod lexer;
pub mod matcher;
pub mod parser;
pub mod rule;
pub mod strings;
pub mod syntaxes;
pub mod token;

pub use component::Component;
pub use error::{ParseError, ParseResult};
pub use fragment::{linear_position, partition, Fragment, LinearPosition};
pub use lexer::Lexer;
pub use parser::ParserState;
pub use rule::{Grammar, Rule, RuleSet, Tokenize};
pub use token::{Payload, Token};
