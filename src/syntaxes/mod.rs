//! Concrete grammars
//!
//!     Everything here is composition: the rules assemble the combinators,
//!     matchers, and the string sub-parser into ready-to-use tokenizers for
//!     a small curly-brace code dialect and for markdown. No new parsing
//!     machinery lives at this level.

pub mod code;
pub mod markdown;
