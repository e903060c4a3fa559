//! Nested-delimiter matchers
//!
//!     Both matchers locate, within a fragment slice, the close fragment
//!     belonging to an open fragment while tolerating balanced nested
//!     occurrences of the same pair. They return half-open index ranges over
//!     the given slice: `range.start` is the opener, `range.end - 1` the
//!     closer. Both scan O(k) over the matched span rather than the whole
//!     input.
//!
//!     `break_pair` handles distinct delimiters with a depth counter.
//!     `break_even` handles same-character delimiters such as string quotes,
//!     where nesting cannot be counted directionally: an even-length run of
//!     the delimiter is treated as balanced content and the first unpaired
//!     occurrence closes the span.
//!
//!     Neither matcher guesses on malformed input. When no opener exists, or
//!     no balanced closer follows it, the result is `None` and the caller
//!     decides whether that is a soft no-match or an unterminated-delimiter
//!     error.

use crate::fragment::Fragment;
use std::ops::Range;

/// Finds the region from the first `open` fragment to its matching `close`,
/// tolerating balanced nested occurrences of the same pair.
pub fn break_pair(fragments: &[Fragment<'_>], open: &str, close: &str) -> Option<Range<usize>> {
    let start = fragments.iter().position(|f| f.text == open)?;
    let mut depth = 0usize;
    for (index, fragment) in fragments.iter().enumerate().skip(start) {
        if fragment.text == open {
            depth += 1;
        } else if fragment.text == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(start..index + 1);
            }
        }
    }
    None
}

/// Finds the region from the first `delimiter` fragment to its matching
/// occurrence, where opener and closer are the same character.
///
/// Scanning forward from the opener, an even-length run of the delimiter is
/// balanced content; the closing fragment is the first occurrence left
/// unpaired. Fails when fewer than two fragments remain or no unpaired
/// occurrence follows the opener.
pub fn break_even(fragments: &[Fragment<'_>], delimiter: &str) -> Option<Range<usize>> {
    if fragments.len() < 2 {
        return None;
    }
    let open = fragments.iter().position(|f| f.text == delimiter)?;
    let mut index = open + 1;
    while index < fragments.len() {
        if fragments[index].text == delimiter {
            let mut run = 1;
            while fragments.get(index + run).map(|f| f.text) == Some(delimiter) {
                run += 1;
            }
            if run % 2 == 1 {
                // The even prefix of the run is content; the last one closes.
                return Some(open..index + run);
            }
            index += run;
        } else {
            index += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn fragments(input: &str) -> Vec<Fragment<'_>> {
        Lexer::code().partition(input)
    }

    #[test]
    fn test_break_pair_simple() {
        let parts = fragments("{ a }");
        let range = break_pair(&parts, "{", "}").unwrap();
        assert_eq!(range, 0..5);
        assert_eq!(parts[range.end - 1].text, "}");
    }

    #[test]
    fn test_break_pair_skips_to_first_opener() {
        let parts = fragments("x: T { a }");
        let range = break_pair(&parts, "{", "}").unwrap();
        assert_eq!(parts[range.start].text, "{");
        assert_eq!(parts[range.end - 1].text, "}");
    }

    #[test]
    fn test_break_pair_tolerates_nesting() {
        let parts = fragments("( a ( b ) c ) d");
        let range = break_pair(&parts, "(", ")").unwrap();
        let span: String = parts[range].iter().map(|f| f.text).collect();
        assert_eq!(span, "( a ( b ) c )");
    }

    #[test]
    fn test_break_pair_refuses_unbalanced_input() {
        assert_eq!(break_pair(&fragments("( a ( b )"), "(", ")"), None);
        assert_eq!(break_pair(&fragments("a b c"), "(", ")"), None);
    }

    #[test]
    fn test_break_even_plain_span() {
        let parts = fragments("\"hello\" rest");
        let range = break_even(&parts, "\"").unwrap();
        assert_eq!(range, 0..3);
    }

    #[test]
    fn test_break_even_balance() {
        // One genuine opening, one balanced pair, then the true close: the
        // span must run to the true terminator, not the pair.
        let parts = fragments("\"a\"\"b\" tail");
        let range = break_even(&parts, "\"").unwrap();
        assert_eq!(range.len(), 6);
        let span: String = parts[range].iter().map(|f| f.text).collect();
        assert_eq!(span, "\"a\"\"b\"");
    }

    #[test]
    fn test_break_even_empty_literal() {
        let parts = fragments("\"\" x");
        assert_eq!(break_even(&parts, "\""), Some(0..2));
    }

    #[test]
    fn test_break_even_unterminated() {
        assert_eq!(break_even(&fragments("\"abc"), "\""), None);
        assert_eq!(break_even(&fragments("\""), "\""), None);
        assert_eq!(break_even(&fragments("abc def"), "\""), None);
    }
}
