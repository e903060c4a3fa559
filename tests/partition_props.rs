//! Property tests for the fragment partitioner
//!
//! These exercise the partitioning contract over generated inputs:
//! - losslessness: joining the fragments reproduces the input exactly
//! - atomicity: no empty fragments, separators stand alone
//! - tiling: fragment byte ranges cover the input without gaps or overlap
//! The same contract is checked for the generic slice partitioner.

use crumb::fragment::{partition, partition_slice};
use proptest::prelude::*;

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation()
}

proptest! {
    #[test]
    fn partition_is_lossless(input in ".*") {
        let joined: String = partition(&input, is_separator).iter().map(|f| f.text).collect();
        prop_assert_eq!(joined, input);
    }

    #[test]
    fn partition_is_atomic(input in ".*") {
        for fragment in partition(&input, is_separator) {
            prop_assert!(!fragment.text.is_empty());
            if fragment.text.chars().any(is_separator) {
                // A fragment containing a separator is that separator alone.
                prop_assert_eq!(fragment.text.chars().count(), 1);
            }
        }
    }

    #[test]
    fn partition_offsets_tile_the_input(input in ".*") {
        let mut expected = 0usize;
        for fragment in partition(&input, is_separator) {
            prop_assert_eq!(fragment.start, expected);
            expected = fragment.end();
        }
        prop_assert_eq!(expected, input.len());
    }

    #[test]
    fn slice_partition_is_lossless(input in proptest::collection::vec(0u8..8, 0..64)) {
        let parts = partition_slice(&input, |&n| n == 0);
        let joined: Vec<u8> = parts.iter().flat_map(|p| p.iter().copied()).collect();
        prop_assert_eq!(joined, input);
    }

    #[test]
    fn slice_partition_is_atomic(input in proptest::collection::vec(0u8..8, 0..64)) {
        for part in partition_slice(&input, |&n| n == 0) {
            prop_assert!(!part.is_empty());
            if part.contains(&0) {
                prop_assert_eq!(part.len(), 1);
            }
        }
    }
}
