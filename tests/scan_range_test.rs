//! Tests for scan range specification parsing

use std::collections::BTreeSet;

use mzextract::scan_range::{parse_scan_ids, ScanRange, ScanRangeError};
use proptest::prelude::*;

#[test]
fn test_reference_specifications() {
    let expected: BTreeSet<u32> = [5, 8, 10, 11, 12].into_iter().collect();
    assert_eq!(parse_scan_ids("5,10-12,8").unwrap(), expected);

    assert_eq!(parse_scan_ids(""), Err(ScanRangeError::NothingSpecified));
    assert!(matches!(
        parse_scan_ids("1-2-3"),
        Err(ScanRangeError::InvalidFormat(_))
    ));
    assert_eq!(parse_scan_ids("3-1").unwrap(), BTreeSet::new());
    assert!(matches!(
        parse_scan_ids("1,,2"),
        Err(ScanRangeError::InvalidFormat(_))
    ));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        parse_scan_ids("").unwrap_err().to_string(),
        "nothing specified"
    );
    assert!(parse_scan_ids("a")
        .unwrap_err()
        .to_string()
        .starts_with("invalid character"));
    assert!(parse_scan_ids("1,")
        .unwrap_err()
        .to_string()
        .starts_with("invalid format"));
}

#[test]
fn test_whitespace_forms() {
    // Surrounding spaces are trimmed
    assert_eq!(
        parse_scan_ids("1 - 5").unwrap(),
        (1..=5).collect::<BTreeSet<u32>>()
    );
    // Embedded spaces are not
    assert!(matches!(
        parse_scan_ids("1 5"),
        Err(ScanRangeError::InvalidFormat(_))
    ));
}

#[test]
fn test_validation_order() {
    // Invalid characters are reported before format problems
    assert!(matches!(
        parse_scan_ids("1,,x"),
        Err(ScanRangeError::InvalidCharacter { character: 'x', .. })
    ));
}

proptest! {
    /// Parsing is a pure function of its input
    #[test]
    fn test_parse_is_idempotent(text in "[0-9, -]{0,12}") {
        let first = parse_scan_ids(&text);
        let second = parse_scan_ids(&text);
        prop_assert_eq!(first, second);
    }

    /// Every single value and range written out is recovered exactly
    #[test]
    fn test_generated_specifications(
        items in prop::collection::vec((0u32..10_000, prop::option::of(0u32..50)), 1..10)
    ) {
        let mut expected = BTreeSet::new();
        let tokens: Vec<String> = items
            .iter()
            .map(|(start, span)| match span {
                Some(span) => {
                    expected.extend(*start..=start + span);
                    format!("{}-{}", start, start + span)
                }
                None => {
                    expected.insert(*start);
                    start.to_string()
                }
            })
            .collect();
        let text = tokens.join(",");

        prop_assert_eq!(parse_scan_ids(&text).unwrap(), expected.clone());
        let range: ScanRange = text.parse().unwrap();
        prop_assert_eq!(range.scans(), &expected);
    }
}
