//! Tests for version module

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use test_case::test_case;

use super::*;
use crate::error::Error;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn semantic(parts: &[u64]) -> Version {
    let mut version = SemanticVersion::new(parts[0]);
    if let Some(&minor) = parts.get(1) {
        version = version.with_minor(minor);
    }
    if let Some(&patch) = parts.get(2) {
        version = version.with_patch(patch);
    }
    Version::Semantic(version)
}

fn hash_of(version: &Version) -> u64 {
    let mut hasher = DefaultHasher::new();
    version.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// Unknown Tests
// ============================================================================

#[test]
fn test_unknown_never_equals_itself() {
    assert_ne!(Version::Unknown, Version::Unknown);
}

#[test]
fn test_unknown_never_orders() {
    assert!(Version::Unknown.partial_cmp(&Version::Unknown).is_none());
    assert!(!(Version::Unknown < Version::Unknown));
    assert!(!(Version::Unknown > Version::Unknown));
}

#[test]
fn test_unknown_display_round_trips() {
    assert_eq!(Version::Unknown.to_string(), "Unknown");
    let parsed = Version::parse("Unknown").unwrap();
    assert!(!parsed.is_known());
    assert_eq!(parsed.to_string(), "Unknown");
}

#[test]
fn test_unknown_hashes_to_constant() {
    assert_eq!(hash_of(&Version::Unknown), hash_of(&Version::Unknown));
    assert_ne!(hash_of(&Version::Unknown), hash_of(&semantic(&[1])));
}

#[test]
fn test_is_known() {
    assert!(!Version::Unknown.is_known());
    assert!(semantic(&[1, 2]).is_known());
    assert!(Version::Date(DateVersion::new(date(2020, 5, 1))).is_known());
}

// ============================================================================
// Semantic Version Tests
// ============================================================================

#[test]
fn test_semantic_display_joins_components() {
    assert_eq!(semantic(&[1, 2, 3]).to_string(), "1.2.3");
    assert_eq!(semantic(&[1, 2]).to_string(), "1.2");
    assert_eq!(semantic(&[1]).to_string(), "1");

    let full = SemanticVersion::new(1)
        .with_minor(2)
        .with_prefix("v")
        .with_suffix("-beta");
    assert_eq!(full.to_string(), "v1.2-beta");
}

#[test]
fn test_semantic_parse_splits_prefix_and_suffix() {
    let parsed: SemanticVersion = "pre-1.1.2-post".parse().unwrap();
    let expected = SemanticVersion::new(1)
        .with_minor(1)
        .with_patch(2)
        .with_prefix("pre-")
        .with_suffix("-post");

    assert_eq!(parsed, expected);
    assert_eq!(parsed.prefix, "pre-");
    assert_eq!(parsed.major, 1);
    assert_eq!(parsed.minor, Some(1));
    assert_eq!(parsed.patch, Some(2));
    assert_eq!(parsed.suffix, "-post");
}

#[test]
fn test_semantic_parse_rejects_digitless_input() {
    assert!("nodigits".parse::<SemanticVersion>().is_err());
    assert!("".parse::<SemanticVersion>().is_err());
}

#[test_case(&[1, 0, 1], &[1, 1, 1] => true; "minor decides")]
#[test_case(&[1, 1], &[1, 1, 1] => true; "absent patch ranks below present")]
#[test_case(&[1, 1, 1], &[1, 1] => false; "present patch not below absent")]
#[test_case(&[1, 0], &[1, 0, 1] => true; "zero minor then absent patch")]
#[test_case(&[1, 0, 1], &[1, 0] => false; "zero minor reverse")]
#[test_case(&[1], &[1, 0, 1] => true; "bare major below fuller version")]
#[test_case(&[2], &[1, 9, 9] => false; "major outranks the rest")]
#[test_case(&[1, 9, 9], &[2] => true; "major outranks the rest reverse")]
#[test_case(&[1, 2, 3], &[1, 2, 3] => false; "equal versions")]
fn test_semantic_less_than(left: &[u64], right: &[u64]) -> bool {
    semantic(left) < semantic(right)
}

#[test]
fn test_prefix_and_suffix_never_order() {
    let plain = Version::Semantic(SemanticVersion::new(1));
    let decorated = Version::Semantic(
        SemanticVersion::new(1)
            .with_prefix("testing")
            .with_suffix("alpha"),
    );

    assert_ne!(plain, decorated);
    assert!(!(plain < decorated));
    assert!(!(decorated < plain));
    assert!(plain.partial_cmp(&decorated).is_none());
}

#[test]
fn test_semantic_equality_is_rendered_equality() {
    // Structurally different values that render identically are equal.
    let left = SemanticVersion::new(11).with_prefix("a");
    let right = SemanticVersion::new(1).with_prefix("a1");

    assert_eq!(left.to_string(), "a11");
    assert_eq!(left, right);
    assert_eq!(
        hash_of(&Version::Semantic(left)),
        hash_of(&Version::Semantic(right))
    );
}

// ============================================================================
// Date Version Tests
// ============================================================================

#[test]
fn test_date_parse_and_accessors() {
    let version: DateVersion = "2020_05_01".parse().unwrap();

    assert_eq!(version.to_date(), date(2020, 5, 1));
    assert_eq!(version.year(), 2020);
    assert_eq!(version.month(), 5);
    assert_eq!(version.day(), 1);
    assert_eq!(version.to_string(), "2020_05_01");
}

#[test]
fn test_date_parse_rejects_other_layouts() {
    assert!("2020-05-01".parse::<DateVersion>().is_err());
    assert!("01_05_2020".parse::<DateVersion>().is_err());
}

#[test]
fn test_date_versions_order_chronologically() {
    let older = Version::Date(DateVersion::new(date(2020, 5, 1)));
    let newer = Version::Date(DateVersion::new(date(2021, 1, 15)));

    assert!(older < newer);
    assert_eq!(older.try_cmp(&newer).unwrap(), Ordering::Less);
}

// ============================================================================
// Parse Dispatch Tests
// ============================================================================

#[test]
fn test_parse_prefers_date_over_semantic() {
    // Tried as semantic this would be major 2020 with suffix "_05_01".
    let version = Version::parse("2020_05_01").unwrap();
    assert!(matches!(version, Version::Date(_)));
    assert_eq!(version.to_string(), "2020_05_01");
}

#[test]
fn test_parse_falls_back_to_semantic() {
    let version = Version::parse("v1.2.3").unwrap();
    match &version {
        Version::Semantic(semantic) => {
            assert_eq!(semantic.prefix, "v");
            assert_eq!(semantic.major, 1);
        }
        other => panic!("Expected Semantic, got {other:?}"),
    }
}

#[test]
fn test_parse_rejects_overlong_input() {
    let input = "1".repeat(MAX_VERSION_LENGTH + 1);
    assert!(matches!(
        Version::parse(&input),
        Err(Error::VersionParse { .. })
    ));

    let input = "1".repeat(MAX_VERSION_LENGTH);
    assert!(Version::parse(&input).is_ok());
}

// ============================================================================
// Comparison Error Tests
// ============================================================================

#[test]
fn test_try_cmp_rejects_mixed_shapes() {
    let semantic = semantic(&[1, 2]);
    let date = Version::Date(DateVersion::new(date(2020, 5, 1)));

    let err = semantic.try_cmp(&date).unwrap_err();
    assert!(matches!(err, Error::Incomparable { .. }));
    assert_eq!(
        err.to_string(),
        "Cannot compare semantic version against date version"
    );
}

#[test]
fn test_try_cmp_rejects_unknown() {
    let err = Version::Unknown.try_cmp(&Version::Unknown).unwrap_err();
    assert!(matches!(err, Error::Incomparable { .. }));
}

// ============================================================================
// Recent Tests
// ============================================================================

#[test]
fn test_recent_picks_latest_date() {
    let dates = vec![date(2001, 1, 1), date(2002, 1, 1)];
    assert_eq!(recent(dates), Some(date(2002, 1, 1)));
}

#[test]
fn test_recent_of_nothing_is_none() {
    assert_eq!(recent(Vec::new()), None);
}
