//! Property-based tests for warden-validator.

use warden_validator::prelude::*;
use proptest::prelude::*;

// ============================================================================
// INTERVAL: inclusive bounds accept exactly min <= x <= max
// ============================================================================

proptest! {
    #[test]
    fn inclusive_interval_matches_ordering(min in -1000i64..1000, max in -1000i64..1000, x in -1500i64..1500) {
        let bounds = Bounds::inclusive(&min, &max);
        let ok = interval_default(Some(&x), &bounds, "x").is_ok();
        prop_assert_eq!(ok, min <= x && x <= max);
    }

    #[test]
    fn exclusive_interval_matches_strict_ordering(min in -1000i64..1000, max in -1000i64..1000, x in -1500i64..1500) {
        let bounds = Bounds::exclusive(&min, &max);
        let ok = interval_default(Some(&x), &bounds, "x").is_ok();
        prop_assert_eq!(ok, min < x && x < max);
    }

    #[test]
    fn interval_failure_is_out_of_range(min in 0i64..100, x in 101i64..200) {
        let bounds = Bounds::inclusive(&min, &100);
        let err = interval_default(Some(&x), &bounds, "x").unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Violation(ViolationKind::ArgumentOutOfRange));
    }

    #[test]
    fn dynamic_values_agree_with_native_ordering(min in -100i64..100, max in -100i64..100, x in -150i64..150) {
        let (vmin, vmax, vx) = (Value::Int(min), Value::Int(max), Value::Int(x));
        let native = interval_default(Some(&x), &Bounds::inclusive(&min, &max), "x").is_ok();
        let dynamic = interval_default(Some(&vx), &Bounds::inclusive(&vmin, &vmax), "x").is_ok();
        prop_assert_eq!(native, dynamic);
    }
}

// ============================================================================
// NOT EMPTY: fails iff present and zero-length
// ============================================================================

proptest! {
    #[test]
    fn not_empty_text(s in ".{0,8}") {
        prop_assert_eq!(not_empty_default(Some(s.as_str()), "s").is_ok(), !s.is_empty());
    }

    #[test]
    fn not_empty_collection(items in proptest::collection::vec(any::<u8>(), 0..8)) {
        prop_assert_eq!(not_empty_default(Some(&items), "items").is_ok(), !items.is_empty());
    }

    #[test]
    fn not_empty_absent_never_fails(_s in ".{0,4}") {
        prop_assert!(not_empty_default(None::<&str>, "s").is_ok());
    }
}

// ============================================================================
// PATTERN: idempotent, absent never fails
// ============================================================================

proptest! {
    #[test]
    fn pattern_agrees_with_regex(s in "[a-c]{0,6}") {
        let regex = regex::Regex::new("^a+b").unwrap();
        let ok = pattern_default(Some(s.as_str()), Some(&regex), "s").is_ok();
        prop_assert_eq!(ok, regex.is_match(&s));
    }
}
