//! Property tests for the relative time order and the whitelist codec.

use std::cmp::Ordering;

use cim_setup::reltime::compare;
use cim_setup::whitelist::{decode, encode};
use proptest::prelude::*;

fn relative_time() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0".to_string()),
        Just(String::new()),
        (1u32..500, prop::sample::select(vec!["s", "h", "d", "w", "mon", "q", "y", "days", "hours"]))
            .prop_map(|(n, unit)| format!("-{n}{unit}")),
        "[a-z0-9-]{0,6}",
    ]
}

proptest! {
    #[test]
    fn compare_is_antisymmetric(a in relative_time(), b in relative_time()) {
        prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
    }

    #[test]
    fn compare_equal_only_for_same_string(a in relative_time(), b in relative_time()) {
        prop_assert_eq!(compare(&a, &b) == Ordering::Equal, a == b);
    }

    #[test]
    fn compare_is_transitive(a in relative_time(), b in relative_time(), c in relative_time()) {
        if compare(&a, &b) != Ordering::Greater && compare(&b, &c) != Ordering::Greater {
            prop_assert_ne!(compare(&a, &c), Ordering::Greater);
        }
    }

    #[test]
    fn codec_round_trips_simple_names(names in prop::collection::vec("[A-Za-z0-9_*-]{1,12}", 0..8)) {
        prop_assert_eq!(decode(&encode(&names)), names.join(","));
    }

    #[test]
    fn encode_is_parenthesized(names in prop::collection::vec("[a-z_]{0,8}", 0..6)) {
        let encoded = encode(&names);
        prop_assert!(encoded.starts_with('(') && encoded.ends_with(')'));
    }
}
