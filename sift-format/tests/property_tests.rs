//! Property-based tests for Sift format primitives

use proptest::prelude::*;
use serde_json::{Map, Value};
use sift_format::json::{decode, encode};
use sift_format::value::{parse_numeric, Numeric};
use sift_format::{is_date, is_timestamp, JsonOptions};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        // Quarter steps are exact in binary and in short decimal form
        (-4000i32..4000).prop_map(|q| Value::from(f64::from(q) / 4.0)),
        any::<String>().prop_map(Value::String),
        "[a-z/<>&'\"]{0,12}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::vec(("[A-Za-z0-9_/]{0,8}", inner), 0..8)
                .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

fn arb_options() -> impl Strategy<Value = JsonOptions> {
    // FORCE_OBJECT intentionally changes the shape, so it is left out
    (0u32..512).prop_map(|bits| {
        JsonOptions::from_bits_truncate(bits).difference(JsonOptions::FORCE_OBJECT)
    })
}

proptest! {
    #[test]
    fn json_roundtrip_property(value in arb_value(), options in arb_options()) {
        let encoded = encode(&value, options).expect("encode");
        let decoded = decode(&encoded).expect("decode");
        prop_assert_eq!(value, decoded);
    }

    #[test]
    fn timestamp_bounds_property(n in any::<i64>()) {
        prop_assert_eq!(is_timestamp(n), (0..=2_147_483_647).contains(&n));
    }

    #[test]
    fn integer_strings_are_numeric_property(n in any::<i64>()) {
        prop_assert_eq!(parse_numeric(&n.to_string()), Some(Numeric::Int(n)));
    }

    #[test]
    fn formatted_dates_are_valid_property(
        year in 1000i32..9999,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let date = format!("{year:04}-{month:02}-{day:02}");
        prop_assert!(is_date(&date));
    }

    #[test]
    fn unpadded_dates_are_rejected_property(
        year in 1000i32..9999,
        month in 1u32..=9,
        day in 1u32..=9,
    ) {
        let date = format!("{year}-{month}-{day}");
        prop_assert!(!is_date(&date));
    }
}
