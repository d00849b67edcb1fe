//! Property tests for the masking rules and the normalizer.
//!
//! Masking is length-preserving and stable: masking an already masked value,
//! or normalizing an already normalized record, changes nothing.

use masklog::{normalize, Classification, FieldDescriptor, RecordValue, ToValue, Value};
use proptest::prelude::*;
use serde_json::Value as JsonValue;

fn classification() -> impl Strategy<Value = Classification> {
    prop::sample::select(Classification::MASKED.to_vec())
}

fn arb_json() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        any::<i64>().prop_map(JsonValue::from),
        "[a-z0-9 ]{0,12}".prop_map(JsonValue::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|map| JsonValue::Object(map.into_iter().collect())),
        ]
    })
}

fn single_field(classification: Classification, text: &str) -> Value {
    Value::Record(RecordValue::new(
        "Single",
        vec![FieldDescriptor {
            name: "value",
            classification,
            value: Value::String(text.to_string()),
        }],
    ))
}

proptest! {
    #[test]
    fn masking_preserves_length(class in classification(), text in "\\PC{0,40}") {
        let masked = class.mask(&text);
        prop_assert_eq!(masked.chars().count(), text.chars().count());
    }

    #[test]
    fn masking_is_deterministic(class in classification(), text in "\\PC{0,40}") {
        prop_assert_eq!(class.mask(&text), class.mask(&text));
    }

    #[test]
    fn masking_is_idempotent(class in classification(), text in "\\PC{0,40}") {
        let once = class.mask(&text);
        prop_assert_eq!(class.mask(&once), once);
    }

    #[test]
    fn renormalizing_masked_records_is_stable(
        class in classification(),
        text in "[a-zA-Z0-9 @.]{0,30}",
    ) {
        let once = normalize(&single_field(class, &text), true);
        let twice = normalize(&once, true);

        let masked = once.as_record().and_then(|record| record.get("value")).cloned();
        let remasked = twice.as_record().and_then(|record| record.get("value")).cloned();
        let Some(Value::String(masked)) = masked else {
            return Err(TestCaseError::fail("masked field is not a string"));
        };
        prop_assert_eq!(masked.chars().count(), text.chars().count());
        prop_assert_eq!(remasked, Some(Value::String(masked)));
    }

    #[test]
    fn short_values_are_exempt(text in "[a-zA-Z0-9]{0,2}") {
        for class in Classification::MASKED {
            prop_assert_eq!(class.mask(&text), text.clone());
        }
    }

    #[test]
    fn pin_and_phone_keep_last_four(text in "[0-9]{5,16}") {
        let tail: String = text.chars().skip(text.chars().count() - 4).collect();
        prop_assert!(Classification::Pin.mask(&text).ends_with(&tail));
        prop_assert!(Classification::Phone.mask(&text).ends_with(&tail));
    }

    #[test]
    fn unclassified_values_pass_through(text in "[a-z ]{0,20}") {
        let value = single_field(Classification::None, &text);
        prop_assert_eq!(normalize(&value, true), value.to_value());
    }

    #[test]
    fn disabled_policy_never_changes_strings(class in classification(), text in "[a-z ]{0,20}") {
        let value = single_field(class, &text);
        let normalized = normalize(&value, false);
        let record = normalized.as_record().cloned().unwrap();
        prop_assert_eq!(record.get("value"), Some(&Value::String(text)));
    }

    #[test]
    fn json_round_trip_is_identity(json in arb_json()) {
        let normalized = normalize(&json, true);
        prop_assert_eq!(normalized.into_json(), json);
    }

    #[test]
    fn encoded_arrays_expand_to_their_tree(
        json in prop::collection::vec(arb_json(), 0..4).prop_map(JsonValue::Array)
    ) {
        let text = serde_json::to_string(&json).unwrap();
        prop_assert_eq!(normalize(text.as_str(), false).into_json(), json);
    }
}
