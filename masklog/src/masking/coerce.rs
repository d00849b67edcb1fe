//! Coercion of typed Rust values into the dynamic [`Value`] model.
//!
//! [`ToValue`] is the explicit coercion interface. It is total: every
//! implementation produces a value and none of them fail.
//!
//! ## What coerces to what
//!
//! | Input | Output |
//! |-------|--------|
//! | `()`, `None`, `PhantomData` | `Null` |
//! | `bool`, integers, floats | `Bool` / `Number` (non-finite floats become `Null`) |
//! | `char`, `str`, `String`, `Cow<str>` | `String` |
//! | `Vec`, slices, arrays, sets, `VecDeque` | `Sequence` |
//! | `HashMap`, `BTreeMap` with `Display` keys | `Mapping` |
//! | `&T`, `Box`, `Rc`, `Arc` | the pointee |
//! | `#[derive(Masked)]` types | `Record` |
//! | [`Textual`] / [`Serialized`] | re-coerced from their textual form |
//!
//! Types outside this table either derive `Masked`, implement `ToValue`
//! by hand, or opt into the textual fallback through [`TextSerializable`].

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    fmt::Display,
    marker::PhantomData,
    rc::Rc,
    sync::Arc,
};

use serde::Serialize;
use serde_json::{Number, Value as JsonValue};

use crate::value::Value;

/// Converts a typed value into the dynamic value model.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Coerces `value`. Shorthand for [`ToValue::to_value`].
pub fn coerce<T: ToValue + ?Sized>(value: &T) -> Value {
    value.to_value()
}

// =============================================================================
// Textual fallback
// =============================================================================

/// Values that only expose an external textual representation.
///
/// This covers wire messages and other opaque types whose fields are not
/// visible to the record model. Coercion prefers [`to_json_text`], falls back
/// to [`to_text`], and coerces to `Null` when neither is available.
///
/// [`to_json_text`]: TextSerializable::to_json_text
/// [`to_text`]: TextSerializable::to_text
pub trait TextSerializable {
    /// The value rendered as JSON text.
    fn to_json_text(&self) -> Option<String> {
        None
    }

    /// The value's plain string form.
    fn to_text(&self) -> Option<String> {
        None
    }
}

/// Re-coerces JSON text into the tree it encodes. Text that does not parse
/// stays a string.
pub fn from_json_text(text: &str) -> Value {
    serde_json::from_str::<JsonValue>(text)
        .map_or_else(|_| Value::String(text.to_string()), Value::from)
}

/// Coerces a value through its textual fallback.
///
/// Plain text stays a `String` here; the normalizer still expands it when it
/// holds a JSON object or array.
pub fn coerce_text<T: TextSerializable + ?Sized>(value: &T) -> Value {
    if let Some(json) = value.to_json_text() {
        return from_json_text(&json);
    }
    value.to_text().map_or(Value::Null, Value::String)
}

/// Adapts a [`TextSerializable`] type to [`ToValue`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Textual<T>(pub T);

impl<T: TextSerializable> ToValue for Textual<T> {
    fn to_value(&self) -> Value {
        coerce_text(&self.0)
    }
}

/// Adapts any `serde::Serialize` type to [`ToValue`] through its JSON text.
///
/// Serialization failures coerce to `Null`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Serialized<T>(pub T);

impl<T: Serialize> TextSerializable for Serialized<T> {
    fn to_json_text(&self) -> Option<String> {
        serde_json::to_string(&self.0).ok()
    }
}

impl<T: Serialize> ToValue for Serialized<T> {
    fn to_value(&self) -> Value {
        coerce_text(self)
    }
}

// =============================================================================
// ToValue implementations for standard library types
// =============================================================================

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for JsonValue {
    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl<T: ?Sized> ToValue for PhantomData<T> {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_to_value_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

impl_to_value_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ToValue for i128 {
    fn to_value(&self) -> Value {
        i64::try_from(*self).map_or_else(
            |_| Value::String(self.to_string()),
            |small| Value::Number(Number::from(small)),
        )
    }
}

impl ToValue for u128 {
    fn to_value(&self) -> Value {
        u64::try_from(*self).map_or_else(
            |_| Value::String(self.to_string()),
            |small| Value::Number(Number::from(small)),
        )
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        f64::from(*self).to_value()
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &mut T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, S> ToValue for HashSet<T, S> {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<K: Display, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.to_value()))
                .collect(),
        )
    }
}

impl<K: Display, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.to_value()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{BTreeMap, HashMap, HashSet},
        rc::Rc,
        sync::Arc,
    };

    use serde::Serialize;
    use serde_json::json;

    use super::{coerce, coerce_text, from_json_text, Serialized, TextSerializable, Textual, ToValue};
    use crate::value::Value;

    struct TextOnly(&'static str);

    impl TextSerializable for TextOnly {
        fn to_text(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    struct Opaque;

    impl TextSerializable for Opaque {}

    #[test]
    fn none_and_unit_coerce_to_null() {
        assert_eq!(coerce(&None::<String>), Value::Null);
        assert_eq!(coerce(&()), Value::Null);
        assert_eq!(coerce(&std::marker::PhantomData::<u8>), Value::Null);
    }

    #[test]
    fn scalars_map_directly() {
        assert_eq!(coerce(&true), Value::Bool(true));
        assert_eq!(coerce(&42_i32).into_json(), json!(42));
        assert_eq!(coerce(&123.456_f64).into_json(), json!(123.456));
        assert_eq!(coerce("text"), Value::String("text".into()));
        assert_eq!(coerce(&'c'), Value::String("c".into()));
    }

    #[test]
    fn non_finite_floats_coerce_to_null() {
        assert_eq!(coerce(&f64::NAN), Value::Null);
        assert_eq!(coerce(&f32::INFINITY), Value::Null);
    }

    #[test]
    fn wide_integers_outside_json_range_become_strings() {
        assert_eq!(coerce(&7_i128).into_json(), json!(7));
        let huge = u128::from(u64::MAX) + 1;
        assert_eq!(coerce(&huge), Value::String(huge.to_string()));
    }

    #[test]
    fn indirections_are_transparent() {
        let boxed: Box<String> = Box::new("a".into());
        let rc = Rc::new(5_u8);
        let arc = Arc::new(Some(false));
        assert_eq!(coerce(&boxed), Value::String("a".into()));
        assert_eq!(coerce(&rc).into_json(), json!(5));
        assert_eq!(coerce(&arc), Value::Bool(false));
        assert_eq!(coerce(&&&"deep"), Value::String("deep".into()));
    }

    #[test]
    fn collections_map_to_sequences_and_mappings() {
        assert_eq!(coerce(&vec![1_u32, 2]).into_json(), json!([1, 2]));
        assert_eq!(coerce(&["a", "b"]).into_json(), json!(["a", "b"]));

        let set: HashSet<u8> = [9].into_iter().collect();
        assert_eq!(coerce(&set).into_json(), json!([9]));

        let mut ints: HashMap<i32, i32> = HashMap::new();
        ints.insert(1, 1);
        ints.insert(2, 2);
        assert_eq!(coerce(&ints).into_json(), json!({"1": 1, "2": 2}));

        let mut nested: BTreeMap<&str, Vec<Option<&str>>> = BTreeMap::new();
        nested.insert("k", vec![Some("v"), None]);
        assert_eq!(coerce(&nested).into_json(), json!({"k": ["v", null]}));
    }

    #[test]
    fn json_values_coerce_structurally() {
        let json = json!({"a": {"b": [true]}});
        assert_eq!(coerce(&json).into_json(), json);
    }

    #[test]
    fn textual_fallback_prefers_json_form() {
        #[derive(Serialize)]
        struct Message {
            #[serde(rename = "Text")]
            text: String,
        }

        let value = Serialized(Message {
            text: "lorem ipsum".into(),
        })
        .to_value();
        assert_eq!(value.into_json(), json!({"Text": "lorem ipsum"}));
    }

    #[test]
    fn textual_fallback_uses_text_when_no_json() {
        assert_eq!(
            Textual(TextOnly("plain text")).to_value(),
            Value::String("plain text".into())
        );
        assert_eq!(
            Textual(TextOnly(r#"{"k": 1}"#)).to_value(),
            Value::String(r#"{"k": 1}"#.into())
        );
    }

    #[test]
    fn json_text_that_fails_to_parse_stays_a_string() {
        assert_eq!(from_json_text("{not json"), Value::String("{not json".into()));
        assert_eq!(from_json_text("5").into_json(), json!(5));
    }

    #[test]
    fn value_without_any_representation_is_null() {
        assert_eq!(coerce_text(&Opaque), Value::Null);
    }
}
