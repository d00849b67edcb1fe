//! Recursive normalization: coercion, JSON-string expansion and redaction.
//!
//! The normalizer turns any [`ToValue`] input into a JSON-ready [`Value`]
//! tree. It walks the whole tree once:
//!
//! - strings holding a JSON object or array are replaced by the parsed tree,
//!   which is normalized again;
//! - sequences, mappings and records are rebuilt from their normalized
//!   children;
//! - a record field whose normalized value is a string is masked with the
//!   field's classification, when the policy enables masking.
//!
//! Values that normalize to a sequence or a mapping are never masked, even
//! under a classified field.

use serde_json::Value as JsonValue;

use super::coerce::ToValue;
use crate::value::{FieldDescriptor, Value};

/// Whether classified string leaves are redacted.
///
/// A policy is fixed when a logger is built and never changes afterwards.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MaskPolicy {
    enabled: bool,
}

impl MaskPolicy {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub const fn enabled() -> Self {
        Self::new(true)
    }

    pub const fn disabled() -> Self {
        Self::new(false)
    }

    pub const fn is_enabled(self) -> bool {
        self.enabled
    }
}

/// Parses `text` as JSON and returns the tree when it is an object or array.
///
/// Anything else (invalid JSON, a bare number, `true`, `"quoted"`) is kept as
/// the original string.
pub fn expand_json(text: String) -> Value {
    match serde_json::from_str::<JsonValue>(&text) {
        Ok(json @ (JsonValue::Object(_) | JsonValue::Array(_))) => Value::from(json),
        _ => Value::String(text),
    }
}

/// Stateless normalizer bound to one [`MaskPolicy`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Normalizer {
    policy: MaskPolicy,
}

impl Normalizer {
    pub const fn new(policy: MaskPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> MaskPolicy {
        self.policy
    }

    /// Coerces `input` and normalizes the result.
    pub fn normalize<T: ToValue + ?Sized>(&self, input: &T) -> Value {
        self.normalize_value(input.to_value())
    }

    /// Normalizes an already coerced value.
    pub fn normalize_value(&self, value: Value) -> Value {
        match value {
            Value::String(text) => match expand_json(text) {
                Value::String(text) => Value::String(text),
                expanded => self.normalize_value(expanded),
            },
            Value::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(|item| self.normalize_value(item))
                    .collect(),
            ),
            Value::Mapping(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, self.normalize_value(value)))
                    .collect(),
            ),
            Value::Record(record) => {
                Value::Record(record.map_fields(|field| self.normalize_field(field)))
            }
            scalar @ (Value::Null | Value::Bool(_) | Value::Number(_)) => scalar,
        }
    }

    fn normalize_field(&self, field: FieldDescriptor) -> FieldDescriptor {
        let value = match self.normalize_value(field.value) {
            Value::String(text) if self.policy.is_enabled() && field.classification.is_masked() => {
                Value::String(field.classification.mask(&text))
            }
            other => other,
        };
        FieldDescriptor { value, ..field }
    }
}

/// Normalizes `input` with masking switched on or off.
pub fn normalize<T: ToValue + ?Sized>(input: &T, mask_enabled: bool) -> Value {
    Normalizer::new(MaskPolicy::new(mask_enabled)).normalize(input)
}
