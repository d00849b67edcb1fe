//! The dynamic value model every payload is coerced into.
//!
//! [`Value`] has exactly seven shapes: null, boolean, number, string, ordered
//! sequence, string-keyed mapping, and record. Records are the only shape that
//! carries field metadata, so they are the only place masking can apply.

use std::collections::BTreeMap;

use serde::{
    ser::{SerializeMap, SerializeSeq},
    Serialize, Serializer,
};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::classification::Classification;

/// A JSON-ready, schema-less value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
    Record(RecordValue),
}

impl Value {
    /// An empty mapping (`{}`).
    pub fn empty_mapping() -> Self {
        Value::Mapping(BTreeMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Converts into a `serde_json::Value`. Records become objects.
    pub fn into_json(self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(flag) => JsonValue::Bool(flag),
            Value::Number(number) => JsonValue::Number(number),
            Value::String(text) => JsonValue::String(text),
            Value::Sequence(items) => {
                JsonValue::Array(items.into_iter().map(Value::into_json).collect())
            }
            Value::Mapping(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(key, value)| (key, value.into_json()))
                    .collect::<JsonMap<String, JsonValue>>(),
            ),
            Value::Record(record) => {
                let mut object = JsonMap::new();
                for field in record.fields {
                    object.insert(field.name.to_string(), field.value.into_json());
                }
                JsonValue::Object(object)
            }
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(flag) => Value::Bool(flag),
            JsonValue::Number(number) => Value::Number(number),
            JsonValue::String(text) => Value::String(text),
            JsonValue::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(object) => Value::Mapping(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        value.into_json()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::Number(number) => number.serialize(serializer),
            Value::String(text) => serializer.serialize_str(text),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

/// One field of a record, with the classification resolved for its type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub classification: Classification,
    pub value: Value,
}

/// A coerced struct-like value: its type name plus classified fields in
/// declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordValue {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl RecordValue {
    /// Builds a record from already classified fields.
    ///
    /// Fields whose name already appeared are dropped, so the first
    /// occurrence of a name wins.
    pub fn new(type_name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        let mut unique: Vec<FieldDescriptor> = Vec::with_capacity(fields.len());
        for field in fields {
            if !unique.iter().any(|seen| seen.name == field.name) {
                unique.push(field);
            }
        }
        Self {
            type_name,
            fields: unique,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Value of the field called `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field(name).map(|field| &field.value)
    }

    pub fn into_fields(self) -> Vec<FieldDescriptor> {
        self.fields
    }

    /// Rebuilds the record with every field passed through `f`.
    #[must_use]
    pub fn map_fields<F>(self, mut f: F) -> Self
    where
        F: FnMut(FieldDescriptor) -> FieldDescriptor,
    {
        Self {
            type_name: self.type_name,
            fields: self.fields.into_iter().map(&mut f).collect(),
        }
    }
}

impl Serialize for RecordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(field.name, &field.value)?;
        }
        map.end()
    }
}
