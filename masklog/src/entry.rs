//! SYS entries: application events with level, message and fields.

use std::collections::BTreeMap;

use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{
    config::LogLevel,
    context::LogContext,
    masking::{MaskPolicy, Normalizer, ToValue},
    value::Value,
};

/// Value of the `logType` key on every SYS entry.
pub const SYS_LOG_TYPE: &str = "SYS";

/// One key/value pair attached to a SYS entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new<T: ToValue + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        Self {
            key: key.into(),
            value: value.to_value(),
        }
    }
}

/// Keys a SYS entry always writes. Fields and context keys cannot replace them.
const RESERVED_KEYS: [&str; 3] = ["logType", "level", "message"];

/// An assembled SYS entry with normalized field values.
///
/// It serializes as one flat JSON object holding the context keys, the
/// fields and the reserved keys. When names collide, a reserved key beats a
/// field and a field beats a context key.
#[derive(Clone, Debug, PartialEq)]
pub struct SysEntry {
    log_type: &'static str,
    pub level: LogLevel,
    pub message: String,
    pub context: LogContext,
    pub fields: BTreeMap<String, Value>,
}

impl SysEntry {
    /// Normalizes every field value. When keys repeat, the last one wins.
    pub fn assemble(
        context: &LogContext,
        level: LogLevel,
        message: impl Into<String>,
        fields: &[Field],
        mask_enabled: bool,
    ) -> Self {
        let normalizer = Normalizer::new(MaskPolicy::new(mask_enabled));
        let fields = fields
            .iter()
            .map(|field| (field.key.clone(), normalizer.normalize(&field.value)))
            .collect();
        Self {
            log_type: SYS_LOG_TYPE,
            level,
            message: message.into(),
            context: context.clone(),
            fields,
        }
    }

    pub fn log_type(&self) -> &'static str {
        self.log_type
    }
}

impl Serialize for SysEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.context.serialize_entries(&mut map, |key| {
            RESERVED_KEYS.contains(&key) || self.fields.contains_key(key)
        })?;
        for (key, value) in &self.fields {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("logType", self.log_type)?;
        map.serialize_entry("level", &self.level)?;
        map.serialize_entry("message", &self.message)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Field, SysEntry};
    use crate::{config::LogLevel, context::LogContext};

    #[test]
    fn serializes_flat_sys_layout() {
        let context = LogContext::new("svc", "t-1");
        let entry = SysEntry::assemble(
            &context,
            LogLevel::Info,
            "charged",
            &[Field::new("amount", &1500_u32), Field::new("body", r#"{"ok":true}"#)],
            true,
        );
        let json = serde_json::to_value(&entry).unwrap();
        let mut expected = serde_json::to_value(&context).unwrap();
        let expected_map = expected.as_object_mut().unwrap();
        expected_map.insert("logType".into(), json!("SYS"));
        expected_map.insert("level".into(), json!("info"));
        expected_map.insert("message".into(), json!("charged"));
        expected_map.insert("amount".into(), json!(1500));
        expected_map.insert("body".into(), json!({"ok": true}));
        assert_eq!(json, expected);
    }

    #[test]
    fn collisions_resolve_reserved_then_fields_then_context() {
        let entry = SysEntry::assemble(
            &LogContext::new("svc", "t-1"),
            LogLevel::Info,
            "real message",
            &[
                Field::new("message", "spoofed"),
                Field::new("serviceName", "from field"),
            ],
            false,
        );
        let text = serde_json::to_string(&entry).unwrap();
        assert_eq!(text.matches("\"message\"").count(), 1);
        assert_eq!(text.matches("\"serviceName\"").count(), 1);

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["message"], "real message");
        assert_eq!(json["serviceName"], "from field");
        assert_eq!(json["threadID"], "t-1");
    }

    #[test]
    fn last_duplicate_key_wins() {
        let entry = SysEntry::assemble(
            &LogContext::default(),
            LogLevel::Debug,
            "dup",
            &[Field::new("k", "first"), Field::new("k", "second")],
            false,
        );
        assert_eq!(entry.fields.len(), 1);
        assert_eq!(entry.fields["k"].as_str(), Some("second"));
    }

    #[test]
    fn no_fields_serializes_context_and_reserved_keys() {
        let entry = SysEntry::assemble(&LogContext::default(), LogLevel::Warn, "m", &[], true);
        let json = serde_json::to_value(&entry).unwrap();
        let expected = serde_json::to_value(LogContext::default()).unwrap();
        assert_eq!(json.as_object().unwrap().len(), expected.as_object().unwrap().len() + 3);
        assert_eq!(json["level"], "warn");
    }
}
