//! Request-scoped log context.

use std::collections::BTreeMap;

use serde::{
    ser::{Error as _, SerializeMap},
    Deserialize, Serialize,
};
use serde_json::Value as JsonValue;

/// Metadata attached to every entry emitted for one request.
///
/// The context is passed explicitly to each log call and is never masked.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogContext {
    pub service_name: String,
    pub service_version: String,
    pub service_port: u16,
    #[serde(rename = "threadID")]
    pub thread_id: String,
    #[serde(rename = "journeyID")]
    pub journey_id: String,
    #[serde(rename = "chainID")]
    pub chain_id: String,
    pub tag: String,
    pub req_method: String,
    #[serde(rename = "reqURI")]
    pub req_uri: String,
    pub additional_data: BTreeMap<String, JsonValue>,
}

impl LogContext {
    pub fn new(service_name: impl Into<String>, thread_id: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            thread_id: thread_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_additional(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.additional_data.insert(key.into(), value.into());
        self
    }

    /// Writes the context's keys into an entry being serialized, leaving out
    /// every key for which `shadowed` returns `true`.
    ///
    /// Entries call this first and then write their own keys, so an entry
    /// key always takes precedence over a context key with the same name.
    pub(crate) fn serialize_entries<M, F>(&self, map: &mut M, shadowed: F) -> Result<(), M::Error>
    where
        M: SerializeMap,
        F: Fn(&str) -> bool,
    {
        let JsonValue::Object(entries) = serde_json::to_value(self).map_err(M::Error::custom)?
        else {
            return Ok(());
        };
        for (key, value) in &entries {
            if !shadowed(key) {
                map.serialize_entry(key, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::LogContext;

    #[test]
    fn serializes_with_wire_names() {
        let mut context = LogContext::new("payments", "t-1");
        context.journey_id = "j-1".into();
        context.req_uri = "/v1/pay".into();
        let context = context.with_additional("region", "id");

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["serviceName"], "payments");
        assert_eq!(json["threadID"], "t-1");
        assert_eq!(json["journeyID"], "j-1");
        assert_eq!(json["reqURI"], "/v1/pay");
        assert_eq!(json["servicePort"], 0);
        assert_eq!(json["additionalData"], json!({"region": "id"}));
    }

    #[test]
    fn shadowed_keys_are_left_out() {
        struct Merged<'a>(&'a LogContext);

        impl serde::Serialize for Merged<'_> {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use serde::ser::SerializeMap;

                let mut map = serializer.serialize_map(None)?;
                self.0
                    .serialize_entries(&mut map, |key| key == "threadID")?;
                map.serialize_entry("threadID", "own")?;
                map.end()
            }
        }

        let context = LogContext::new("payments", "t-1");
        let text = serde_json::to_string(&Merged(&context)).unwrap();
        assert_eq!(text.matches("\"threadID\"").count(), 1);

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["threadID"], "own");
        assert_eq!(json["serviceName"], "payments");
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let context: LogContext = serde_json::from_str(r#"{"serviceName":"svc"}"#).unwrap();
        assert_eq!(context.service_name, "svc");
        assert!(context.thread_id.is_empty());
        assert!(context.additional_data.is_empty());
    }
}
