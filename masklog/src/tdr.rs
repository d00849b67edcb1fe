//! Transaction detail records (TDR).
//!
//! A TDR describes one request/response round trip. [`TdrModel`] carries the
//! raw, coerced payloads; [`assemble_tdr`] normalizes them into a
//! [`TdrRecord`] ready to be emitted.

use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{
    context::LogContext,
    masking::{MaskPolicy, Normalizer, ToValue},
    value::Value,
};

/// Value of the `logType` key on every TDR.
pub const TDR_LOG_TYPE: &str = "TDR";

/// Raw transaction detail, before normalization.
///
/// Payload slots hold coerced values; set them with the `with_*` helpers or
/// by assigning a [`Value`] directly. Unset slots are `Null`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TdrModel {
    pub app_name: String,
    pub app_version: String,
    pub thread_id: String,
    pub journey_id: String,
    pub chain_id: String,
    pub path: String,
    pub method: String,
    pub ip: String,
    pub port: u16,
    pub src_ip: String,
    /// Response time in milliseconds.
    pub resp_time: i64,
    pub response_code: String,
    pub header: Value,
    pub request: Value,
    pub response: Value,
    pub error: String,
    pub additional_data: Value,
}

impl TdrModel {
    #[must_use]
    pub fn with_header<T: ToValue + ?Sized>(mut self, header: &T) -> Self {
        self.header = header.to_value();
        self
    }

    #[must_use]
    pub fn with_request<T: ToValue + ?Sized>(mut self, request: &T) -> Self {
        self.request = request.to_value();
        self
    }

    #[must_use]
    pub fn with_response<T: ToValue + ?Sized>(mut self, response: &T) -> Self {
        self.response = response.to_value();
        self
    }

    #[must_use]
    pub fn with_additional_data<T: ToValue + ?Sized>(mut self, data: &T) -> Self {
        self.additional_data = data.to_value();
        self
    }
}

/// Keys a TDR writes itself. Context keys with these names are shadowed.
const TDR_KEYS: &[&str] = &[
    "logType",
    "appName",
    "appVersion",
    "threadID",
    "journeyID",
    "chainID",
    "path",
    "method",
    "ip",
    "port",
    "srcIP",
    "respTime",
    "responseCode",
    "header",
    "request",
    "response",
    "error",
    "additionalData",
];

/// An assembled TDR: scalars unchanged, payloads normalized.
///
/// It serializes as one flat JSON object. The context's keys are merged in
/// next to the TDR keys; where both define a key (`threadID`, `journeyID`,
/// `chainID`, `additionalData`) the TDR's value is written.
#[derive(Clone, Debug, PartialEq)]
pub struct TdrRecord {
    log_type: &'static str,
    pub context: LogContext,
    pub app_name: String,
    pub app_version: String,
    pub thread_id: String,
    pub journey_id: String,
    pub chain_id: String,
    pub path: String,
    pub method: String,
    pub ip: String,
    pub port: u16,
    pub src_ip: String,
    pub resp_time: i64,
    pub response_code: String,
    pub header: Value,
    pub request: Value,
    pub response: Value,
    pub error: String,
    pub additional_data: Value,
}

impl TdrRecord {
    pub fn log_type(&self) -> &'static str {
        self.log_type
    }
}

impl Serialize for TdrRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.context
            .serialize_entries(&mut map, |key| TDR_KEYS.contains(&key))?;
        map.serialize_entry("logType", self.log_type)?;
        map.serialize_entry("appName", &self.app_name)?;
        map.serialize_entry("appVersion", &self.app_version)?;
        map.serialize_entry("threadID", &self.thread_id)?;
        map.serialize_entry("journeyID", &self.journey_id)?;
        map.serialize_entry("chainID", &self.chain_id)?;
        map.serialize_entry("path", &self.path)?;
        map.serialize_entry("method", &self.method)?;
        map.serialize_entry("ip", &self.ip)?;
        map.serialize_entry("port", &self.port)?;
        map.serialize_entry("srcIP", &self.src_ip)?;
        map.serialize_entry("respTime", &self.resp_time)?;
        map.serialize_entry("responseCode", &self.response_code)?;
        map.serialize_entry("header", &self.header)?;
        map.serialize_entry("request", &self.request)?;
        map.serialize_entry("response", &self.response)?;
        map.serialize_entry("error", &self.error)?;
        map.serialize_entry("additionalData", &self.additional_data)?;
        map.end()
    }
}

fn payload(normalizer: &Normalizer, slot: Value) -> Value {
    match normalizer.normalize_value(slot) {
        Value::Null => Value::empty_mapping(),
        normalized => normalized,
    }
}

/// Normalizes every payload slot of `model` and attaches `context`.
///
/// Slots that normalize to `Null` become an empty mapping. The header is
/// expanded like the other slots but never masked.
pub fn assemble_tdr(context: &LogContext, model: TdrModel, mask_enabled: bool) -> TdrRecord {
    let normalizer = Normalizer::new(MaskPolicy::new(mask_enabled));
    let header_normalizer = Normalizer::new(MaskPolicy::disabled());
    TdrRecord {
        log_type: TDR_LOG_TYPE,
        context: context.clone(),
        app_name: model.app_name,
        app_version: model.app_version,
        thread_id: model.thread_id,
        journey_id: model.journey_id,
        chain_id: model.chain_id,
        path: model.path,
        method: model.method,
        ip: model.ip,
        port: model.port,
        src_ip: model.src_ip,
        resp_time: model.resp_time,
        response_code: model.response_code,
        header: payload(&header_normalizer, model.header),
        request: payload(&normalizer, model.request),
        response: payload(&normalizer, model.response),
        error: model.error,
        additional_data: payload(&normalizer, model.additional_data),
    }
}
