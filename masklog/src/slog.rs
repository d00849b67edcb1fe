//! `slog` integration: the explicit logger handle.
//!
//! [`Logger`] assembles SYS entries and TDRs with its fixed [`MaskPolicy`] and
//! hands them to a `slog` drain as nested JSON values. Every record carries two
//! keys: `logType` (`"SYS"` or `"TDR"`) and `entry` (the assembled payload).
//!
//! The module never fails a log call: serialization problems are logged as a
//! placeholder string instead of being propagated.
//!
//! ## Example
//! ```ignore
//! use masklog::{slog::Logger, Field, LogContext, LoggerConfig};
//!
//! let logger = Logger::new(drain, &LoggerConfig::default().with_mask(true));
//! logger.info(&context, "payment accepted", &[Field::new("account", &account)]);
//! ```

use std::panic::{RefUnwindSafe, UnwindSafe};

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Drain, Key, Record as SlogRecord, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    config::{LogLevel, LoggerConfig},
    context::LogContext,
    entry::{Field, SysEntry, SYS_LOG_TYPE},
    masking::MaskPolicy,
    tdr::{assemble_tdr, TdrModel, TDR_LOG_TYPE},
};

const SERIALIZE_FAILED: &str = "Failed to serialize log entry";

/// A `slog::Value` that emits an assembled entry as structured JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonEntry {
    value: JsonValue,
}

impl JsonEntry {
    pub fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// Serializes `entry`, storing a placeholder string if that fails.
    pub fn from_serialize<T: Serialize + ?Sized>(entry: &T) -> Self {
        let value = serde_json::to_value(entry)
            .unwrap_or_else(|_| JsonValue::String(SERIALIZE_FAILED.to_string()));
        Self::new(value)
    }

    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for JsonEntry {
    fn serialize(
        &self,
        record: &SlogRecord<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

macro_rules! emit {
    ($logger:expr, $macro:ident, $message:expr, $log_type:expr, $entry:expr) => {
        slog::$macro!($logger, "{}", $message; "logType" => $log_type, "entry" => $entry)
    };
}

/// Logging handle with a fixed level and mask policy.
///
/// The handle is cheap to clone and shares its drain between clones.
#[derive(Clone)]
pub struct Logger {
    inner: slog::Logger,
    level: LogLevel,
    policy: MaskPolicy,
    noop: bool,
}

impl Logger {
    /// Builds a logger that writes to `drain`, filtered at `config.level`.
    ///
    /// With `config.noop` set, the drain is dropped and nothing is emitted.
    pub fn new<D>(drain: D, config: &LoggerConfig) -> Self
    where
        D: Drain + Send + Sync + UnwindSafe + RefUnwindSafe + 'static,
    {
        if config.noop {
            return Self::discarding(config);
        }
        let filtered = slog::LevelFilter::new(drain, config.level.into()).ignore_res();
        Self {
            inner: slog::Logger::root(filtered, slog::o!()),
            level: config.level,
            policy: MaskPolicy::new(config.mask),
            noop: false,
        }
    }

    /// A logger that discards everything.
    pub fn noop() -> Self {
        Self::discarding(&LoggerConfig {
            noop: true,
            ..LoggerConfig::default()
        })
    }

    fn discarding(config: &LoggerConfig) -> Self {
        Self {
            inner: slog::Logger::root(slog::Discard, slog::o!()),
            level: config.level,
            policy: MaskPolicy::new(config.mask),
            noop: true,
        }
    }

    pub fn policy(&self) -> MaskPolicy {
        self.policy
    }

    /// Returns `true` when an entry at `level` would reach the drain.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        !self.noop && level >= self.level
    }

    pub fn debug(&self, context: &LogContext, message: &str, fields: &[Field]) {
        self.sys(LogLevel::Debug, context, message, fields);
    }

    pub fn info(&self, context: &LogContext, message: &str, fields: &[Field]) {
        self.sys(LogLevel::Info, context, message, fields);
    }

    pub fn warn(&self, context: &LogContext, message: &str, fields: &[Field]) {
        self.sys(LogLevel::Warn, context, message, fields);
    }

    pub fn error(&self, context: &LogContext, message: &str, fields: &[Field]) {
        self.sys(LogLevel::Error, context, message, fields);
    }

    /// Emits a SYS entry at `level`.
    pub fn sys(&self, level: LogLevel, context: &LogContext, message: &str, fields: &[Field]) {
        if !self.is_enabled(level) {
            return;
        }
        let entry = SysEntry::assemble(context, level, message, fields, self.policy.is_enabled());
        let entry = JsonEntry::from_serialize(&entry);
        match level {
            LogLevel::Debug => emit!(self.inner, debug, message, SYS_LOG_TYPE, entry),
            LogLevel::Info => emit!(self.inner, info, message, SYS_LOG_TYPE, entry),
            LogLevel::Warn => emit!(self.inner, warn, message, SYS_LOG_TYPE, entry),
            LogLevel::Error => emit!(self.inner, error, message, SYS_LOG_TYPE, entry),
        }
    }

    /// Emits a transaction detail record at info level.
    pub fn tdr(&self, context: &LogContext, model: TdrModel) {
        if !self.is_enabled(LogLevel::Info) {
            return;
        }
        let record = assemble_tdr(context, model, self.policy.is_enabled());
        let entry = JsonEntry::from_serialize(&record);
        emit!(self.inner, info, TDR_LOG_TYPE, TDR_LOG_TYPE, entry);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::noop()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use std::sync::{Arc, Mutex};

    use super::{JsonEntry, Logger};
    use crate::{
        config::{LogLevel, LoggerConfig},
        context::LogContext,
    };

    #[derive(Clone, Default)]
    struct CountingDrain {
        count: Arc<Mutex<usize>>,
    }

    impl slog::Drain for CountingDrain {
        type Ok = ();
        type Err = slog::Never;

        fn log(
            &self,
            _record: &slog::Record<'_>,
            _values: &slog::OwnedKVList,
        ) -> Result<Self::Ok, Self::Err> {
            *self.count.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn json_entry_keeps_serialized_form() {
        let entry = JsonEntry::from_serialize(&json!({"a": [1]}));
        assert_eq!(entry.as_json(), &json!({"a": [1]}));
    }

    #[test]
    fn default_logger_is_noop() {
        let logger = Logger::default();
        assert!(!logger.is_enabled(LogLevel::Error));
        assert!(!logger.policy().is_enabled());
    }

    #[test]
    fn level_filter_matches_config() {
        let config = LoggerConfig::default().with_level(LogLevel::Warn).with_mask(true);
        let logger = Logger::new(slog::Discard, &config);
        assert!(!logger.is_enabled(LogLevel::Info));
        assert!(logger.is_enabled(LogLevel::Warn));
        assert!(logger.is_enabled(LogLevel::Error));
        assert!(logger.policy().is_enabled());
    }

    #[test]
    fn noop_config_discards() {
        let config = LoggerConfig {
            noop: true,
            ..LoggerConfig::default()
        };
        let logger = Logger::new(slog::Discard, &config);
        assert!(!logger.is_enabled(LogLevel::Error));
    }

    #[test]
    fn shared_state_drain_receives_entries() {
        let drain = CountingDrain::default();
        let logger = Logger::new(drain.clone(), &LoggerConfig::default());
        let context = LogContext::default();

        logger.debug(&context, "filtered", &[]);
        logger.info(&context, "kept", &[]);
        logger.tdr(&context, crate::tdr::TdrModel::default());

        assert_eq!(*drain.count.lock().unwrap(), 2);
    }
}
