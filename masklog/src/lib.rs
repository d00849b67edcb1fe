//! Structured request logging with classification-driven payload masking.
//!
//! This crate separates:
//! - **Classification**: which masking rule applies to a record field, declared
//!   once on the type with `#[mask(...)]`.
//! - **Normalization**: coercing any payload into a JSON-ready [`Value`] tree,
//!   expanding strings that hold JSON objects or arrays, and masking classified
//!   string leaves when the [`MaskPolicy`] allows it.
//!
//! On top of the normalizer sit two entry kinds:
//! - **SYS** entries ([`SysEntry`]): a level, a message and key/value fields.
//! - **TDR** records ([`TdrRecord`]): one request/response round trip with
//!   timing, scalar metadata and four payload slots.
//!
//! Key rules:
//! - Unannotated fields pass through unchanged.
//! - Masking only touches string leaves directly under a classified field;
//!   fields that expand to a mapping or sequence are left as they are.
//! - Every rule preserves length and leaves short values untouched.
//! - The core is total: invalid JSON stays a string, uncoercible values become
//!   `null`, and nothing panics.
//!
//! No I/O happens outside the `slog` drain handed to `slog::Logger::new`.
//!
//! The `Masked` derive macro lives in `masklog-derive` and is re-exported when
//! the `derive` feature is enabled.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[cfg(feature = "derive")]
pub use masklog_derive::Masked;

#[allow(unused_extern_crates)]
extern crate self as masklog;

// Module declarations
mod classification;
mod config;
mod context;
mod entry;
pub mod masking;
pub mod sanitize;
#[cfg(feature = "slog")]
pub mod slog;
mod tdr;
mod value;

// Re-exports
pub use classification::{Classification, ClassificationError, ClassificationTable};
pub use config::{ConfigError, LogLevel, LoggerConfig};
pub use context::LogContext;
pub use entry::{Field, SysEntry, SYS_LOG_TYPE};
pub use masking::{
    classify, coerce, normalize, MaskPolicy, Normalizer, Record, Serialized, TextSerializable,
    Textual, ToValue,
};
pub use sanitize::{sanitize_name, sanitize_phone_number};
pub use tdr::{assemble_tdr, TdrModel, TdrRecord, TDR_LOG_TYPE};
pub use value::{FieldDescriptor, RecordValue, Value};
