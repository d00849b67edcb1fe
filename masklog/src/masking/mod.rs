//! Coercion, classification lookup, masking rules and normalization.
//!
//! - [`coerce`]: typed values into the dynamic [`crate::Value`] model.
//! - [`registry`]: the [`Record`] descriptor and the per-type classification
//!   cache.
//! - [`rules`]: length-preserving string masks.
//! - [`normalize`](mod@normalize): the recursive pass tying them together.

pub mod coerce;
pub mod normalize;
pub mod registry;
pub mod rules;

pub use coerce::{
    coerce, coerce_text, from_json_text, Serialized, TextSerializable, Textual, ToValue,
};
pub use normalize::{expand_json, normalize, MaskPolicy, Normalizer};
pub use registry::{classify, Record};
pub use rules::{
    mask_any, mask_email, mask_name, mask_phone_number, mask_phone_suffix, mask_pin, KeepConfig,
    MaskConfig, MaskRule, MASK_ASTERISK, MASK_X,
};
