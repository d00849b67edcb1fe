//! Field classifications: "which masking rule applies to this field?"
//!
//! A classification is static metadata attached to a record field at the
//! type's definition (via `#[mask(...)]`). The set is closed: every
//! classification maps to exactly one rule in [`crate::masking`].

use std::{collections::BTreeMap, fmt, str::FromStr};

use thiserror::Error;

/// Classification categories understood by the masking rules.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum Classification {
    /// Not sensitive; the field is never masked.
    #[default]
    None,
    /// Numeric PINs and similar short secrets.
    Pin,
    /// Personal names, masked per whitespace-separated token.
    Name,
    /// Phone numbers.
    Phone,
    /// Any other sensitive text.
    Any,
    /// Base64 payloads, masked as opaque text.
    Base64,
    /// Email addresses, masked per `@`-separated part.
    Email,
}

impl Classification {
    /// All classifications that select a masking rule.
    pub const MASKED: [Classification; 6] = [
        Classification::Pin,
        Classification::Name,
        Classification::Phone,
        Classification::Any,
        Classification::Base64,
        Classification::Email,
    ];

    /// Returns the tag name used in `#[mask(...)]` attributes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Classification::None => "none",
            Classification::Pin => "pin",
            Classification::Name => "name",
            Classification::Phone => "phone",
            Classification::Any => "any",
            Classification::Base64 => "base64",
            Classification::Email => "email",
        }
    }

    /// Returns `true` when a masking rule applies.
    pub const fn is_masked(self) -> bool {
        !matches!(self, Classification::None)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tag name does not name a classification.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ClassificationError {
    #[error("unknown classification `{0}`; expected one of pin, name, phone, any, base64, email")]
    Unknown(String),
}

impl FromStr for Classification {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Classification::None),
            "pin" => Ok(Classification::Pin),
            "name" => Ok(Classification::Name),
            "phone" => Ok(Classification::Phone),
            "any" => Ok(Classification::Any),
            "base64" => Ok(Classification::Base64),
            "email" => Ok(Classification::Email),
            _ => Err(ClassificationError::Unknown(s.to_string())),
        }
    }
}

/// Per-type map from output field name to classification.
///
/// Built once per record type by [`crate::classify`]. When two fields share a
/// name (e.g. through `#[mask(flatten)]`), the first registration wins, which
/// matches the order fields are collected in.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClassificationTable {
    entries: BTreeMap<&'static str, Classification>,
}

impl ClassificationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`. Later registrations of the same name are ignored.
    pub fn insert(&mut self, name: &'static str, classification: Classification) {
        self.entries.entry(name).or_insert(classification);
    }

    /// Classification for `name`; unknown fields are [`Classification::None`].
    pub fn get(&self, name: &str) -> Classification {
        self.entries.get(name).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Classification)> + '_ {
        self.entries.iter().map(|(name, class)| (*name, *class))
    }
}
