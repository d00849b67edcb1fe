//! Masking rules for string leaves.
//!
//! Rules are pure string transformations. They do not traverse structures or
//! decide whether a field is sensitive; [`super::normalize`] does that. Every
//! rule works on Unicode scalar values and preserves the input's length.

use crate::classification::Classification;

/// Mask symbol for PINs and the generic rules.
pub const MASK_ASTERISK: char = '*';
/// Mask symbol for phone numbers.
pub const MASK_X: char = 'X';

/// Keeps selected segments visible while masking the remainder.
///
/// If the visible segments cover the whole value, the value is unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeepConfig {
    /// Number of leading characters to keep visible.
    visible_prefix: usize,
    /// Number of trailing characters to keep visible.
    visible_suffix: usize,
    /// Symbol used to mask the middle.
    mask_char: char,
}

impl KeepConfig {
    /// Keeps only the first `visible_prefix` scalar values.
    #[must_use]
    pub fn first(visible_prefix: usize) -> Self {
        Self::both(visible_prefix, 0)
    }

    /// Keeps only the last `visible_suffix` scalar values.
    #[must_use]
    pub fn last(visible_suffix: usize) -> Self {
        Self::both(0, visible_suffix)
    }

    /// Keeps both leading and trailing characters visible.
    #[must_use]
    pub fn both(visible_prefix: usize, visible_suffix: usize) -> Self {
        Self {
            visible_prefix,
            visible_suffix,
            mask_char: MASK_ASTERISK,
        }
    }

    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Applies the configuration to `value`.
    pub fn apply_to(&self, value: &str) -> String {
        let mut chars: Vec<char> = value.chars().collect();
        let total = chars.len();
        if self.visible_prefix.saturating_add(self.visible_suffix) >= total {
            return value.to_string();
        }

        for ch in &mut chars[self.visible_prefix..(total - self.visible_suffix)] {
            *ch = self.mask_char;
        }
        chars.into_iter().collect()
    }
}

/// Masks selected segments while leaving the remainder unchanged.
///
/// Values no longer than the masked spans are returned as-is, mirroring
/// [`KeepConfig`]'s short-value exemption.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(clippy::struct_field_names)]
pub struct MaskConfig {
    /// Number of leading characters to mask.
    mask_prefix: usize,
    /// Number of trailing characters to mask.
    mask_suffix: usize,
    mask_char: char,
}

impl MaskConfig {
    #[must_use]
    pub fn first(mask_prefix: usize) -> Self {
        Self {
            mask_prefix,
            mask_suffix: 0,
            mask_char: MASK_ASTERISK,
        }
    }

    #[must_use]
    pub fn last(mask_suffix: usize) -> Self {
        Self {
            mask_prefix: 0,
            mask_suffix,
            mask_char: MASK_ASTERISK,
        }
    }

    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    pub fn apply_to(&self, value: &str) -> String {
        let mut chars: Vec<char> = value.chars().collect();
        let total = chars.len();
        if self.mask_prefix.saturating_add(self.mask_suffix) >= total {
            return value.to_string();
        }

        for ch in &mut chars[..self.mask_prefix] {
            *ch = self.mask_char;
        }
        for ch in &mut chars[(total - self.mask_suffix)..] {
            *ch = self.mask_char;
        }
        chars.into_iter().collect()
    }
}

/// Length-tiered masking for a single name or email token.
///
/// | Token length | Visible |
/// |---|---|
/// | > 4 | first 2 and last 1 |
/// | 4 | first 2 |
/// | 3 | first 1 |
/// | ≤ 2 | everything |
fn mask_token(token: &str) -> String {
    let config = match token.chars().count() {
        len if len > 4 => KeepConfig::both(2, 1),
        4 => KeepConfig::first(2),
        3 => KeepConfig::first(1),
        _ => return token.to_string(),
    };
    config.apply_to(token)
}

fn mask_tokens(value: &str, separator: char) -> String {
    value
        .split(separator)
        .map(mask_token)
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

/// The masking strategy selected by a classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MaskRule {
    /// Leave the value untouched.
    Keep,
    /// Mask everything outside the configured visible segments.
    Visible(KeepConfig),
    /// Split on `separator` and mask each token by length tier.
    Tokens { separator: char },
}

impl MaskRule {
    /// Applies the rule. This is total and never changes the length.
    pub fn apply_to(&self, value: &str) -> String {
        match self {
            MaskRule::Keep => value.to_string(),
            MaskRule::Visible(config) => config.apply_to(value),
            MaskRule::Tokens { separator } => mask_tokens(value, *separator),
        }
    }
}

impl Classification {
    /// The rule this classification applies to string leaves.
    pub fn rule(self) -> MaskRule {
        match self {
            Classification::None => MaskRule::Keep,
            Classification::Pin => MaskRule::Visible(KeepConfig::last(4)),
            Classification::Phone => {
                MaskRule::Visible(KeepConfig::last(4).with_mask_char(MASK_X))
            }
            Classification::Name => MaskRule::Tokens { separator: ' ' },
            Classification::Email => MaskRule::Tokens { separator: '@' },
            Classification::Any | Classification::Base64 => {
                MaskRule::Visible(KeepConfig::last(3))
            }
        }
    }

    /// Masks `value` with this classification's rule.
    pub fn mask(self, value: &str) -> String {
        self.rule().apply_to(value)
    }
}

/// Masks every character except the last four with `*`.
pub fn mask_pin(pin: &str) -> String {
    Classification::Pin.mask(pin)
}

/// Masks every character except the last four with `X`.
///
/// `08000000111` becomes `XXXXXXX0111`.
pub fn mask_phone_number(phone_number: &str) -> String {
    Classification::Phone.mask(phone_number)
}

/// Masks the last four characters of a phone number with `X`.
///
/// `08000000111` becomes `0800000XXXX`.
pub fn mask_phone_suffix(phone_number: &str) -> String {
    MaskConfig::last(4).with_mask_char(MASK_X).apply_to(phone_number)
}

/// Masks each space-separated token of a name by length tier.
///
/// `Johnny Depp` becomes `Jo***y De**`; `Nur Ady` becomes `N** A**`.
pub fn mask_name(name: &str) -> String {
    Classification::Name.mask(name)
}

/// Masks the local part and the domain of an email by length tier.
///
/// `johnny.depp@gmail.com` becomes `jo********p@gm******m`.
pub fn mask_email(email: &str) -> String {
    Classification::Email.mask(email)
}

/// Masks every character except the last three with `*`.
pub fn mask_any(value: &str) -> String {
    Classification::Any.mask(value)
}
