//! Parsing of `#[mask(...)]` field attributes.
//!
//! This module maps attribute syntax to per-field decisions and produces
//! structured errors for invalid forms.

use proc_macro2::{Ident, Span};
use syn::{Attribute, LitStr, Meta, Result};

/// Classification variants, keyed by their lowercase tag name.
const CLASSIFICATIONS: &[(&str, &str)] = &[
    ("none", "None"),
    ("pin", "Pin"),
    ("name", "Name"),
    ("phone", "Phone"),
    ("any", "Any"),
    ("base64", "Base64"),
    ("email", "Email"),
];

/// What the derive does with one field.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy |
/// |-----------|----------|
/// | None | `Emit` with classification `None` |
/// | `#[mask(Pin)]` | `Emit` with classification `Pin` |
/// | `#[mask(rename = "x")]` | `Emit` under the name `x` |
/// | `#[mask(flatten)]` | `Flatten` |
/// | `#[mask(skip)]` | `Skip` |
#[derive(Clone, Debug)]
pub(crate) enum Strategy {
    Emit {
        /// `Classification` variant to register.
        classification: Ident,
        rename: Option<String>,
    },
    /// Merge the embedded record's fields into the parent.
    Flatten,
    Skip,
}

#[derive(Default)]
struct FieldOptions {
    classification: Option<Ident>,
    rename: Option<String>,
    flatten: bool,
    skip: bool,
}

fn classification_variant(name: &Ident) -> Result<Ident> {
    let tag = name.to_string().to_ascii_lowercase();
    CLASSIFICATIONS
        .iter()
        .find(|(candidate, _)| *candidate == tag)
        .map(|(_, variant)| Ident::new(variant, name.span()))
        .ok_or_else(|| {
            syn::Error::new(
                name.span(),
                format!(
                    "unknown classification `{name}`; expected one of pin, name, phone, any, \
base64, email"
                ),
            )
        })
}

fn parse_mask_list(attr: &Attribute, options: &mut FieldOptions) -> Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("rename") {
            if options.rename.is_some() {
                return Err(meta.error("duplicate `rename` option"));
            }
            let lit: LitStr = meta.value()?.parse()?;
            options.rename = Some(lit.value());
            return Ok(());
        }
        if meta.path.is_ident("flatten") {
            if options.flatten {
                return Err(meta.error("duplicate `flatten` option"));
            }
            options.flatten = true;
            return Ok(());
        }
        if meta.path.is_ident("skip") {
            if options.skip {
                return Err(meta.error("duplicate `skip` option"));
            }
            options.skip = true;
            return Ok(());
        }

        let Some(ident) = meta.path.get_ident() else {
            return Err(meta.error("expected a classification name (e.g., #[mask(pin)])"));
        };
        let variant = classification_variant(ident)?;
        if options.classification.is_some() {
            return Err(meta.error("multiple classifications specified on the same field"));
        }
        options.classification = Some(variant);
        Ok(())
    })
}

fn resolve(options: FieldOptions, span: Span) -> Result<Strategy> {
    let FieldOptions {
        classification,
        rename,
        flatten,
        skip,
    } = options;

    if skip {
        if flatten || classification.is_some() || rename.is_some() {
            return Err(syn::Error::new(
                span,
                "`skip` cannot be combined with other #[mask] options",
            ));
        }
        return Ok(Strategy::Skip);
    }
    if flatten {
        if classification.is_some() || rename.is_some() {
            return Err(syn::Error::new(
                span,
                "`flatten` cannot be combined with a classification or `rename`",
            ));
        }
        return Ok(Strategy::Flatten);
    }
    Ok(Strategy::Emit {
        classification: classification.unwrap_or_else(|| Ident::new("None", span)),
        rename,
    })
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute], span: Span) -> Result<Strategy> {
    let mut options = FieldOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }

        match &attr.meta {
            Meta::List(_) => parse_mask_list(attr, &mut options)?,
            Meta::Path(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected a classification or option (e.g., #[mask(pin)])",
                ));
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "name-value syntax is not supported for #[mask]",
                ));
            }
        }
    }

    resolve(options, span)
}
