//! Derive macro for `masklog`.
//!
//! This crate generates the field descriptors behind `#[derive(Masked)]`. It:
//! - reads `#[mask(...)]` container and field attributes
//! - emits a `masklog::Record` implementation listing every output field with
//!   its classification
//! - emits a `masklog::ToValue` implementation that coerces the struct into a
//!   record value
//!
//! It does **not** define classifications or masking rules. Those live in the
//! main `masklog` crate and are applied at runtime by the normalizer.

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
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
use container::{parse_container_options, ContainerOptions};
use derive_struct::{derive_struct, StructDeriveOutput};
use generics::add_bounds;

/// Derives `masklog::Record` and `masklog::ToValue` for structs with named
/// fields.
///
/// # Container Attributes
///
/// - `#[mask(rename_all = "camelCase")]` - Renames every field. Also accepts `snake_case`,
///   `PascalCase`, `lowercase`, `UPPERCASE`, `SCREAMING_SNAKE_CASE` and `kebab-case`.
///
/// # Field Attributes
///
/// - **No annotation**: The field is emitted unmasked. Its type must implement `ToValue`.
///
/// - `#[mask(pin)]`, `#[mask(Name)]`, `#[mask(phone)]`, `#[mask(any)]`, `#[mask(base64)]`,
///   `#[mask(email)]`: Classifies the field. Names are case-insensitive. The rule only applies
///   when the field normalizes to a string.
///
/// - `#[mask(rename = "...")]`: Emits the field under another name. Combines with a
///   classification, e.g. `#[mask(pin, rename = "PIN")]`.
///
/// - `#[mask(flatten)]`: Merges the fields of an embedded `Masked` type into this one. When
///   names collide, the first field collected wins.
///
/// - `#[mask(skip)]`: Leaves the field out entirely.
///
/// Enums, unions and tuple structs are rejected at compile time.
///
/// # Generated Impls
///
/// - `Record`: bounds are added only for type parameters that appear in collected fields.
/// - `ToValue`: coerces into a record value. Requires `Self: 'static`, since classification
///   tables are cached per `TypeId`.
#[proc_macro_derive(Masked, attributes(mask))]
pub fn derive_masked(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the masklog crate root.
///
/// Handles crate renaming (e.g., `logs = { package = "masklog", ... }`)
/// and internal usage (when derive is used inside masklog itself).
fn crate_root() -> TokenStream {
    match crate_name("masklog") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::masklog },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { rename_all } = parse_container_options(&attrs)?;

    let crate_root = crate_root();

    let StructDeriveOutput {
        describe_body,
        collect_body,
        value_generics,
        record_generics,
    } = match data {
        Data::Struct(data) => derive_struct(data, &generics, &crate_root, rename_all)?,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "`Masked` cannot be derived for enums; implement `ToValue` by hand",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Masked` cannot be derived for unions",
            ));
        }
    };

    let record_generics = add_bounds(
        generics.clone(),
        &record_generics,
        &quote! { #crate_root::Record },
    );
    let record_generics = add_bounds(
        record_generics,
        &value_generics,
        &quote! { #crate_root::ToValue },
    );
    let (impl_generics, ty_generics, where_clause) = record_generics.split_for_impl();

    let mut value_impl_generics = record_generics.clone();
    value_impl_generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: 'static));
    let (value_impl_generics, _, value_where_clause) = value_impl_generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #crate_root::Record for #ident #ty_generics #where_clause {
            fn type_name() -> &'static str {
                stringify!(#ident)
            }

            #[allow(unused_variables)]
            fn describe_fields(table: &mut #crate_root::ClassificationTable) {
                #describe_body
            }

            #[allow(unused_variables)]
            fn collect_fields(
                &self,
                fields: &mut ::std::vec::Vec<(&'static str, #crate_root::Value)>,
            ) {
                #collect_body
            }
        }

        impl #value_impl_generics #crate_root::ToValue for #ident #ty_generics #value_where_clause {
            fn to_value(&self) -> #crate_root::Value {
                #crate_root::Value::Record(#crate_root::RecordValue::of(self))
            }
        }
    })
}
