//! Struct-specific `Record` derivation.
//!
//! This module generates the field descriptor bodies for a struct and collects
//! the generic parameters that require trait bounds.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    container::RenameRule,
    strategy::parse_field_strategy,
    transform::{generate_field_tokens, DeriveContext},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) describe_body: TokenStream,
    pub(crate) collect_body: TokenStream,
    pub(crate) value_generics: Vec<Ident>,
    pub(crate) record_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    data: DataStruct,
    generics: &syn::Generics,
    crate_root: &TokenStream,
    rename_all: Option<RenameRule>,
) -> Result<StructDeriveOutput> {
    let fields = match data.fields {
        Fields::Named(fields) => fields.named,
        Fields::Unit => Default::default(),
        Fields::Unnamed(fields) => {
            return Err(syn::Error::new(
                fields.span(),
                "`Masked` requires named fields; tuple structs have no field names to classify",
            ));
        }
    };

    let mut value_generics = Vec::new();
    let mut record_generics = Vec::new();
    let mut describe = Vec::new();
    let mut collect = Vec::new();

    let mut ctx = DeriveContext {
        generics,
        crate_root,
        rename_all,
        value_generics: &mut value_generics,
        record_generics: &mut record_generics,
    };

    for field in fields {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs, span)?;
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new(span, "named field should have an identifier"));
        };
        let tokens = generate_field_tokens(&mut ctx, ident, &field.ty, span, &strategy);
        describe.push(tokens.describe);
        collect.push(tokens.collect);
    }

    Ok(StructDeriveOutput {
        describe_body: quote! { #(#describe)* },
        collect_body: quote! { #(#collect)* },
        value_generics,
        record_generics,
    })
}
