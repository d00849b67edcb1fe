//! Per-field code generation for `#[derive(Masked)]`.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;
use syn::LitStr;

use crate::{container::RenameRule, generics::collect_generics_from_type, strategy::Strategy};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) crate_root: &'a TokenStream,
    pub(crate) rename_all: Option<RenameRule>,
    /// Parameters that must implement `ToValue`.
    pub(crate) value_generics: &'a mut Vec<Ident>,
    /// Parameters that must implement `Record`.
    pub(crate) record_generics: &'a mut Vec<Ident>,
}

/// Tokens one field contributes to `describe_fields` and `collect_fields`.
pub(crate) struct FieldTokens {
    pub(crate) describe: TokenStream,
    pub(crate) collect: TokenStream,
}

/// Output name for an emitted field: explicit rename, then `rename_all`, then
/// the identifier itself.
fn output_name(ident: &Ident, rename: Option<&str>, rename_all: Option<RenameRule>) -> String {
    use syn::ext::IdentExt;

    if let Some(rename) = rename {
        return rename.to_string();
    }
    let name = ident.unraw().to_string();
    rename_all.map_or_else(|| name.clone(), |rule| rule.apply(&name))
}

/// Generates the tokens for a single named field.
///
/// | Strategy | `describe_fields` | `collect_fields` |
/// |----------|-------------------|------------------|
/// | `Emit` | registers the name | pushes the coerced value |
/// | `Flatten` | delegates to the field's type | delegates to the field |
/// | `Skip` | nothing | nothing |
pub(crate) fn generate_field_tokens(
    ctx: &mut DeriveContext<'_>,
    ident: &Ident,
    ty: &syn::Type,
    span: Span,
    strategy: &Strategy,
) -> FieldTokens {
    let root = ctx.crate_root;

    match strategy {
        Strategy::Skip => FieldTokens {
            describe: TokenStream::new(),
            collect: TokenStream::new(),
        },
        Strategy::Flatten => {
            collect_generics_from_type(ty, ctx.generics, ctx.record_generics);
            FieldTokens {
                describe: quote_spanned! { span =>
                    <#ty as #root::Record>::describe_fields(table);
                },
                collect: quote_spanned! { span =>
                    #root::Record::collect_fields(&self.#ident, fields);
                },
            }
        }
        Strategy::Emit {
            classification,
            rename,
        } => {
            collect_generics_from_type(ty, ctx.generics, ctx.value_generics);
            let name = LitStr::new(
                &output_name(ident, rename.as_deref(), ctx.rename_all),
                ident.span(),
            );
            FieldTokens {
                describe: quote_spanned! { span =>
                    table.insert(#name, #root::Classification::#classification);
                },
                collect: quote_spanned! { span =>
                    fields.push((#name, #root::ToValue::to_value(&self.#ident)));
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proc_macro2::Span;
    use syn::parse_quote;

    use super::output_name;
    use crate::container::RenameRule;

    #[test]
    fn explicit_rename_wins_over_rule() {
        let ident = parse_quote!(phone_number);
        assert_eq!(
            output_name(&ident, Some("msisdn"), Some(RenameRule::CamelCase)),
            "msisdn"
        );
        assert_eq!(
            output_name(&ident, None, Some(RenameRule::CamelCase)),
            "phoneNumber"
        );
        assert_eq!(output_name(&ident, None, None), "phone_number");
    }

    #[test]
    fn raw_identifiers_are_unprefixed() {
        let ident = proc_macro2::Ident::new_raw("type", Span::call_site());
        assert_eq!(output_name(&ident, None, None), "type");
    }
}
