//! `#[derive(Record)]` implementation.
//!
//! Expands a parsed [`RecordDef`] into an `orderbox_core::Record` impl: a
//! `'static` tag table, the field accessor list and the merge backfill.

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::DeriveInput;

use crate::parse::{ParamField, RecordDef, RuleSpec};

/// Expands `#[derive(Record)]`.
pub fn expand_record(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let def = RecordDef::parse(input)?;
    Ok(generate_record_impl(&def))
}

fn generate_record_impl(def: &RecordDef) -> TokenStream {
    let ident = &def.ident;
    let record_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = def.generics.split_for_impl();

    let tags = def.fields.iter().map(generate_tag);

    let accessors = def.fields.iter().enumerate().map(|(index, field)| {
        let member = &field.member;
        quote! { ::orderbox_core::Field::new(&tags[#index], &self.#member) }
    });
    let fields_body = if def.fields.is_empty() {
        quote! { ::std::vec::Vec::new() }
    } else {
        quote! {
            let tags = <Self as ::orderbox_core::Record>::field_tags();
            ::std::vec![#(#accessors),*]
        }
    };

    // Optional fields keep whatever the caller left in them.
    let backfills = def.fields.iter().filter(|f| !f.optional).map(|field| {
        let member = &field.member;
        quote! {
            ::orderbox_core::WireValue::backfill(&mut self.#member, &previous.#member);
        }
    });

    quote! {
        impl #impl_generics ::orderbox_core::Record for #ident #ty_generics #where_clause {
            const RECORD_NAME: &'static str = #record_name;

            fn field_tags() -> &'static [::orderbox_core::FieldTag] {
                const TAGS: &[::orderbox_core::FieldTag] = &[#(#tags),*];
                TAGS
            }

            fn fields(&self) -> ::std::vec::Vec<::orderbox_core::Field<'_>> {
                #fields_body
            }

            #[allow(unused_variables)]
            fn backfill_from(&mut self, previous: &Self) {
                #(#backfills)*
            }
        }
    }
}

fn generate_tag(field: &ParamField) -> TokenStream {
    let name = field.member.to_string();
    let wire_name = &field.wire_name;
    let optional = field.optional;
    let rules = &field.rules;
    quote! {
        ::orderbox_core::FieldTag {
            field: #name,
            wire_name: #wire_name,
            optional: #optional,
            rules: &[#(#rules),*],
        }
    }
}

impl ToTokens for RuleSpec {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let rule = match self {
            Self::Required => quote! { ::orderbox_core::Rule::Required },
            Self::Email => quote! { ::orderbox_core::Rule::Email },
            Self::Number => quote! { ::orderbox_core::Rule::Number },
            Self::CountryCode => quote! { ::orderbox_core::Rule::CountryCode },
            Self::Len(n) => quote! { ::orderbox_core::Rule::Len(#n) },
            Self::Min(n) => quote! { ::orderbox_core::Rule::Min(#n) },
            Self::Max(n) => quote! { ::orderbox_core::Rule::Max(#n) },
            Self::OneOf(values) => quote! { ::orderbox_core::Rule::OneOf(&[#(#values),*]) },
            Self::Custom(path) => {
                let name = path
                    .segments
                    .last()
                    .map(|s| s.ident.to_string())
                    .unwrap_or_default();
                quote! {
                    ::orderbox_core::Rule::Custom(::orderbox_core::Predicate {
                        name: #name,
                        check: #path,
                    })
                }
            }
        };
        tokens.extend(rule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_basic_record() {
        let input = quote! {
            struct Detail {
                #[param(name = "name", validate(required))]
                name: String,
                #[param(name = "company", optional)]
                company: String,
            }
        };

        let expanded = expand_record(input).unwrap().to_string();
        assert!(expanded.contains("impl :: orderbox_core :: Record for Detail"));
        assert!(expanded.contains("\"company\""));
        assert!(expanded.contains("Rule :: Required"));
    }

    #[test]
    fn test_backfill_skips_optional_fields() {
        let input = quote! {
            struct Detail {
                #[param(name = "name")]
                name: String,
                #[param(name = "company", optional)]
                company: String,
            }
        };

        let expanded = expand_record(input).unwrap().to_string();
        assert!(expanded.contains("& mut self . name"));
        assert!(!expanded.contains("& mut self . company"));
    }

    #[test]
    fn test_expand_custom_predicate() {
        let input = quote! {
            struct Form {
                #[param(name = "passwd", validate(custom = checks::password_strength))]
                password: String,
            }
        };

        let expanded = expand_record(input).unwrap().to_string();
        assert!(expanded.contains("name : \"password_strength\""));
        assert!(expanded.contains("check : checks :: password_strength"));
    }

    #[test]
    fn test_expand_generic_record() {
        let input = quote! {
            struct Wrapper<T: Clone> {
                #[param(name = "id")]
                id: String,
                extra: T,
            }
        };

        let expanded = expand_record(input).unwrap().to_string();
        assert!(expanded.contains("impl < T : Clone > :: orderbox_core :: Record for Wrapper < T >"));
    }

    #[test]
    fn test_expand_enum_fails() {
        let input = quote! {
            enum Kind {
                A,
            }
        };

        assert!(expand_record(input).is_err());
    }
}
