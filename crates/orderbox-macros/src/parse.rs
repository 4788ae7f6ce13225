//! Parsing for `#[derive(Record)]`.
//!
//! This module turns a struct definition and its `#[param(...)]` field
//! attributes into a [`RecordDef`].

use std::collections::HashSet;

use syn::{
    meta::ParseNestedMeta, parenthesized, punctuated::Punctuated, spanned::Spanned, Data,
    DeriveInput, Fields, GenericArgument, Generics, Ident, LitInt, LitStr, Path, PathArguments,
    Token, Type,
};

/// A record struct with its tagged fields.
#[derive(Debug)]
pub struct RecordDef {
    /// The struct name.
    pub ident: Ident,
    /// The struct generics.
    pub generics: Generics,
    /// Tagged fields, in declaration order.
    pub fields: Vec<ParamField>,
}

/// A field carrying `#[param(name = "...")]`.
#[derive(Debug)]
pub struct ParamField {
    /// The Rust field name.
    pub member: Ident,
    /// The wire parameter name.
    pub wire_name: LitStr,
    /// Whether a zero value may be omitted.
    pub optional: bool,
    /// Declared validation rules, in order.
    pub rules: Vec<RuleSpec>,
}

/// A rule inside `validate(...)`.
#[derive(Debug)]
pub enum RuleSpec {
    /// `required`
    Required,
    /// `email`
    Email,
    /// `number`
    Number,
    /// `len = N`
    Len(usize),
    /// `min = N`
    Min(usize),
    /// `max = N`
    Max(usize),
    /// `country_code`
    CountryCode,
    /// `one_of("a", "b")`
    OneOf(Vec<LitStr>),
    /// `custom = path::to::predicate`
    Custom(Path),
}

impl RecordDef {
    /// Parses a derive input.
    pub fn parse(input: DeriveInput) -> syn::Result<Self> {
        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "Record can only be derived for structs with named fields",
                    ))
                }
            },
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "Record can only be derived for structs",
                ))
            }
        };

        let mut fields = Vec::new();
        let mut seen = HashSet::new();
        for field in &named.named {
            let Some(param) = ParamField::from_field(field)? else {
                continue;
            };
            if !seen.insert(param.wire_name.value()) {
                return Err(syn::Error::new(
                    param.wire_name.span(),
                    format!("duplicate wire name `{}`", param.wire_name.value()),
                ));
            }
            fields.push(param);
        }

        Ok(Self {
            ident: input.ident,
            generics: input.generics,
            fields,
        })
    }
}

impl ParamField {
    /// Parses the `#[param]` attribute of a field. Returns `None` for
    /// internal fields.
    fn from_field(field: &syn::Field) -> syn::Result<Option<Self>> {
        let Some(member) = field.ident.clone() else {
            return Err(syn::Error::new(field.span(), "expected a named field"));
        };

        let mut attrs = field.attrs.iter().filter(|a| a.path().is_ident("param"));
        let Some(attr) = attrs.next() else {
            return Ok(None);
        };
        if let Some(extra) = attrs.next() {
            return Err(syn::Error::new(
                extra.span(),
                "only one #[param] attribute is allowed per field",
            ));
        }

        let mut wire_name: Option<LitStr> = None;
        let mut optional = false;
        let mut skip = false;
        let mut rules = Vec::new();

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new(lit.span(), "wire name must not be empty"));
                }
                wire_name = Some(lit);
                Ok(())
            } else if meta.path.is_ident("optional") {
                optional = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else if meta.path.is_ident("validate") {
                meta.parse_nested_meta(|rule| {
                    rules.push(parse_rule(&rule)?);
                    Ok(())
                })
            } else {
                Err(meta.error(format!(
                    "unknown param attribute `{}`",
                    path_name(&meta.path)
                )))
            }
        })?;

        if skip {
            if wire_name.is_some() || optional || !rules.is_empty() {
                return Err(syn::Error::new(
                    attr.span(),
                    "`skip` cannot be combined with other param attributes",
                ));
            }
            return Ok(None);
        }

        let wire_name = wire_name.ok_or_else(|| {
            syn::Error::new(attr.span(), format!("missing `name` for field `{member}`"))
        })?;

        if let Some(rule) = rules.iter().find_map(RuleSpec::length_name) {
            if is_numeric(&field.ty) {
                return Err(syn::Error::new(
                    field.ty.span(),
                    format!("`{rule}` counts characters and cannot be used on numeric field `{member}`"),
                ));
            }
        }

        Ok(Some(Self {
            member,
            wire_name,
            optional,
            rules,
        }))
    }
}

impl RuleSpec {
    /// Name of a rule that measures text length.
    fn length_name(&self) -> Option<&'static str> {
        match self {
            Self::Len(_) => Some("len"),
            Self::Min(_) => Some("min"),
            Self::Max(_) => Some("max"),
            _ => None,
        }
    }
}

/// Numeric or boolean scalar, possibly inside `Option` or `Vec`.
fn is_numeric(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(last) = path.path.segments.last() else {
        return false;
    };

    let name = last.ident.to_string();
    if name == "Option" || name == "Vec" {
        if let PathArguments::AngleBracketed(args) = &last.arguments {
            if let Some(GenericArgument::Type(inner)) = args.args.first() {
                return is_numeric(inner);
            }
        }
        return false;
    }

    matches!(
        name.as_str(),
        "u8" | "u16" | "u32" | "u64" | "u128" | "usize" | "i8" | "i16" | "i32" | "i64" | "i128"
            | "isize" | "f32" | "f64" | "bool"
    )
}

fn parse_rule(meta: &ParseNestedMeta<'_>) -> syn::Result<RuleSpec> {
    let name = path_name(&meta.path);
    match name.as_str() {
        "required" => Ok(RuleSpec::Required),
        "email" => Ok(RuleSpec::Email),
        "number" => Ok(RuleSpec::Number),
        "country_code" => Ok(RuleSpec::CountryCode),
        "len" => Ok(RuleSpec::Len(parse_count(meta)?)),
        "min" => Ok(RuleSpec::Min(parse_count(meta)?)),
        "max" => Ok(RuleSpec::Max(parse_count(meta)?)),
        "one_of" => {
            let content;
            parenthesized!(content in meta.input);
            let values = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
            if values.is_empty() {
                return Err(meta.error("one_of needs at least one value"));
            }
            Ok(RuleSpec::OneOf(values.into_iter().collect()))
        }
        "custom" => {
            let path: Path = meta.value()?.parse()?;
            Ok(RuleSpec::Custom(path))
        }
        _ => Err(meta.error(format!("unknown validation rule `{name}`"))),
    }
}

fn parse_count(meta: &ParseNestedMeta<'_>) -> syn::Result<usize> {
    let lit: LitInt = meta.value()?.parse()?;
    lit.base10_parse()
}

fn path_name(path: &Path) -> String {
    path.segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}
