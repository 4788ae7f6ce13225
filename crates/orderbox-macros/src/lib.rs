//! Procedural macros for Orderbox records.
//!
//! This crate provides `#[derive(Record)]`, which turns a struct definition
//! into a compile-time wire schema for the reseller API.
//!
//! # Overview
//!
//! Each field that travels on the wire carries a `#[param(...)]` attribute.
//! Fields without one, or marked `#[param(skip)]`, are internal and never
//! encoded, validated or merged.
//!
//! # Example
//!
//! ```rust,ignore
//! use orderbox::prelude::*;
//!
//! #[derive(Debug, Default, Record)]
//! struct SignUpForm {
//!     #[param(name = "username", validate(required, email))]
//!     username: String,
//!     #[param(name = "passwd", validate(required, min = 9, max = 16, custom = password_strength))]
//!     password: String,
//!     #[param(name = "company", optional)]
//!     company: String,
//! }
//! ```
//!
//! # Macro Expansion
//!
//! The derive:
//!
//! 1. Parses the `#[param]` attribute of every field
//! 2. Rejects unknown keys, unknown rules and duplicate wire names
//! 3. Emits a `'static` `FieldTag` table in declaration order
//! 4. Emits `fields()` and `backfill_from()` over the tagged fields

mod derive;
mod parse;

use proc_macro::TokenStream;

/// Derives `orderbox_core::Record` for a struct with named fields.
///
/// # Field Attributes
///
/// - `name = "wire-name"`: the wire parameter name (required, unique)
/// - `optional`: a zero value is left out of the request instead of failing
/// - `skip`: the field is internal
/// - `validate(...)`: rules, checked in order
///
/// # Rules
///
/// | Rule | Meaning |
/// |------|---------|
/// | `required` | must not be the zero value |
/// | `email` | an email address |
/// | `number` | decimal digits only |
/// | `len = N` | exactly N characters |
/// | `min = N` / `max = N` | at least / at most N characters |
/// | `country_code` | ISO 3166-1 alpha-2 code |
/// | `one_of("a", "b")` | one of the listed values |
/// | `custom = path` | a `fn(&str) -> bool` predicate |
///
/// The length rules count characters of the wire text. The derive rejects
/// them on numeric and `bool` fields, where they would not bound the value.
///
/// # Generated Code
///
/// The derive generates approximately:
///
/// ```rust,ignore
/// impl ::orderbox_core::Record for SignUpForm {
///     const RECORD_NAME: &'static str = "SignUpForm";
///
///     fn field_tags() -> &'static [::orderbox_core::FieldTag] {
///         const TAGS: &[::orderbox_core::FieldTag] = &[/* one per tagged field */];
///         TAGS
///     }
///
///     fn fields(&self) -> Vec<::orderbox_core::Field<'_>> {
///         let tags = <Self as ::orderbox_core::Record>::field_tags();
///         vec![::orderbox_core::Field::new(&tags[0], &self.username), /* ... */]
///     }
///
///     fn backfill_from(&mut self, previous: &Self) {
///         ::orderbox_core::WireValue::backfill(&mut self.username, &previous.username);
///         // ... every non-optional tagged field
///     }
/// }
/// ```
///
/// The generated code names `::orderbox_core`, so the deriving crate must
/// list `orderbox-core` among its dependencies.
#[proc_macro_derive(Record, attributes(param))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    derive::expand_record(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
