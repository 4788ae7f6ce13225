//! Field tag schema.
//!
//! A [`Record`] exposes a `'static` list of [`FieldTag`]s describing how each
//! field travels on the wire: its parameter name, whether it may be omitted,
//! and which [`Rule`]s it must satisfy. The list is produced at compile time
//! by `#[derive(Record)]`; nothing here inspects types at runtime.
//!
//! Field values are reached through [`WireValue`], which knows the zero value
//! of a type and how to render it as one or more wire strings.

use std::borrow::Cow;
use std::fmt;

/// A named predicate over a single wire string.
///
/// Predicates are plain functions attached to a field's rules where the
/// record type is defined.
#[derive(Clone, Copy)]
pub struct Predicate {
    /// Rule name reported in validation errors.
    pub name: &'static str,
    /// Returns true when the value is acceptable.
    pub check: fn(&str) -> bool,
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("name", &self.name).finish()
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A validation rule declared on a field.
///
/// Apart from [`Rule::Required`], rules are only checked when the field is
/// non-zero, and they apply to every element of a sequence field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// The field must not be its zero value.
    Required,
    /// An email address.
    Email,
    /// Decimal digits only.
    Number,
    /// Exactly `n` characters.
    Len(usize),
    /// At least `n` characters.
    Min(usize),
    /// At most `n` characters.
    Max(usize),
    /// ISO 3166-1 alpha-2 country code.
    CountryCode,
    /// One of a fixed set of values.
    OneOf(&'static [&'static str]),
    /// A custom predicate.
    Custom(Predicate),
}

impl Rule {
    /// Name of the rule as reported in validation errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Number => "number",
            Self::Len(_) => "len",
            Self::Min(_) => "min",
            Self::Max(_) => "max",
            Self::CountryCode => "country_code",
            Self::OneOf(_) => "one_of",
            Self::Custom(p) => p.name,
        }
    }
}

/// Per-field wire contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldTag {
    /// Rust field name.
    pub field: &'static str,
    /// Parameter name on the wire.
    pub wire_name: &'static str,
    /// Whether a zero value may be omitted from the request.
    pub optional: bool,
    /// Validation rules, checked in order.
    pub rules: &'static [Rule],
}

impl FieldTag {
    /// Returns true if the field declares [`Rule::Required`].
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }
}

/// A single-valued type that renders as one wire string.
///
/// Implemented for `String`, `bool` and the numeric primitives. String-like
/// enums implement it so they can be used inside `Option` and `Vec` fields.
pub trait WireScalar {
    /// The value as it appears on the wire.
    fn wire_text(&self) -> Cow<'_, str>;

    /// Whether this is the type's zero value.
    fn is_zero(&self) -> bool;
}

/// A field type that can carry a [`FieldTag`].
pub trait WireValue {
    /// Whether the field holds its zero value.
    fn is_zero(&self) -> bool;

    /// The wire strings for this value: one for scalars, one per element for
    /// sequences, none for an absent option.
    fn wire_texts(&self) -> Vec<Cow<'_, str>>;

    /// Fills this value from `previous` during a merge.
    ///
    /// Only `String` fields are backfilled; every other type keeps its
    /// current value.
    fn backfill(&mut self, previous: &Self)
    where
        Self: Sized,
    {
        let _ = previous;
    }
}

impl WireScalar for String {
    fn wire_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl WireValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn wire_texts(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.as_str())]
    }

    fn backfill(&mut self, previous: &Self) {
        if self.is_empty() {
            self.clone_from(previous);
        }
    }
}

impl WireScalar for bool {
    fn wire_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

macro_rules! scalar_wire_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WireValue for $ty {
                fn is_zero(&self) -> bool {
                    WireScalar::is_zero(self)
                }

                fn wire_texts(&self) -> Vec<Cow<'_, str>> {
                    vec![self.wire_text()]
                }
            }
        )*
    };
}

macro_rules! integer_wire_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WireScalar for $ty {
                fn wire_text(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

macro_rules! float_wire_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WireScalar for $ty {
                fn wire_text(&self) -> Cow<'_, str> {
                    Cow::Owned(format!("{self:.2}"))
                }

                #[allow(clippy::float_cmp)]
                fn is_zero(&self) -> bool {
                    *self == 0.0
                }
            }
        )*
    };
}

integer_wire_scalar!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
float_wire_scalar!(f32, f64);
scalar_wire_value!(bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl<T: WireScalar> WireValue for Option<T> {
    fn is_zero(&self) -> bool {
        self.as_ref().map_or(true, WireScalar::is_zero)
    }

    fn wire_texts(&self) -> Vec<Cow<'_, str>> {
        self.iter().map(WireScalar::wire_text).collect()
    }
}

impl<T: WireScalar> WireValue for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn wire_texts(&self) -> Vec<Cow<'_, str>> {
        self.iter().map(WireScalar::wire_text).collect()
    }
}

/// A tagged field paired with its current value.
pub struct Field<'a> {
    /// The field's wire contract.
    pub tag: &'static FieldTag,
    /// The field's value.
    pub value: &'a dyn WireValue,
}

impl<'a> Field<'a> {
    /// Pairs a tag with a value.
    #[must_use]
    pub fn new(tag: &'static FieldTag, value: &'a dyn WireValue) -> Self {
        Self { tag, value }
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("tag", self.tag)
            .field("texts", &self.value.wire_texts())
            .finish()
    }
}

/// A record type with a declared wire schema.
///
/// Implement with `#[derive(Record)]` from the `orderbox` crate rather than
/// by hand; the derive keeps [`Record::field_tags`], [`Record::fields`] and
/// [`Record::backfill_from`] in step with the struct definition.
pub trait Record {
    /// Type name used in errors and log events.
    const RECORD_NAME: &'static str;

    /// Tags of every wire-visible field, in declaration order.
    fn field_tags() -> &'static [FieldTag];

    /// Wire-visible fields paired with their current values, in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Copies zero-valued, non-optional fields from `previous`.
    ///
    /// Called by [`merge_previous`](crate::merge_previous) after validation.
    fn backfill_from(&mut self, previous: &Self);

    /// Looks up the tag for a wire name.
    fn tag_for(wire_name: &str) -> Option<&'static FieldTag> {
        Self::field_tags().iter().find(|t| t.wire_name == wire_name)
    }
}
