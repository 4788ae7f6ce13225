//! Partial updates.
//!
//! Modification endpoints replace every field they are sent. To change one
//! field without clearing the rest, the caller fetches the current record and
//! merges it into the modification before encoding.

use tracing::debug;

use crate::error::CodecResult;
use crate::schema::Record;
use crate::validate::validate;

/// Fills zero-valued required fields of `modification` from `previous`.
///
/// `modification` is validated first. Only `String` fields are filled;
/// optional fields, internal fields and non-string fields are returned as
/// the caller left them, and non-zero values are never overwritten.
pub fn merge_previous<R: Record>(mut modification: R, previous: &R) -> CodecResult<R> {
    validate(&modification)?;
    modification.backfill_from(previous);
    debug!(record = R::RECORD_NAME, "merged previous record state");
    Ok(modification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldTag, WireValue};

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Profile {
        name: String,
        city: String,
        vat_id: String,
        website_count: u16,
        internal_note: String,
    }

    const TAGS: &[FieldTag] = &[
        FieldTag {
            field: "name",
            wire_name: "name",
            optional: false,
            rules: &[],
        },
        FieldTag {
            field: "city",
            wire_name: "city",
            optional: false,
            rules: &[],
        },
        FieldTag {
            field: "vat_id",
            wire_name: "vat-id",
            optional: true,
            rules: &[],
        },
        FieldTag {
            field: "website_count",
            wire_name: "website-count",
            optional: false,
            rules: &[],
        },
    ];

    impl Record for Profile {
        const RECORD_NAME: &'static str = "Profile";

        fn field_tags() -> &'static [FieldTag] {
            TAGS
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new(&TAGS[0], &self.name),
                Field::new(&TAGS[1], &self.city),
                Field::new(&TAGS[2], &self.vat_id),
                Field::new(&TAGS[3], &self.website_count),
            ]
        }

        fn backfill_from(&mut self, previous: &Self) {
            self.name.backfill(&previous.name);
            self.city.backfill(&previous.city);
            self.website_count.backfill(&previous.website_count);
        }
    }

    fn previous() -> Profile {
        Profile {
            name: "Old Name".to_string(),
            city: "Jakarta".to_string(),
            vat_id: "EU123".to_string(),
            website_count: 3,
            internal_note: "from server".to_string(),
        }
    }

    #[test]
    fn test_merge_fills_required_strings() {
        let modification = Profile {
            name: "New Name".to_string(),
            ..Profile::default()
        };

        let merged = merge_previous(modification, &previous()).unwrap();
        assert_eq!(merged.name, "New Name");
        assert_eq!(merged.city, "Jakarta");
    }

    #[test]
    fn test_merge_leaves_optional_internal_and_numeric() {
        let merged = merge_previous(Profile::default(), &previous()).unwrap();
        assert_eq!(merged.vat_id, "");
        assert_eq!(merged.internal_note, "");
        assert_eq!(merged.website_count, 0);
    }

    #[test]
    fn test_merge_is_identity_when_fully_set() {
        let full = Profile {
            name: "A".to_string(),
            city: "B".to_string(),
            vat_id: "C".to_string(),
            website_count: 1,
            internal_note: "D".to_string(),
        };

        let merged = merge_previous(full.clone(), &previous()).unwrap();
        assert_eq!(merged, full);
    }
}
