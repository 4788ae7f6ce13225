//! Record to parameter encoding.

use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::params::ParameterSet;
use crate::schema::Record;
use crate::validate::validate;

/// Encodes a record into request parameters.
///
/// The record is validated first. Fields are then walked in declaration
/// order: zero-valued optional fields are left out, a zero-valued required
/// field fails with [`CodecError::MissingRequiredField`], scalars add one
/// pair and sequences add one pair per element under the same key.
///
/// On error no parameters are returned.
pub fn encode<R: Record + ?Sized>(record: &R) -> CodecResult<ParameterSet> {
    validate(record)?;

    let mut params = ParameterSet::new();
    for field in record.fields() {
        let tag = field.tag;
        if field.value.is_zero() {
            if tag.optional {
                continue;
            }
            return Err(CodecError::MissingRequiredField {
                record: R::RECORD_NAME,
                field: tag.field,
                wire_name: tag.wire_name,
            });
        }

        for text in field.value.wire_texts() {
            params.add(tag.wire_name, text);
        }
    }

    debug!(
        record = R::RECORD_NAME,
        pairs = params.len(),
        "encoded record parameters"
    );
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldTag, Rule};

    #[derive(Default)]
    struct Search {
        customer_id: String,
        statuses: Vec<String>,
        include_invalid: bool,
        receipt_low: f64,
    }

    impl Record for Search {
        const RECORD_NAME: &'static str = "Search";

        fn field_tags() -> &'static [FieldTag] {
            const TAGS: &[FieldTag] = &[
                FieldTag {
                    field: "customer_id",
                    wire_name: "customer-id",
                    optional: false,
                    rules: &[Rule::Number],
                },
                FieldTag {
                    field: "statuses",
                    wire_name: "status",
                    optional: true,
                    rules: &[],
                },
                FieldTag {
                    field: "include_invalid",
                    wire_name: "include-invalid",
                    optional: true,
                    rules: &[],
                },
                FieldTag {
                    field: "receipt_low",
                    wire_name: "total-receipt-start",
                    optional: true,
                    rules: &[],
                },
            ];
            TAGS
        }

        fn fields(&self) -> Vec<Field<'_>> {
            let tags = Self::field_tags();
            vec![
                Field::new(&tags[0], &self.customer_id),
                Field::new(&tags[1], &self.statuses),
                Field::new(&tags[2], &self.include_invalid),
                Field::new(&tags[3], &self.receipt_low),
            ]
        }

        fn backfill_from(&mut self, _previous: &Self) {}
    }

    #[test]
    fn test_encode_full_record() {
        let search = Search {
            customer_id: "42".to_string(),
            statuses: vec!["Active".to_string(), "Suspended".to_string()],
            include_invalid: true,
            receipt_low: 10.0,
        };

        let params = encode(&search).unwrap();
        assert_eq!(params.get("customer-id"), Some("42"));
        assert_eq!(params.get_all("status"), ["Active", "Suspended"]);
        assert_eq!(params.get("include-invalid"), Some("true"));
        assert_eq!(params.get("total-receipt-start"), Some("10.00"));
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn test_encode_skips_zero_optionals() {
        let search = Search {
            customer_id: "42".to_string(),
            ..Search::default()
        };

        let params = encode(&search).unwrap();
        assert_eq!(params.len(), 1);
        assert!(!params.contains_key("include-invalid"));
    }

    #[test]
    fn test_encode_missing_required() {
        let err = encode(&Search::default()).unwrap_err();
        match err {
            CodecError::MissingRequiredField {
                record,
                field,
                wire_name,
            } => {
                assert_eq!(record, "Search");
                assert_eq!(field, "customer_id");
                assert_eq!(wire_name, "customer-id");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_encode_validation_aborts() {
        let search = Search {
            customer_id: "abc".to_string(),
            statuses: vec!["Active".to_string()],
            ..Search::default()
        };

        let err = encode(&search).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }
}
