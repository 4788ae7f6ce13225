//! Record validation.
//!
//! [`validate`] checks every tagged field of a record against the rules in its
//! [`FieldTag`]. Checking stops at the first failure.
//!
//! Zero-valued fields only fail [`Rule::Required`]; all other rules apply to
//! non-zero values, once per element for sequence fields.

use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use crate::error::ValidationError;
use crate::schema::{FieldTag, Record, Rule};

/// Validates a record against its declared rules.
///
/// # Example
///
/// ```
/// use orderbox_core::{validate, Field, FieldTag, Record, Rule};
///
/// struct Login {
///     email: String,
/// }
///
/// impl Record for Login {
///     const RECORD_NAME: &'static str = "Login";
///
///     fn field_tags() -> &'static [FieldTag] {
///         const TAGS: &[FieldTag] = &[FieldTag {
///             field: "email",
///             wire_name: "username",
///             optional: false,
///             rules: &[Rule::Required, Rule::Email],
///         }];
///         TAGS
///     }
///
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![Field::new(&Self::field_tags()[0], &self.email)]
///     }
///
///     fn backfill_from(&mut self, _previous: &Self) {}
/// }
///
/// assert!(validate(&Login { email: "a@example.com".into() }).is_ok());
/// assert!(validate(&Login { email: "nope".into() }).is_err());
/// ```
pub fn validate<R: Record + ?Sized>(record: &R) -> Result<(), ValidationError> {
    for field in record.fields() {
        let tag = field.tag;
        if field.value.is_zero() {
            if tag.is_required() {
                return Err(failure::<R>(tag, Rule::Required, "must not be empty".to_string()));
            }
            continue;
        }

        for rule in tag.rules {
            for text in field.value.wire_texts() {
                if let Some(message) = check_rule(rule, &text) {
                    return Err(failure::<R>(tag, *rule, message));
                }
            }
        }
    }

    trace!(record = R::RECORD_NAME, "record passed validation");
    Ok(())
}

fn failure<R: Record + ?Sized>(tag: &FieldTag, rule: Rule, message: String) -> ValidationError {
    ValidationError {
        record: R::RECORD_NAME,
        field: tag.field,
        wire_name: tag.wire_name,
        rule: rule.name(),
        message,
    }
}

/// Checks one wire string against one rule, returning a message on failure.
///
/// Length rules count characters; the derive keeps them off numeric fields.
fn check_rule(rule: &Rule, text: &str) -> Option<String> {
    let chars = text.chars().count();
    match rule {
        Rule::Required => None,
        Rule::Email => (!is_email(text)).then(|| format!("'{text}' is not a valid email address")),
        Rule::Number => (!is_number(text)).then(|| format!("'{text}' is not a number")),
        Rule::Len(n) => (chars != *n).then(|| format!("length must be {n}, got {chars}")),
        Rule::Min(n) => (chars < *n).then(|| format!("length must be at least {n}, got {chars}")),
        Rule::Max(n) => (chars > *n).then(|| format!("length must be at most {n}, got {chars}")),
        Rule::CountryCode => (!is_country_code(text))
            .then(|| format!("'{text}' is not an ISO 3166-1 alpha-2 country code")),
        Rule::OneOf(allowed) => (!allowed.contains(&text))
            .then(|| format!("'{text}' is not one of [{}]", allowed.join(", "))),
        Rule::Custom(predicate) => {
            (!(predicate.check)(text)).then(|| format!("rejected by {}", predicate.name))
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
            .expect("valid regex")
    })
}

/// Returns true for a syntactically valid email address.
#[must_use]
pub fn is_email(text: &str) -> bool {
    email_regex().is_match(text)
}

/// Returns true when `text` is a non-empty run of decimal digits.
#[must_use]
pub fn is_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true for an assigned ISO 3166-1 alpha-2 code (upper case).
#[must_use]
pub fn is_country_code(text: &str) -> bool {
    COUNTRY_CODES.binary_search(&text).is_ok()
}

/// Password strength rule for customer accounts.
///
/// Requires a lower-case letter, an upper-case letter and one of
/// `~*!@$#%_+.?:,{}`. Length limits are expressed separately with
/// [`Rule::Min`] / [`Rule::Max`].
#[must_use]
pub fn password_strength(password: &str) -> bool {
    const SYMBOLS: &str = "~*!@$#%_+.?:,{}";
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| SYMBOLS.contains(c))
}

// Sorted for binary search.
const COUNTRY_CODES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, Predicate};

    fn no_spaces(text: &str) -> bool {
        !text.contains(' ')
    }

    struct Probe {
        email: String,
        phone_cc: String,
        ids: Vec<String>,
        handle: String,
    }

    impl Record for Probe {
        const RECORD_NAME: &'static str = "Probe";

        fn field_tags() -> &'static [FieldTag] {
            const TAGS: &[FieldTag] = &[
                FieldTag {
                    field: "email",
                    wire_name: "email",
                    optional: false,
                    rules: &[Rule::Required, Rule::Email],
                },
                FieldTag {
                    field: "phone_cc",
                    wire_name: "phone-cc",
                    optional: true,
                    rules: &[Rule::Min(1), Rule::Max(3), Rule::Number],
                },
                FieldTag {
                    field: "ids",
                    wire_name: "contact-id",
                    optional: true,
                    rules: &[Rule::Number],
                },
                FieldTag {
                    field: "handle",
                    wire_name: "handle",
                    optional: true,
                    rules: &[Rule::Custom(Predicate {
                        name: "no_spaces",
                        check: no_spaces,
                    })],
                },
            ];
            TAGS
        }

        fn fields(&self) -> Vec<Field<'_>> {
            let tags = Self::field_tags();
            vec![
                Field::new(&tags[0], &self.email),
                Field::new(&tags[1], &self.phone_cc),
                Field::new(&tags[2], &self.ids),
                Field::new(&tags[3], &self.handle),
            ]
        }

        fn backfill_from(&mut self, _previous: &Self) {}
    }

    fn probe() -> Probe {
        Probe {
            email: "ops@example.com".to_string(),
            phone_cc: String::new(),
            ids: Vec::new(),
            handle: String::new(),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(validate(&probe()).is_ok());
    }

    #[test]
    fn test_required_zero_fails() {
        let mut p = probe();
        p.email.clear();

        let err = validate(&p).unwrap_err();
        assert_eq!(err.rule, "required");
        assert_eq!(err.field, "email");
        assert_eq!(err.record, "Probe");
    }

    #[test]
    fn test_zero_optional_skips_other_rules() {
        let p = probe();
        // phone_cc is empty but Min(1) is not checked for zero values
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn test_length_rules() {
        let mut p = probe();
        p.phone_cc = "1234".to_string();
        assert_eq!(validate(&p).unwrap_err().rule, "max");

        p.phone_cc = "91".to_string();
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn test_sequence_rules_apply_per_element() {
        let mut p = probe();
        p.ids = vec!["12".to_string(), "x3".to_string()];

        let err = validate(&p).unwrap_err();
        assert_eq!(err.rule, "number");
        assert_eq!(err.wire_name, "contact-id");
        assert!(err.message.contains("x3"));
    }

    #[test]
    fn test_custom_predicate() {
        let mut p = probe();
        p.handle = "two words".to_string();
        assert_eq!(validate(&p).unwrap_err().rule, "no_spaces");
    }

    #[test]
    fn test_email() {
        assert!(is_email("first.last@sub.example.co.uk"));
        assert!(!is_email("first.last@"));
        assert!(!is_email("plain"));
        assert!(!is_email("a@localhost"));
    }

    #[test]
    fn test_number() {
        assert!(is_number("0042"));
        assert!(!is_number(""));
        assert!(!is_number("-1"));
    }

    #[test]
    fn test_country_codes_sorted_and_found() {
        assert!(COUNTRY_CODES.windows(2).all(|w| w[0] < w[1]));
        assert!(is_country_code("ID"));
        assert!(is_country_code("US"));
        assert!(!is_country_code("us"));
        assert!(!is_country_code("XX"));
    }

    #[test]
    fn test_password_strength() {
        assert!(password_strength("Secret.pass1"));
        assert!(!password_strength("secret.pass1"));
        assert!(!password_strength("SECRET.PASS1"));
        assert!(!password_strength("SecretPass1"));
    }
}
