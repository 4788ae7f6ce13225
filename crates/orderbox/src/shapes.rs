//! Decode shapes of the keyed endpoints.
//!
//! Each plan states its own tolerance; there is no universal rule.
//!
//! | Shape | Prefixes | Counts | Records | Unknown keys | Bad record |
//! |-------|----------|--------|---------|--------------|------------|
//! | [`customer_search`] | `customer.` | `recsindb` | numeric keys | ignored | aborts |
//! | [`contact_search`] | `entity.`, `contact.` | `recsindb` | list under `result` | ignored | aborts |
//! | [`contact_defaults`] | `contact.`, `entity.` | none | every key after one wrapper level | ignored | skipped |
//! | [`dns_record_search`] | none | `recsonpage`, `recsindb` | numeric keys | rejected | aborts |

use std::sync::OnceLock;

use orderbox_core::{ClassifyPlan, EnvelopeNormalizer, RecordKeys, RecordTolerance, UnknownKeyPolicy};

/// Total number of matches across all pages.
pub const TOTAL_MATCHED: &str = "recsindb";
/// Number of records on the returned page.
pub const ON_PAGE: &str = "recsonpage";
/// Key holding a list of records.
pub const RESULT: &str = "result";

/// Keys of the contact-defaults response that label rather than hold contacts.
pub const CONTACT_DEFAULT_LABELS: &[&str] = &["registrant", "type", "tech", "billing", "admin"];

/// Customer search: numeric keys are customers.
pub fn customer_search() -> &'static ClassifyPlan {
    static PLAN: OnceLock<ClassifyPlan> = OnceLock::new();
    PLAN.get_or_init(|| {
        ClassifyPlan::new("customer search")
            .prefixes(["customer."])
            .count_key(TOTAL_MATCHED)
    })
}

/// Contact search: contacts are listed under `result`.
pub fn contact_search() -> &'static ClassifyPlan {
    static PLAN: OnceLock<ClassifyPlan> = OnceLock::new();
    PLAN.get_or_init(|| {
        ClassifyPlan::new("contact search")
            .prefixes(["entity.", "contact."])
            .count_key(TOTAL_MATCHED)
            .list_key(RESULT)
    })
}

/// Default contacts: one wrapper per contact type, each holding
/// `<role>ContactDetails` entries. Undecodable contacts are skipped.
pub fn contact_defaults() -> &'static ClassifyPlan {
    static PLAN: OnceLock<ClassifyPlan> = OnceLock::new();
    PLAN.get_or_init(|| {
        ClassifyPlan::new("contact defaults")
            .prefixes(["contact.", "entity."])
            .unwrap_levels(1)
            .records(RecordKeys::AnyRemaining)
            .deny(CONTACT_DEFAULT_LABELS.iter().copied())
            .strip_suffix("ContactDetails")
            .tolerance(RecordTolerance::Skip)
    })
}

/// DNS record search: numeric keys are records, anything else is an error.
pub fn dns_record_search() -> &'static ClassifyPlan {
    static PLAN: OnceLock<ClassifyPlan> = OnceLock::new();
    PLAN.get_or_init(|| {
        ClassifyPlan::new("dns record search")
            .count_key(ON_PAGE)
            .count_key(TOTAL_MATCHED)
            .unknown_keys(UnknownKeyPolicy::Reject)
    })
}

/// Shapes whose keys are never prefixed.
pub fn unprefixed() -> &'static EnvelopeNormalizer {
    static NORMALIZER: OnceLock<EnvelopeNormalizer> = OnceLock::new();
    NORMALIZER.get_or_init(EnvelopeNormalizer::identity)
}
