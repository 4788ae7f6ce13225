//! Registrant, admin, tech and billing contacts.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use orderbox_core::{
    encode, lenient, AttributeMap, CodecResult, Decoder, ParameterSet, StatusCode,
};
use orderbox_macros::Record;
use serde::Deserialize;

use crate::entity::EntityStatus;
use crate::paging::Page;
use crate::shapes;
use crate::wire_enum::wire_enum;

wire_enum! {
    /// Registry-specific contact flavour.
    #[derive(Default)]
    pub enum ContactType {
        /// Generic contact, accepted by most registries.
        #[default]
        Contact => "Contact",
        /// `.at`
        At => "AtContact",
        /// `.br`
        Br => "BrContact",
        /// `.br` organisation.
        BrOrg => "BrOrgContact",
        /// `.ca`
        Ca => "CaContact",
        /// `.cl`
        Cl => "ClContact",
        /// `.cn`
        Cn => "CnContact",
        /// `.co`
        Co => "CoContact",
        /// `.coop`
        Coop => "CoopContact",
        /// `.de`
        De => "DeContact",
        /// `.es`
        Es => "EsContact",
        /// `.eu`
        Eu => "EuContact",
        /// `.fr`
        Fr => "FrContact",
        /// `.mx`
        Mx => "MxContact",
        /// `.nl`
        Nl => "NlContact",
        /// `.nyc`
        Nyc => "NycContact",
        /// `.uk`
        Uk => "UkContact",
        /// `.uk` service contact.
        UkService => "UkServiceContact",
    }
}

/// WHOIS validation state of a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WhoisValidity {
    /// Whether the registry accepts the contact data.
    #[serde(rename = "valid", deserialize_with = "lenient::flag")]
    pub is_valid: bool,
    /// Names of the rejected fields.
    #[serde(rename = "invalidData")]
    pub invalid_data: Vec<String>,
}

/// A contact as fetched, and as sent to create one.
///
/// Fields without a wire name are read-only.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Record)]
#[serde(default)]
pub struct Detail {
    #[serde(rename = "entityid")]
    pub id: String,
    #[param(name = "type", validate(required))]
    #[serde(rename = "type")]
    pub kind: ContactType,
    #[param(name = "customer-id", validate(required, number))]
    #[serde(rename = "customerid")]
    pub customer_id: String,
    #[serde(rename = "currentstatus")]
    pub status_system: String,
    #[serde(rename = "contactstatus")]
    pub status_registry: String,
    #[serde(rename = "parentkey")]
    pub parent_key: String,
    #[param(name = "name", validate(required, max = 255))]
    pub name: String,
    #[param(name = "email", validate(required, email))]
    #[serde(rename = "emailaddr")]
    pub email: String,
    #[param(name = "company", validate(required, max = 255))]
    pub company: String,
    #[param(name = "address-line-1", validate(required, max = 64))]
    #[serde(rename = "address1")]
    pub address: String,
    #[param(name = "address-line-2", optional)]
    #[serde(rename = "address2")]
    pub address_line_2: String,
    #[param(name = "address-line-3", optional)]
    #[serde(rename = "address3")]
    pub address_line_3: String,
    #[param(name = "city", validate(required, max = 64))]
    pub city: String,
    #[param(name = "state", optional, validate(max = 64))]
    pub state: String,
    #[param(name = "country", validate(required, country_code))]
    #[serde(rename = "country")]
    pub country_code: String,
    #[param(name = "zipcode", validate(required, max = 16))]
    #[serde(rename = "zip")]
    pub zipcode: String,
    #[param(name = "phone-cc", validate(required, min = 1, max = 3))]
    #[serde(rename = "telnocc")]
    pub phone_country_code: String,
    #[param(name = "phone", validate(required, min = 4, max = 12))]
    #[serde(rename = "telno")]
    pub phone: String,
    #[param(name = "fax-cc", optional, validate(min = 1, max = 3))]
    #[serde(rename = "faxnocc")]
    pub fax_country_code: String,
    #[param(name = "fax", optional, validate(min = 4, max = 12))]
    #[serde(rename = "faxno")]
    pub fax: String,
    #[serde(rename = "classname")]
    pub class_name: String,
    #[serde(rename = "classkey")]
    pub class_key: String,
    #[serde(rename = "eaqid")]
    pub entity_action_id: String,
    #[serde(rename = "actioncompleted", deserialize_with = "lenient::number")]
    pub action_completed: u16,
    #[serde(rename = "contactid")]
    pub contact_id: String,
    #[serde(rename = "entitytypeid")]
    pub entity_type_id: String,
    pub description: String,
    #[serde(rename = "creationdt", deserialize_with = "lenient::epoch_seconds")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "timestamp")]
    pub registry_timestamp: String,
    #[serde(rename = "designated-agent", deserialize_with = "lenient::flag")]
    pub is_designated_agent: bool,
    #[serde(rename = "whoisValidity")]
    pub whois_validity: WhoisValidity,
}

impl Detail {
    /// Encodes the contact followed by its registry attributes.
    pub fn encode_with_attributes(&self, attributes: &AttributeMap) -> CodecResult<ParameterSet> {
        let mut params = encode(self)?;
        attributes.copy_into(&mut params);
        Ok(params)
    }
}

/// A queued registry action on a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Action {
    /// Action id.
    #[serde(rename = "eaqid")]
    pub id: String,
    /// Contact the action applies to.
    #[serde(rename = "entityid")]
    pub entity_id: String,
    /// Action type.
    #[serde(rename = "actiontype")]
    pub kind: String,
    /// Human-readable action type.
    #[serde(rename = "actiontypedesc")]
    pub description: String,
    /// Action status.
    #[serde(rename = "actionstatus")]
    pub status: String,
    /// Human-readable action status.
    #[serde(rename = "actionstatusdesc")]
    pub status_description: String,
}

/// Contact search filter.
#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Criteria {
    /// Owning customer.
    #[param(name = "customer-id", validate(required, number))]
    pub customer_id: String,
    /// Restrict to these contact ids.
    #[param(name = "contact-id", optional, validate(number))]
    pub contact_ids: Vec<String>,
    /// Restrict to these statuses.
    #[param(name = "status", optional)]
    pub statuses: Vec<EntityStatus>,
    /// Name.
    #[param(name = "name", optional)]
    pub name: String,
    /// Email address.
    #[param(name = "email", optional, validate(email))]
    pub email: String,
    /// Company.
    #[param(name = "company", optional)]
    pub company: String,
    /// Contact type.
    #[param(name = "type", optional)]
    pub kind: Option<ContactType>,
    /// Include contacts that failed WHOIS validation.
    #[param(name = "include-invalid", optional)]
    pub include_invalid: bool,
}

/// One page of contact search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The page that was requested.
    pub page: Page,
    /// Matches across all pages; 0 when the API sent an unreadable count.
    pub total_matched: i64,
    /// Contacts on this page, in response order.
    pub contacts: Vec<Detail>,
}

/// Decodes a contact details response.
pub fn decode_details(decoder: &Decoder, status: StatusCode, body: &[u8]) -> CodecResult<Detail> {
    decoder.decode_direct(status, body, shapes::unprefixed())
}

/// Decodes the id returned when a contact is added into `detail`.
pub fn decode_added(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
    mut detail: Detail,
) -> CodecResult<Detail> {
    detail.id = decoder.decode_text(status, body)?;
    Ok(detail)
}

/// Decodes the action queued by a delete request.
pub fn decode_action(decoder: &Decoder, status: StatusCode, body: &[u8]) -> CodecResult<Action> {
    decoder.decode_direct(status, body, shapes::unprefixed())
}

/// Decodes a contact search response.
pub fn decode_search(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
    page: Page,
) -> CodecResult<SearchResult> {
    let found = decoder.decode_classified::<Detail>(status, body, shapes::contact_search())?;
    Ok(SearchResult {
        page,
        total_matched: found.count(shapes::TOTAL_MATCHED),
        contacts: found.into_records(),
    })
}

/// Decodes a customer's default contacts, keyed by contact type.
///
/// Contacts that fail to decode are left out.
pub fn decode_defaults(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
) -> CodecResult<IndexMap<String, Detail>> {
    decoder
        .decode_classified::<Detail>(status, body, shapes::contact_defaults())
        .map(orderbox_core::Classified::into_keyed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbox_core::CodecError;

    fn contact() -> Detail {
        Detail {
            customer_id: "18231".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            company: "Acme".to_string(),
            address: "Jl. Sudirman 1".to_string(),
            city: "Jakarta".to_string(),
            country_code: "ID".to_string(),
            zipcode: "10210".to_string(),
            phone_country_code: "62".to_string(),
            phone: "215551234".to_string(),
            ..Detail::default()
        }
    }

    #[test]
    fn test_contact_encodes_type_first() {
        let params = encode(&contact()).unwrap();
        assert_eq!(params.keys().next(), Some("type"));
        assert_eq!(params.get("type"), Some("Contact"));
        assert!(!params.contains_key("state"));
        assert!(!params.contains_key("fax"));
    }

    #[test]
    fn test_contact_attributes_follow_fields() {
        let mut attributes = AttributeMap::new();
        attributes.add("CPR", "CCO");
        attributes.add("AgreementVersion", "2.0");

        let mut ca = contact();
        ca.kind = ContactType::Ca;
        let params = ca.encode_with_attributes(&attributes).unwrap();
        assert_eq!(params.get("type"), Some("CaContact"));
        assert_eq!(params.get("attr-name1"), Some("CPR"));
        assert_eq!(params.get("attr-value1"), Some("CCO"));
        assert_eq!(params.get("attr-name2"), Some("AgreementVersion"));
    }

    #[test]
    fn test_contact_missing_company() {
        let mut detail = contact();
        detail.company.clear();
        let err = encode(&detail).unwrap_err();
        assert!(matches!(err, CodecError::Validation(ref e) if e.wire_name == "company" && e.rule == "required"));
    }

    #[test]
    fn test_criteria_repeats_sequences() {
        let criteria = Criteria {
            customer_id: "18231".to_string(),
            contact_ids: vec!["1".to_string(), "2".to_string()],
            statuses: vec![EntityStatus::Active, EntityStatus::Suspended],
            kind: Some(ContactType::Eu),
            ..Criteria::default()
        };

        let params = encode(&criteria).unwrap();
        assert_eq!(params.get_all("contact-id"), ["1", "2"]);
        assert_eq!(params.get_all("status"), ["Active", "Suspended"]);
        assert_eq!(params.get("type"), Some("EuContact"));
        assert!(!params.contains_key("include-invalid"));
    }

    #[test]
    fn test_criteria_rejects_non_numeric_contact_id() {
        let criteria = Criteria {
            customer_id: "18231".to_string(),
            contact_ids: vec!["1".to_string(), "x2".to_string()],
            ..Criteria::default()
        };
        assert!(encode(&criteria).unwrap_err().is_validation());
    }

    #[test]
    fn test_details_keep_values_verbatim() {
        let body = br#"{
            "type": "CaContact",
            "entityid": "552",
            "name": "Jane Doe",
            "company": "The entity. Group",
            "emailaddr": "info@contact.example.com",
            "telnocc": "62",
            "actioncompleted": "1",
            "designated-agent": "true",
            "whoisValidity": {"valid": "false", "invalidData": ["email"]}
        }"#;

        let detail = decode_details(&Decoder::default(), StatusCode::OK, body).unwrap();
        assert_eq!(detail.kind, ContactType::Ca);
        assert_eq!(detail.id, "552");
        assert_eq!(detail.email, "info@contact.example.com");
        assert_eq!(detail.company, "The entity. Group");
        assert_eq!(detail.action_completed, 1);
        assert!(detail.is_designated_agent);
        assert!(!detail.whois_validity.is_valid);
        assert_eq!(detail.whois_validity.invalid_data, ["email"]);
    }

    #[test]
    fn test_added_id() {
        let detail = decode_added(&Decoder::default(), StatusCode::OK, b"552", contact()).unwrap();
        assert_eq!(detail.id, "552");
    }

    #[test]
    fn test_action() {
        let body = br#"{"eaqid":"9","entityid":"552","actiontype":"Delete","actionstatus":"Success"}"#;
        let action = decode_action(&Decoder::default(), StatusCode::OK, body).unwrap();
        assert_eq!(action.id, "9");
        assert_eq!(action.kind, "Delete");
        assert!(action.description.is_empty());
    }

    #[test]
    fn test_search_result_list() {
        let body = br#"{
            "recsindb": "2",
            "result": [
                {"contact.name": "A", "entity.entityid": "1"},
                {"contact.name": "B", "entity.entityid": "2"}
            ]
        }"#;

        let page = Page::new(1, 10).unwrap();
        let result = decode_search(&Decoder::default(), StatusCode::OK, body, page).unwrap();
        assert_eq!(result.total_matched, 2);
        let names: Vec<_> = result.contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_search_upstream_error() {
        let body = br#"{"status":"ERROR","message":"Invalid Customer Id"}"#;
        let err = decode_search(&Decoder::default(), StatusCode::BAD_REQUEST, body, Page::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::Upstream { status, ref message }
                if status == StatusCode::BAD_REQUEST && message == "invalid customer id"
        ));
    }

    #[test]
    fn test_defaults_skip_broken_contacts() {
        let body = br#"{
            "Contact": {
                "registrant": "552",
                "type": "Contact",
                "registrantContactDetails": {"contact.name": "Jane", "contact.type": "Contact"},
                "adminContactDetails": {"contact.name": "Sam", "contact.type": "NotAType"},
                "techContactDetails": {"contact.name": "Kai", "entity.entityid": "553"}
            }
        }"#;

        let defaults = decode_defaults(&Decoder::default(), StatusCode::OK, body).unwrap();
        let keys: Vec<_> = defaults.keys().map(String::as_str).collect();
        assert_eq!(keys, ["registrant", "tech"]);
        assert_eq!(defaults["registrant"].name, "Jane");
        assert_eq!(defaults["tech"].id, "553");
    }

    #[test]
    fn test_defaults_empty_wrapper() {
        let err = decode_defaults(&Decoder::default(), StatusCode::OK, b"{}").unwrap_err();
        assert_eq!(err.error_code(), "DECODE_FAILED");
    }
}
