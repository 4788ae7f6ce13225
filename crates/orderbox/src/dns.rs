//! Managed DNS records.

use orderbox_core::{lenient, CodecResult, Decoder, StatusCode};
use orderbox_macros::Record;
use serde::Deserialize;

use crate::paging::Page;
use crate::shapes;
use crate::wire_enum::wire_enum;

wire_enum! {
    /// DNS resource record type.
    #[derive(Default)]
    pub enum RecordType {
        /// IPv4 address.
        #[default]
        A => "A",
        /// IPv6 address.
        Aaaa => "AAAA",
        /// Canonical name.
        Cname => "CNAME",
        /// Mail exchanger.
        Mx => "MX",
        /// Name server.
        Ns => "NS",
        /// Free text.
        Txt => "TXT",
        /// Service locator.
        Srv => "SRV",
    }
}

/// A record to add to a zone.
///
/// `priority` applies to MX and SRV records, `port` and `weight` to SRV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct NewRecord {
    /// Zone the record belongs to.
    #[param(name = "domain-name", validate(required))]
    pub domain_name: String,
    /// Record value.
    #[param(name = "value", validate(required))]
    pub value: String,
    /// Host label; empty for the zone apex.
    #[param(name = "host", optional)]
    pub host: String,
    /// Time to live in seconds.
    #[param(name = "ttl", optional)]
    pub ttl: u32,
    /// MX/SRV priority.
    #[param(name = "priority", optional)]
    pub priority: u32,
    /// SRV port.
    #[param(name = "port", optional)]
    pub port: u16,
    /// SRV weight.
    #[param(name = "weight", optional)]
    pub weight: u32,
}

/// A change to the value of an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct RecordChange {
    /// Zone the record belongs to.
    #[param(name = "domain-name", validate(required))]
    pub domain_name: String,
    /// Host label; empty for the zone apex.
    #[param(name = "host", optional)]
    pub host: String,
    /// Value currently stored.
    #[param(name = "current-value", validate(required))]
    pub current_value: String,
    /// Replacement value.
    #[param(name = "new-value", validate(required))]
    pub new_value: String,
    /// Time to live in seconds.
    #[param(name = "ttl", optional)]
    pub ttl: u32,
    /// MX/SRV priority.
    #[param(name = "priority", optional)]
    pub priority: u32,
    /// SRV port.
    #[param(name = "port", optional)]
    pub port: u16,
    /// SRV weight.
    #[param(name = "weight", optional)]
    pub weight: u32,
}

/// A change to the zone's SOA record. Durations are in seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct SoaChange {
    /// Zone.
    #[param(name = "domain-name", validate(required))]
    pub domain_name: String,
    /// Mailbox of the zone administrator.
    #[param(name = "responsible-person", validate(required, email))]
    pub responsible_person: String,
    /// Secondary refresh interval.
    #[param(name = "refresh", validate(required))]
    pub refresh: u32,
    /// Retry interval after a failed refresh.
    #[param(name = "retry", validate(required))]
    pub retry: u32,
    /// Upper limit on secondary authority.
    #[param(name = "expire", validate(required))]
    pub expire: u32,
    /// Negative caching time to live.
    #[param(name = "ttl", validate(required))]
    pub ttl: u32,
}

/// Record search filter. Combine with a [`Page`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct RecordSearch {
    /// Zone to search.
    #[param(name = "domain-name", validate(required))]
    pub domain_name: String,
    /// Record type.
    #[param(name = "type")]
    pub record_type: RecordType,
    /// Host label.
    #[param(name = "host", optional)]
    pub host: String,
    /// Record value.
    #[param(name = "value", optional)]
    pub value: String,
}

/// A record as listed by a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    /// Host label.
    pub host: String,
    /// Record value.
    pub value: String,
    /// Record type as sent by the API.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time to live in seconds.
    #[serde(rename = "timetolive", deserialize_with = "lenient::number")]
    pub ttl: u32,
    /// Record status.
    pub status: String,
}

/// One page of record search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The page that was requested.
    pub page: Page,
    /// Records on this page as reported by the API.
    pub on_page: i64,
    /// Matches across all pages.
    pub total_matched: i64,
    /// Records, in response order.
    pub records: Vec<DnsRecord>,
}

/// Decodes a record search response.
///
/// Any key other than the two counts and numeric record keys is an error.
pub fn decode_search(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
    page: Page,
) -> CodecResult<SearchResult> {
    let found = decoder.decode_classified::<DnsRecord>(status, body, shapes::dns_record_search())?;
    Ok(SearchResult {
        page,
        on_page: found.count(shapes::ON_PAGE),
        total_matched: found.count(shapes::TOTAL_MATCHED),
        records: found.into_records(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbox_core::{encode, CodecError};

    #[test]
    fn test_new_mx_record() {
        let record = NewRecord {
            domain_name: "example.com".to_string(),
            value: "mail.example.com".to_string(),
            ttl: 3600,
            priority: 10,
            ..NewRecord::default()
        };

        let params = encode(&record).unwrap();
        let pairs: Vec<_> = params.pairs().collect();
        assert_eq!(
            pairs,
            [
                ("domain-name", "example.com"),
                ("value", "mail.example.com"),
                ("ttl", "3600"),
                ("priority", "10"),
            ]
        );
    }

    #[test]
    fn test_record_change_requires_values() {
        let change = RecordChange {
            domain_name: "example.com".to_string(),
            current_value: "192.0.2.1".to_string(),
            ..RecordChange::default()
        };
        let err = encode(&change).unwrap_err();
        assert!(matches!(err, CodecError::Validation(ref e) if e.wire_name == "new-value"));
    }

    #[test]
    fn test_soa_change() {
        let soa = SoaChange {
            domain_name: "example.com".to_string(),
            responsible_person: "hostmaster@example.com".to_string(),
            refresh: 7200,
            retry: 7200,
            expire: 172_800,
            ttl: 14_400,
        };
        let params = encode(&soa).unwrap();
        assert_eq!(params.get("expire"), Some("172800"));
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn test_search_params() {
        let search = RecordSearch {
            domain_name: "example.com".to_string(),
            record_type: RecordType::Aaaa,
            ..RecordSearch::default()
        };
        let params = Page::new(1, 50).unwrap().encode_with(&search).unwrap();
        assert_eq!(params.get("type"), Some("AAAA"));
        assert_eq!(params.get("no-of-records"), Some("50"));
        assert!(!params.contains_key("host"));
    }

    #[test]
    fn test_search_decoding() {
        let body = br#"{
            "recsonpage": 2,
            "recsindb": "2",
            "1": {"host": "www", "value": "192.0.2.1", "type": "A", "timetolive": "7200", "status": "Active"},
            "2": {"host": "", "value": "192.0.2.2", "type": "A", "timetolive": 3600, "status": "Active"}
        }"#;

        let result = decode_search(&Decoder::default(), StatusCode::OK, body, Page::default()).unwrap();
        assert_eq!(result.on_page, 2);
        assert_eq!(result.total_matched, 2);
        assert_eq!(result.records[0].ttl, 7200);
        assert_eq!(result.records[1].value, "192.0.2.2");
    }

    #[test]
    fn test_search_rejects_unknown_key() {
        let body = br#"{"recsonpage":"0","recsindb":"0","hint":"none"}"#;
        let err = decode_search(&Decoder::default(), StatusCode::OK, body, Page::default()).unwrap_err();
        assert!(matches!(err, CodecError::UnknownDecodeShape { ref key } if key == "hint"));
    }
}
