//! Domain forwarding.

use orderbox_core::{lenient, CodecResult, Decoder, StatusCode};
use orderbox_macros::Record;
use serde::Deserialize;

use crate::entity::StdResponse;
use crate::shapes;

/// Activates or updates forwarding for an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct ForwardingRequest {
    /// Domain order.
    #[param(name = "order-id", validate(required, number))]
    pub order_id: String,
    /// Sub-domain to forward; empty for the bare domain.
    #[param(name = "sub-domain-prefix", optional)]
    pub sub_domain_prefix: String,
    /// Destination URL.
    #[param(name = "forward-to", validate(required))]
    pub forward_to: String,
    /// Keep the original URL in the address bar.
    #[param(name = "url-masking", optional)]
    pub url_masking: bool,
    /// Meta tags served with a masked page.
    #[param(name = "meta-tags", optional)]
    pub meta_tags: String,
    /// Content for browsers without frame support.
    #[param(name = "noframes", optional)]
    pub no_frames: String,
    /// Forward every sub-domain as well.
    #[param(name = "sub-domain-forwarding", optional)]
    pub sub_domain_forwarding: bool,
    /// Append the request path to the destination.
    #[param(name = "path-forwarding", optional)]
    pub path_forwarding: bool,
}

/// Forwarding details lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct DetailsQuery {
    /// Domain order.
    #[param(name = "order-id", validate(required, number))]
    pub order_id: String,
    /// Include sub-domain forwarding rules.
    #[param(name = "include-subdomain", optional)]
    pub include_subdomain: bool,
}

/// Current forwarding settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ForwardingDetails {
    /// URL masking enabled.
    #[serde(rename = "urlmasking", deserialize_with = "lenient::flag")]
    pub url_masking: bool,
    /// Path forwarding enabled.
    #[serde(rename = "pathforwarding", deserialize_with = "lenient::flag")]
    pub path_forwarding: bool,
    /// Sub-domain forwarding enabled.
    #[serde(rename = "subdomainforwarding", deserialize_with = "lenient::flag")]
    pub sub_domain_forwarding: bool,
    /// Address of the forwarding server.
    #[serde(rename = "ipaddress")]
    pub ip_address: String,
    /// Forwarded domain.
    #[serde(rename = "domainname")]
    pub domain_name: String,
}

/// A DNS record the forwarding service needs in the zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    /// Time to live in seconds.
    #[serde(rename = "timetolive", deserialize_with = "lenient::number")]
    pub ttl: i64,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Host label.
    pub host: String,
    /// Record value.
    pub value: String,
}

/// Decodes the outcome of an activate or manage request.
pub fn decode_change(decoder: &Decoder, status: StatusCode, body: &[u8]) -> CodecResult<StdResponse> {
    StdResponse::decode(decoder, status, body)
}

/// Decodes forwarding details.
pub fn decode_details(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
) -> CodecResult<ForwardingDetails> {
    decoder.decode_direct(status, body, shapes::unprefixed())
}

/// Decodes the DNS records required by forwarding.
pub fn decode_dns_records(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
) -> CodecResult<Vec<DnsRecord>> {
    decoder.decode_direct(status, body, shapes::unprefixed())
}

/// Decodes the result of removing forwarding.
pub fn decode_removed(decoder: &Decoder, status: StatusCode, body: &[u8]) -> CodecResult<bool> {
    decoder.decode_flag(status, body)
}
