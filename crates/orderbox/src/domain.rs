//! Domain availability and registration orders.

use indexmap::IndexMap;
use orderbox_core::{encode, lenient, AttributeMap, CodecResult, Decoder, ParameterSet, StatusCode};
use orderbox_macros::Record;
use serde::Deserialize;

use crate::shapes;

/// Registration state of a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Free to register.
    Available,
    /// Registered through this reseller.
    RegThroughUs,
    /// Registered elsewhere.
    RegThroughOthers,
    /// Any status this client does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Availability of one name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Registration {
    /// Product key of the TLD.
    #[serde(rename = "classkey")]
    pub class_key: String,
    /// Registration state.
    pub status: RegistrationStatus,
}

/// Availability by fully-qualified name.
pub type Availabilities = IndexMap<String, Registration>;

/// Availability check for every combination of names and TLDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Record)]
pub struct AvailabilityQuery {
    /// Second-level labels, without TLD.
    #[param(name = "domain-name", validate(required))]
    pub domain_names: Vec<String>,
    /// TLDs without the leading dot.
    #[param(name = "tlds", validate(required))]
    pub tlds: Vec<String>,
}

/// A domain registration order.
///
/// Registry-specific attributes travel as `attr-name{n}` / `attr-value{n}`
/// pairs after the tagged fields; see [`RegisterOrder::to_params`].
#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct RegisterOrder {
    /// Name to register.
    #[param(name = "domain-name", validate(required))]
    pub domain_name: String,
    /// Registration term.
    #[param(name = "years", validate(required))]
    pub years: u8,
    /// Name servers.
    #[param(name = "ns", validate(required))]
    pub name_servers: Vec<String>,
    /// Owning customer.
    #[param(name = "customer-id", validate(required, number))]
    pub customer_id: String,
    /// Registrant contact.
    #[param(name = "reg-contact-id", validate(required, number))]
    pub registrant_contact_id: String,
    /// Admin contact.
    #[param(name = "admin-contact-id", validate(required, number))]
    pub admin_contact_id: String,
    /// Technical contact.
    #[param(name = "tech-contact-id", validate(required, number))]
    pub tech_contact_id: String,
    /// Billing contact.
    #[param(name = "billing-contact-id", validate(required, number))]
    pub billing_contact_id: String,
    /// How the order is invoiced.
    #[param(
        name = "invoice-option",
        validate(required, one_of("NoInvoice", "PayInvoice", "KeepInvoice", "OnlyAdd"))
    )]
    pub invoice_option: String,
    /// Buy privacy protection.
    #[param(name = "purchase-privacy", optional)]
    pub purchase_privacy: bool,
    /// Enable privacy protection.
    #[param(name = "protect-privacy", optional)]
    pub protect_privacy: bool,
    /// Renew automatically.
    #[param(name = "auto-renew", optional)]
    pub auto_renew: bool,
    /// Discount on the order amount.
    #[param(name = "discount-amount", optional)]
    pub discount_amount: f64,
    /// Buy premium DNS.
    #[param(name = "purchase-premium-dns", optional)]
    pub purchase_premium_dns: bool,
    /// Registry-specific attributes.
    #[param(skip)]
    pub attributes: AttributeMap,
}

impl RegisterOrder {
    /// Encodes the order followed by its attributes.
    pub fn to_params(&self) -> CodecResult<ParameterSet> {
        let mut params = encode(self)?;
        self.attributes.copy_into(&mut params);
        Ok(params)
    }
}

/// The action queued by a registration order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderAction {
    #[serde(rename = "entityid")]
    pub order_id: String,
    #[serde(rename = "customerid")]
    pub customer_id: String,
    pub description: String,
    #[serde(rename = "eaqid")]
    pub action_id: String,
    #[serde(rename = "actiontype")]
    pub action_type: String,
    #[serde(rename = "actiontypedesc")]
    pub action_type_description: String,
    #[serde(rename = "actionstatus")]
    pub action_status: String,
    #[serde(rename = "actionstatusdesc")]
    pub action_status_description: String,
    #[serde(rename = "invoiceid")]
    pub invoice_id: String,
    #[serde(rename = "sellingamount", deserialize_with = "lenient::number")]
    pub selling_amount: f64,
}

/// Decodes an availability response.
pub fn decode_availability(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
) -> CodecResult<Availabilities> {
    decoder.decode_direct(status, body, shapes::unprefixed())
}

/// Decodes the action returned by a registration order.
pub fn decode_order(decoder: &Decoder, status: StatusCode, body: &[u8]) -> CodecResult<OrderAction> {
    decoder.decode_direct(status, body, shapes::unprefixed())
}

/// Decodes the order id of a domain.
pub fn decode_order_id(decoder: &Decoder, status: StatusCode, body: &[u8]) -> CodecResult<String> {
    decoder.decode_text(status, body)
}

/// Decodes whether a transfer request would be accepted.
pub fn decode_transfer_validity(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
) -> CodecResult<bool> {
    decoder.decode_flag(status, body)
}

/// Decodes a customer's default name servers.
pub fn decode_name_servers(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
) -> CodecResult<Vec<String>> {
    decoder.decode_direct(status, body, shapes::unprefixed())
}
