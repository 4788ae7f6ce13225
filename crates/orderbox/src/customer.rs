//! Customer accounts.
//!
//! [`SignUpForm`] creates a customer, [`Detail`] is both the fetched account
//! and the modification request, and [`Criteria`] filters a search.

use chrono::{DateTime, Utc};
use orderbox_core::{lenient, password_strength, CodecResult, Decoder, StatusCode};
use orderbox_macros::Record;
use serde::Deserialize;

use crate::entity::EntityStatus;
use crate::paging::Page;
use crate::shapes;

/// New customer account.
#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct SignUpForm {
    /// Login email.
    #[param(name = "username", validate(required, email))]
    pub username: String,
    /// Account password.
    #[param(name = "passwd", validate(required, min = 9, max = 16, custom = password_strength))]
    pub password: String,
    /// Full name.
    #[param(name = "name", validate(required))]
    pub name: String,
    /// Company name.
    #[param(name = "company", validate(required))]
    pub company: String,
    /// First address line.
    #[param(name = "address-line-1", validate(required))]
    pub address: String,
    /// Second address line.
    #[param(name = "address-line-2", optional)]
    pub address_line_2: String,
    /// Third address line.
    #[param(name = "address-line-3", optional)]
    pub address_line_3: String,
    /// City.
    #[param(name = "city", validate(required))]
    pub city: String,
    /// State or province.
    #[param(name = "state", validate(required))]
    pub state: String,
    /// State name when `state` is `Not Applicable`.
    #[param(name = "other-state", optional)]
    pub other_state: String,
    /// ISO 3166-1 alpha-2 country code.
    #[param(name = "country", validate(required, country_code))]
    pub country: String,
    /// Postal code.
    #[param(name = "zipcode", validate(required))]
    pub zipcode: String,
    /// Interface language.
    #[param(name = "lang-pref", validate(required))]
    pub language_code: String,
    /// Telephone country code.
    #[param(name = "phone-cc", validate(required, len = 2))]
    pub phone_country_code: String,
    /// Telephone number.
    #[param(name = "phone", validate(required, number))]
    pub phone: String,
    /// Alternate telephone country code.
    #[param(name = "alt-phone-cc", optional, validate(len = 2))]
    pub alt_phone_country_code: String,
    /// Alternate telephone number.
    #[param(name = "alt-phone", optional, validate(number))]
    pub alt_phone: String,
    /// Fax country code.
    #[param(name = "fax-cc", optional, validate(len = 2))]
    pub fax_country_code: String,
    /// Fax number.
    #[param(name = "fax", optional, validate(number))]
    pub fax: String,
    /// Mobile country code.
    #[param(name = "mobile-cc", optional, validate(len = 2))]
    pub mobile_country_code: String,
    /// Mobile number.
    #[param(name = "mobile", optional, validate(number))]
    pub mobile: String,
    /// EU VAT id.
    #[param(name = "vat-id", optional)]
    pub vat_id: String,
    /// Consent to SMS notifications.
    #[param(name = "sms-consent", optional)]
    pub sms_consent: bool,
    /// Consent to marketing email.
    #[param(name = "email-marketing-consent", optional)]
    pub email_marketing_consent: bool,
    /// Acceptance of the privacy policy.
    #[param(name = "accept-policy", optional)]
    pub accept_policy: bool,
    /// Id assigned by the API after sign-up.
    pub customer_id: String,
}

/// A customer account as fetched, and as sent back to modify it.
///
/// Fields without a wire name are read-only.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Record)]
#[serde(default)]
pub struct Detail {
    #[param(name = "customer-id", validate(number))]
    #[serde(rename = "customerid")]
    pub id: String,
    #[param(name = "username", validate(email))]
    pub username: String,
    #[serde(rename = "resellerid")]
    pub reseller_id: String,
    #[serde(rename = "parentid")]
    pub parent_id: String,
    #[param(name = "name")]
    pub name: String,
    #[param(name = "company")]
    pub company: String,
    #[serde(rename = "useremail")]
    pub email: String,
    #[param(name = "phone-cc", validate(len = 2, number))]
    #[serde(rename = "telnocc")]
    pub phone_country_code: String,
    #[param(name = "phone", validate(number))]
    #[serde(rename = "telno")]
    pub phone: String,
    #[param(name = "alt-phone-cc", optional, validate(len = 2, number))]
    #[serde(skip)]
    pub alt_phone_country_code: String,
    #[param(name = "alt-phone", optional, validate(number))]
    #[serde(skip)]
    pub alt_phone: String,
    #[param(name = "mobile-cc", optional, validate(len = 2, number))]
    #[serde(rename = "mobilenocc")]
    pub mobile_country_code: String,
    #[param(name = "mobile", optional, validate(number))]
    #[serde(rename = "mobileno")]
    pub mobile: String,
    #[param(name = "faxnocc", optional, validate(len = 2))]
    #[serde(skip)]
    pub fax_country_code: String,
    #[param(name = "faxno", optional, validate(number))]
    #[serde(skip)]
    pub fax: String,
    #[param(name = "address-line-1")]
    #[serde(rename = "address1")]
    pub address: String,
    #[param(name = "address-line-2", optional)]
    #[serde(rename = "address2")]
    pub address_line_2: String,
    #[param(name = "address-line-3", optional)]
    #[serde(rename = "address3")]
    pub address_line_3: String,
    #[param(name = "city")]
    pub city: String,
    #[serde(rename = "stateid")]
    pub state_id: String,
    #[param(name = "state")]
    pub state: String,
    #[param(name = "other-state", optional)]
    #[serde(skip)]
    pub other_state: String,
    #[param(name = "country", validate(country_code))]
    #[serde(rename = "country")]
    pub country_code: String,
    #[param(name = "zipcode")]
    #[serde(rename = "zip")]
    pub zipcode: String,
    #[param(name = "lang-pref")]
    #[serde(rename = "langpref")]
    pub language_preference: String,
    #[param(name = "vat-id", optional)]
    #[serde(skip)]
    pub vat_europe: String,
    #[param(name = "russia-vat-id", optional)]
    #[serde(skip)]
    pub vat_russia: String,
    #[param(name = "indian-gst-id", optional)]
    #[serde(skip)]
    pub gst_india: String,
    #[param(name = "australia-gst-id", optional)]
    #[serde(skip)]
    pub gst_australia: String,
    #[param(name = "newzealand-gst-id", optional)]
    #[serde(skip)]
    pub gst_new_zealand: String,
    #[param(name = "singapore-gst-id", optional)]
    #[serde(skip)]
    pub gst_singapore: String,
    pub pin: String,
    #[serde(rename = "creationdt", deserialize_with = "lenient::epoch_seconds")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "customerstatus")]
    pub status: String,
    #[serde(rename = "salescontactid")]
    pub sales_contact_id: String,
    #[serde(rename = "websitecount", deserialize_with = "lenient::number")]
    pub website_count: u16,
    #[serde(rename = "totalreceipts", deserialize_with = "lenient::number")]
    pub total_receipts: f64,
    #[serde(rename = "twofactorauth_enabled", deserialize_with = "lenient::flag")]
    pub two_factor: bool,
    #[serde(rename = "twofactorsmsauth_enabled", deserialize_with = "lenient::flag")]
    pub two_factor_sms: bool,
    #[serde(rename = "twofactorgoogleauth_enabled", deserialize_with = "lenient::flag")]
    pub two_factor_google: bool,
    #[serde(
        rename = "isDominicanTaxConfiguredByParent",
        deserialize_with = "lenient::flag"
    )]
    pub dominican_tax_configured: bool,
}

/// Customer search filter. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Criteria {
    /// Login email.
    #[param(name = "username", optional)]
    pub username: String,
    /// Account status.
    #[param(name = "status", optional)]
    pub status: Option<EntityStatus>,
    /// Name.
    #[param(name = "name", optional)]
    pub name: String,
    /// Company.
    #[param(name = "company", optional)]
    pub company: String,
    /// City.
    #[param(name = "city", optional)]
    pub city: String,
    /// State.
    #[param(name = "state", optional)]
    pub state: String,
    /// Lower bound of total receipts.
    #[param(name = "total-receipt-start", optional)]
    pub receipt_lowest: f64,
    /// Upper bound of total receipts.
    #[param(name = "total-receipt-end", optional)]
    pub receipt_highest: f64,
}

/// One page of customer search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The page that was requested.
    pub page: Page,
    /// Matches across all pages; 0 when the API sent an unreadable count.
    pub total_matched: i64,
    /// Customers on this page, in response order.
    pub customers: Vec<Detail>,
}

/// Decodes a customer details response.
pub fn decode_details(decoder: &Decoder, status: StatusCode, body: &[u8]) -> CodecResult<Detail> {
    decoder.decode_direct(status, body, shapes::unprefixed())
}

/// Decodes a customer search response.
pub fn decode_search(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
    page: Page,
) -> CodecResult<SearchResult> {
    let found = decoder.decode_classified::<Detail>(status, body, shapes::customer_search())?;
    Ok(SearchResult {
        page,
        total_matched: found.count(shapes::TOTAL_MATCHED),
        customers: found.into_records(),
    })
}

/// Decodes the id returned by a sign-up request into `form`.
pub fn decode_sign_up(
    decoder: &Decoder,
    status: StatusCode,
    body: &[u8],
    mut form: SignUpForm,
) -> CodecResult<SignUpForm> {
    form.customer_id = decoder.decode_text(status, body)?;
    Ok(form)
}
