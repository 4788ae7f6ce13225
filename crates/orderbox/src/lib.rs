//! # Orderbox
//!
//! **Typed request and response mapping for the reseller API**
//!
//! Orderbox sits between an HTTP client and the reseller API's records:
//!
//! - **Declarative records** – `#[derive(Record)]` turns struct fields into
//!   validated, form-encoded request parameters
//! - **Envelope decoding** – error envelopes, key prefixes and dynamically
//!   keyed search responses decode into plain structs
//! - **Partial updates** – [`merge_previous`] fills a modification from the
//!   record's current state
//!
//! It performs no I/O. Transport, authentication and retries belong to the
//! caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use orderbox::prelude::*;
//! use orderbox::customer;
//!
//! let criteria = customer::Criteria {
//!     status: Some(EntityStatus::Active),
//!     city: "Jakarta".to_string(),
//!     ..customer::Criteria::default()
//! };
//! let params = Page::new(1, 25)?.encode_with(&criteria)?;
//! assert_eq!(params.to_form_string()?, "status=Active&city=Jakarta&no-of-records=25&page-no=1");
//!
//! let body = br#"{"recsonpage":"1","recsindb":"1","1":{"customer.name":"Jane"}}"#;
//! let found = customer::decode_search(&Decoder::default(), StatusCode::OK, body, Page::default())?;
//! assert_eq!(found.customers[0].name, "Jane");
//! # Ok::<(), CodecError>(())
//! ```
//!
//! ## Modules
//!
//! | Module | Records |
//! |--------|---------|
//! | [`customer`] | sign-up, details/modification, search |
//! | [`contact`] | details, search, defaults, actions |
//! | [`dns`] | record changes and search |
//! | [`domain`] | availability, registration orders |
//! | [`domainforward`] | forwarding settings |
//!
//! [`shapes`] lists how each keyed response is decoded, and [`logging`]
//! installs a subscriber for the `tracing` events the codec emits.

#![doc(html_root_url = "https://docs.rs/orderbox/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod wire_enum;

pub mod contact;
pub mod customer;
pub mod dns;
pub mod domain;
pub mod domainforward;
mod entity;
pub mod logging;
mod paging;
pub mod shapes;

// Re-export core crate
pub use orderbox_core as core;

// Re-export the codec
pub use orderbox_core::{
    encode, merge_previous, validate, AttributeMap, Classified, ClassifyPlan, CodecError,
    CodecResult, Decoder, DecoderConfig, EnvelopeNormalizer, ErrorEnvelope, ParameterSet,
    Record, StatusCode, ValidationError,
};

// Re-export the derive
pub use orderbox_macros::Record;

pub use entity::{EntityStatus, StdResponse};
pub use paging::Page;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use orderbox::prelude::*;
///
/// let decoder = Decoder::new(DecoderConfig::default())?;
/// assert!(decoder.decode_flag(StatusCode::OK, b"true")?);
/// # Ok::<(), CodecError>(())
/// ```
pub mod prelude {
    pub use orderbox_core::{
        encode, merge_previous, password_strength, AttributeMap, CodecError, CodecResult, Decoder,
        DecoderConfig, ParameterSet, Record, StatusCode,
    };

    pub use orderbox_macros::Record;

    pub use crate::entity::{EntityStatus, StdResponse};
    pub use crate::logging::{init_logging, LogConfig};
    pub use crate::paging::Page;
}
