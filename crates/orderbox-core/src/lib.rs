//! # Orderbox Core
//!
//! Request encoding and response decoding for the reseller API.
//!
//! Requests are flat form-encoded parameter lists; responses are JSON in one
//! of a handful of irregular envelopes. This crate turns typed records into
//! parameters and envelopes back into typed records. It performs no I/O.
//!
//! ## Encoding
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | [`encode`] | a [`Record`] | [`ParameterSet`] |
//! | [`AttributeMap::to_params`] | name/value pairs | `attr-name{i}` / `attr-value{i}` pairs |
//! | [`merge_previous`] | a partial record and its current state | a complete record |
//!
//! Records describe their wire contract through [`FieldTag`]s, normally
//! generated by `#[derive(Record)]` from the `orderbox` crate. Each tag names
//! the wire parameter, marks it optional or not, and lists the [`Rule`]s the
//! value must satisfy before anything is encoded.
//!
//! ## Decoding
//!
//! [`Decoder`] checks the status code first: any non-success status is
//! reported as [`CodecError::Upstream`] with the lower-cased message of the
//! error envelope. Success payloads are decoded either directly
//! ([`Decoder::decode_direct`]) or through a [`ClassifyPlan`] that sorts the
//! keys of a search response into counts and records
//! ([`Decoder::decode_classified`]).
//!
//! ```rust
//! use http::StatusCode;
//! use orderbox_core::{ClassifyPlan, Decoder};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Contact {
//!     name: String,
//! }
//!
//! let plan = ClassifyPlan::new("contact search")
//!     .prefixes(["entity.", "contact."])
//!     .count_key("recsindb")
//!     .list_key("result");
//!
//! let body = br#"{"recsindb":"1","result":[{"contact.name":"Jane"}]}"#;
//! let found = Decoder::default()
//!     .decode_classified::<Contact>(StatusCode::OK, body, &plan)
//!     .unwrap();
//!
//! assert_eq!(found.count("recsindb"), 1);
//! assert_eq!(found.records()[0].1.name, "Jane");
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`CodecError`]. Use [`CodecError::error_code`] for
//! a stable code and [`CodecError::is_validation`] to tell caller mistakes
//! from upstream failures.

#![doc(html_root_url = "https://docs.rs/orderbox-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod attributes;
mod classify;
mod config;
mod encode;
mod envelope;
mod error;
pub mod lenient;
mod merge;
mod params;
mod schema;
mod validate;

// Re-export main types
pub use attributes::{AttributeMap, ATTR_NAME_PREFIX, ATTR_VALUE_PREFIX};
pub use classify::{Classified, ClassifyPlan, RecordKeys, RecordTolerance, UnknownKeyPolicy};
pub use config::DecoderConfig;
pub use encode::encode;
pub use envelope::{Decoder, EnvelopeNormalizer, ErrorEnvelope};
pub use error::{CodecError, CodecResult, ValidationError};
pub use merge::merge_previous;
pub use params::ParameterSet;
pub use schema::{Field, FieldTag, Predicate, Record, Rule, WireScalar, WireValue};
pub use validate::{is_country_code, is_email, is_number, password_strength, validate};

// Re-export useful types from dependencies
pub use http::StatusCode;
