//! Response envelope decoding.
//!
//! Every response is one of two envelopes. A non-success status carries an
//! [`ErrorEnvelope`]; a success status carries a payload whose shape depends
//! on the endpoint. [`Decoder`] checks the status first, so an error status
//! never reaches payload parsing.
//!
//! Some endpoints qualify their keys with a type discriminator
//! (`contact.name`, `entity.city`). [`EnvelopeNormalizer`] removes those
//! qualifiers from the raw text before it is parsed.

use std::borrow::Cow;

use http::StatusCode;
use regex::{NoExpand, Regex};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DecoderConfig;
use crate::error::{CodecError, CodecResult};

/// Body of a non-success response.
///
/// Missing fields are left empty, so any JSON object is a valid envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Upstream status label, usually `ERROR`.
    #[serde(default)]
    pub status: String,
    /// Human-readable reason.
    #[serde(default)]
    pub message: String,
}

/// Removes synthetic key prefixes from a raw response body.
///
/// Replacement is a single left-to-right pass over the text: at each
/// position the first listed prefix that matches is removed, and scanning
/// resumes after it. Text produced by a removal is never rescanned.
///
/// The prefixes compile into one alternation, so the pass is linear in the
/// body length however many prefixes are configured.
///
/// The pass works on raw text, so a prefix occurring inside a value is
/// removed too.
///
/// # Example
///
/// ```
/// use orderbox_core::EnvelopeNormalizer;
///
/// let normalizer = EnvelopeNormalizer::new(["contact.", "entity."]);
/// let body = r#"{"contact.name":"A","entity.city":"B"}"#;
/// assert_eq!(normalizer.normalize(body), r#"{"name":"A","city":"B"}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvelopeNormalizer {
    prefixes: Vec<String>,
    pattern: Option<Regex>,
}

impl EnvelopeNormalizer {
    /// Creates a normalizer removing `prefixes`. Empty prefixes are ignored.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !p.is_empty())
            .collect();

        // Alternation is leftmost-first: the earliest match wins, ties go to
        // the first listed prefix.
        let pattern = (!prefixes.is_empty()).then(|| {
            let alternation = prefixes
                .iter()
                .map(String::as_str)
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&alternation).expect("valid regex")
        });

        Self { prefixes, pattern }
    }

    /// A normalizer that leaves text unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// The configured prefixes, in priority order.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Removes every prefix occurrence from `body`.
    #[must_use]
    pub fn normalize<'a>(&self, body: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(body, NoExpand("")),
            None => Cow::Borrowed(body),
        }
    }
}

impl PartialEq for EnvelopeNormalizer {
    fn eq(&self, other: &Self) -> bool {
        self.prefixes == other.prefixes
    }
}

impl Eq for EnvelopeNormalizer {}

/// Decodes upstream responses.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use orderbox_core::{CodecError, Decoder};
///
/// let decoder = Decoder::default();
///
/// let err = decoder
///     .decode_text(StatusCode::INTERNAL_SERVER_ERROR, br#"{"status":"ERROR","message":"Invalid Customer"}"#)
///     .unwrap_err();
/// assert!(matches!(err, CodecError::Upstream { ref message, .. } if message == "invalid customer"));
///
/// assert!(decoder.decode_flag(StatusCode::OK, b"true").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Decoder {
    pub(crate) config: DecoderConfig,
    pub(crate) success: StatusCode,
    pub(crate) record_keys: Regex,
}

impl Decoder {
    /// Creates a decoder from a validated configuration.
    pub fn new(config: DecoderConfig) -> CodecResult<Self> {
        config.validate()?;
        let success = config.status()?;
        let record_keys = config.record_key_regex()?;
        Ok(Self {
            config,
            success,
            record_keys,
        })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Fails with the upstream error when `status` is not the success code.
    ///
    /// The body of an error response must be a JSON object; anything else is
    /// a decode error.
    pub fn check_status(&self, status: StatusCode, body: &[u8]) -> CodecResult<()> {
        self.check_size(body)?;
        if status == self.success {
            return Ok(());
        }

        let envelope: ErrorEnvelope = serde_json::from_slice(body)
            .map_err(|e| CodecError::decode("error envelope", e))?;
        debug!(
            status = status.as_u16(),
            upstream_status = %envelope.status,
            "upstream returned error envelope"
        );
        Err(CodecError::upstream(status, &envelope.message))
    }

    /// Deserializes a normalised payload directly into `T`.
    pub fn decode_direct<T: DeserializeOwned>(
        &self,
        status: StatusCode,
        body: &[u8],
        normalizer: &EnvelopeNormalizer,
    ) -> CodecResult<T> {
        let text = self.payload_text(status, body)?;
        let normalized = normalizer.normalize(text);
        serde_json::from_str(&normalized)
            .map_err(|e| CodecError::decode(std::any::type_name::<T>(), e))
    }

    /// Returns the payload as text, unchanged.
    pub fn decode_text(&self, status: StatusCode, body: &[u8]) -> CodecResult<String> {
        self.payload_text(status, body).map(str::to_owned)
    }

    /// Parses the payload as a boolean literal.
    ///
    /// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and `0`, `f`, `F`,
    /// `FALSE`, `false`, `False`.
    pub fn decode_flag(&self, status: StatusCode, body: &[u8]) -> CodecResult<bool> {
        let text = self.payload_text(status, body)?;
        parse_flag(text)
            .ok_or_else(|| CodecError::decode("flag", format!("'{text}' is not a boolean")))
    }

    /// Parses an acknowledgement; `false` means the operation was refused.
    pub fn decode_ack(&self, status: StatusCode, body: &[u8]) -> CodecResult<()> {
        if self.decode_flag(status, body)? {
            Ok(())
        } else {
            Err(CodecError::OperationFailed)
        }
    }

    pub(crate) fn payload_text<'a>(&self, status: StatusCode, body: &'a [u8]) -> CodecResult<&'a str> {
        self.check_status(status, body)?;
        std::str::from_utf8(body).map_err(|e| CodecError::decode("response body", e))
    }

    fn check_size(&self, body: &[u8]) -> CodecResult<()> {
        let max = self.config.max_body_bytes;
        if body.len() > max {
            return Err(CodecError::PayloadTooLarge {
                max,
                actual: body.len(),
            });
        }
        Ok(())
    }
}

impl Default for Decoder {
    fn default() -> Self {
        let config = DecoderConfig::default();
        Self {
            success: StatusCode::OK,
            record_keys: Regex::new("^[0-9]+$").expect("valid regex"),
            config,
        }
    }
}

/// Boolean literal as the upstream API writes it.
pub(crate) fn parse_flag(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
