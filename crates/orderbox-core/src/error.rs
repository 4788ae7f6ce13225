//! Codec error types.
//!
//! Every encode, merge and decode operation returns [`CodecError`] on
//! failure. Validation failures carry a [`ValidationError`] describing the
//! offending field and rule.

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Result type alias using [`CodecError`].
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors produced by the encode/decode subsystem.
///
/// # Example
///
/// ```
/// use orderbox_core::CodecError;
///
/// let err = CodecError::decode("customer search", "expected an object");
/// assert_eq!(err.error_code(), "DECODE_FAILED");
/// assert!(err.to_string().contains("customer search"));
/// ```
#[derive(Error, Debug)]
pub enum CodecError {
    /// A field failed one of its declared rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A non-optional field was left at its zero value.
    #[error("{record}: required field '{field}' ({wire_name}) must not be empty")]
    MissingRequiredField {
        /// Record type name.
        record: &'static str,
        /// Rust field name.
        field: &'static str,
        /// Wire parameter name.
        wire_name: &'static str,
    },

    /// A request could not be rendered for the wire.
    #[error("failed to encode {context}: {message}")]
    Encode {
        /// What was being encoded.
        context: String,
        /// Underlying serializer message.
        message: String,
    },

    /// The body does not match the declared shape.
    #[error("failed to decode {context}: {message}")]
    Decode {
        /// What was being decoded (endpoint shape, key, ...).
        context: String,
        /// Underlying parser message.
        message: String,
    },

    /// The upstream API answered with a non-success status.
    #[error("upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status returned by the API.
        status: StatusCode,
        /// Lower-cased message from the error envelope.
        message: String,
    },

    /// A response key matched neither a record, bookkeeping nor denylist rule.
    #[error("unrecognised response key '{key}'")]
    UnknownDecodeShape {
        /// The offending key.
        key: String,
    },

    /// The body exceeds the configured size limit.
    #[error("payload too large: max {max} bytes, got {actual} bytes")]
    PayloadTooLarge {
        /// Configured limit.
        max: usize,
        /// Actual body size.
        actual: usize,
    },

    /// The API acknowledged the request with `false`.
    #[error("operation was not performed by the upstream API")]
    OperationFailed,

    /// Invalid decoder configuration.
    #[error("invalid decoder configuration: {0}")]
    Config(String),

    /// Paging bounds violated.
    #[error("invalid page: {0}")]
    InvalidPage(String),
}

impl CodecError {
    /// Creates a decode error for the given context.
    #[must_use]
    pub fn decode(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Creates an encode error for the given context.
    #[must_use]
    pub fn encode(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Encode {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Creates an upstream error, lower-casing the envelope message.
    #[must_use]
    pub fn upstream(status: StatusCode, message: &str) -> Self {
        Self::Upstream {
            status,
            message: message.to_lowercase(),
        }
    }

    /// Creates an unknown-shape error for a response key.
    #[must_use]
    pub fn unknown_shape(key: impl Into<String>) -> Self {
        Self::UnknownDecodeShape { key: key.into() }
    }

    /// Returns true for errors caused by the caller's record rather than the response.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::MissingRequiredField { .. } | Self::InvalidPage(_)
        )
    }

    /// Returns the error code suitable for logs and error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::MissingRequiredField { .. } => "MISSING_REQUIRED_FIELD",
            Self::Encode { .. } => "ENCODE_FAILED",
            Self::Decode { .. } => "DECODE_FAILED",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::UnknownDecodeShape { .. } => "UNKNOWN_DECODE_SHAPE",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::OperationFailed => "OPERATION_FAILED",
            Self::Config(_) => "INVALID_CONFIG",
            Self::InvalidPage(_) => "INVALID_PAGE",
        }
    }
}

/// A field that failed a declared validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Record type name.
    pub record: &'static str,
    /// Rust field name.
    pub field: &'static str,
    /// Wire parameter name.
    pub wire_name: &'static str,
    /// Name of the rule that failed (e.g. `email`, `max`).
    pub rule: &'static str,
    /// Human-readable detail.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "validation failed for {}.{} ({}): {} [{}]",
            self.record, self.field, self.wire_name, self.message, self.rule
        )
    }
}

impl std::error::Error for ValidationError {}
