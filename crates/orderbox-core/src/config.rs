//! Decoder configuration.

use http::StatusCode;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// Settings for [`Decoder`](crate::Decoder).
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration.
///
/// # Example
///
/// ```
/// use orderbox_core::DecoderConfig;
///
/// let config = DecoderConfig::from_toml_str("max_body_bytes = 4096").unwrap();
/// assert_eq!(config.max_body_bytes, 4096);
/// assert_eq!(config.success_status, 200);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DecoderConfig {
    /// The only status code treated as a payload response.
    #[serde(default = "default_success_status")]
    pub success_status: u16,

    /// Pattern a key must match to be read as a record under
    /// numeric-key plans.
    #[serde(default = "default_record_key_pattern")]
    pub record_key_pattern: String,

    /// Largest response body accepted, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            success_status: default_success_status(),
            record_key_pattern: default_record_key_pattern(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_success_status() -> u16 {
    200
}

fn default_record_key_pattern() -> String {
    "^[0-9]+$".to_string()
}

fn default_max_body_bytes() -> usize {
    4 * 1024 * 1024
}

impl DecoderConfig {
    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml_str(input: &str) -> CodecResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| CodecError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every field holds a usable value.
    pub fn validate(&self) -> CodecResult<()> {
        self.status()?;
        self.record_key_regex()?;
        if self.max_body_bytes == 0 {
            return Err(CodecError::Config(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The success status as a typed code.
    pub fn status(&self) -> CodecResult<StatusCode> {
        StatusCode::from_u16(self.success_status).map_err(|_| {
            CodecError::Config(format!(
                "success_status {} is not a valid HTTP status",
                self.success_status
            ))
        })
    }

    /// Compiles the record key pattern.
    pub fn record_key_regex(&self) -> CodecResult<Regex> {
        Regex::new(&self.record_key_pattern).map_err(|e| {
            CodecError::Config(format!(
                "record_key_pattern '{}' is invalid: {e}",
                self.record_key_pattern
            ))
        })
    }
}
