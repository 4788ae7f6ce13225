//! Lenient JSON scalars.
//!
//! The upstream API is inconsistent about scalar types: the same field may
//! arrive as `true`, `"true"` or `"1"`, and counts and prices are often
//! quoted. These functions are meant for `#[serde(deserialize_with = ...)]`
//! on read-only record fields:
//!
//! ```
//! use orderbox_core::lenient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Status {
//!     #[serde(default, deserialize_with = "lenient::flag")]
//!     locked: bool,
//!     #[serde(default, deserialize_with = "lenient::number")]
//!     total: u32,
//! }
//!
//! let status: Status = serde_json::from_str(r#"{"locked":"true","total":"12"}"#).unwrap();
//! assert!(status.locked);
//! assert_eq!(status.total, 12);
//! ```

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::envelope::parse_flag;

/// Boolean from a bool, a boolean literal string or a number.
///
/// `null` and the empty string read as `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Null => Ok(false),
        Value::Number(n) => Ok(n.as_f64().map_or(false, |f| f != 0.0)),
        Value::String(s) if s.trim().is_empty() => Ok(false),
        Value::String(s) => parse_flag(s.trim())
            .ok_or_else(|| D::Error::custom(format!("'{s}' is not a boolean"))),
        other => Err(D::Error::custom(format!("expected a boolean, got {other}"))),
    }
}

/// Number from a JSON number or a numeric string.
///
/// `null` and the empty string read as the type's default.
pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    let text = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(T::default()),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s,
        other => return Err(D::Error::custom(format!("expected a number, got {other}"))),
    };

    let text = text.trim();
    if text.is_empty() {
        return Ok(T::default());
    }
    text.parse()
        .map_err(|e| D::Error::custom(format!("'{text}' is not a valid number: {e}")))
}

/// Timestamp from Unix seconds given as a number or a numeric string.
///
/// `null`, the empty string and `0` read as `None`.
pub fn epoch_seconds<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds: i64 = number(deserializer)?;
    if seconds == 0 {
        return Ok(None);
    }
    DateTime::from_timestamp(seconds, 0)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("{seconds} is out of range for a timestamp")))
}
