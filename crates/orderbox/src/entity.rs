//! Values shared across record modules.

use orderbox_core::{CodecResult, Decoder, StatusCode};
use serde::Deserialize;

use crate::shapes;
use crate::wire_enum::wire_enum;

wire_enum! {
    /// Lifecycle status of a customer or contact, as used in search filters.
    pub enum EntityStatus {
        /// In use.
        Active => "Active",
        /// Created but not yet usable.
        InActive => "InActive",
        /// Temporarily blocked.
        Suspended => "Suspended",
        /// Removed.
        Deleted => "Deleted",
    }
}

/// Outcome of a DNS or forwarding change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StdResponse {
    /// `Success` or `Failed`.
    pub status: String,
    /// Human-readable detail.
    #[serde(alias = "msg")]
    pub message: String,
}

impl StdResponse {
    /// Decodes a change response.
    pub fn decode(decoder: &Decoder, status: StatusCode, body: &[u8]) -> CodecResult<Self> {
        decoder.decode_direct(status, body, shapes::unprefixed())
    }

    /// Whether the API reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}
