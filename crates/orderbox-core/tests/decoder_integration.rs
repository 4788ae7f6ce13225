//! Decoder behaviour under non-default configuration.

use http::StatusCode;
use orderbox_core::{
    ClassifyPlan, CodecError, Decoder, DecoderConfig, RecordKeys, RecordTolerance,
    UnknownKeyPolicy,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct Order {
    #[serde(default)]
    domain: String,
}

fn decoder(toml: &str) -> Decoder {
    Decoder::new(DecoderConfig::from_toml_str(toml).unwrap()).unwrap()
}

#[test]
fn test_custom_record_key_pattern() {
    let decoder = decoder(r#"record_key_pattern = "^order-[0-9]+$""#);
    let plan = ClassifyPlan::new("orders")
        .count_key("recsindb")
        .unknown_keys(UnknownKeyPolicy::Reject);

    let body = br#"{"recsindb":"2","order-1":{"domain":"a.com"},"order-2":{"domain":"b.com"}}"#;
    let found = decoder
        .decode_classified::<Order>(StatusCode::OK, body, &plan)
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found.records()[1].0, "order-2");

    let err = decoder
        .decode_classified::<Order>(StatusCode::OK, br#"{"1":{"domain":"a.com"}}"#, &plan)
        .unwrap_err();
    assert!(matches!(err, CodecError::UnknownDecodeShape { ref key } if key == "1"));
}

#[test]
fn test_custom_success_status() {
    let decoder = decoder("success_status = 201");
    assert_eq!(decoder.decode_text(StatusCode::CREATED, b"42").unwrap(), "42");

    let err = decoder
        .decode_text(StatusCode::OK, br#"{"status":"ERROR","message":"Use 201"}"#)
        .unwrap_err();
    assert!(matches!(err, CodecError::Upstream { ref message, .. } if message == "use 201"));
}

#[test]
fn test_body_limit_applies_to_error_envelopes() {
    let decoder = decoder("max_body_bytes = 16");
    let body = br#"{"status":"ERROR","message":"far too long for the limit"}"#;
    let err = decoder.decode_ack(StatusCode::BAD_REQUEST, body).unwrap_err();
    assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
}

#[test]
fn test_nested_wrappers_with_skipped_records() {
    let plan = ClassifyPlan::new("nested")
        .unwrap_levels(2)
        .records(RecordKeys::AnyRemaining)
        .deny(["meta"])
        .tolerance(RecordTolerance::Skip);

    let body = br#"{
        "outer": {
            "inner": {
                "meta": "ignored",
                "first": {"domain": "a.com"},
                "second": {"domain": 7}
            }
        }
    }"#;

    let found = Decoder::default()
        .decode_classified::<Order>(StatusCode::OK, body, &plan)
        .unwrap();
    assert_eq!(found.skipped(), 1);
    let keyed = found.into_keyed();
    assert_eq!(keyed.len(), 1);
    assert_eq!(keyed["first"].domain, "a.com");
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = DecoderConfig::from_toml_str(r#"record_key_pattern = "(""#).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CONFIG");

    let err = DecoderConfig::from_toml_str("retries = 3").unwrap_err();
    assert!(matches!(err, CodecError::Config(_)));
}
