//! Classified decoding of keyed response maps.
//!
//! Search and listing endpoints answer with one JSON object whose keys mix
//! bookkeeping counts (`recsindb`, `recsonpage`), records keyed by id, record
//! lists, and labels that are neither. A [`ClassifyPlan`] describes how one
//! endpoint's keys are sorted; [`Decoder::decode_classified`] applies it.

use http::StatusCode;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::envelope::{Decoder, EnvelopeNormalizer};
use crate::error::{CodecError, CodecResult};

/// Which keys hold a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKeys {
    /// Keys matching the decoder's record key pattern (numeric ids by default).
    Numeric,
    /// Every key not claimed by a count, list or denylist rule.
    AnyRemaining,
}

/// What happens to a key no rule claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownKeyPolicy {
    /// Drop the key.
    Ignore,
    /// Fail with [`CodecError::UnknownDecodeShape`].
    Reject,
}

/// What happens when one record fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTolerance {
    /// Fail the whole response.
    Abort,
    /// Drop the record, log a warning and count it in [`Classified::skipped`].
    Skip,
}

/// Per-endpoint description of a keyed response.
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use orderbox_core::{ClassifyPlan, Decoder};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Customer {
///     name: String,
/// }
///
/// let plan = ClassifyPlan::new("customer search")
///     .prefixes(["customer."])
///     .count_key("recsindb");
///
/// let body = br#"{"recsindb":"2","1":{"customer.name":"A"},"2":{"customer.name":"B"}}"#;
/// let found = Decoder::default()
///     .decode_classified::<Customer>(StatusCode::OK, body, &plan)
///     .unwrap();
///
/// assert_eq!(found.count("recsindb"), 2);
/// assert_eq!(found.len(), 2);
/// assert_eq!(found.records()[1].1.name, "B");
/// ```
#[derive(Debug, Clone)]
pub struct ClassifyPlan {
    name: String,
    normalizer: EnvelopeNormalizer,
    count_keys: Vec<String>,
    list_keys: Vec<String>,
    denylist: Vec<String>,
    record_keys: RecordKeys,
    unwrap_levels: usize,
    strip_suffix: Option<String>,
    unknown_keys: UnknownKeyPolicy,
    tolerance: RecordTolerance,
}

impl ClassifyPlan {
    /// Starts a plan with numeric record keys, no unwrapping, unknown keys
    /// ignored and record failures aborting.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            normalizer: EnvelopeNormalizer::identity(),
            count_keys: Vec::new(),
            list_keys: Vec::new(),
            denylist: Vec::new(),
            record_keys: RecordKeys::Numeric,
            unwrap_levels: 0,
            strip_suffix: None,
            unknown_keys: UnknownKeyPolicy::Ignore,
            tolerance: RecordTolerance::Abort,
        }
    }

    /// Key prefixes removed from the raw body before parsing.
    pub fn prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.normalizer = EnvelopeNormalizer::new(prefixes);
        self
    }

    /// Adds a bookkeeping key read as an integer count.
    pub fn count_key(mut self, key: impl Into<String>) -> Self {
        self.count_keys.push(key.into());
        self
    }

    /// Adds a key holding an array of records.
    pub fn list_key(mut self, key: impl Into<String>) -> Self {
        self.list_keys.push(key.into());
        self
    }

    /// Keys dropped without being parsed.
    pub fn deny<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.denylist.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Sets which keys hold single records.
    pub fn records(mut self, keys: RecordKeys) -> Self {
        self.record_keys = keys;
        self
    }

    /// Number of wrapper objects to unwrap before classifying.
    pub fn unwrap_levels(mut self, levels: usize) -> Self {
        self.unwrap_levels = levels;
        self
    }

    /// Suffix removed from record keys.
    pub fn strip_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.strip_suffix = Some(suffix.into());
        self
    }

    /// Sets the unknown key policy.
    pub fn unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Sets the per-record failure tolerance.
    pub fn tolerance(mut self, tolerance: RecordTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Shape name used in errors and log events.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The plan's prefix normalizer.
    #[must_use]
    pub fn normalizer(&self) -> &EnvelopeNormalizer {
        &self.normalizer
    }

    /// The per-record failure tolerance.
    #[must_use]
    pub fn record_tolerance(&self) -> RecordTolerance {
        self.tolerance
    }

    /// The unknown key policy.
    #[must_use]
    pub fn unknown_key_policy(&self) -> UnknownKeyPolicy {
        self.unknown_keys
    }

    fn record_key<'k>(&self, key: &'k str) -> &'k str {
        match &self.strip_suffix {
            Some(suffix) => key.strip_suffix(suffix.as_str()).unwrap_or(key),
            None => key,
        }
    }
}

/// Result of a classified decode.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified<T> {
    counts: IndexMap<String, i64>,
    records: Vec<(String, T)>,
    skipped: usize,
}

impl<T> Default for Classified<T> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
            records: Vec::new(),
            skipped: 0,
        }
    }
}

impl<T> Classified<T> {
    /// Bookkeeping count for `key`; 0 when the key was absent.
    #[must_use]
    pub fn count(&self, key: &str) -> i64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Every bookkeeping count present in the response.
    #[must_use]
    pub fn counts(&self) -> &IndexMap<String, i64> {
        &self.counts
    }

    /// Decoded records with the key they came from, in response order.
    ///
    /// Records from a list key are keyed by their position in the list.
    #[must_use]
    pub fn records(&self) -> &[(String, T)] {
        &self.records
    }

    /// Number of decoded records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record was decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records dropped under [`RecordTolerance::Skip`].
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The records without their keys.
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.records.into_iter().map(|(_, record)| record).collect()
    }

    /// The records by key. A repeated key keeps its last record.
    #[must_use]
    pub fn into_keyed(self) -> IndexMap<String, T> {
        self.records.into_iter().collect()
    }
}

impl Decoder {
    /// Decodes a keyed response according to `plan`.
    ///
    /// The body is normalised and parsed as an object, `plan`'s wrapper
    /// levels are unwrapped, then each key is classified in order: count,
    /// list, denylist, record, unknown.
    pub fn decode_classified<T: DeserializeOwned>(
        &self,
        status: StatusCode,
        body: &[u8],
        plan: &ClassifyPlan,
    ) -> CodecResult<Classified<T>> {
        let text = self.payload_text(status, body)?;
        let normalized = plan.normalizer.normalize(text);
        let mut map: IndexMap<String, Value> = serde_json::from_str(&normalized)
            .map_err(|e| CodecError::decode(plan.name.as_str(), e))?;

        for _ in 0..plan.unwrap_levels {
            map = unwrap_level(plan, map)?;
        }

        let mut out = Classified::default();
        for (key, value) in map {
            if plan.count_keys.contains(&key) {
                let count = lenient_count(&value);
                out.counts.insert(key, count);
            } else if plan.list_keys.contains(&key) {
                let items = match value {
                    Value::Array(items) => items,
                    Value::Null => Vec::new(),
                    other => {
                        return Err(CodecError::decode(
                            format!("{} list '{key}'", plan.name),
                            format!("expected an array, got {}", kind(&other)),
                        ))
                    }
                };
                for (index, item) in items.into_iter().enumerate() {
                    accept(plan, &mut out, index.to_string(), item)?;
                }
            } else if plan.denylist.contains(&key) {
                trace!(shape = %plan.name, key = %key, "dropped denylisted key");
            } else if self.is_record_key(plan, &key) {
                let record_key = plan.record_key(&key).to_owned();
                accept(plan, &mut out, record_key, value)?;
            } else {
                match plan.unknown_keys {
                    UnknownKeyPolicy::Ignore => {
                        trace!(shape = %plan.name, key = %key, "dropped unrecognised key");
                    }
                    UnknownKeyPolicy::Reject => return Err(CodecError::unknown_shape(key)),
                }
            }
        }

        debug!(
            shape = %plan.name,
            records = out.records.len(),
            skipped = out.skipped,
            "decoded classified response"
        );
        Ok(out)
    }

    fn is_record_key(&self, plan: &ClassifyPlan, key: &str) -> bool {
        match plan.record_keys {
            RecordKeys::Numeric => self.record_keys.is_match(key),
            RecordKeys::AnyRemaining => true,
        }
    }
}

/// Merges the object values of every wrapper key into one map.
fn unwrap_level(
    plan: &ClassifyPlan,
    map: IndexMap<String, Value>,
) -> CodecResult<IndexMap<String, Value>> {
    if map.is_empty() {
        return Err(CodecError::decode(
            plan.name.as_str(),
            "expected a wrapper object, got an empty object",
        ));
    }

    let mut merged = IndexMap::new();
    for (key, value) in map {
        match value {
            Value::Object(inner) => merged.extend(inner),
            other => {
                return Err(CodecError::decode(
                    format!("{} wrapper '{key}'", plan.name),
                    format!("expected an object, got {}", kind(&other)),
                ))
            }
        }
    }
    Ok(merged)
}

fn accept<T: DeserializeOwned>(
    plan: &ClassifyPlan,
    out: &mut Classified<T>,
    key: String,
    value: Value,
) -> CodecResult<()> {
    match serde_json::from_value::<T>(value) {
        Ok(record) => out.records.push((key, record)),
        Err(e) => match plan.tolerance {
            RecordTolerance::Abort => {
                return Err(CodecError::decode(
                    format!("{} record '{key}'", plan.name),
                    e,
                ))
            }
            RecordTolerance::Skip => {
                warn!(shape = %plan.name, key = %key, error = %e, "skipping undecodable record");
                out.skipped += 1;
            }
        },
    }
    Ok(())
}

/// Count from a number or numeric string; anything else is 0.
fn lenient_count(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
