//! Request parameter sets.
//!
//! A [`ParameterSet`] is an ordered multi-map from wire key to one or more
//! string values. Repeated keys are meaningful: the API reads them as a list.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{CodecError, CodecResult};

/// Ordered multi-valued request parameters.
///
/// # Example
///
/// ```
/// use orderbox_core::ParameterSet;
///
/// let mut params = ParameterSet::new();
/// params.add("customer-id", "12");
/// params.add("type", "Contact");
/// params.add("type", "CaContact");
///
/// assert_eq!(params.get_all("type"), ["Contact", "CaContact"]);
/// assert_eq!(
///     params.to_form_string().unwrap(),
///     "customer-id=12&type=Contact&type=CaContact"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: IndexMap<String, Vec<String>>,
}

impl ParameterSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// Appends every value of `other`, preserving its order.
    pub fn extend(&mut self, other: ParameterSet) {
        for (key, values) in other.entries {
            self.entries.entry(key).or_default().extend(values);
        }
    }

    /// First value under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values under `key`, in insertion order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }

    /// Whether any value exists under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes and returns every value under `key`.
    pub fn remove(&mut self, key: &str) -> Vec<String> {
        self.entries.shift_remove(key).unwrap_or_default()
    }

    /// Distinct keys, in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Every key/value pair, grouped by key in first-insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Number of key/value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether the set holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the set as `application/x-www-form-urlencoded` text.
    pub fn to_form_string(&self) -> CodecResult<String> {
        let pairs: Vec<(&str, &str)> = self.pairs().collect();
        serde_urlencoded::to_string(pairs)
            .map_err(|e| CodecError::encode("parameter set", e))
    }

    /// Parses `application/x-www-form-urlencoded` text.
    pub fn from_form_str(input: &str) -> CodecResult<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(input)
            .map_err(|e| CodecError::decode("form parameters", e))?;
        Ok(pairs.into_iter().collect())
    }

    /// Echoes the set as a JSON object: single values as strings, repeated
    /// keys as arrays of strings.
    #[must_use]
    pub fn to_json_object(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, vs)| {
                let value = match vs.as_slice() {
                    [single] => Value::String(single.clone()),
                    many => Value::Array(many.iter().cloned().map(Value::String).collect()),
                };
                (k.clone(), value)
            })
            .collect();
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.add(k, v);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys_keep_order() {
        let mut params = ParameterSet::new();
        params.add("ns", "ns1.example.com");
        params.add("domain-name", "example.com");
        params.add("ns", "ns2.example.com");

        assert_eq!(params.len(), 3);
        assert_eq!(params.get("ns"), Some("ns1.example.com"));
        assert_eq!(params.get_all("ns"), ["ns1.example.com", "ns2.example.com"]);
        assert_eq!(params.keys().collect::<Vec<_>>(), ["ns", "domain-name"]);
    }

    #[test]
    fn test_missing_key() {
        let params = ParameterSet::new();
        assert!(params.is_empty());
        assert_eq!(params.get("x"), None);
        assert!(params.get_all("x").is_empty());
    }

    #[test]
    fn test_extend_and_remove() {
        let mut a: ParameterSet = [("type", "Contact")].into_iter().collect();
        let b: ParameterSet = [("type", "CaContact"), ("customer-id", "7")]
            .into_iter()
            .collect();
        a.extend(b);

        assert_eq!(a.get_all("type"), ["Contact", "CaContact"]);
        assert_eq!(a.remove("type").len(), 2);
        assert!(!a.contains_key("type"));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_form_encoding_escapes() {
        let params: ParameterSet = [("name", "Jane Doe"), ("email", "jane+ops@example.com")]
            .into_iter()
            .collect();

        let form = params.to_form_string().unwrap();
        assert_eq!(form, "name=Jane+Doe&email=jane%2Bops%40example.com");

        let parsed = ParameterSet::from_form_str(&form).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_json_echo() {
        let params: ParameterSet = [("name", "A"), ("tlds", "com"), ("tlds", "net")]
            .into_iter()
            .collect();

        let json = params.to_json_object();
        assert_eq!(json["name"], "A");
        assert_eq!(json["tlds"], serde_json::json!(["com", "net"]));
    }
}
