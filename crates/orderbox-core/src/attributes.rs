//! Named attribute lists.
//!
//! Some requests carry schema-less name/value pairs (per-product extra
//! details, registry-specific fields). They travel as indexed
//! `attr-name{i}` / `attr-value{i}` pairs rather than as record fields.

use indexmap::IndexMap;

use crate::params::ParameterSet;

/// Wire key prefix for attribute names.
pub const ATTR_NAME_PREFIX: &str = "attr-name";
/// Wire key prefix for attribute values.
pub const ATTR_VALUE_PREFIX: &str = "attr-value";

/// Open map of extra name/value pairs.
///
/// Entries are indexed from 1 in insertion order when encoded, so a name and
/// its value always share the same index.
///
/// # Example
///
/// ```
/// use orderbox_core::AttributeMap;
///
/// let mut attrs = AttributeMap::new();
/// attrs.add("CPR", "CCT");
/// attrs.add("Lang", "en");
///
/// let params = attrs.to_params();
/// assert_eq!(params.get("attr-name1"), Some("CPR"));
/// assert_eq!(params.get("attr-value1"), Some("CCT"));
/// assert_eq!(params.get("attr-name2"), Some("Lang"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    data: IndexMap<String, String>,
}

impl AttributeMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. Re-adding a key keeps its original position.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    /// Value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Removes `key`, returning its value. Later entries move down one index.
    pub fn del(&mut self, key: &str) -> Option<String> {
        self.data.shift_remove(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encodes the map as a fresh parameter set.
    #[must_use]
    pub fn to_params(&self) -> ParameterSet {
        let mut params = ParameterSet::new();
        self.copy_into(&mut params);
        params
    }

    /// Appends the indexed pairs to an existing parameter set.
    pub fn copy_into(&self, dest: &mut ParameterSet) {
        for (i, (key, value)) in self.data.iter().enumerate() {
            let index = i + 1;
            dest.add(format!("{ATTR_NAME_PREFIX}{index}"), key.as_str());
            dest.add(format!("{ATTR_VALUE_PREFIX}{index}"), value.as_str());
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.add(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map_yields_empty_set() {
        assert!(AttributeMap::new().to_params().is_empty());
    }

    #[test]
    fn test_add_get_del() {
        let mut attrs = AttributeMap::new();
        attrs.add("a", "1");
        attrs.add("b", "2");
        attrs.add("a", "3");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("a"), Some("3"));
        assert_eq!(attrs.del("a"), Some("3".to_string()));
        assert_eq!(attrs.get("a"), None);

        let params = attrs.to_params();
        assert_eq!(params.get("attr-name1"), Some("b"));
        assert_eq!(params.get("attr-value1"), Some("2"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_copy_into_appends() {
        let attrs: AttributeMap = [("x", "y")].into_iter().collect();
        let mut params = ParameterSet::new();
        params.add("contact-id", "9");

        attrs.copy_into(&mut params);
        assert_eq!(params.get("contact-id"), Some("9"));
        assert_eq!(params.get("attr-name1"), Some("x"));
        assert_eq!(params.get("attr-value1"), Some("y"));
    }
}
