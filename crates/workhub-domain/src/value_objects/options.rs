//! Provider Option Map
//!
//! Provider-specific properties passed to work creation. Providers read the
//! keys they understand and reject the ones they do not.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Map of provider-specific options configuring a work; may be empty.
///
/// Keys are provider-defined; values are arbitrary JSON. The map is ordered
/// so diagnostics stay deterministic.
///
/// # Example
///
/// ```rust
/// use workhub_domain::value_objects::WorkOptions;
///
/// let options = WorkOptions::new()
///     .with("greeting", "Good morning")
///     .with("repeat", 3);
/// assert_eq!(options.get_str("greeting"), Some("Good morning"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkOptions(BTreeMap<String, Value>);

impl WorkOptions {
    /// Create an empty option map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option (builder style)
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert an option
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    /// Get an option value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get an option value as a string slice
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Whether the map holds no options
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of options
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over option keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over key/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_getters() {
        let options = WorkOptions::new()
            .with("greeting", "hi")
            .with("repeat", 3)
            .with("verbose", true);

        assert_eq!(options.len(), 3);
        assert_eq!(options.get_str("greeting"), Some("hi"));
        assert_eq!(options.get("repeat"), Some(&Value::from(3)));
        assert_eq!(options.get_str("repeat"), None);
        assert!(options.get("missing").is_none());
    }

    #[test]
    fn empty_by_default() {
        let options = WorkOptions::new();
        assert!(options.is_empty());
        assert_eq!(options.keys().count(), 0);
    }

    #[test]
    fn serde_is_a_plain_json_object() {
        let options = WorkOptions::new().with("greeting", "hi");
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"greeting":"hi"}"#);
        let back: WorkOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
