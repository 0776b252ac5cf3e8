// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Insertion-ordered label to value mapping.

use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered set of message variables.
///
/// Iteration follows insertion order. Inserting an existing label replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    entries: Vec<(String, Value)>,
}

impl Variables {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, returning the previous value for the label.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((label, value));
                None
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(label, value);
        self
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value))
    }

    /// Iterate labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        vars.extend(iter);
        vars
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Variables {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (label, value) in iter {
            self.insert(label, value);
        }
    }
}

impl IntoIterator for Variables {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Variables {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Build a [`Variables`] set from `label => value` pairs.
///
/// ```
/// use varlist::vars;
///
/// let vars = vars! { "@name" => "admin", "uid" => 1 };
/// assert_eq!(vars.len(), 2);
/// ```
#[macro_export]
macro_rules! vars {
    () => {
        $crate::Variables::new()
    };
    ($($label:expr => $value:expr),+ $(,)?) => {{
        let mut vars = $crate::Variables::new();
        $(vars.insert($label, $value);)+
        vars
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preserves_insertion_order() {
        let vars = Variables::new().with("zeta", 1).with("alpha", 2).with("@mid", 3);
        let labels: Vec<&str> = vars.labels().collect();
        assert_eq!(labels, vec!["zeta", "alpha", "@mid"]);
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut vars = Variables::new().with("a", 1).with("b", 2);
        let previous = vars.insert("a", "one");
        assert_eq!(previous, Some(Value::from(1)));
        let entries: Vec<(&str, &Value)> = vars.iter().collect();
        assert_eq!(entries[0], ("a", &Value::from("one")));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_get_and_contains() {
        let vars = vars! { "@name" => "admin" };
        assert_eq!(vars.get("@name"), Some(&Value::from("admin")));
        assert!(vars.contains_key("@name"));
        assert!(!vars.contains_key("name"));
        assert!(vars.get("missing").is_none());
    }

    #[test]
    fn test_empty_macro() {
        let vars = vars! {};
        assert!(vars.is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let vars: Variables = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let vars = vars! { "!count" => 5, "@var_list" => "extra: true\n" };
        let rendered = serde_json::to_string(&vars).unwrap();
        assert_eq!(rendered, r#"{"!count":5,"@var_list":"extra: true\n"}"#);
        assert_eq!(
            serde_json::to_value(&vars).unwrap(),
            json!({"!count": 5, "@var_list": "extra: true\n"})
        );
    }
}
