use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered, string-keyed, string-valued parameter bag.
///
/// This is the universal transport format between a notification façade and
/// every provider. Keys are unique; insertion order carries no meaning for
/// providers but is preserved so that a collection round-trips unchanged.
/// Providers namespace their keys as `"<provider>_<Field>"` and must leave
/// foreign keys alone.
///
/// # Examples
///
/// ```
/// use herald_core::MessageParameters;
///
/// let mut params = MessageParameters::new();
/// params.insert("sendgrid_Subject", "Hello");
/// params.insert("sms_Body", "Hi");
/// assert_eq!(params.get("sendgrid_Subject"), Some("Hello"));
/// assert_eq!(params.keys().collect::<Vec<_>>(), ["sendgrid_Subject", "sms_Body"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageParameters {
    entries: Vec<(String, String)>,
}

impl MessageParameters {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for `key` if there was one.
    ///
    /// Replacing an existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|idx| self.entries[idx].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Remove `key`, returning its value. Remaining entries keep their order.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MessageParameters {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl IntoIterator for MessageParameters {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for MessageParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for MessageParameters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParametersVisitor;

        impl<'de> Visitor<'de> for ParametersVisitor {
            type Value = MessageParameters;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of string keys to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut params = MessageParameters::new();
                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    params.insert(key, value);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ParametersVisitor)
    }
}
