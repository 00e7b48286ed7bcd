use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name to string value, gathered from user input right before a single
/// transmission. There are no mutating accessors; build a new one per action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    fields: BTreeMap<String, String>,
}

impl Payload {
    pub fn from_fields<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_flat_object() {
        let payload = Payload::from_fields([("a", "1"), ("b", "")]);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"a": "1", "b": ""}));
    }

    #[test]
    fn later_duplicate_key_wins() {
        let payload = Payload::from_fields([("a", "1"), ("a", "2")]);
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("a"), Some("2"));
    }
}
