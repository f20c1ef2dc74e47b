//! Mailgun wire format

use std::collections::{btree_map, BTreeMap};

use serde::Serialize;
use serde_json::Value;

/// The flat, string-keyed field mapping sent to the Mailgun messages API
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WireFormat(BTreeMap<String, Value>);

impl WireFormat {
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Returns the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Checks whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether there are no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the fields in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Consumes the wire format, returning the underlying map
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }

    /// Flattens the fields into `(key, text)` pairs for a multipart form body.
    ///
    /// Lists repeat their key once per element, booleans render as `yes` or
    /// `no`, and nested objects are sent as JSON text.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(self.0.len());

        for (key, value) in &self.0 {
            match value {
                Value::Array(items) => {
                    fields.extend(items.iter().map(|item| (key.clone(), form_text(item))))
                }
                _ => fields.push((key.clone(), form_text(value))),
            }
        }

        fields
    }
}

impl<'a> IntoIterator for &'a WireFormat {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<WireFormat> for Value {
    fn from(wire: WireFormat) -> Self {
        Value::Object(wire.0.into_iter().collect())
    }
}

fn form_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "yes".to_string(),
        Value::Bool(false) => "no".to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
