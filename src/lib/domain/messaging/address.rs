//! Mail target resolution

use serde_json::Value;

/// A value identifying a recipient, sender, or copy recipient of a message.
///
/// Targets come in several shapes, mirroring the ways applications tend to
/// describe mailboxes. Every shape is reduced to a single `"address"` or
/// `"Name <address>"` string by [`resolve`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MailTarget {
    /// No target, e.g. a null value from loosely-typed input
    #[default]
    Empty,

    /// An address string, either `john@example.com` or `John <john@example.com>`
    Plain(String),

    /// An address with an optional display name
    Structured {
        /// The mailbox address
        address: String,

        /// The display name
        name: Option<String>,
    },

    /// An ordered list of addresses, of which the first one is used
    List(Vec<String>),

    /// A single `address => name` entry, e.g. `{ "jane@example.com": "Jane" }`
    Mapping {
        /// The mailbox address
        key: String,

        /// The display name
        value: String,
    },
}

impl MailTarget {
    /// Creates a structured target without a display name
    pub fn address(address: impl Into<String>) -> Self {
        Self::Structured {
            address: address.into(),
            name: None,
        }
    }

    /// Creates a structured target with a display name
    pub fn named(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Structured {
            address: address.into(),
            name: Some(name.into()),
        }
    }

    /// Creates a single-entry `address => name` mapping target
    pub fn mapping(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Mapping {
            key: address.into(),
            value: name.into(),
        }
    }

    /// Classifies a loosely-typed JSON value as a mail target.
    ///
    /// Objects carrying an `address` key are treated as structured targets,
    /// which takes priority over reading the first entry of the object, in
    /// insertion order, as an `address => name` mapping. Scalars other than
    /// strings yield [`MailTarget::Empty`].
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Plain(s.clone()),
            Value::Array(items) => Self::List(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            ),
            Value::Object(map) => match map.get("address").and_then(Value::as_str) {
                Some(address) => Self::Structured {
                    address: address.to_string(),
                    name: map.get("name").and_then(Value::as_str).map(str::to_string),
                },
                None => match map.iter().next() {
                    Some((key, Value::String(name))) => Self::mapping(key.as_str(), name.as_str()),
                    _ => Self::Empty,
                },
            },
            Value::Null | Value::Bool(_) | Value::Number(_) => Self::Empty,
        }
    }

    /// Resolves this target, see [`resolve`]
    pub fn resolve(&self) -> Option<String> {
        resolve(self)
    }
}

impl From<&str> for MailTarget {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl From<String> for MailTarget {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<&String> for MailTarget {
    fn from(value: &String) -> Self {
        Self::Plain(value.clone())
    }
}

impl From<Vec<String>> for MailTarget {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for MailTarget {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<T> From<Option<T>> for MailTarget
where
    T: Into<MailTarget>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<&Value> for MailTarget {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

/// Resolves a mail target into `"address"` or `"Name <address>"` form.
///
/// Returns [`None`] for empty targets and empty strings. Never fails.
pub fn resolve(target: &MailTarget) -> Option<String> {
    match target {
        MailTarget::Empty => None,
        MailTarget::Plain(s) => non_empty(s).map(str::to_string),
        MailTarget::Structured { address, name } => {
            let address = non_empty(address)?;

            match name.as_deref().and_then(non_empty) {
                Some(name) => Some(format!("{name} <{address}>")),
                None => Some(address.to_string()),
            }
        }
        MailTarget::List(items) => items
            .first()
            .and_then(|first| non_empty(first))
            .map(str::to_string),
        MailTarget::Mapping { key, value } => {
            let address = non_empty(key)?;

            match non_empty(value) {
                Some(name) => Some(format!("{name} <{address}>")),
                None => Some(address.to_string()),
            }
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
