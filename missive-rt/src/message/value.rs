//! The dynamic message tree.

// Layer 1: Standard library imports
use std::collections::BTreeMap;
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use bytes::Bytes;

// Layer 3: Internal module imports
use super::codec;
use crate::address::Address;

/// A JSON-shaped message value.
///
/// `Value` is the unit of communication between actors: everything a cast or
/// a call carries is one of these trees. The variants mirror JSON (null,
/// boolean, integer/float, string, sequence, string-keyed mapping) plus two
/// leaves JSON cannot express directly:
///
/// - [`Value::Address`]: a reference to another actor, serialized on the
///   wire as `{"_pyact_address": <id-or-url>}`.
/// - [`Value::Binary`]: an opaque byte blob, serialized as
///   `{"_pyact_binary": <base64>}`.
///
/// # Example
/// ```rust
/// use missive_rt::message::Value;
///
/// let msg = Value::map([
///     ("credit", Value::from(250)),
///     ("memo", Value::from("march invoice")),
/// ]);
/// assert_eq!(msg.get("credit"), Some(&Value::Int(250)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null.
    Null,
    /// JSON true/false.
    Bool(bool),
    /// JSON number without a fractional part.
    Int(i64),
    /// JSON number with a fractional part.
    Float(f64),
    /// JSON string.
    Str(String),
    /// JSON array: an ordered sequence of values.
    Seq(Vec<Value>),
    /// JSON object: a string-keyed mapping.
    Map(BTreeMap<String, Value>),
    /// A local or remote actor address.
    Address(Address),
    /// An opaque byte blob.
    Binary(Bytes),
}

impl Value {
    /// Build a mapping value from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Build a sequence value.
    pub fn seq<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Seq(items.into_iter().collect())
    }

    /// Look up a key in a mapping value. Returns `None` for other variants.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// View as a string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// View as an integer, if this is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// View as an address, if this is one.
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(address) => Some(address),
            _ => None,
        }
    }

    /// View as a sequence, if this is one.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// True for `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Seq(items)
    }
}

impl From<Address> for Value {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<Bytes> for Value {
    fn from(blob: Bytes) -> Self {
        Self::Binary(blob)
    }
}

impl Display for Value {
    /// Render the value in its wire form (local addresses as bare ids).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = codec::to_json(self, None);
        let text = serde_json::to_string(&json).map_err(|_| fmt::Error)?;
        write!(f, "{text}")
    }
}
