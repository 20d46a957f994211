//! The shape language and its matcher.

// Layer 1: Standard library imports
use std::collections::BTreeMap;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::message::Value;

/// A structural template over message [`Value`]s.
///
/// A pattern is a JSON-shaped tree whose terminals are either concrete
/// values (matched by equality) or type-class tokens (matched by
/// conformance). Composite patterns match pointwise:
///
/// - a mapping pattern matches any mapping that has *at least* the pattern's
///   keys, with each present value matching; extra keys are ignored;
/// - a sequence pattern matches a sequence of the same length, elementwise.
///
/// Matching is total and side-effect-free.
///
/// # Example
/// ```rust
/// use missive_rt::message::Value;
/// use missive_rt::shape::Pattern;
///
/// let credit = Pattern::map([("credit", Pattern::Number)]);
/// let message = Value::map([
///     ("credit", Value::from(250.0)),
///     ("memo", Value::from("rent")),
/// ]);
/// assert!(credit.matches(&message));
/// assert!(!credit.matches(&Value::map([("debit", Value::from(1))])));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Matches every value.
    Any,
    /// Matches integral numbers.
    Integer,
    /// Matches any number, integral or floating.
    Number,
    /// Matches strings.
    String,
    /// Matches booleans.
    Boolean,
    /// Matches sequences of any length.
    Sequence,
    /// Matches mappings with any keys.
    Mapping,
    /// Matches actor addresses.
    Address,
    /// Matches binary blobs.
    Binary,
    /// Matches a single concrete value by equality.
    Eq(Value),
    /// Matches a sequence of the same length, elementwise.
    Seq(Vec<Pattern>),
    /// Matches a mapping whose keys are a superset of these, pointwise.
    Map(BTreeMap<std::string::String, Pattern>),
}

impl Pattern {
    /// Shorthand for an equality terminal.
    pub fn eq(value: impl Into<Value>) -> Self {
        Self::Eq(value.into())
    }

    /// Build a mapping pattern from key/sub-pattern pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<std::string::String>,
        I: IntoIterator<Item = (K, Pattern)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, pattern)| (key.into(), pattern))
                .collect(),
        )
    }

    /// Build a sequence pattern.
    pub fn seq<I: IntoIterator<Item = Pattern>>(items: I) -> Self {
        Self::Seq(items.into_iter().collect())
    }

    /// Decide whether `value` conforms to this pattern.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Integer => matches!(value, Value::Int(_)),
            Self::Number => matches!(value, Value::Int(_) | Value::Float(_)),
            Self::String => matches!(value, Value::Str(_)),
            Self::Boolean => matches!(value, Value::Bool(_)),
            Self::Sequence => matches!(value, Value::Seq(_)),
            Self::Mapping => matches!(value, Value::Map(_)),
            Self::Address => matches!(value, Value::Address(_)),
            Self::Binary => matches!(value, Value::Binary(_)),
            Self::Eq(expected) => value == expected,
            Self::Seq(patterns) => match value {
                Value::Seq(items) => {
                    items.len() == patterns.len()
                        && patterns
                            .iter()
                            .zip(items)
                            .all(|(pattern, item)| pattern.matches(item))
                }
                _ => false,
            },
            Self::Map(patterns) => match value {
                Value::Map(entries) => patterns.iter().all(|(key, pattern)| {
                    entries.get(key).is_some_and(|item| pattern.matches(item))
                }),
                _ => false,
            },
        }
    }
}
