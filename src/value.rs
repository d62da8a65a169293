//! Dynamically-typed records.
//!
//! List models bound to UI views usually carry loosely-typed rows: a map from role name to a
//! value that may be a number, a string, a flag or nothing at all. [`Row`] and [`Value`] model
//! that shape so such data can be sorted by field name.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A record made of named, dynamically-typed fields.
pub type Row = BTreeMap<String, Value>;

/// A dynamically-typed field value.
///
/// Ordering is only defined between values of the same kind. Comparing a number with a string,
/// or anything with `NaN`, yields `None`, which the planner reports as an incomparable pair
/// instead of guessing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Builds a [`Row`] from `(field, value)` pairs.
///
/// ```
/// use modelsort::value::{row, Value};
///
/// let r = row([("name", Value::from("Ada")), ("age", Value::from(36))]);
/// assert_eq!(r["age"], Value::Number(36.0));
/// ```
pub fn row<K, I>(fields: I) -> Row
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    fields.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
