//! Query-string construction
//!
//! Encoding follows `application/x-www-form-urlencoded`: only ASCII
//! alphanumerics and `*-._` pass through, space becomes `+`, everything
//! else is percent-encoded. `1:2,3:4` therefore encodes as
//! `1%3A2%2C3%3A4`.

use std::fmt;

use serde_json::{Number, Value};
use url::form_urlencoded;

/// A scalar query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Number(Number),
    Bool(bool),
}

impl QueryValue {
    /// Convert a JSON scalar. Arrays, objects and `null` have no scalar form.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => fmt_number(n, f),
        }
    }
}

/// Integral floats print without a fraction (`2.0` renders as `2`).
fn fmt_number(n: &Number, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match n.as_f64() {
        Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => {
            write!(f, "{}", v as i64)
        }
        _ => write!(f, "{n}"),
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// Build `?k=v&...` from parameter pairs.
///
/// `None` values are dropped. A repeated key overwrites the earlier value
/// but keeps its original position. Returns an empty string when no
/// parameter survives.
pub fn build_query_string<K, I>(params: I) -> String
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Option<QueryValue>)>,
{
    let mut defined: Vec<(String, String)> = Vec::new();
    for (key, value) in params {
        let Some(value) = value else {
            continue;
        };
        let key = key.into();
        let value = value.to_string();
        match defined.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => defined.push((key, value)),
        }
    }

    if defined.is_empty() {
        return String::new();
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(defined.iter())
        .finish();
    format!("?{encoded}")
}
