//! Flattening of structured parameters into URL query pairs.
//!
//! Nested mappings produce dotted keys (`filter.name=x`), sequences repeat
//! their key once per element. This is the convention the tracking server
//! uses for structured GET parameters.

use std::collections::BTreeMap;

/// Parameters of a GET request, keyed by parameter name.
pub type QueryParams = BTreeMap<String, QueryValue>;

/// A value that can be encoded into a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    List(Vec<QueryValue>),
    Map(BTreeMap<String, QueryValue>),
}

impl QueryValue {
    /// Converts untyped JSON into a query value.
    ///
    /// Values with no query representation (`null`, fractional numbers,
    /// integers beyond `i64`) become `None` and are left out of lists and
    /// mappings.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::String(s) => Some(QueryValue::String(s.clone())),
            Value::Bool(b) => Some(QueryValue::Boolean(*b)),
            Value::Number(n) => n.as_i64().map(QueryValue::Integer),
            Value::Array(values) => Some(QueryValue::List(
                values.iter().filter_map(QueryValue::from_json).collect(),
            )),
            Value::Object(map) => Some(QueryValue::Map(
                map.iter()
                    .filter_map(|(k, v)| Some((k.clone(), QueryValue::from_json(v)?)))
                    .collect(),
            )),
            Value::Null => None,
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_owned())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Integer(value.into())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Boolean(value)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<QueryValue>> From<BTreeMap<String, T>> for QueryValue {
    fn from(map: BTreeMap<String, T>) -> Self {
        QueryValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Flattens `params` into query pairs, in key order.
pub fn flatten(params: &QueryParams) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        append(&mut pairs, key, value);
    }
    pairs
}

/// Appends the pairs for a single `key = value` to `pairs`.
pub fn append(pairs: &mut Vec<(String, String)>, key: &str, value: &QueryValue) {
    match value {
        QueryValue::String(s) => pairs.push((key.to_owned(), s.clone())),
        QueryValue::Integer(int) => pairs.push((key.to_owned(), int.to_string())),
        QueryValue::Boolean(b) => pairs.push((key.to_owned(), b.to_string())),
        QueryValue::List(values) => {
            for value in values {
                append(pairs, key, value);
            }
        }
        QueryValue::Map(map) => {
            for (inner, value) in map {
                append(pairs, &format!("{}.{}", key, inner), value);
            }
        }
    }
}
