//! Cell values and rows of the joined data table.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// A single cell of the data table.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// The numeric content, if any.  Text is not parsed.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self { Value::Number(x) => Some(*x), _ => None }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self { Value::Text(s) => Some(s), _ => None }
    }

    /// The stringified form of the value, used to join rows to map
    /// features and to key categorical colors.  Returns `None` for
    /// [`Value::Null`].
    ///
    /// Numbers print like JavaScript's `Number.prototype.toString`:
    /// integral numbers without a fractional part (so `10.0` and `"10"`
    /// produce the same key) and exponent notation below `1e-6` or from
    /// `1e21` on.
    pub fn key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            v => Some(v.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(x) => {
                if x.is_nan() { f.write_str("NaN") }
                else if x.is_infinite() {
                    f.write_str(if *x > 0. { "Infinity" } else { "-Infinity" })
                }
                else if *x == 0. { f.write_str("0") } // also -0
                else if x.abs() >= 1e21 || x.abs() < 1e-6 {
                    // Exponent form with an explicit sign: 1e+21, 1.5e-7.
                    let e = format!("{x:e}");
                    match e.split_once('e') {
                        Some((m, exp)) if !exp.starts_with('-') => {
                            write!(f, "{m}e+{exp}")
                        }
                        _ => f.write_str(&e),
                    }
                }
                else { write!(f, "{x}") }
            }
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match v {
            J::Null => Value::Null,
            J::Bool(b) => Value::Bool(b),
            J::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            J::String(s) => Value::Text(s),
            other => Value::Text(other.to_string()),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(x) => serde_json::Number::from_f64(x)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Text(s) => serde_json::Value::String(s),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self { Value::Number(x) }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self { Value::Number(x as f64) }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self { Value::Number(x as f64) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::Text(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::Text(s) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map_or(Value::Null, Into::into) }
}


/// One record of the joined table: an ordered mapping from column name
/// to [`Value`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(from = "serde_json::Map<String, serde_json::Value>",
        into = "serde_json::Map<String, serde_json::Value>")]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self { Self::default() }

    /// Add (or replace) a column, builder style.
    pub fn with(mut self, column: impl Into<String>,
                value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set `column` to `value`, keeping the position of an existing
    /// column.
    pub fn insert(&mut self, column: impl Into<String>,
                  value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(c, _)| *c == column) {
            Some((_, v)) => *v = value,
            None => self.columns.push((column, value)),
        }
    }

    /// Raw lookup.  A missing column and a null cell are both reported
    /// as `None`; the stop builder relies on this to drop rows silently.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
            .filter(|v| !v.is_null())
    }

    /// The numeric value of `column`.
    pub fn get_numeric(&self, column: &str) -> Result<f64> {
        match self.cell(column)? {
            Value::Number(x) => Ok(*x),
            _ => Err(Error::TypeMismatch { column: column.to_string(),
                                           expected: "numeric" }),
        }
    }

    /// The text value of `column`.
    pub fn get_string(&self, column: &str) -> Result<&str> {
        match self.cell(column)? {
            Value::Text(s) => Ok(s),
            _ => Err(Error::TypeMismatch { column: column.to_string(),
                                           expected: "text" }),
        }
    }

    fn cell(&self, column: &str) -> Result<&Value> {
        self.columns.iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
            .ok_or_else(|| Error::MissingColumn(column.to_string()))
    }

    /// Iterate over `(column, value)` pairs in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize { self.columns.len() }

    pub fn is_empty(&self) -> bool { self.columns.is_empty() }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter { row.insert(k, v) }
        row
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Row {
    fn from(m: serde_json::Map<String, serde_json::Value>) -> Self {
        m.into_iter().collect()
    }
}

impl From<Row> for serde_json::Map<String, serde_json::Value> {
    fn from(r: Row) -> Self {
        r.columns.into_iter().map(|(c, v)| (c, v.into())).collect()
    }
}
