//! Summary limits of a value column.

use std::collections::HashSet;
use crate::value::{Row, Value};

/// Upper bound on the number of class breaks used for gradients.
pub const MAX_CLASS_COUNT: usize = 5;

/// Summary of one column: numeric extent and distinct values.
///
/// A snapshot computed from a row set; rebuild it when the rows change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Limits {
    /// Smallest numeric value, `None` if the column holds no number.
    pub min: Option<f64>,
    /// Largest numeric value.
    pub max: Option<f64>,
    /// Distinct non-null values in first-seen order.  Values are
    /// compared by their [key](Value::key), so `10` and `"10"` are the
    /// same value.
    pub values: Vec<Value>,
}

impl Limits {
    /// Limits of a purely numeric domain, without distinct values.
    pub fn numeric(min: f64, max: f64) -> Self {
        Limits { min: Some(min), max: Some(max), values: vec![] }
    }

    /// True when no row carried a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.min.is_none()
    }

    /// The numeric extent, if any.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.min?, self.max?))
    }

    /// The distinct finite numbers among [`Limits::values`].
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64)
            .filter(|x| x.is_finite())
            .collect()
    }
}

/// Compute the [`Limits`] of `column` over `rows`.
///
/// Rows where the column is missing or null are ignored, as are NaN
/// and infinite numbers.  When no row carries a value the result
/// [is empty](Limits::is_empty).
pub fn compute_limits(rows: &[Row], column: &str) -> Limits {
    let mut limits = Limits::default();
    let mut seen = HashSet::new();
    for v in rows.iter().filter_map(|r| r.get(column)) {
        if let Value::Number(x) = v {
            if !x.is_finite() { continue }
            limits.min = Some(limits.min.map_or(*x, |m| m.min(*x)));
            limits.max = Some(limits.max.map_or(*x, |m| m.max(*x)));
        }
        if let Some(key) = v.key() {
            if seen.insert(key) { limits.values.push(v.clone()) }
        }
    }
    limits
}

/// Number of classes to use for `limits`: [`MAX_CLASS_COUNT`] clamped
/// to the number of distinct values.
pub fn class_count(limits: &Limits) -> usize {
    class_count_with(limits, MAX_CLASS_COUNT)
}

/// Like [`class_count`] with a caller-configured upper bound.  Limits
/// without distinct values (see [`Limits::numeric`]) keep `configured`
/// when they have a numeric range.
pub fn class_count_with(limits: &Limits, configured: usize) -> usize {
    if limits.values.is_empty() {
        return if limits.range().is_some() { configured } else { 0 };
    }
    configured.min(limits.values.len())
}
