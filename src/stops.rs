//! Stop tables and the stop builder.

use std::collections::HashSet;
use std::ops::ControlFlow;
use serde_json::{json, Value as Json};
use crate::{Color, RGBColor};
use crate::filter::Filter;
use crate::scale::ColorFunction;
use crate::value::Row;

/// Ordered `(location key, value)` pairs with unique keys.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTable<T> {
    stops: Vec<(String, T)>,
}

impl<T> StopTable<T> {
    fn new() -> Self { StopTable { stops: Vec::new() } }

    fn push(&mut self, key: String, value: T) { self.stops.push((key, value)) }

    pub fn len(&self) -> usize { self.stops.len() }

    pub fn is_empty(&self) -> bool { self.stops.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.stops.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.stops.iter().map(|(k, _)| k.as_str())
    }

    /// The value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.stops.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl<'a, T> IntoIterator for &'a StopTable<T> {
    type Item = &'a (String, T);
    type IntoIter = std::slice::Iter<'a, (String, T)>;
    fn into_iter(self) -> Self::IntoIter { self.stops.iter() }
}

/// The per-feature encoding of a choropleth layer.
///
/// When `valid` is false a location key repeats in the data and none of
/// the tables may be handed to the renderer; only a flat fallback color
/// is usable.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingResult {
    /// Feature property the stop keys refer to.
    pub property: String,
    pub color_stops: StopTable<Color>,
    pub height_stops: StopTable<f64>,
    pub outline_color_stops: StopTable<Color>,
    /// Inclusion filter over the keys of the tables.
    pub filter: Filter,
    pub valid: bool,
}

impl EncodingResult {
    fn empty(property: &str) -> Self {
        EncodingResult {
            property: property.to_string(),
            color_stops: StopTable::new(),
            height_stops: StopTable::new(),
            outline_color_stops: StopTable::new(),
            filter: Filter::In { property: property.to_string(),
                                 values: vec![] },
            valid: true,
        }
    }

    /// The fill color as a categorical property function,
    /// `{type, property, default, stops}`.
    pub fn color_function(&self, default: &str) -> Json {
        categorical(&self.property, json!(default),
                    css_stops(&self.color_stops))
    }

    /// The outline color as a categorical property function.
    pub fn outline_color_function(&self, default: &str) -> Json {
        categorical(&self.property, json!(default),
                    css_stops(&self.outline_color_stops))
    }

    /// The extrusion height as a categorical property function.
    pub fn height_function(&self, default: f64) -> Json {
        let stops = self.height_stops.iter()
            .map(|(k, h)| json!([k, h])).collect();
        categorical(&self.property, json!(default), stops)
    }
}

fn css_stops(t: &StopTable<Color>) -> Vec<Json> {
    t.iter().map(|(k, c)| json!([k, c.to_css()])).collect()
}

fn categorical(property: &str, default: Json, stops: Vec<Json>) -> Json {
    json!({
        "type": "categorical",
        "property": property,
        "default": default,
        "stops": stops,
    })
}


/// Per-row extrusion height.
pub trait HeightSource {
    fn height(&self, row: &Row) -> f64;
}

/// The same height for every feature.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstantHeight(pub f64);

impl HeightSource for ConstantHeight {
    fn height(&self, _: &Row) -> f64 { self.0 }
}

/// Height read from a numeric column, `fallback` when the cell is
/// missing or not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHeight {
    pub column: String,
    pub fallback: f64,
}

impl HeightSource for ColumnHeight {
    fn height(&self, row: &Row) -> f64 {
        row.get_numeric(&self.column).unwrap_or(self.fallback)
    }
}

impl<F: Fn(&Row) -> f64> HeightSource for F {
    fn height(&self, row: &Row) -> f64 { self(row) }
}


/// Builds an [`EncodingResult`] from rows.
///
/// # Example
///
/// ```
/// use choropleth_stops::{ColorFunction, Row, StopBuilder};
/// use rgb::RGBA8;
/// let rows = vec![Row::new().with("loc", "A").with("c", 1.),
///                 Row::new().with("loc", "A").with("c", 2.)];
/// let red = RGBA8::new(255, 0, 0, 255);
/// let f = ColorFunction::gradient(&[red], vec![0., 10.]);
/// let enc = StopBuilder::new("loc", "c").build(&rows, &f);
/// assert!(!enc.valid);
/// assert_eq!(enc.color_stops.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct StopBuilder<H = ConstantHeight> {
    location_column: String,
    color_column: String,
    property: Option<String>,
    heights: H,
}

/// Tables under construction.
struct Acc {
    seen: HashSet<String>,
    result: EncodingResult,
}

impl StopBuilder {
    /// Read locations from `location_column` and color values from
    /// `color_column`.  Heights default to `0`.
    pub fn new(location_column: impl Into<String>,
               color_column: impl Into<String>) -> Self {
        StopBuilder { location_column: location_column.into(),
                      color_column: color_column.into(),
                      property: None,
                      heights: ConstantHeight::default() }
    }
}

impl<H: HeightSource> StopBuilder<H> {
    /// Name of the feature property the keys join on (used by the
    /// filter and the property functions).  Defaults to the location
    /// column.
    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Where extrusion heights come from.
    pub fn heights<H2: HeightSource>(self, heights: H2) -> StopBuilder<H2> {
        StopBuilder { location_column: self.location_column,
                      color_column: self.color_column,
                      property: self.property,
                      heights }
    }

    /// Build the stop tables from `rows`, in order.
    ///
    /// Rows with a null (or empty) location or a value `color_fn` does
    /// not color are skipped.  The first repeated location key stops
    /// the build: the result is marked invalid and holds only the rows
    /// before the duplicate.
    pub fn build(&self, rows: &[Row], color_fn: &ColorFunction)
                 -> EncodingResult {
        let property = self.property.as_deref()
            .unwrap_or(&self.location_column);
        let acc = Acc { seen: HashSet::new(),
                        result: EncodingResult::empty(property) };
        match rows.iter().try_fold(acc, |acc, row| self.step(acc, row, color_fn)) {
            ControlFlow::Continue(acc) => acc.result,
            ControlFlow::Break(mut acc) => {
                acc.result.valid = false;
                acc.result
            }
        }
    }

    fn step(&self, mut acc: Acc, row: &Row, color_fn: &ColorFunction)
            -> ControlFlow<Acc, Acc> {
        let Some(key) = row.get(&self.location_column)
            .and_then(|l| l.key())
            .filter(|k| !k.is_empty())
        else { return ControlFlow::Continue(acc) };
        let Some(color) = row.get(&self.color_column)
            .and_then(|v| color_fn.color(v))
        else { return ControlFlow::Continue(acc) };
        if !acc.seen.insert(key.clone()) {
            return ControlFlow::Break(acc);
        }
        let r = &mut acc.result;
        r.color_stops.push(key.clone(), color);
        r.outline_color_stops.push(key.clone(), color);
        r.height_stops.push(key.clone(), self.heights.height(row));
        if let Filter::In { values, .. } = &mut r.filter {
            values.push(key);
        }
        ControlFlow::Continue(acc)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };

    fn f() -> ColorFunction {
        ColorFunction::gradient(&[RED, BLUE], vec![0., 100.])
    }

    fn row(loc: impl Into<Value>, c: impl Into<Value>) -> Row {
        Row::new().with("loc", loc).with("c", c)
    }

    #[test]
    fn keeps_order_and_fills_all_tables() {
        let rows = vec![row("C", 0.), row("A", 100.), row("B", 50.)];
        let enc = StopBuilder::new("loc", "c").build(&rows, &f());
        assert!(enc.valid);
        assert_eq!(enc.color_stops.keys().collect::<Vec<_>>(), ["C", "A", "B"]);
        assert_eq!(enc.outline_color_stops, enc.color_stops);
        assert_eq!(enc.height_stops.len(), 3);
        assert_eq!(enc.color_stops.get("C"), Some(&RED));
        assert_eq!(enc.color_stops.get("A"), Some(&BLUE));
        assert_eq!(enc.filter, Filter::In {
            property: "loc".into(),
            values: vec!["C".into(), "A".into(), "B".into()] });
    }

    #[test]
    fn duplicate_stops_the_build() {
        let rows = vec![row("A", 1.), row("B", 2.), row("A", 3.),
                        row("D", 4.)];
        let enc = StopBuilder::new("loc", "c").build(&rows, &f());
        assert!(!enc.valid);
        assert_eq!(enc.color_stops.keys().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(enc.height_stops.len(), 2);
        assert!(enc.color_stops.get("D").is_none());
    }

    #[test]
    fn excluded_rows_do_not_count_as_duplicates() {
        let rows = vec![row("A", 1.), row("A", Value::Null), row("A", "x"),
                        row(Value::Null, 2.), row(Value::Null, 3.),
                        row("", 4.), row("", 5.)];
        let enc = StopBuilder::new("loc", "c").build(&rows, &f());
        assert!(enc.valid);
        assert_eq!(enc.color_stops.keys().collect::<Vec<_>>(), ["A"]);
    }

    #[test]
    fn numeric_locations_are_stringified() {
        let rows = vec![row(1, 1.), row(1.5, 2.), row(1., 3.)];
        let enc = StopBuilder::new("loc", "c").build(&rows, &f());
        assert!(!enc.valid);
        assert_eq!(enc.color_stops.keys().collect::<Vec<_>>(), ["1", "1.5"]);
    }

    #[test]
    fn empty_rows() {
        let enc = StopBuilder::new("loc", "c").property("iso").build(&[], &f());
        assert!(enc.valid);
        assert!(enc.color_stops.is_empty());
        assert_eq!(enc.filter.to_json(), json!(["in", "iso"]));
        assert!(!enc.filter.matches(&Row::new().with("iso", "A")));
    }

    #[test]
    fn height_sources() {
        let rows = vec![row("A", 1.).with("h", 7.), row("B", 2.)];
        let enc = StopBuilder::new("loc", "c")
            .heights(ColumnHeight { column: "h".into(), fallback: -1. })
            .build(&rows, &f());
        assert_eq!(enc.height_stops.get("A"), Some(&7.));
        assert_eq!(enc.height_stops.get("B"), Some(&-1.));
        let enc = StopBuilder::new("loc", "c")
            .heights(|r: &Row| r.get_numeric("c").unwrap_or(0.) * 10.)
            .build(&rows, &f());
        assert_eq!(enc.height_stops.get("B"), Some(&20.));
        let enc = StopBuilder::new("loc", "c")
            .heights(ConstantHeight(3.)).build(&rows, &f());
        assert!(enc.height_stops.iter().all(|(_, &h)| h == 3.));
    }

    #[test]
    fn property_functions() {
        let rows = vec![row("A", 0.)];
        let enc = StopBuilder::new("loc", "c").property("iso")
            .build(&rows, &f());
        assert_eq!(enc.color_function("rgba(0,0,0,0)"), json!({
            "type": "categorical", "property": "iso",
            "default": "rgba(0,0,0,0)", "stops": [["A", "#ff0000"]] }));
        assert_eq!(enc.height_function(100.)["stops"], json!([["A", 0.0]]));
        assert_eq!(enc.outline_color_function("black")["default"], "black");
    }
}
