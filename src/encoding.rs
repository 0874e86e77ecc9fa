//! Roles and the one-shot encoding entry point.

use serde::Deserialize;
use crate::Color;
use crate::classify::natural_breaks;
use crate::limits::{compute_limits, Limits};
use crate::scale::{CategoricalPalette, ColorFunction, ColorMode};
use crate::stops::{EncodingResult, HeightSource, StopBuilder};
use crate::value::Row;

/// A data column bound to a visual role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Column name as it appears in the rows.
    pub display_name: String,
    #[serde(default)]
    pub numeric: bool,
    /// The column is a measure aggregated by the host.
    #[serde(default)]
    pub aggregated: bool,
}

impl Role {
    pub fn new(display_name: impl Into<String>) -> Self {
        Role { display_name: display_name.into(), numeric: false,
               aggregated: false }
    }

    /// A numeric role.
    pub fn numeric(display_name: impl Into<String>) -> Self {
        Role { numeric: true, ..Role::new(display_name) }
    }
}

/// The roles a choropleth layer reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleMap {
    pub location: Role,
    #[serde(default)]
    pub color: Option<Role>,
}

impl RoleMap {
    /// The color column name, empty when no color role is bound (no row
    /// is then colored).
    pub fn color_column(&self) -> &str {
        self.color.as_ref().map_or("", |r| r.display_name.as_str())
    }
}

/// Colors available to the color functions.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    /// Min, mid and max colors of gradients.
    pub anchors: [Color; 3],
    /// Colors of categorical encodings.
    pub palette: CategoricalPalette,
}

/// Select the value → color function for `mode`.
///
/// Gradients interpolate the scheme anchors over the natural breaks of
/// `limits` (`class_count` boundaries); categorical functions assign
/// palette colors to `limits.values` by position.
pub fn build_color_function(mode: ColorMode, limits: &Limits,
                            scheme: &ColorScheme, class_count: usize)
                            -> ColorFunction {
    match mode {
        ColorMode::Gradient => {
            let domain = natural_breaks(limits, class_count);
            ColorFunction::gradient(&scheme.anchors, domain)
        }
        ColorMode::Categorical => {
            ColorFunction::categorical(limits, &scheme.palette)
        }
    }
}

/// Compute the whole encoding of `rows`: limits of the color column,
/// color function, then stop tables keyed by the location column.
///
/// Never fails: duplicates are reported through
/// [`EncodingResult::valid`] and unusable rows are left out.
///
/// # Example
///
/// ```
/// use choropleth_stops::*;
/// let rows = vec![Row::new().with("loc", "A").with("c", 10.),
///                 Row::new().with("loc", "B").with("c", 20.)];
/// let roles = RoleMap { location: Role::new("loc"),
///                       color: Some(Role::numeric("c")) };
/// let scheme = ChoroplethSettings::default().color_scheme().unwrap();
/// let enc = build_encoding(&rows, &roles, ColorMode::Gradient, &scheme, 2,
///                          ConstantHeight(0.));
/// assert!(enc.valid);
/// assert_eq!(enc.color_stops.len(), 2);
/// ```
pub fn build_encoding(rows: &[Row], roles: &RoleMap, mode: ColorMode,
                      scheme: &ColorScheme, class_count: usize,
                      heights: impl HeightSource) -> EncodingResult {
    let color_column = roles.color_column();
    let limits = compute_limits(rows, color_column);
    let color_fn = build_color_function(mode, &limits, scheme, class_count);
    StopBuilder::new(roles.location.display_name.as_str(), color_column)
        .heights(heights)
        .build(rows, &color_fn)
}
