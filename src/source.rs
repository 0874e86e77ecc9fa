//! The choropleth datasource: joined rows and their color limits.

use serde_json::{json, Value as Json};
use crate::encoding::RoleMap;
use crate::layer::MapSurface;
use crate::limits::{compute_limits, Limits};
use crate::settings::ChoroplethSettings;
use crate::value::Row;

/// Read access to the rows of a layer and the limits of its color
/// column.
pub trait DataProvider {
    fn data(&self) -> &[Row];
    fn limits(&self) -> &Limits;
}

/// Rows of the choropleth layer.  Limits are recomputed on each
/// [`update`](ChoroplethSource::update).
#[derive(Debug, Clone, Default)]
pub struct ChoroplethSource {
    rows: Vec<Row>,
    fill_color_limits: Limits,
}

impl ChoroplethSource {
    /// Id of the vector tile source on the map.
    pub const ID: &'static str = "choropleth-source";

    pub fn new() -> Self { Self::default() }

    /// Replace the rows and recompute the limits of the color column.
    pub fn update(&mut self, rows: Vec<Row>, roles: &RoleMap) {
        self.fill_color_limits = compute_limits(&rows, roles.color_column());
        self.rows = rows;
        tracing::debug!(rows = self.rows.len(),
                        distinct = self.fill_color_limits.values.len(),
                        "choropleth source updated");
    }

    /// Specification of the vector tile source for the current level.
    pub fn spec(settings: &ChoroplethSettings) -> Json {
        let url = settings.level().map_or("", |l| l.vector_tile_url.as_str());
        json!({ "type": "vector", "url": url })
    }

    /// Add the tile source to `map` unless it is already there.
    pub fn ensure(&self, map: &mut dyn MapSurface,
                  settings: &ChoroplethSettings) {
        if !map.has_source(Self::ID) {
            tracing::debug!(url = ?settings.level().map(|l| &l.vector_tile_url),
                            "adding choropleth source");
            map.add_source(Self::ID, Self::spec(settings));
        }
    }

    pub fn remove(&self, map: &mut dyn MapSurface) {
        if map.has_source(Self::ID) {
            map.remove_source(Self::ID);
        }
    }
}

impl DataProvider for ChoroplethSource {
    fn data(&self) -> &[Row] { &self.rows }

    fn limits(&self) -> &Limits { &self.fill_color_limits }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Role;
    use crate::value::Value;

    #[test]
    fn update_recomputes_limits() {
        let roles = RoleMap { location: Role::new("loc"),
                              color: Some(Role::numeric("c")) };
        let mut src = ChoroplethSource::new();
        assert!(src.limits().is_empty());
        src.update(vec![Row::new().with("loc", "A").with("c", 4.),
                        Row::new().with("loc", "B").with("c", 9.)], &roles);
        assert_eq!(src.data().len(), 2);
        assert_eq!(src.limits().range(), Some((4., 9.)));
        src.update(vec![Row::new().with("loc", "A").with("c", Value::Null)],
                   &roles);
        assert!(src.limits().is_empty());
    }

    #[test]
    fn spec_uses_current_level() {
        let settings = ChoroplethSettings::from_json(
            r#"{"levels": [{"vectorTileUrl": "u1"}, {"vectorTileUrl": "u2"}],
                "currentLevel": 2}"#).unwrap();
        assert_eq!(ChoroplethSource::spec(&settings),
                   json!({"type": "vector", "url": "u2"}));
    }
}
