//! A map that records what the layer does to it.

#![allow(dead_code)]

use std::collections::HashMap;
use serde_json::Value as Json;
use choropleth_stops::layer::{Bounds, SourceLoaded};
use choropleth_stops::{ChoroplethSettings, Filter, MapSurface, Role,
                       RoleMap, Row};

#[derive(Default)]
pub struct RecordingMap {
    pub sources: HashMap<String, Json>,
    /// Layers from bottom to top.
    pub layers: Vec<Json>,
    pub paint: HashMap<(String, String), Json>,
    pub layout: HashMap<(String, String), Json>,
    pub filters: HashMap<String, Json>,
    pub zoom: HashMap<String, (f64, f64)>,
    pub loaded: bool,
    pub bounds: Option<Bounds>,
    pub pending: Vec<(String, SourceLoaded)>,
    pub fitted: Vec<(Bounds, f64, f64)>,
}

impl RecordingMap {
    pub fn new() -> Self { Self::default() }

    pub fn layer_ids(&self) -> Vec<String> {
        self.layers.iter()
            .map(|l| l["id"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn layer(&self, id: &str) -> Option<&Json> {
        self.layers.iter().find(|l| l["id"] == id)
    }

    pub fn paint(&self, layer: &str, name: &str) -> Option<&Json> {
        self.paint.get(&(layer.to_string(), name.to_string()))
    }

    pub fn layout(&self, layer: &str, name: &str) -> Option<&Json> {
        self.layout.get(&(layer.to_string(), name.to_string()))
    }

    /// Signal that every source finished loading.
    pub fn fire_loaded(&mut self) {
        self.loaded = true;
        let pending = std::mem::take(&mut self.pending);
        let map: &mut dyn MapSurface = self;
        for (_, callback) in pending {
            callback(&mut *map);
        }
    }
}

impl MapSurface for RecordingMap {
    fn add_source(&mut self, id: &str, spec: Json) {
        self.sources.insert(id.to_string(), spec);
    }

    fn has_source(&self, id: &str) -> bool { self.sources.contains_key(id) }

    fn remove_source(&mut self, id: &str) { self.sources.remove(id); }

    fn is_source_loaded(&self, id: &str) -> bool {
        self.loaded && self.has_source(id)
    }

    fn source_bounds(&self, _: &str) -> Option<Bounds> { self.bounds }

    fn once_source_loaded(&mut self, id: &str, callback: SourceLoaded) {
        self.pending.push((id.to_string(), callback));
    }

    fn add_layer(&mut self, layer: Json, before: Option<&str>) {
        let pos = before.and_then(|b| self.layers.iter()
                                      .position(|l| l["id"] == b));
        match pos {
            Some(i) => self.layers.insert(i, layer),
            None => self.layers.push(layer),
        }
    }

    fn has_layer(&self, id: &str) -> bool { self.layer(id).is_some() }

    fn remove_layer(&mut self, id: &str) {
        self.layers.retain(|l| l["id"] != id);
    }

    fn set_paint_property(&mut self, layer: &str, name: &str, value: Json) {
        self.paint.insert((layer.to_string(), name.to_string()), value);
    }

    fn set_layout_property(&mut self, layer: &str, name: &str, value: Json) {
        self.layout.insert((layer.to_string(), name.to_string()), value);
    }

    fn set_filter(&mut self, layer: &str, filter: &Filter) {
        self.filters.insert(layer.to_string(), filter.to_json());
    }

    fn set_layer_zoom_range(&mut self, layer: &str, min_zoom: f64,
                            max_zoom: f64) {
        self.zoom.insert(layer.to_string(), (min_zoom, max_zoom));
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: f64, max_zoom: f64) {
        self.fitted.push((bounds, padding, max_zoom));
    }
}

pub const SETTINGS: &str = r#"{
    "levels": [{"vectorTileUrl": "mapbox://demo.states",
                "sourceLayer": "states", "vectorProperty": "iso"}]
}"#;

pub fn settings() -> ChoroplethSettings {
    ChoroplethSettings::from_json(SETTINGS).unwrap()
}

pub fn roles() -> RoleMap {
    RoleMap { location: Role::new("loc"), color: Some(Role::numeric("c")) }
}

pub fn rows(data: &[(&str, f64)]) -> Vec<Row> {
    data.iter()
        .map(|&(loc, c)| Row::new().with("loc", loc).with("c", c))
        .collect()
}
