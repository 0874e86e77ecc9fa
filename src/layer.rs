//! The choropleth map layer: translates encodings into render calls.

use serde_json::{json, Value as Json};
use crate::css::TRANSPARENT;
use crate::encoding::{build_color_function, Role, RoleMap};
use crate::error::Result;
use crate::filter::{dedup_selection, highlight_filter, hover_filter, Filter,
                    MAX_SELECTION_COUNT};
use crate::limits::class_count_with;
use crate::scale::ColorMode;
use crate::settings::ChoroplethSettings;
use crate::source::{ChoroplethSource, DataProvider};
use crate::stops::{ColumnHeight, ConstantHeight, EncodingResult, StopBuilder};

/// `[west, south, east, north]`
pub type Bounds = [f64; 4];

/// Called once when a source has finished loading.
pub type SourceLoaded = Box<dyn FnOnce(&mut dyn MapSurface)>;

/// The operations of the rendering engine the layer relies on.
pub trait MapSurface {
    fn add_source(&mut self, id: &str, spec: Json);
    fn has_source(&self, id: &str) -> bool;
    fn remove_source(&mut self, id: &str);
    fn is_source_loaded(&self, id: &str) -> bool;
    fn source_bounds(&self, id: &str) -> Option<Bounds>;
    /// Register `callback` to run the first time the source `id`
    /// signals that its data is loaded; it is dropped afterwards.
    fn once_source_loaded(&mut self, id: &str, callback: SourceLoaded);

    /// Add `layer` below the layer `before` (on top when `None`).
    fn add_layer(&mut self, layer: Json, before: Option<&str>);
    fn has_layer(&self, id: &str) -> bool;
    fn remove_layer(&mut self, id: &str);
    fn set_paint_property(&mut self, layer: &str, name: &str, value: Json);
    fn set_layout_property(&mut self, layer: &str, name: &str, value: Json);
    fn set_filter(&mut self, layer: &str, filter: &Filter);
    fn set_layer_zoom_range(&mut self, layer: &str, min_zoom: f64,
                            max_zoom: f64);
    fn fit_bounds(&mut self, bounds: Bounds, padding: f64, max_zoom: f64);
}

/// Selection bookkeeping shared by the layers of a map.
pub trait SelectionAware {
    fn add_selection(&mut self, keys: Vec<String>, role: &Role);
    fn has_selection(&self) -> bool;
    fn clear_selection(&mut self);
}

/// Selected location keys of a single role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub role: Option<String>,
    pub keys: Vec<String>,
}

impl SelectionAware for Selection {
    fn add_selection(&mut self, keys: Vec<String>, role: &Role) {
        self.role = Some(role.display_name.clone());
        self.keys = keys;
    }

    fn has_selection(&self) -> bool { !self.keys.is_empty() }

    fn clear_selection(&mut self) {
        self.role = None;
        self.keys.clear();
    }
}

/// Fill color used when the encoding is invalid.
pub const FALLBACK_COLOR: &str = "rgb(0, 0, 0)";
/// Height of features without a stop.
pub const DEFAULT_HEIGHT: f64 = 100.;

/// A fill-extrusion layer with its outline and highlight layers.
#[derive(Debug, Clone, Default)]
pub struct ChoroplethLayer {
    settings: Option<ChoroplethSettings>,
    /// Last displayed settings: the tile source the layers were built on.
    displayed: Option<ChoroplethSettings>,
}

impl ChoroplethLayer {
    pub const ID: &'static str = "choropleth";
    pub const OUTLINE_ID: &'static str = "choropleth-outline";
    pub const HIGHLIGHT_ID: &'static str = "choropleth-highlight";
    pub const HIGHLIGHT_OUTLINE_ID: &'static str =
        "choropleth-highlight-outline";

    pub fn new() -> Self { Self::default() }

    /// Layers carrying the data encoding.
    pub fn layer_ids() -> [&'static str; 2] { [Self::ID, Self::OUTLINE_ID] }

    /// Settings the layers were last built with.
    pub fn settings(&self) -> Option<&ChoroplethSettings> {
        self.settings.as_ref()
    }

    /// Record new settings.  When the layer stays displayed but its tile
    /// source changed, the existing layers are removed from `map` so that
    /// they can be added again; returns whether that happened.
    pub fn update_settings(&mut self, map: &mut dyn MapSurface,
                           settings: &ChoroplethSettings) -> bool {
        let rebuilt = settings.display() && self.displayed.is_some()
            && settings.has_changed(self.displayed.as_ref());
        if rebuilt {
            tracing::debug!("choropleth tile source changed, removing layers");
            self.remove_layers(map);
        }
        if settings.display() {
            self.displayed = Some(settings.clone());
        }
        self.settings = Some(settings.clone());
        rebuilt
    }

    /// Add the four layers below `before`.  The highlight layers start
    /// with a filter matching nothing.
    pub fn add_layers(&self, map: &mut dyn MapSurface,
                      source: &ChoroplethSource, before: Option<&str>) {
        let Some(settings) = self.settings() else { return };
        source.ensure(map, settings);
        let source_layer = settings.level()
            .map_or("", |l| l.source_layer.as_str());
        let zero = Filter::none(settings.vector_property()).to_json();
        let base = |id: &str, typ: &str| json!({
            "id": id,
            "type": typ,
            "source": ChoroplethSource::ID,
            "source-layer": source_layer,
        });
        let mut fill = base(Self::ID, "fill-extrusion");
        fill["paint"] = json!({});
        let mut outline = base(Self::OUTLINE_ID, "line");
        outline["layout"] = json!({ "line-join": "round" });
        outline["paint"] = json!({ "line-width": 0 });
        let mut highlight = base(Self::HIGHLIGHT_ID, "fill");
        highlight["paint"] = json!({ "fill-color": settings.highlight_color,
                                     "fill-opacity": 0.9 });
        highlight["filter"] = zero.clone();
        let mut highlight_outline = base(Self::HIGHLIGHT_OUTLINE_ID, "line");
        highlight_outline["layout"] = json!({ "line-join": "round" });
        highlight_outline["paint"] = json!({ "line-width": 1,
                                             "line-color": "black" });
        highlight_outline["filter"] = zero;

        map.add_layer(highlight_outline, before);
        map.add_layer(highlight, Some(Self::HIGHLIGHT_OUTLINE_ID));
        map.add_layer(outline, Some(Self::HIGHLIGHT_ID));
        map.add_layer(fill, Some(Self::OUTLINE_ID));
    }

    /// Remove the four layers and the tile source.
    pub fn remove_layers(&self, map: &mut dyn MapSurface) {
        for id in [Self::ID, Self::OUTLINE_ID, Self::HIGHLIGHT_ID,
                   Self::HIGHLIGHT_OUTLINE_ID] {
            if map.has_layer(id) { map.remove_layer(id) }
        }
        if map.has_source(ChoroplethSource::ID) {
            map.remove_source(ChoroplethSource::ID);
        }
    }

    /// Encode the rows of `source` and apply the result to `map`.
    ///
    /// Returns the encoding when the layer is displayed.  An invalid
    /// encoding is not applied; the fill falls back to a flat color.
    pub fn apply_settings(&self, map: &mut dyn MapSurface,
                          settings: &ChoroplethSettings, roles: &RoleMap,
                          source: &dyn DataProvider,
                          selection: &dyn SelectionAware)
                          -> Result<Option<EncodingResult>> {
        let display = settings.display();
        if map.has_layer(Self::ID) {
            let v = if display { "visible" } else { "none" };
            map.set_layout_property(Self::ID, "visibility", json!(v));
        }
        if !display {
            return Ok(None);
        }
        let scheme = settings.color_scheme()?;
        let limits = source.limits();
        let mode = ColorMode::for_role(roles.color.as_ref());
        let class_count = class_count_with(limits, settings.class_count);
        let color_fn = build_color_function(mode, limits, &scheme,
                                            class_count);
        let builder = StopBuilder::new(roles.location.display_name.as_str(),
                                       roles.color_column())
            .property(settings.vector_property());
        let encoding = match &settings.height_column {
            Some(column) => builder
                .heights(ColumnHeight { column: column.clone(),
                                        fallback: settings.extrusion_height })
                .build(source.data(), &color_fn),
            None => builder
                .heights(ConstantHeight(settings.extrusion_height))
                .build(source.data(), &color_fn),
        };
        tracing::debug!(?mode, class_count, stops = encoding.color_stops.len(),
                        valid = encoding.valid, "choropleth encoding built");

        let opacity = settings.fill_opacity(selection.has_selection());
        map.set_paint_property(Self::ID, "fill-extrusion-opacity",
                               json!(opacity));
        map.set_paint_property(Self::ID, "fill-extrusion-base", json!(0));
        if encoding.valid {
            map.set_paint_property(Self::ID, "fill-extrusion-color",
                                   encoding.color_function(TRANSPARENT));
            map.set_paint_property(Self::ID, "fill-extrusion-height",
                                   encoding.height_function(DEFAULT_HEIGHT));
            map.set_filter(Self::ID, &encoding.filter);
            map.set_filter(Self::OUTLINE_ID, &encoding.filter);
        } else {
            tracing::warn!(rows = source.data().len(),
                           location = %roles.location.display_name,
                           "duplicate location keys, using a flat fill color");
            map.set_paint_property(Self::ID, "fill-extrusion-color",
                                   json!(FALLBACK_COLOR));
        }
        map.set_paint_property(Self::HIGHLIGHT_ID, "fill-color",
                               json!(settings.highlight_color));
        map.set_paint_property(Self::OUTLINE_ID, "line-color",
                               json!(settings.outline_color));
        map.set_paint_property(Self::OUTLINE_ID, "line-width",
                               json!(settings.outline_width));
        map.set_paint_property(Self::OUTLINE_ID, "line-opacity",
                               json!(settings.outline_opacity / 100.));
        map.set_layer_zoom_range(Self::ID, settings.min_zoom,
                                 settings.max_zoom);
        Ok(Some(encoding))
    }

    /// Highlight the single feature `key` (mouse hover).
    pub fn hover_highlight(&self, map: &mut dyn MapSurface, key: &str) {
        let Some(settings) = self.displayed(map) else { return };
        let f = hover_filter(settings.vector_property(), key);
        map.set_filter(Self::HIGHLIGHT_ID, &f);
        map.set_filter(Self::HIGHLIGHT_OUTLINE_ID, &f);
    }

    /// Clear the highlight and restore the fill opacity.
    pub fn remove_highlight(&self, map: &mut dyn MapSurface) {
        let Some(settings) = self.displayed(map) else { return };
        let zero = Filter::none(settings.vector_property());
        map.set_paint_property(Self::ID, "fill-extrusion-opacity",
                               json!(settings.fill_opacity(false)));
        map.set_filter(Self::HIGHLIGHT_ID, &zero);
        map.set_filter(Self::HIGHLIGHT_OUTLINE_ID, &zero);
    }

    /// Select the features `keys` (possibly repeated, as returned by a
    /// rendered-feature query): register them with `selection`, dim the
    /// fill and highlight them.  Returns the keys kept.
    pub fn update_selection<I>(&self, map: &mut dyn MapSurface, keys: I,
                               roles: &RoleMap,
                               selection: &mut dyn SelectionAware)
                               -> Vec<String>
    where I: IntoIterator, I::Item: Into<String> {
        let Some(settings) = self.settings() else { return vec![] };
        let keys = dedup_selection(keys, MAX_SELECTION_COUNT);
        let filter = highlight_filter(settings.vector_property(),
                                      keys.as_slice());
        selection.add_selection(keys.clone(), &roles.location);
        let opacity = settings.fill_opacity(selection.has_selection());
        map.set_paint_property(Self::ID, "fill-extrusion-opacity",
                               json!(opacity));
        map.set_filter(Self::HIGHLIGHT_ID, &filter);
        map.set_filter(Self::HIGHLIGHT_OUTLINE_ID, &filter);
        keys
    }

    /// Bounds of the tile source if it is loaded.  Otherwise wait for
    /// it to load and then, when `autozoom` is set, fit the map to it.
    pub fn bounds(&self, map: &mut dyn MapSurface,
                  settings: &ChoroplethSettings) -> Option<Bounds> {
        let id = ChoroplethSource::ID;
        if map.has_source(id) && map.is_source_loaded(id) {
            return map.source_bounds(id);
        }
        let autozoom = settings.autozoom;
        map.once_source_loaded(id, Box::new(move |map: &mut dyn MapSurface| {
            match map.source_bounds(id) {
                Some(b) if autozoom => map.fit_bounds(b, 20., 15.),
                Some(_) => (),
                None => tracing::warn!("choropleth source loaded without bounds"),
            }
        }));
        None
    }

    fn displayed(&self, map: &dyn MapSurface) -> Option<&ChoroplethSettings> {
        if !map.has_layer(Self::ID) { return None }
        self.settings()
    }
}
