//! Choropleth layer settings.

use std::collections::HashMap;
use serde::Deserialize;
use crate::{Color, RGBColor, Scheme};
use crate::encoding::ColorScheme;
use crate::error::{Error, Result};
use crate::limits::MAX_CLASS_COUNT;
use crate::scale::CategoricalPalette;

/// Vector tiles of one administrative level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LevelSource {
    pub vector_tile_url: String,
    pub source_layer: String,
    /// Feature property holding the location key.
    pub vector_property: String,
}

impl LevelSource {
    fn is_complete(&self) -> bool {
        !self.vector_tile_url.is_empty() && !self.source_layer.is_empty()
            && !self.vector_property.is_empty()
    }
}

/// Settings of a choropleth layer, typically deserialized from the host.
///
/// Percentages (`opacity`, `outline_opacity`) are in \[0, 100\].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoroplethSettings {
    pub show: bool,
    /// Available tile sources, one per level.
    pub levels: Vec<LevelSource>,
    /// 1-based index into `levels`.
    pub current_level: usize,
    pub min_color: String,
    pub med_color: String,
    pub max_color: String,
    pub highlight_color: String,
    pub opacity: f64,
    pub outline_color: String,
    pub outline_width: f64,
    pub outline_opacity: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Upper bound on the number of class breaks of gradients.
    pub class_count: usize,
    /// Qualitative scheme of categorical encodings.
    pub palette: Scheme,
    /// Fixed colors for given category keys.
    pub palette_overrides: HashMap<String, String>,
    /// Extrusion height when `height_column` is unset or a cell is not
    /// a number.
    pub extrusion_height: f64,
    pub height_column: Option<String>,
    /// Fit the map to the source bounds once the tiles are loaded.
    pub autozoom: bool,
}

impl Default for ChoroplethSettings {
    fn default() -> Self {
        ChoroplethSettings {
            show: true,
            levels: vec![],
            current_level: 1,
            min_color: "#edf8b1".to_string(),
            med_color: "#7fcdbb".to_string(),
            max_color: "#2c7fb8".to_string(),
            highlight_color: "#2c7fb8".to_string(),
            opacity: 80.,
            outline_color: "#bdbdbd".to_string(),
            outline_width: 1.,
            outline_opacity: 50.,
            min_zoom: 0.,
            max_zoom: 22.,
            class_count: MAX_CLASS_COUNT,
            palette: Scheme::default(),
            palette_overrides: HashMap::new(),
            extrusion_height: 0.,
            height_column: None,
            autozoom: true,
        }
    }
}

impl ChoroplethSettings {
    /// Load settings from a JSON string and validate them.  Missing
    /// fields take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check ranges and colors.
    pub fn validate(&self) -> Result<()> {
        let invalid = |m: String| Err(Error::InvalidSettings(m));
        if self.current_level == 0 {
            return invalid("currentLevel is 1-based".to_string());
        }
        for (name, p) in [("opacity", self.opacity),
                          ("outlineOpacity", self.outline_opacity)] {
            if !(0. ..= 100.).contains(&p) {
                return invalid(format!("{name} {p} not in [0, 100]"));
            }
        }
        if !(self.outline_width >= 0.) {
            return invalid(format!("outlineWidth {}", self.outline_width));
        }
        if !(self.min_zoom <= self.max_zoom) {
            return invalid(format!("zoom range [{}, {}]",
                                   self.min_zoom, self.max_zoom));
        }
        for c in [&self.highlight_color, &self.outline_color] {
            Color::from_css(c)?;
        }
        self.color_scheme()?;
        Ok(())
    }

    /// The tile source of the current level, if configured.
    pub fn level(&self) -> Option<&LevelSource> {
        self.levels.get(self.current_level.checked_sub(1)?)
    }

    /// Feature property of the current level (empty when unset).
    pub fn vector_property(&self) -> &str {
        self.level().map_or("", |l| l.vector_property.as_str())
    }

    /// Whether the layer should be drawn: shown and with a complete tile
    /// source for the current level.
    pub fn display(&self) -> bool {
        self.show && self.level().is_some_and(LevelSource::is_complete)
    }

    /// True when switching from `previous` requires rebuilding the map
    /// layers (a different tile source).
    pub fn has_changed(&self, previous: Option<&Self>) -> bool {
        previous.map_or(true, |p| p.level() != self.level())
    }

    /// Fill opacity in \[0, 1\], halved while a selection is active.
    pub fn fill_opacity(&self, has_selection: bool) -> f64 {
        let o = self.opacity / 100.;
        if has_selection { 0.5 * o } else { o }
    }

    /// The parsed colors of the color functions.
    pub fn color_scheme(&self) -> Result<ColorScheme> {
        let anchors = [Color::from_css(&self.min_color)?,
                       Color::from_css(&self.med_color)?,
                       Color::from_css(&self.max_color)?];
        let mut palette = CategoricalPalette::new(self.palette);
        for (key, c) in &self.palette_overrides {
            palette = palette.with_override(key.as_str(), Color::from_css(c)?);
        }
        Ok(ColorScheme { anchors, palette })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r##"{
        "levels": [{"vectorTileUrl": "mapbox://a.b", "sourceLayer": "states",
                    "vectorProperty": "iso"}],
        "minColor": "#000000",
        "palette": "set3",
        "paletteOverrides": {"north": "rgb(1,2,3)"},
        "opacity": 60
    }"##;

    #[test]
    fn load_with_defaults() {
        let s = ChoroplethSettings::from_json(JSON).unwrap();
        assert!(s.display());
        assert_eq!(s.vector_property(), "iso");
        assert_eq!(s.palette, Scheme::Set3);
        assert_eq!(s.max_color, "#2c7fb8");
        assert_eq!(s.class_count, MAX_CLASS_COUNT);
        assert_eq!(s.fill_opacity(false), 0.6);
        assert_eq!(s.fill_opacity(true), 0.3);
        let scheme = s.color_scheme().unwrap();
        assert_eq!(scheme.anchors[0], Color::new(0, 0, 0, 255));
        assert_eq!(scheme.palette.color("north", 0), Color::new(1, 2, 3, 255));
    }

    #[test]
    fn incomplete_source_is_not_displayed() {
        let s = ChoroplethSettings::default();
        assert!(!s.display());
        assert_eq!(s.vector_property(), "");
        let s = ChoroplethSettings { current_level: 2,
                                     ..ChoroplethSettings::from_json(JSON).unwrap() };
        assert!(!s.display());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(ChoroplethSettings::from_json(r#"{"opacity": 140}"#),
                         Err(Error::InvalidSettings(_))));
        assert!(matches!(ChoroplethSettings::from_json(r#"{"minColor": "nope"}"#),
                         Err(Error::InvalidColor(_))));
        assert!(matches!(ChoroplethSettings::from_json(r#"{"minZoom": 9, "maxZoom": 3}"#),
                         Err(Error::InvalidSettings(_))));
        assert!(matches!(ChoroplethSettings::from_json("{"),
                         Err(Error::Json(_))));
    }

    #[test]
    fn accepts_any_css_color() {
        for c in ["red", "steelblue", "hsl(0, 100%, 50%)", "rgb(10 20 30)",
                  "#2c7fb8"] {
            let json = format!(r#"{{"highlightColor": "{c}", "minColor": "{c}"}}"#);
            let s = ChoroplethSettings::from_json(&json).unwrap();
            assert_eq!(s.highlight_color, c);
        }
        let s = ChoroplethSettings::from_json(r#"{"minColor": "steelblue"}"#)
            .unwrap();
        assert_eq!(s.color_scheme().unwrap().anchors[0],
                   Color::new(70, 130, 180, 255));
    }

    #[test]
    fn change_detection() {
        let a = ChoroplethSettings::from_json(JSON).unwrap();
        assert!(a.has_changed(None));
        let b = ChoroplethSettings { opacity: 10., ..a.clone() };
        assert!(!b.has_changed(Some(&a)));
        let mut c = a.clone();
        c.levels[0].vector_property = "name".to_string();
        assert!(c.has_changed(Some(&a)));
    }
}
