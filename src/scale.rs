//! Value → color functions.

use std::collections::HashMap;
use crate::{Color, ColorRange, PaletteGradient, RGBColor, Scheme};
use crate::encoding::Role;
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::value::Value;

/// How a color column is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Continuous interpolation over class breaks.
    Gradient,
    /// One palette color per distinct value.
    Categorical,
}

impl ColorMode {
    /// Gradient for numeric or aggregated roles, categorical otherwise
    /// (including when no color role is bound).
    pub fn for_role(role: Option<&Role>) -> Self {
        match role {
            Some(r) if r.numeric || r.aggregated => ColorMode::Gradient,
            _ => ColorMode::Categorical,
        }
    }
}

/// Colors assigned to categories by position, with per-key overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalPalette {
    colors: Vec<Color>, // Invariant: non-empty
    overrides: HashMap<String, Color>,
}

impl CategoricalPalette {
    /// The colors of a qualitative `scheme`.
    pub fn new(scheme: Scheme) -> Self {
        CategoricalPalette { colors: Color::palette(scheme).colors(),
                             overrides: HashMap::new() }
    }

    /// A palette cycling through `colors`.
    pub fn from_colors(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::InvalidSettings(
                "categorical palette without colors".to_string()));
        }
        Ok(CategoricalPalette { colors, overrides: HashMap::new() })
    }

    /// Always use `color` for the category `key`.
    pub fn with_override(mut self, key: impl Into<String>, color: Color)
                         -> Self {
        self.overrides.insert(key.into(), color);
        self
    }

    /// Color of the category `key` found at position `index` of the
    /// distinct values.
    pub fn color(&self, key: &str, index: usize) -> Color {
        match self.overrides.get(key) {
            Some(&c) => c,
            None => self.colors[index % self.colors.len()],
        }
    }
}

impl Default for CategoricalPalette {
    fn default() -> Self { CategoricalPalette::new(Scheme::default()) }
}

/// Maps a cell value to a color, or to `None` when the row must be left
/// out of the encoding.
#[derive(Clone)]
pub enum ColorFunction {
    Gradient {
        /// Non-decreasing class boundaries.
        domain: Vec<f64>,
        ramp: PaletteGradient<Color>,
    },
    Categorical {
        colors: HashMap<String, Color>,
    },
}

impl ColorFunction {
    /// Interpolate `anchors` (typically min, mid and max colors) over
    /// `domain`.  Each interval between consecutive boundaries takes an
    /// equal share of the ramp; values outside the domain clamp to the
    /// end colors.
    ///
    /// # Panics
    ///
    /// If `anchors` is empty.
    pub fn gradient(anchors: &[Color], domain: Vec<f64>) -> Self {
        ColorFunction::Gradient { domain,
                                  ramp: PaletteGradient::new(anchors) }
    }

    /// Assign `palette` colors to `limits.values` by position.
    pub fn categorical(limits: &Limits, palette: &CategoricalPalette)
                       -> Self {
        let colors = limits.values.iter().enumerate()
            .filter_map(|(i, v)| {
                let key = v.key()?;
                let c = palette.color(&key, i);
                Some((key, c))
            })
            .collect();
        ColorFunction::Categorical { colors }
    }

    /// The color of `value`.
    ///
    /// Gradients only color finite numbers and need a non-empty
    /// domain; categorical functions only color known values.
    pub fn color(&self, value: &Value) -> Option<Color> {
        match self {
            ColorFunction::Gradient { domain, ramp } => {
                let x = value.as_f64().filter(|x| x.is_finite())?;
                Some(ramp.rgb(position(domain, x)?))
            }
            ColorFunction::Categorical { colors } => {
                colors.get(&value.key()?).copied()
            }
        }
    }
}

/// Position of `x` in \[0, 1\] along the piecewise linear `domain`.
fn position(domain: &[f64], x: f64) -> Option<f64> {
    let (&first, &last) = (domain.first()?, domain.last()?);
    if x <= first { return Some(0.) }
    if x >= last { return Some(1.) }
    // first < x < last, so some interval [d[i], d[i+1]) holds x.
    let segments = (domain.len() - 1) as f64;
    let i = domain.windows(2).position(|d| d[0] <= x && x < d[1])?;
    let frac = (x - domain[i]) / (domain[i + 1] - domain[i]);
    Some((i as f64 + frac) / segments)
}
