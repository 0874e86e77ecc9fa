//! Stop tables and color encodings for choropleth map layers.
//!
//! Rows of a data table are joined to map regions by a location key.
//! This crate turns them into the discrete per-feature encoding a
//! vector-tile renderer consumes: ordered `(key → value)` stop lists
//! for the fill color, the extrusion height and the outline color, plus
//! an inclusion filter.
//!
//! - [`compute_limits`], [`class_count`], [`natural_breaks`]
//! - [`ColorFunction`] (gradient or categorical)
//! - [`StopBuilder`] and the one-shot [`build_encoding`]
//! - [`highlight_filter`] for selections
//!
//! The [`ChoroplethLayer`] glue translates an [`EncodingResult`] into
//! calls on a [`MapSurface`].
//!
//! Colors are handled through the [`RGBColor`] trait; gradients are
//! interpolated in the CIE L\*C\*h color space.

use std::f64::consts::PI;
use std::marker::PhantomData;
use rgb::{RGBA, RGBA8};

mod palettes;
use palettes::ty::PaletteData;
pub use palettes::ty::Scheme;

pub mod css;
pub mod error;
pub mod value;
pub mod limits;
pub mod classify;
pub mod scale;
pub mod stops;
pub mod filter;
pub mod encoding;
pub mod settings;
pub mod source;
pub mod layer;

pub use error::{Error, Result};
pub use value::{Row, Value};
pub use limits::{class_count, class_count_with, compute_limits, Limits,
                 MAX_CLASS_COUNT};
pub use classify::natural_breaks;
pub use scale::{CategoricalPalette, ColorFunction, ColorMode};
pub use stops::{ColumnHeight, ConstantHeight, EncodingResult, HeightSource,
                StopBuilder, StopTable};
pub use filter::{dedup_selection, highlight_filter, hover_filter, Filter,
                 MAX_SELECTION_COUNT};
pub use encoding::{build_color_function, build_encoding, ColorScheme, Role,
                   RoleMap};
pub use settings::ChoroplethSettings;
pub use source::{ChoroplethSource, DataProvider};
pub use layer::{ChoroplethLayer, MapSurface, SelectionAware};

/// The color type stored in stop tables.
pub type Color = RGBA8;

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;
}

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Return a gradient from color `c0` to color `c1`.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGBA8;
    /// use choropleth_stops::{RGBColor, ColorRange};
    /// let red = RGBA8::new(255, 0, 0, 255);
    /// let blue = RGBA8::new(0, 0, 255, 255);
    /// let grad = red.gradient(&blue);
    /// assert_eq!(grad.rgb(0.), red);
    /// ```
    fn gradient(&self, c1: &Self) -> Gradient<Self> {
        let lch0 = Lch::from_rgb(Self::to_rgba(self));
        let lch1 = Lch::from_rgb(Self::to_rgba(c1));
        let h0 = lch0.h;
        let h1 = lch1.h;
        let dh = {
            if h1 > h0 && h1 - h0 > PI { h1 - (h0 + TWO_PI) }
            else if h1 < h0 && h0 - h1 > PI { h1 + TWO_PI - h0 }
            else { h1 - h0 } };
        Gradient { c0: lch0,
                   dc: Lch { l: lch1.l - lch0.l, c: lch1.c - lch0.c,
                             h: dh, a: lch1.a - lch0.a },
                   color: PhantomData }
    }

    /// The qualitative palette `scheme`.
    #[inline]
    fn palette(scheme: Scheme) -> Palette<Self> {
        Palette::new(palettes::data(scheme))
    }

    /// Parse a CSS color (`#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(…)`,
    /// `rgba(…)` or a few names such as `black`).
    fn from_css(s: &str) -> Result<Self> {
        let c = css::parse(s)?;
        Ok(Self::from_rgba(RGBA8::to_rgba(&c)))
    }

    /// The CSS representation of the color: `#rrggbb` when opaque,
    /// `rgba(r,g,b,a)` otherwise.
    fn to_css(&self) -> String {
        css::to_css(RGBA8::from_rgba(Self::to_rgba(self)))
    }

    /// Convert the color to grayscale.
    fn to_gray(&self) -> Self {
        let RGBA{ r, g, b, a } = Self::to_rgba(self);
        let x = 0.299 * r + 0.587 * g + 0.114 * b;
        Self::from_rgba(RGBA{ r: x, g: x, b: x, a })
    }
}

/// Round and saturate a component in \[0, 255\].
#[inline]
fn channel(x: f64) -> u8 { x.round() as u8 }

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: channel(c.r),  g: channel(c.g),  b: channel(c.b),
                a: channel(c.a) }
    }
}

/// The type for colors in the CIE L*C*h*_ab color space with a D50
/// reference white point and an alpha component.  This color space is
/// CIE L*a*b* with polar coordinates.
#[derive(Clone, Copy)]
struct Lch {
    /// The lightness.
    l: f64,
    /// The chroma.
    c: f64,
    /// The hue in radians in the range 0. to 2π.
    h: f64,
    /// Alpha component
    a: f64,
}

const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0 ;
const TWO_PI: f64 = 2. * PI;

impl Lch {
    fn from_rgb(c: RGBA<f64>) -> Lch {
        // See https://github.com/dbuenzli/gg/blob/b8704687d669d139bb4ac7a54115afc7e5caaa55/src/gg.ml#L2926
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let xr = 0.4522795 * c.r + 0.3993744 * c.g + 0.1483460 * c.b;
        let yr = 0.2225105 * c.r + 0.7168863 * c.g + 0.0606032 * c.b;
        let zr = 0.0168820 * c.r + 0.1176865 * c.g + 0.8654315 * c.b;
        let fx = if xr > EPS { xr.powf(C0) } else { C1 * xr + C2 };
        let fy = if yr > EPS { yr.powf(C0) } else { C1 * yr + C2 };
        let fz = if zr > EPS { zr.powf(C0) } else { C1 * zr + C2 };
        let l = 116. * fy - 16.;
        let a = 500. * (fx - fy);
        let b = 200. * (fy - fz);
        let h = { let h = b.atan2(a);
                  if h < 0. { h + TWO_PI } else { h } };
        Lch { l, c: a.hypot(b), h, a: c.a }
    }

    fn to_rgb(&self) -> RGBA<f64> {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let a = self.c * self.h.cos();
        let b =  self.c * self.h.sin();
        let fy = (self.l + 16.) / 116.;
        let fx = a / 500. + fy;
        let fz = fy - b / 200.;
        let fx1 = if fx > EPS0 { fx * fx * fx } else { C0 * (fx - C1) };
        let fy1 = if fy > EPS0 { fy * fy * fy } else { C0 * (fy - C1) };
        let fz1 = if fz > EPS0 { fz * fz * fz } else { C0 * (fz - C1) };
        let r = 3.0215932  * fx1 - 1.6168777 * fy1 - 0.4047152 * fz1;
        let g = -0.9437222 * fx1 + 1.9161365 * fy1 + 0.0275856 * fz1;
        let b = 0.0693906  * fx1 - 0.2290271 * fy1 + 1.1596365 * fz1;
        RGBA { r, g, b, a: self.a }
    }
}


/// Gradient between two colors.
///
/// Created by [`RGBColor::gradient`].  See the [`ColorRange`] trait
/// for methods.
#[derive(Clone)]
pub struct Gradient<Color> {
    c0: Lch, // first color
    dc: Lch, // last - first color
    color: PhantomData<Color>,
}

impl<Color> Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\] but does
    /// not check the later condition.
    #[inline]
    fn rgb_unsafe(&self, t: f64) -> Color {
        let lhc = Lch { l: self.c0.l + t * self.dc.l,
              c: self.c0.c + t * self.dc.c,
              h: self.c0.h + t * self.dc.h,
              a: self.c0.a + t * self.dc.a };
        Color::from_rgba(lhc.to_rgb())
    }
}

impl<Color> ColorRange<Color> for Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\], where
    /// `t == 0.` returns the first color provided in the gradient and
    /// `t == 1.` the second.
    fn rgb(&self, t: f64) -> Color { self.rgb_unsafe(t.clamp(0., 1.)) }
}


/// A named list of colors.
#[derive(Clone, Copy)]
pub struct Palette<Color> {
    palette: &'static PaletteData,
    color: PhantomData<Color>,
}

impl<Color: RGBColor> Palette<Color> {
    fn new(palette: &'static PaletteData) -> Self {
        Self { palette, color: PhantomData }
    }
}

impl<Color> Palette<Color>
where Color: RGBColor {
    /// Returns the number of colors in the palette.
    ///
    /// Palettes contain at least 2 colors.
    pub fn len(&self) -> usize { self.palette.rgb.len() }

    /// Returns the RGB colors of the palette.
    pub fn colors(&self) -> Vec<Color> {
        self.palette.rgb.iter().map(|&c| Color::from_rgba(c)).collect()
    }

    /// The `i`th color, cycling when `i` exceeds the palette length.
    pub fn nth(&self, i: usize) -> Color {
        Color::from_rgba(self.palette.rgb[i % self.len()])
    }
}

/// A piecewise gradient through a list of anchor colors, each pair of
/// consecutive anchors taking an equal share of \[0, 1\].
#[derive(Clone)]
pub struct PaletteGradient<Color> {
    gradients: Vec<Gradient<Color>>,
}

impl<Color> PaletteGradient<Color>
where Color: RGBColor {
    /// Gradient through `anchors`.  A single anchor gives a constant
    /// gradient.
    ///
    /// # Panics
    ///
    /// If `anchors` is empty.
    pub fn new(anchors: &[Color]) -> Self {
        assert!(!anchors.is_empty(), "PaletteGradient: no anchor colors");
        let gradients = if anchors.len() == 1 {
            vec![anchors[0].gradient(&anchors[0])]
        } else {
            anchors.windows(2).map(|c| c[0].gradient(&c[1])).collect()
        };
        PaletteGradient { gradients }
    }
}

impl<Color> ColorRange<Color> for PaletteGradient<Color>
where Color: RGBColor {
    fn rgb(&self, t: f64) -> Color {
        let n = self.gradients.len();
        let tn = t.clamp(0., 1.) * n as f64;
        let i = tn.trunc() as usize;
        if i < n { self.gradients[i].rgb_unsafe(tn.fract()) }
        else { self.gradients[n-1].rgb_unsafe(1.) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_endpoints() {
        let c0 = RGBA8::new(94, 0, 99, 255);
        let c1 = RGBA8::new(255, 235, 170, 255);
        let g = c0.gradient(&c1);
        assert_eq!(g.rgb(0.), c0);
        assert_eq!(g.rgb(1.), c1);
        assert_eq!(g.rgb(-3.), c0);
        assert_eq!(g.rgb(7.), c1);
    }

    #[test]
    fn palette_gradient_hits_anchors() {
        let anchors = [RGBA8::new(255, 0, 0, 255),
                       RGBA8::new(255, 255, 255, 255),
                       RGBA8::new(0, 0, 255, 255)];
        let g = PaletteGradient::new(&anchors);
        assert_eq!(g.rgb(0.), anchors[0]);
        assert_eq!(g.rgb(0.5), anchors[1]);
        assert_eq!(g.rgb(1.), anchors[2]);
    }

    #[test]
    fn palette_cycles() {
        let p = RGBA8::palette(Scheme::Set1);
        assert_eq!(p.len(), 9);
        assert_eq!(p.nth(0), RGBA8::new(0xe4, 0x1a, 0x1c, 255));
        assert_eq!(p.nth(9), p.nth(0));
    }

    #[test]
    fn gray_keeps_alpha() {
        let c = RGBA8::new(255, 0, 0, 128).to_gray();
        assert_eq!(c.a, 128);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }
}
