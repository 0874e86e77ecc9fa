//! CSS color strings as used by the renderer's paint properties.

use rgb::RGBA8;
use crate::error::{Error, Result};

/// Fully transparent black, the default color of stop functions.
pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Parse any CSS color: hex forms, `rgb()`/`rgba()`, `hsl()`/`hsla()`,
/// `hwb()` and the named colors.
///
/// ```
/// use choropleth_stops::css;
/// use rgb::RGBA8;
/// assert_eq!(css::parse("steelblue").unwrap(), RGBA8::new(70, 130, 180, 255));
/// assert!(css::parse("no-such-color").is_err());
/// ```
pub fn parse(s: &str) -> Result<RGBA8> {
    let c = csscolorparser::parse(s.trim())
        .map_err(|e| Error::InvalidColor(format!("{s:?}: {e}")))?;
    let [r, g, b, a] = c.to_rgba8();
    Ok(RGBA8::new(r, g, b, a))
}

/// `#rrggbb` for opaque colors, `rgba(r,g,b,a)` otherwise.
pub fn to_css(c: RGBA8) -> String {
    if c.a == 255 {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        let a = (c.a as f64 / 255. * 1000.).round() / 1000.;
        format!("rgba({},{},{},{})", c.r, c.g, c.b, a)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(parse("#ff8000").unwrap(), RGBA8::new(255, 128, 0, 255));
        assert_eq!(parse("#F80").unwrap(), RGBA8::new(255, 136, 0, 255));
        assert_eq!(parse("#00000080").unwrap(), RGBA8::new(0, 0, 0, 128));
        assert!(parse("#12345").is_err());
        assert!(parse("#gg0000").is_err());
    }

    #[test]
    fn functional_forms() {
        assert_eq!(parse("rgb(67,147,195)").unwrap(),
                   RGBA8::new(67, 147, 195, 255));
        assert_eq!(parse("rgba(0, 0, 0, 0)").unwrap(), RGBA8::new(0, 0, 0, 0));
        assert_eq!(parse(" Black ").unwrap(), RGBA8::new(0, 0, 0, 255));
        assert!(parse("rgb(1,2)").is_err());
    }

    #[test]
    fn named_and_hsl_forms() {
        assert_eq!(parse("red").unwrap(), RGBA8::new(255, 0, 0, 255));
        assert_eq!(parse("steelblue").unwrap(), RGBA8::new(70, 130, 180, 255));
        assert_eq!(parse("transparent").unwrap(), RGBA8::new(0, 0, 0, 0));
        assert_eq!(parse("hsl(0, 100%, 50%)").unwrap(),
                   RGBA8::new(255, 0, 0, 255));
        assert_eq!(parse("rgb(10 20 30)").unwrap(),
                   RGBA8::new(10, 20, 30, 255));
        assert!(matches!(parse("reddish"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn css_output() {
        assert_eq!(to_css(RGBA8::new(1, 2, 255, 255)), "#0102ff");
        assert_eq!(to_css(RGBA8::new(0, 0, 0, 0)), "rgba(0,0,0,0)");
        assert_eq!(parse(&to_css(RGBA8::new(9, 8, 7, 255))).unwrap(),
                   RGBA8::new(9, 8, 7, 255));
    }
}
