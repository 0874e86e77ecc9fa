//! Write `demos/output/choropleth.html` showing the stop tables of a
//! few encodings.  Set `RUST_LOG=debug` to see the datasource logs.

use std::{fs::{self, File},
          io::{BufWriter, Write},
          error::Error};
use choropleth_stops::{build_encoding, class_count_with, natural_breaks,
                       CategoricalPalette, ChoroplethSettings,
                       ChoroplethSource, Color, ColorMode, ColorRange,
                       ColorScheme, ColumnHeight, ConstantHeight,
                       DataProvider, EncodingResult, PaletteGradient,
                       RGBColor, Role, RoleMap, Row, Scheme,
                       MAX_CLASS_COUNT};
use tracing_subscriber::{fmt, EnvFilter};

type Err = Box<dyn Error>;

const GDP: &str = r#"[
    {"state": "BE", "gdp": 515.0, "region": "west",  "pop": 11.6},
    {"state": "NL", "gdp": 1009.4, "region": "west", "pop": 17.6},
    {"state": "LU", "gdp": 82.3, "region": "west",   "pop": 0.6},
    {"state": "DE", "gdp": 4072.2, "region": "centre", "pop": 83.2},
    {"state": "PL", "gdp": 688.1, "region": "east",  "pop": 37.7},
    {"state": "CZ", "gdp": 290.9, "region": "east",  "pop": 10.5},
    {"state": "AT", "gdp": 471.4, "region": "centre", "pop": 9.0},
    {"state": "CH", "gdp": 807.7, "region": null,    "pop": 8.7},
    {"state": "FR", "gdp": 2782.9, "region": "west", "pop": 67.8}
]"#;

fn table_of_stops(fh: &mut impl Write, enc: &EncodingResult,
                  comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for (key, c) in enc.color_stops.iter() {
        writeln!(fh, "  <td style=\"width: 40px; height: 30px; \
                      text-align: center; background-color: {}\">{key}</td>",
                 c.to_css())?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}{}</td></tr><tr>",
             if enc.valid { "" } else { " (invalid)" })?;
    for (_, c) in enc.color_stops.iter() {
        writeln!(fh, "  <td style=\"width: 40px; height: 12px; \
                      background-color: {}\"></td>",
                 c.to_gray().to_css())?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn ramp(fh: &mut impl Write, anchors: &[Color], n: usize,
        comment: &str) -> Result<(), Err> {
    let g = PaletteGradient::new(anchors);
    let dt = 1. / (n - 1) as f64;
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for i in 0 .. n {
        writeln!(fh, "  <td style=\"width: 1px; height: 30px; \
                      background-color: {}\"></td>",
                 g.rgb(i as f64 * dt).to_css())?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let rows: Vec<Row> = serde_json::from_str(GDP)?;
    let settings = ChoroplethSettings::default();
    let scheme = settings.color_scheme()?;

    fs::create_dir_all("demos/output")?;
    let mut fh = BufWriter::new(File::create("demos/output/choropleth.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>choropleth-stops</title>\n\
                  </head>\n\
                  <body>")?;

    writeln!(fh, "<h3>Gradient</h3>")?;
    ramp(&mut fh, &scheme.anchors, 150, "min, mid and max colors")?;
    let numeric = RoleMap { location: Role::new("state"),
                            color: Some(Role::numeric("gdp")) };
    let mut source = ChoroplethSource::new();
    source.update(rows.clone(), &numeric);
    for k in [2, 3, MAX_CLASS_COUNT] {
        let k = class_count_with(source.limits(), k);
        let breaks = natural_breaks(source.limits(), k);
        let enc = build_encoding(&rows, &numeric, ColorMode::Gradient,
                                 &scheme, k, ConstantHeight(0.));
        table_of_stops(&mut fh, &enc, &format!("{k} breaks {breaks:?}"))?;
    }

    writeln!(fh, "<h3>Categorical</h3>")?;
    let categorical = RoleMap { location: Role::new("state"),
                                color: Some(Role::new("region")) };
    for p in [Scheme::Tableau10, Scheme::Set1, Scheme::Pastel1, Scheme::Dark2] {
        let scheme = ColorScheme { palette: CategoricalPalette::new(p),
                                   ..scheme.clone() };
        let enc = build_encoding(&rows, &categorical, ColorMode::Categorical,
                                 &scheme, 0, ConstantHeight(0.));
        table_of_stops(&mut fh, &enc, &format!("{p:?}"))?;
    }

    writeln!(fh, "<h3>Heights</h3>")?;
    let heights = ColumnHeight { column: "pop".to_string(), fallback: 0. };
    let enc = build_encoding(&rows, &numeric, ColorMode::Gradient, &scheme,
                             MAX_CLASS_COUNT, heights);
    writeln!(fh, "<pre>{}</pre>",
             serde_json::to_string_pretty(&enc.height_function(0.))?)?;

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
