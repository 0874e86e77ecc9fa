pub(crate) use rgb::RGBA;
use serde::Deserialize;

/// A fixed list of colors.
pub(crate) struct PaletteData {
    pub(crate) rgb: Vec<RGBA<f64>>, // Invariant: length ≥ 2, components in [0, 255]
}

/// The qualitative schemes available for categorical coloring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Tableau10,
    Category10,
    Set1,
    Set2,
    Set3,
    Pastel1,
    Dark2,
    Paired,
    Accent,
}
