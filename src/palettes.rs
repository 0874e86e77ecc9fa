// Qualitative palettes, largest variant of each scheme.
// Brewer colormaps, see http://colorbrewer2.org/

use lazy_static::lazy_static;
pub(crate) mod ty;
use ty::*;

lazy_static! {
  // Tableau 10
  pub(crate) static ref TABLEAU10: PaletteData = {
    PaletteData {
      rgb: vec![
        RGBA{r: 78.0, g: 121.0, b: 167.0, a: 255.},
        RGBA{r: 242.0, g: 142.0, b: 43.0, a: 255.},
        RGBA{r: 225.0, g: 87.0, b: 89.0, a: 255.},
        RGBA{r: 118.0, g: 183.0, b: 178.0, a: 255.},
        RGBA{r: 89.0, g: 161.0, b: 79.0, a: 255.},
        RGBA{r: 237.0, g: 201.0, b: 72.0, a: 255.},
        RGBA{r: 176.0, g: 122.0, b: 161.0, a: 255.},
        RGBA{r: 255.0, g: 157.0, b: 167.0, a: 255.},
        RGBA{r: 156.0, g: 117.0, b: 95.0, a: 255.},
        RGBA{r: 186.0, g: 176.0, b: 172.0, a: 255.},
      ]}
  };
}

lazy_static! {
  // D3 Category 10
  pub(crate) static ref CATEGORY10: PaletteData = {
    PaletteData {
      rgb: vec![
        RGBA{r: 31.0, g: 119.0, b: 180.0, a: 255.},
        RGBA{r: 255.0, g: 127.0, b: 14.0, a: 255.},
        RGBA{r: 44.0, g: 160.0, b: 44.0, a: 255.},
        RGBA{r: 214.0, g: 39.0, b: 40.0, a: 255.},
        RGBA{r: 148.0, g: 103.0, b: 189.0, a: 255.},
        RGBA{r: 140.0, g: 86.0, b: 75.0, a: 255.},
        RGBA{r: 227.0, g: 119.0, b: 194.0, a: 255.},
        RGBA{r: 127.0, g: 127.0, b: 127.0, a: 255.},
        RGBA{r: 188.0, g: 189.0, b: 34.0, a: 255.},
        RGBA{r: 23.0, g: 190.0, b: 207.0, a: 255.},
      ]}
  };
}

lazy_static! {
  // Brewer Set1
  pub(crate) static ref SET1: PaletteData = {
    PaletteData {
      rgb: vec![
        RGBA{r: 228.0, g: 26.0, b: 28.0, a: 255.},
        RGBA{r: 55.0, g: 126.0, b: 184.0, a: 255.},
        RGBA{r: 77.0, g: 175.0, b: 74.0, a: 255.},
        RGBA{r: 152.0, g: 78.0, b: 163.0, a: 255.},
        RGBA{r: 255.0, g: 127.0, b: 0.0, a: 255.},
        RGBA{r: 255.0, g: 255.0, b: 51.0, a: 255.},
        RGBA{r: 166.0, g: 86.0, b: 40.0, a: 255.},
        RGBA{r: 247.0, g: 129.0, b: 191.0, a: 255.},
        RGBA{r: 153.0, g: 153.0, b: 153.0, a: 255.},
      ]}
  };
}

lazy_static! {
  // Brewer Set2
  pub(crate) static ref SET2: PaletteData = {
    PaletteData {
      rgb: vec![
        RGBA{r: 102.0, g: 194.0, b: 165.0, a: 255.},
        RGBA{r: 252.0, g: 141.0, b: 98.0, a: 255.},
        RGBA{r: 141.0, g: 160.0, b: 203.0, a: 255.},
        RGBA{r: 231.0, g: 138.0, b: 195.0, a: 255.},
        RGBA{r: 166.0, g: 216.0, b: 84.0, a: 255.},
        RGBA{r: 255.0, g: 217.0, b: 47.0, a: 255.},
        RGBA{r: 229.0, g: 196.0, b: 148.0, a: 255.},
        RGBA{r: 179.0, g: 179.0, b: 179.0, a: 255.},
      ]}
  };
}

lazy_static! {
  // Brewer Set3
  pub(crate) static ref SET3: PaletteData = {
    PaletteData {
      rgb: vec![
        RGBA{r: 141.0, g: 211.0, b: 199.0, a: 255.},
        RGBA{r: 255.0, g: 255.0, b: 179.0, a: 255.},
        RGBA{r: 190.0, g: 186.0, b: 218.0, a: 255.},
        RGBA{r: 251.0, g: 128.0, b: 114.0, a: 255.},
        RGBA{r: 128.0, g: 177.0, b: 211.0, a: 255.},
        RGBA{r: 253.0, g: 180.0, b: 98.0, a: 255.},
        RGBA{r: 179.0, g: 222.0, b: 105.0, a: 255.},
        RGBA{r: 252.0, g: 205.0, b: 229.0, a: 255.},
        RGBA{r: 217.0, g: 217.0, b: 217.0, a: 255.},
        RGBA{r: 188.0, g: 128.0, b: 189.0, a: 255.},
        RGBA{r: 204.0, g: 235.0, b: 197.0, a: 255.},
        RGBA{r: 255.0, g: 237.0, b: 111.0, a: 255.},
      ]}
  };
}

lazy_static! {
  // Brewer Pastel1
  pub(crate) static ref PASTEL1: PaletteData = {
    PaletteData {
      rgb: vec![
        RGBA{r: 251.0, g: 180.0, b: 174.0, a: 255.},
        RGBA{r: 179.0, g: 205.0, b: 227.0, a: 255.},
        RGBA{r: 204.0, g: 235.0, b: 197.0, a: 255.},
        RGBA{r: 222.0, g: 203.0, b: 228.0, a: 255.},
        RGBA{r: 254.0, g: 217.0, b: 166.0, a: 255.},
        RGBA{r: 255.0, g: 255.0, b: 204.0, a: 255.},
        RGBA{r: 229.0, g: 216.0, b: 189.0, a: 255.},
        RGBA{r: 253.0, g: 218.0, b: 236.0, a: 255.},
        RGBA{r: 242.0, g: 242.0, b: 242.0, a: 255.},
      ]}
  };
}

lazy_static! {
  // Brewer Dark2
  pub(crate) static ref DARK2: PaletteData = {
    PaletteData {
      rgb: vec![
        RGBA{r: 27.0, g: 158.0, b: 119.0, a: 255.},
        RGBA{r: 217.0, g: 95.0, b: 2.0, a: 255.},
        RGBA{r: 117.0, g: 112.0, b: 179.0, a: 255.},
        RGBA{r: 231.0, g: 41.0, b: 138.0, a: 255.},
        RGBA{r: 102.0, g: 166.0, b: 30.0, a: 255.},
        RGBA{r: 230.0, g: 171.0, b: 2.0, a: 255.},
        RGBA{r: 166.0, g: 118.0, b: 29.0, a: 255.},
        RGBA{r: 102.0, g: 102.0, b: 102.0, a: 255.},
      ]}
  };
}

lazy_static! {
  // Brewer Paired
  pub(crate) static ref PAIRED: PaletteData = {
    PaletteData {
      rgb: vec![
        RGBA{r: 166.0, g: 206.0, b: 227.0, a: 255.},
        RGBA{r: 31.0, g: 120.0, b: 180.0, a: 255.},
        RGBA{r: 178.0, g: 223.0, b: 138.0, a: 255.},
        RGBA{r: 51.0, g: 160.0, b: 44.0, a: 255.},
        RGBA{r: 251.0, g: 154.0, b: 153.0, a: 255.},
        RGBA{r: 227.0, g: 26.0, b: 28.0, a: 255.},
        RGBA{r: 253.0, g: 191.0, b: 111.0, a: 255.},
        RGBA{r: 255.0, g: 127.0, b: 0.0, a: 255.},
        RGBA{r: 202.0, g: 178.0, b: 214.0, a: 255.},
        RGBA{r: 106.0, g: 61.0, b: 154.0, a: 255.},
        RGBA{r: 255.0, g: 255.0, b: 153.0, a: 255.},
        RGBA{r: 177.0, g: 89.0, b: 40.0, a: 255.},
      ]}
  };
}

lazy_static! {
  // Brewer Accent
  pub(crate) static ref ACCENT: PaletteData = {
    PaletteData {
      rgb: vec![
        RGBA{r: 127.0, g: 201.0, b: 127.0, a: 255.},
        RGBA{r: 190.0, g: 174.0, b: 212.0, a: 255.},
        RGBA{r: 253.0, g: 192.0, b: 134.0, a: 255.},
        RGBA{r: 255.0, g: 255.0, b: 153.0, a: 255.},
        RGBA{r: 56.0, g: 108.0, b: 176.0, a: 255.},
        RGBA{r: 240.0, g: 2.0, b: 127.0, a: 255.},
        RGBA{r: 191.0, g: 91.0, b: 23.0, a: 255.},
        RGBA{r: 102.0, g: 102.0, b: 102.0, a: 255.},
      ]}
  };
}
/// The palette table backing `scheme`.
pub(crate) fn data(scheme: Scheme) -> &'static PaletteData {
    match scheme {
        Scheme::Tableau10 => &TABLEAU10,
        Scheme::Category10 => &CATEGORY10,
        Scheme::Set1 => &SET1,
        Scheme::Set2 => &SET2,
        Scheme::Set3 => &SET3,
        Scheme::Pastel1 => &PASTEL1,
        Scheme::Dark2 => &DARK2,
        Scheme::Paired => &PAIRED,
        Scheme::Accent => &ACCENT,
    }
}
