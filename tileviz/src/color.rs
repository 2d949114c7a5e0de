//! Named color lookup
//!
//! A [`ColorTable`] maps color names (as used by SVG, e.g. `"powderblue"`) to
//! their hex code and RGB channels.  Tables are loaded from a whitespace
//! separated text file of `name hexcode r,g,b` triples:
//!
//! ```text
//! red #FF0000 255,0,0
//! yellow #FFFF00 255,255,0
//! ```
//!
//! Lookups never fail: an unknown name resolves to black, so that a typo in a
//! palette never aborts a visualization.
use crate::Error;
use log::debug;
use std::collections::HashMap;
use std::path::Path;

const BUILTIN: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/data/svg-colors-rgb.txt"
));

/// Hex code returned for unknown color names
pub const DEFAULT_HEX: &str = "#000000";

/// An 8-bit-per-channel RGB color
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Builds a new color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns each channel as a fraction in `[0, 1]`
    pub fn to_fractions(&self) -> [f64; 3] {
        [self.r, self.g, self.b].map(|c| f64::from(c) / 255.0)
    }
}

impl std::str::FromStr for Rgb {
    type Err = ();

    /// Parses an `r,g,b` triple
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut iter = s.split(',').map(|c| c.trim().parse::<u8>());
        match (iter.next(), iter.next(), iter.next(), iter.next()) {
            (Some(Ok(r)), Some(Ok(g)), Some(Ok(b)), None) => {
                Ok(Rgb { r, g, b })
            }
            _ => Err(()),
        }
    }
}

/// A single entry in a [`ColorTable`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorEntry {
    /// Color name, e.g. `"red"`
    pub name: String,
    /// Hex code, e.g. `"#FF0000"`
    pub hex: String,
    /// Channel values
    pub rgb: Rgb,
}

/// Mapping from color names to [`ColorEntry`] values
#[derive(Clone, Debug, Default)]
pub struct ColorTable {
    colors: HashMap<String, ColorEntry>,
}

impl ColorTable {
    /// Loads a color table from a text file
    ///
    /// A missing or unreadable file is reported as [`Error::ColorTable`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| Error::ColorTable {
                path: path.to_owned(),
                source,
            })?;
        let out = Self::from_text(&text)?;
        debug!("loaded {} colors from {path:?}", out.len());
        Ok(out)
    }

    /// Parses a color table from text
    ///
    /// Tokens are consumed in groups of three; a trailing partial group is
    /// ignored.  Later entries replace earlier entries with the same name.
    pub fn from_text(text: &str) -> Result<Self, Error> {
        let tokens = text.split_whitespace().collect::<Vec<_>>();
        let mut colors = HashMap::new();
        for chunk in tokens.chunks_exact(3) {
            let [name, hex, rgb] = [chunk[0], chunk[1], chunk[2]];
            let rgb = rgb.parse::<Rgb>().map_err(|()| {
                Error::BadColorEntry(name.to_owned(), rgb.to_owned())
            })?;
            colors.insert(
                name.to_owned(),
                ColorEntry {
                    name: name.to_owned(),
                    hex: hex.to_owned(),
                    rgb,
                },
            );
        }
        Ok(Self { colors })
    }

    /// Returns the table of SVG 1.1 named colors bundled with the crate
    pub fn builtin() -> Self {
        Self::from_text(BUILTIN).expect("bundled color table must be valid")
    }

    /// Looks up a color entry by name
    pub fn get(&self, name: &str) -> Option<&ColorEntry> {
        let out = self.colors.get(name);
        if out.is_none() {
            debug!("unknown color `{name}`, using black");
        }
        out
    }

    /// Returns the RGB value for the given name, or black if it's not found
    pub fn rgb(&self, name: &str) -> Rgb {
        self.get(name).map(|c| c.rgb).unwrap_or_default()
    }

    /// Returns the hex code for the given name, or `#000000` if it's not found
    pub fn hex(&self, name: &str) -> &str {
        self.get(name).map(|c| c.hex.as_str()).unwrap_or(DEFAULT_HEX)
    }

    /// Returns the number of colors in the table
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Checks whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_triples() {
        let t = ColorTable::from_text(
            "red #FF0000 255,0,0\n  teal #008080 0,128,128 navy",
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.rgb("teal"), Rgb::new(0, 128, 128));
        assert_eq!(t.hex("red"), "#FF0000");

        // The dangling `navy` token is dropped
        assert!(t.get("navy").is_none());
    }

    #[test]
    fn unknown_names_are_black() {
        let t = ColorTable::builtin();
        assert_eq!(t.rgb("not-a-color"), Rgb::new(0, 0, 0));
        assert_eq!(t.hex("not-a-color"), "#000000");

        let t = ColorTable::default();
        assert!(t.is_empty());
        assert_eq!(t.rgb("red"), Rgb::default());
    }

    #[test]
    fn bad_channels() {
        for text in ["red #FF0000 255,0", "red #FF0000 256,0,0", "a b c,d,e"] {
            assert!(
                matches!(
                    ColorTable::from_text(text),
                    Err(Error::BadColorEntry(..))
                ),
                "expected an error for {text:?}"
            );
        }
    }

    #[test]
    fn builtin_palette() {
        let t = ColorTable::builtin();
        assert_eq!(t.len(), 147);
        assert_eq!(t.rgb("powderblue"), Rgb::new(176, 224, 230));
        assert_eq!(t.hex("lightgrey"), "#D3D3D3");
        for name in crate::paint::PALETTE {
            assert!(t.get(name).is_some(), "missing palette color {name}");
        }
    }

    #[test]
    fn missing_file() {
        let err = ColorTable::load("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::ColorTable { .. }));
    }

    #[test]
    fn fractions() {
        let [r, g, b] = Rgb::new(255, 0, 51).to_fractions();
        assert_relative_eq!(r, 1.0);
        assert_relative_eq!(g, 0.0);
        assert_relative_eq!(b, 0.2);
    }
}
