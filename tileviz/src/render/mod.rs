//! Output backends
//!
//! A [`Renderer`] turns the contents of a
//! [`CanvasGrid`](crate::grid::CanvasGrid) into a document.  Two backends are
//! provided: [`SvgRenderer`] draws every time slice as a flat field of
//! circles, and [`PovRenderer`] writes a POV-Ray scene with one sphere per
//! iteration point.
//!
//! ```
//! use tileviz::{color::ColorTable, grid::{CanvasGrid, TimeRange}};
//! use tileviz::render::{Page, Renderer, SvgRenderer};
//!
//! let range = TimeRange::new(1, 2)?;
//! let mut grid = CanvasGrid::new(2, 3, 3, 40, range)?;
//! grid.set_fill(1, 0, 0, "red");
//!
//! let colors = ColorTable::builtin();
//! let mut out = vec![];
//! let mut svg = SvgRenderer::new(&mut out, &colors, Page::new(80, 40), 5);
//! svg.header()?;
//! grid.render(&mut svg, range)?;
//! svg.footer()?;
//!
//! let text = String::from_utf8(out).unwrap();
//! assert_eq!(text.matches("<circle").count(), 18);
//! # Ok::<(), tileviz::Error>(())
//! ```
mod pov;
mod svg;

pub use pov::PovRenderer;
pub use svg::{Page, SvgRenderer};

/// Location of a single marker
///
/// Positions carry both iteration-space coordinates and page coordinates;
/// flat backends draw at `(px, py)`, while 3D backends place objects at
/// `(x, layer, y)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Time layer (1-based)
    pub layer: usize,
    /// Column within the layer
    pub x: usize,
    /// Row within the layer
    pub y: usize,
    /// Horizontal page position, in pixels
    pub px: i64,
    /// Vertical page position, in pixels
    pub py: i64,
}

/// Axis-aligned rectangle in page coordinates
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge
    pub x: i64,
    /// Top edge
    pub y: i64,
    /// Width
    pub w: i64,
    /// Height
    pub h: i64,
}

/// Capabilities shared by every output backend
///
/// Colors are passed by name; backends resolve them through a
/// [`ColorTable`](crate::color::ColorTable).
pub trait Renderer {
    /// Writes the document preamble
    fn header(&mut self) -> std::io::Result<()>;

    /// Writes the document trailer
    fn footer(&mut self) -> std::io::Result<()>;

    /// Draws a single cell marker
    fn marker(
        &mut self,
        pos: &Position,
        stroke: &str,
        fill: &str,
    ) -> std::io::Result<()>;

    /// Draws text centered on a cell
    fn label(&mut self, pos: &Position, text: &str) -> std::io::Result<()>;

    /// Draws a rectangle behind subsequent markers
    ///
    /// Backends without a notion of flat rectangles ignore this.
    fn rectangle(
        &mut self,
        rect: &Rect,
        stroke: &str,
        fill: &str,
    ) -> std::io::Result<()> {
        let _ = (rect, stroke, fill);
        Ok(())
    }
}
