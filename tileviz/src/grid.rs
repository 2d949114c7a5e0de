//! Layered grid of drawable cells
//!
//! A [`CanvasGrid`] stores one 2D layer of [`Cell`] values per time step.
//! Layers are indexed from 1 (matching the iteration space's `t ∈ [1, T]`);
//! columns and rows are indexed from 0.
//!
//! When drawn, consecutive layers in the grid's active [`TimeRange`] are
//! stacked down the page, `slice_spacing` pixels apart.  Layers outside the
//! active range are drawn at offset 0.
use crate::{
    Error,
    render::{Position, Rect, Renderer},
};

/// Inclusive, 1-based range of time layers
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimeRange {
    start: usize,
    end: usize,
}

impl TimeRange {
    /// Builds a new range, checking that `1 <= start <= end`
    pub fn new(start: usize, end: usize) -> Result<Self, Error> {
        if start > end || start == 0 {
            Err(Error::BadActiveRange(start, end))
        } else {
            Ok(Self { start, end })
        }
    }

    /// First layer in the range
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last layer in the range (inclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of layers in the range
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; ranges hold at least one layer
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Checks whether the given layer is within the range
    pub fn contains(&self, t: usize) -> bool {
        (self.start..=self.end).contains(&t)
    }

    /// Iterates over layers in the range
    pub fn iter(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Checks that the range fits within `[1, layers]`
    pub fn check(&self, layers: usize) -> Result<(), Error> {
        if self.end > layers {
            Err(Error::ActiveRangeOutOfBounds(self.start, self.end, layers))
        } else {
            Ok(())
        }
    }
}

/// Drawing attributes for a single iteration point
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Text drawn on top of the marker (empty for none)
    pub label: String,
    /// Outline color name
    pub stroke: String,
    /// Fill color name
    pub fill: String,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            label: String::new(),
            stroke: "black".to_owned(),
            fill: "white".to_owned(),
        }
    }
}

/// Inclusive rectangle of cells, `(x1, y1)` to `(x2, y2)`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// Left column
    pub x1: usize,
    /// Bottom row
    pub y1: usize,
    /// Right column
    pub x2: usize,
    /// Top row
    pub y2: usize,
}

impl std::str::FromStr for Region {
    type Err = Error;

    /// Parses a region from `x1,y1,x2,y2` text
    fn from_str(s: &str) -> Result<Self, Error> {
        let err = || Error::BadRegion(s.to_owned());
        let v = s
            .split(',')
            .map(|c| c.trim().parse::<usize>().map_err(|_| err()))
            .collect::<Result<Vec<_>, _>>()?;
        match v.as_slice() {
            &[x1, y1, x2, y2] if x1 <= x2 && y1 <= y2 => {
                Ok(Region { x1, y1, x2, y2 })
            }
            _ => Err(err()),
        }
    }
}

/// Stroke and fill colors for highlight rectangles
const HIGHLIGHT_STROKE: &str = "darkgrey";
const HIGHLIGHT_FILL: &str = "lightgrey";

/// Pixel spacing between cell centers, unless overridden
const DEFAULT_CELL_SPACING: i64 = 10;

/// Dense `layers × width × height` array of cells
///
/// ```text
///  y (rows)
///  ^
///  |  layer t
///  |
///  0-------> x (columns)
/// ```
///
/// Row 0 is drawn at the bottom of each layer.
#[derive(Clone, Debug)]
pub struct CanvasGrid {
    cells: Vec<Cell>,
    highlights: Vec<Option<Region>>,
    offsets: Vec<i64>,
    width: usize,
    height: usize,
    cell_spacing: i64,
}

impl CanvasGrid {
    /// Builds a new grid with every cell at its default value
    ///
    /// Layers within `active` are offset by `slice_spacing` pixels from the
    /// previous active layer; other layers are not shifted.
    pub fn new(
        layers: usize,
        width: usize,
        height: usize,
        slice_spacing: i64,
        active: TimeRange,
    ) -> Result<Self, Error> {
        active.check(layers)?;
        let offsets = (1..=layers)
            .map(|t| {
                if active.contains(t) {
                    (t - active.start()) as i64 * slice_spacing
                } else {
                    0
                }
            })
            .collect();
        Ok(Self {
            cells: vec![Cell::default(); layers * width * height],
            highlights: vec![None; layers],
            offsets,
            width,
            height,
            cell_spacing: DEFAULT_CELL_SPACING,
        })
    }

    /// Sets the pixel spacing between adjacent cell centers
    pub fn with_cell_spacing(mut self, spacing: i64) -> Self {
        self.cell_spacing = spacing;
        self
    }

    /// Returns the number of layers
    pub fn layers(&self) -> usize {
        self.offsets.len()
    }

    /// Returns the number of columns per layer
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows per layer
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel spacing between adjacent cell centers
    pub fn cell_spacing(&self) -> i64 {
        self.cell_spacing
    }

    /// Returns the vertical pixel offset of the given layer
    pub fn layer_offset(&self, t: usize) -> i64 {
        self.check_layer(t);
        self.offsets[t - 1]
    }

    fn check_layer(&self, t: usize) {
        assert!(
            t >= 1 && t <= self.layers(),
            "layer ({t}) must be in [1, {}]",
            self.layers()
        );
    }

    /// Checks a `(t, x, y)` position, returning its index in the flat array
    fn decode_position(&self, t: usize, x: usize, y: usize) -> usize {
        self.check_layer(t);
        assert!(
            x < self.width,
            "column ({x}) must be less than grid width ({})",
            self.width
        );
        assert!(
            y < self.height,
            "row ({y}) must be less than grid height ({})",
            self.height
        );
        ((t - 1) * self.height + y) * self.width + x
    }

    /// Borrows a cell
    pub fn cell(&self, t: usize, x: usize, y: usize) -> &Cell {
        let i = self.decode_position(t, x, y);
        &self.cells[i]
    }

    fn cell_mut(&mut self, t: usize, x: usize, y: usize) -> &mut Cell {
        let i = self.decode_position(t, x, y);
        &mut self.cells[i]
    }

    /// Sets the label of a cell
    pub fn set_label<S: Into<String>>(
        &mut self,
        t: usize,
        x: usize,
        y: usize,
        s: S,
    ) {
        self.cell_mut(t, x, y).label = s.into();
    }

    /// Sets the outline color of a cell
    pub fn set_stroke<S: Into<String>>(
        &mut self,
        t: usize,
        x: usize,
        y: usize,
        s: S,
    ) {
        self.cell_mut(t, x, y).stroke = s.into();
    }

    /// Sets the fill color of a cell
    pub fn set_fill<S: Into<String>>(
        &mut self,
        t: usize,
        x: usize,
        y: usize,
        s: S,
    ) {
        self.cell_mut(t, x, y).fill = s.into();
    }

    /// Places a highlight rectangle behind a region of the given layer
    ///
    /// Each layer has at most one region; setting a new one replaces it.
    pub fn set_highlight(
        &mut self,
        t: usize,
        region: Region,
    ) -> Result<(), Error> {
        self.check_layer(t);
        if region.x2 >= self.width || region.y2 >= self.height {
            return Err(Error::RegionOutOfBounds(
                region.x1,
                region.y1,
                region.x2,
                region.y2,
                self.width,
                self.height,
            ));
        }
        self.highlights[t - 1] = Some(region);
        Ok(())
    }

    /// Returns the highlight region of the given layer, if any
    pub fn highlight(&self, t: usize) -> Option<Region> {
        self.check_layer(t);
        self.highlights[t - 1]
    }

    /// Iterates over `(t, x, y, cell)` tuples in drawing order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize, &Cell)> {
        let (w, h) = (self.width, self.height);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (i / (w * h) + 1, i % w, (i / w) % h, c))
    }

    /// Returns the page position of a cell
    pub fn position(&self, t: usize, x: usize, y: usize) -> Position {
        let s = self.cell_spacing;
        Position {
            layer: t,
            x,
            y,
            px: (x as i64 + 1) * s,
            py: self.layer_offset(t) + (self.height as i64 - y as i64) * s,
        }
    }

    /// Draws the layers in `range` to the given renderer
    ///
    /// Headers and footers are the caller's responsibility, so that several
    /// grids may share one document.
    pub fn render<R: Renderer + ?Sized>(
        &self,
        out: &mut R,
        range: TimeRange,
    ) -> Result<(), Error> {
        range.check(self.layers())?;
        let s = self.cell_spacing;
        for t in range.iter() {
            if let Some(r) = self.highlights[t - 1] {
                let rect = Rect {
                    x: r.x1 as i64 * s + s / 2,
                    y: self.offsets[t - 1] + (self.height - r.y2) as i64 * s
                        - s / 2,
                    w: (r.x2 - r.x1 + 1) as i64 * s,
                    h: (r.y2 - r.y1 + 1) as i64 * s,
                };
                out.rectangle(&rect, HIGHLIGHT_STROKE, HIGHLIGHT_FILL)?;
            }
            for y in 0..self.height {
                for x in 0..self.width {
                    let pos = self.position(t, x, y);
                    let cell = self.cell(t, x, y);
                    out.marker(&pos, &cell.stroke, &cell.fill)?;
                    if !cell.label.is_empty() {
                        out.label(&pos, &cell.label)?;
                    }
                }
            }
        }
        Ok(())
    }
}
