//! Scene configuration
//!
//! A [`SceneConfig`] gathers every parameter of a visualization: the tiling,
//! the iteration space, the page layout, and the paint options.  It is
//! checked once with [`SceneConfig::validate`], then used to paint a grid and
//! render it.
//!
//! ```
//! use tileviz::{color::ColorTable, scene::{OutputFormat, SceneConfig}};
//!
//! let cfg = SceneConfig::default();
//! let mut out = vec![];
//! cfg.render(OutputFormat::Svg, &ColorTable::builtin(), &mut out)?;
//! let text = String::from_utf8(out).unwrap();
//! assert_eq!(text.matches("<circle").count(), 4 * 11 * 11);
//! # Ok::<(), tileviz::Error>(())
//! ```
use crate::{
    Error,
    color::ColorTable,
    grid::{CanvasGrid, Region, TimeRange},
    paint::{ColorMode, PaintOptions, Painter},
    render::{Page, PovRenderer, Renderer, SvgRenderer},
    tiling::{Domain, Tiling, TilingFamily},
};
use log::info;
use std::io::Write;

/// Vertical distance between consecutive time slices
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SliceSpacing {
    /// One full layer height, so that slices don't overlap
    Normal,
    /// Half of the cell radius, so that slices overlap like a deck of cards
    HalfRadius,
    /// Exact distance in pixels
    Exact(i64),
}

/// Output document type
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Flat SVG image
    #[default]
    Svg,
    /// POV-Ray scene
    Pov,
}

impl OutputFormat {
    /// Returns the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Pov => "pov",
        }
    }
}

/// Complete description of a visualization
#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Tiling family
    pub family: TilingFamily,
    /// Tile size
    pub tau: i64,
    /// Number of time steps `T`
    pub time_steps: usize,
    /// Spatial extent `N`; each axis covers `[0, N]`
    pub size: usize,
    /// First time slice to draw
    pub start: usize,
    /// Last time slice to draw (defaults to `time_steps`)
    pub end: Option<usize>,
    /// Distance between drawn slices
    pub slice_spacing: SliceSpacing,
    /// Distance between cell centers, in pixels
    pub cell_spacing: i64,
    /// Marker radius, in pixels
    pub cell_radius: i64,
    /// Color selection policy
    pub color: ColorMode,
    /// Palette step for [`ColorMode::Cycle`]
    pub color_step: i64,
    /// Labeling and filtering options
    pub paint: PaintOptions,
    /// Region to highlight in every drawn slice
    pub highlight: Option<Region>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            family: TilingFamily::Diamonds,
            tau: 15,
            time_steps: 4,
            size: 10,
            start: 1,
            end: None,
            slice_spacing: SliceSpacing::Normal,
            cell_spacing: 60,
            cell_radius: 20,
            color: ColorMode::Wave,
            color_step: 1,
            paint: PaintOptions::default(),
            highlight: None,
        }
    }
}

impl SceneConfig {
    /// Returns the range of time slices to draw
    pub fn active_range(&self) -> Result<TimeRange, Error> {
        let range =
            TimeRange::new(self.start, self.end.unwrap_or(self.time_steps))?;
        range.check(self.time_steps)?;
        Ok(range)
    }

    /// Returns the iteration domain `[1, T] × [0, N] × [0, N]`
    pub fn domain(&self) -> Result<Domain, Error> {
        Domain::square(self.time_steps as i64, self.size as i64)
    }

    /// Returns the distance between drawn slices, in pixels
    pub fn slice_spacing(&self) -> i64 {
        match self.slice_spacing {
            SliceSpacing::Normal => self.cell_spacing * (self.size as i64 + 1),
            SliceSpacing::HalfRadius => self.cell_radius / 2,
            SliceSpacing::Exact(p) => p,
        }
    }

    /// Checks every parameter, returning the first problem found
    pub fn validate(&self) -> Result<(), Error> {
        let tiling = self.family.build(self.tau)?;
        self.domain()?;
        self.active_range()?;
        if self.cell_spacing <= 0
            || self.cell_radius <= 0
            || self.slice_spacing() < 0
        {
            return Err(Error::BadSpacing);
        }
        if let Some(c) = &self.paint.only_tile {
            if c.len() != tiling.arity() {
                return Err(Error::BadTileArity(c.len(), tiling.arity()));
            }
        }
        if let Some(r) = self.highlight {
            if r.x2 > self.size || r.y2 > self.size {
                let n = self.size + 1;
                return Err(Error::RegionOutOfBounds(
                    r.x1, r.y1, r.x2, r.y2, n, n,
                ));
            }
        }
        Ok(())
    }

    /// Builds a file name that encodes every parameter
    ///
    /// For example, the default configuration is named
    /// `diamonds-15x15x15-T4N10-s1e4-p660c60r20l0f0-wave1-o0.svg`.  A
    /// highlight region adds `-h{x1}.{y1}.{x2}.{y2}` before the extension.
    pub fn file_name(&self, format: OutputFormat) -> String {
        let shape = vec![self.tau.to_string(); self.family.arity()].join("x");
        let mut out = format!(
            "{}-{shape}-T{}N{}-s{}e{}-p{}c{}r{}l{}f{}-{}{}-o{}",
            self.family,
            self.time_steps,
            self.size,
            self.start,
            self.end.unwrap_or(self.time_steps),
            self.slice_spacing(),
            self.cell_spacing,
            self.cell_radius,
            u8::from(self.paint.label),
            u8::from(self.paint.filter_labels),
            self.color,
            self.color_step,
            u8::from(self.paint.only_tile.is_some()),
        );
        if let Some(c) = &self.paint.only_tile {
            for v in c.as_slice() {
                out += &format!(".{v}");
            }
        }
        if let Some(r) = self.highlight {
            out += &format!("-h{}.{}.{}.{}", r.x1, r.y1, r.x2, r.y2);
        }
        out + "." + format.extension()
    }

    /// Builds the tiling for this configuration
    pub fn tiling(&self) -> Result<Box<dyn Tiling>, Error> {
        self.family.build(self.tau)
    }

    /// Traverses the iteration space, returning the painted grid
    pub fn paint(&self) -> Result<CanvasGrid, Error> {
        self.validate()?;
        let tiling = self.tiling()?;
        let domain = self.domain()?;
        let range = self.active_range()?;
        let n = self.size + 1;
        let mut grid =
            CanvasGrid::new(self.time_steps, n, n, self.slice_spacing(), range)?
                .with_cell_spacing(self.cell_spacing);
        if let Some(r) = self.highlight {
            for t in range.iter() {
                grid.set_highlight(t, r)?;
            }
        }
        let mut painter = Painter::new(
            tiling.as_ref(),
            self.color.policy(self.color_step),
            self.paint.clone(),
        )?;
        painter.paint(&mut grid, &domain);
        Ok(grid)
    }

    /// Returns the SVG page size needed to show every drawn slice
    pub fn page(&self) -> Result<Page, Error> {
        let range = self.active_range()?;
        let side = (self.size as i64 + 2) * self.cell_spacing;
        Ok(Page::new(
            side,
            side + (range.len() as i64 - 1) * self.slice_spacing(),
        ))
    }

    /// Paints the scene and writes it to `out` in the given format
    pub fn render<W: Write>(
        &self,
        format: OutputFormat,
        colors: &ColorTable,
        out: W,
    ) -> Result<(), Error> {
        let grid = self.paint()?;
        self.write(&grid, format, colors, out)
    }

    /// Writes a grid built by [`SceneConfig::paint`] to `out`
    ///
    /// The stream is flushed before returning.
    pub fn write<W: Write>(
        &self,
        grid: &CanvasGrid,
        format: OutputFormat,
        colors: &ColorTable,
        mut out: W,
    ) -> Result<(), Error> {
        let range = self.active_range()?;
        info!(
            "rendering {} slices of {}x{} cells as {format}",
            range.len(),
            grid.width(),
            grid.height()
        );
        match format {
            OutputFormat::Svg => {
                let radius = self.cell_radius as u32;
                let mut r =
                    SvgRenderer::new(&mut out, colors, self.page()?, radius);
                draw(grid, &mut r, range)?;
            }
            OutputFormat::Pov => {
                let mut r = PovRenderer::new(&mut out, colors);
                draw(grid, &mut r, range)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn draw<R: Renderer>(
    grid: &CanvasGrid,
    out: &mut R,
    range: TimeRange,
) -> Result<(), Error> {
    out.header()?;
    grid.render(out, range)?;
    out.footer()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tiling::TileCoord;

    fn render(cfg: &SceneConfig, format: OutputFormat) -> String {
        let mut out = vec![];
        cfg.render(format, &ColorTable::builtin(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn default_svg() {
        let cfg = SceneConfig::default();
        let text = render(&cfg, OutputFormat::Svg);
        assert_eq!(text.matches("<circle").count(), 484);
        assert_eq!(text.matches("<rect").count(), 0);
        assert_eq!(text.matches("<text").count(), 0);
        assert!(text.contains(r#"height="2700px" width="720px""#));

        // Every wave color shows up, and nothing is left unpainted
        for c in ["rgb(255, 0, 0)", "rgb(255, 255, 0)", "rgb(0, 128, 0)"] {
            assert!(text.contains(c), "missing {c}");
        }
        assert!(!text.contains("rgb(255, 255, 255)"));
    }

    #[test]
    fn labels_and_highlight() {
        let cfg = SceneConfig {
            start: 2,
            end: Some(3),
            paint: PaintOptions {
                label: true,
                ..Default::default()
            },
            highlight: Some("1,1,3,2".parse().unwrap()),
            ..Default::default()
        };
        let text = render(&cfg, OutputFormat::Svg);
        assert_eq!(text.matches("<circle").count(), 242);
        assert_eq!(text.matches("<text").count(), 242);
        assert_eq!(text.matches("<rect").count(), 2);
    }

    #[test]
    fn pov_scene() {
        let cfg = SceneConfig {
            start: 4,
            ..Default::default()
        };
        let text = render(&cfg, OutputFormat::Pov);
        assert_eq!(text.matches("\n sphere {").count(), 121);
        assert!(text.ends_with("// End of the povray file\n"));
    }

    #[test]
    fn pov_single_tile() {
        let cfg = SceneConfig {
            paint: PaintOptions {
                only_tile: Some(TileCoord::new3(-1, 0, -1)),
                ..Default::default()
            },
            ..Default::default()
        };
        let text = render(&cfg, OutputFormat::Pov);
        let yellow = text.matches("color <1.0000, 1.0000, 0.0000>").count();
        let white = text.matches("color <1.0000, 1.0000, 1.0000>").count();
        assert_eq!(text.matches("\n sphere {").count(), 484);
        assert_eq!(yellow, 430);
        assert_eq!(white, 484 - 430);
    }

    #[test]
    fn file_names() {
        let cfg = SceneConfig::default();
        assert_eq!(
            cfg.file_name(OutputFormat::Svg),
            "diamonds-15x15x15-T4N10-s1e4-p660c60r20l0f0-wave1-o0.svg"
        );
        let cfg = SceneConfig {
            family: TilingFamily::DiamondPrisms,
            tau: 4,
            slice_spacing: SliceSpacing::HalfRadius,
            color: ColorMode::Cycle,
            color_step: 3,
            paint: PaintOptions {
                label: true,
                filter_labels: false,
                only_tile: Some(TileCoord::new2(1, -1)),
            },
            ..Default::default()
        };
        assert_eq!(
            cfg.file_name(OutputFormat::Pov),
            "diamond-prisms-4x4-T4N10-s1e4-p10c60r20l1f0-cycle3-o1.1.-1.pov"
        );

        let filtered = SceneConfig {
            paint: PaintOptions {
                filter_labels: true,
                ..cfg.paint.clone()
            },
            ..cfg.clone()
        };
        assert_eq!(
            filtered.file_name(OutputFormat::Pov),
            "diamond-prisms-4x4-T4N10-s1e4-p10c60r20l1f1-cycle3-o1.1.-1.pov"
        );

        let highlighted = SceneConfig {
            highlight: Some("1,1,3,2".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(
            highlighted.file_name(OutputFormat::Svg),
            "diamonds-15x15x15-T4N10-s1e4-p660c60r20l0f0-wave1-o0-h1.1.3.2.svg"
        );
        assert_ne!(
            highlighted.file_name(OutputFormat::Svg),
            SceneConfig::default().file_name(OutputFormat::Svg)
        );
    }

    #[test]
    fn spacing() {
        let mut cfg = SceneConfig::default();
        assert_eq!(cfg.slice_spacing(), 660);
        cfg.slice_spacing = SliceSpacing::HalfRadius;
        assert_eq!(cfg.slice_spacing(), 10);
        cfg.slice_spacing = SliceSpacing::Exact(123);
        assert_eq!(cfg.slice_spacing(), 123);
        assert_eq!(cfg.page().unwrap(), Page::new(720, 720 + 3 * 123));
    }

    #[test]
    fn bad_configs() {
        let bad = |cfg: SceneConfig| cfg.validate().unwrap_err();
        assert!(matches!(
            bad(SceneConfig {
                tau: 10,
                ..Default::default()
            }),
            Error::BadTileSize(10, 3)
        ));
        assert!(matches!(
            bad(SceneConfig {
                start: 3,
                end: Some(2),
                ..Default::default()
            }),
            Error::BadActiveRange(3, 2)
        ));
        assert!(matches!(
            bad(SceneConfig {
                end: Some(5),
                ..Default::default()
            }),
            Error::ActiveRangeOutOfBounds(1, 5, 4)
        ));
        assert!(matches!(
            bad(SceneConfig {
                time_steps: 0,
                ..Default::default()
            }),
            Error::BadTimeSteps
        ));
        assert!(matches!(
            bad(SceneConfig {
                cell_spacing: 0,
                ..Default::default()
            }),
            Error::BadSpacing
        ));
        assert!(matches!(
            bad(SceneConfig {
                paint: PaintOptions {
                    only_tile: Some(TileCoord::new2(0, 0)),
                    ..Default::default()
                },
                ..Default::default()
            }),
            Error::BadTileArity(2, 3)
        ));
        assert!(matches!(
            bad(SceneConfig {
                highlight: Some("0,0,11,0".parse().unwrap()),
                ..Default::default()
            }),
            Error::RegionOutOfBounds(0, 0, 11, 0, 11, 11)
        ));

        // Nothing is written when validation fails
        let mut out = vec![];
        let cfg = SceneConfig {
            tau: 4,
            ..Default::default()
        };
        let colors = ColorTable::builtin();
        let r = cfg.render(OutputFormat::Svg, &colors, &mut out);
        assert!(matches!(r, Err(Error::BadTileSize(4, 3))));
        assert!(out.is_empty());
    }
}
