//! Tile coordinate to color and label mapping
//!
//! A [`Painter`] walks a [`Tiling`] and writes each point's color (chosen by a
//! [`ColorPolicy`]) and optional label into a [`CanvasGrid`].
use crate::{
    Error,
    grid::CanvasGrid,
    tiling::{Domain, TileCoord, Tiling},
};
use log::{debug, info};

/// Palette used when cycling through colors
pub const PALETTE: [&str; 17] = [
    "red",
    "yellow",
    "green",
    "lime",
    "aqua",
    "blue",
    "fuchsia",
    "silver",
    "bisque",
    "coral",
    "lavender",
    "pink",
    "powderblue",
    "plum",
    "palegreen",
    "teal",
    "navy",
];

/// One color per wavefront, repeating every three wavefronts
pub const WAVE_COLORS: [&str; 3] = ["red", "yellow", "green"];

/// Palette indexed by tile hash
pub const HASH_PALETTE: [&str; 11] = [
    "red", "yellow", "green", "lime", "teal", "aqua", "blue", "fuchsia",
    "grey", "silver", "white",
];

/// Strategy for picking a tile's fill color
pub trait ColorPolicy {
    /// Returns a color name for a point in the given tile
    ///
    /// This is called once per painted point, in traversal order.
    fn color(&mut self, tile: &TileCoord, wave: i64) -> &'static str;

    /// Clears any state accumulated by previous calls
    fn reset(&mut self) {}
}

/// Colors each tile by its wavefront
///
/// Wavefronts `-2`, `-1`, and `0` are red, yellow, and green; the pattern
/// repeats in both directions.
#[derive(Copy, Clone, Debug, Default)]
pub struct WaveColors;

impl ColorPolicy for WaveColors {
    fn color(&mut self, _tile: &TileCoord, wave: i64) -> &'static str {
        WAVE_COLORS[(wave + 2).rem_euclid(3) as usize]
    }
}

/// Advances through [`PALETTE`] each time the tile changes
///
/// Unlike the other policies, the result depends on visit order: the color is
/// bumped by `step` whenever the tile differs from that of the previous call.
#[derive(Clone, Debug)]
pub struct PaletteCycle {
    last: Option<TileCoord>,
    count: i64,
    step: i64,
}

impl PaletteCycle {
    /// Builds a new cycle, which advances by `step` colors per tile
    pub fn new(step: i64) -> Self {
        Self {
            last: None,
            count: -1,
            step,
        }
    }
}

impl ColorPolicy for PaletteCycle {
    fn color(&mut self, tile: &TileCoord, _wave: i64) -> &'static str {
        if self.last.as_ref() != Some(tile) {
            self.last = Some(tile.clone());
            self.count += self.step;
        }
        PALETTE[self.count.rem_euclid(PALETTE.len() as i64) as usize]
    }

    fn reset(&mut self) {
        self.last = None;
        self.count = -1;
    }
}

/// Colors each tile by a hash of its coordinate
#[derive(Copy, Clone, Debug, Default)]
pub struct TileHash;

impl TileHash {
    /// Folds a coordinate into a tile id, base 5
    ///
    /// Every component but the last is offset by 4 first, so that
    /// `(a, b, c)` maps to `(a + 4)·25 + (b + 4)·5 + c`.
    pub fn tile_id(tile: &TileCoord) -> i64 {
        match tile.as_slice().split_last() {
            Some((last, rest)) => {
                rest.iter().fold(0, |acc, c| (acc + c + 4) * 5) + last
            }
            None => 0,
        }
    }
}

impl ColorPolicy for TileHash {
    fn color(&mut self, tile: &TileCoord, _wave: i64) -> &'static str {
        let id = Self::tile_id(tile);
        HASH_PALETTE[id.rem_euclid(HASH_PALETTE.len() as i64) as usize]
    }
}

/// Selects a [`ColorPolicy`] by name
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
#[strum(serialize_all = "kebab-case")]
pub enum ColorMode {
    /// [`WaveColors`]
    #[default]
    Wave,
    /// [`PaletteCycle`]
    Cycle,
    /// [`TileHash`]
    Hash,
}

impl ColorMode {
    /// Builds the policy; `step` is only used by [`ColorMode::Cycle`]
    pub fn policy(&self, step: i64) -> Box<dyn ColorPolicy> {
        match self {
            Self::Wave => Box::new(WaveColors),
            Self::Cycle => Box::new(PaletteCycle::new(step)),
            Self::Hash => Box::new(TileHash),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Options controlling which points are painted and labeled
#[derive(Clone, Debug, Default)]
pub struct PaintOptions {
    /// Label each point with its tile coordinate
    pub label: bool,
    /// Only label points in `only_tile` (when it's set)
    pub filter_labels: bool,
    /// Only fill points in this tile
    pub only_tile: Option<TileCoord>,
}

/// Writes tile colors and labels into a grid
pub struct Painter<'a> {
    tiling: &'a dyn Tiling,
    policy: Box<dyn ColorPolicy>,
    options: PaintOptions,
}

impl<'a> Painter<'a> {
    /// Builds a new painter
    ///
    /// Returns an error if `options.only_tile` has the wrong number of
    /// components for the tiling.
    pub fn new(
        tiling: &'a dyn Tiling,
        policy: Box<dyn ColorPolicy>,
        options: PaintOptions,
    ) -> Result<Self, Error> {
        if let Some(c) = &options.only_tile {
            if c.len() != tiling.arity() {
                return Err(Error::BadTileArity(c.len(), tiling.arity()));
            }
        }
        Ok(Self {
            tiling,
            policy,
            options,
        })
    }

    /// Paints every point of `domain` into `grid`, returning the number of
    /// points visited
    ///
    /// Point `(t, i, j)` lands in layer `t`, at column `i - li` and row
    /// `j - lj`.
    ///
    /// # Panics
    /// If the grid is too small for the domain
    pub fn paint(&mut self, grid: &mut CanvasGrid, domain: &Domain) -> usize {
        let (li, ui) = domain.i_bounds();
        let (lj, uj) = domain.j_bounds();
        assert!(
            grid.layers() as i64 >= domain.time_steps()
                && grid.width() as i64 > ui - li
                && grid.height() as i64 > uj - lj,
            "grid is too small for {domain:?}"
        );
        self.policy.reset();

        let mut count = 0;
        let mut painted = 0;
        let tiling = self.tiling;
        let opts = &self.options;
        let policy = &mut self.policy;
        tiling.traverse(domain, &mut |p, tile| {
            debug!("tile {tile}; point {}, {}, {}", p.t, p.i, p.j);
            let (t, x, y) =
                (p.t as usize, (p.i - li) as usize, (p.j - lj) as usize);
            let selected = opts.only_tile.as_ref().is_none_or(|c| c == tile);
            if opts.label && (!opts.filter_labels || selected) {
                grid.set_label(t, x, y, tile.to_string());
            }
            if selected {
                let wave = tiling.wavefront(tile);
                grid.set_fill(t, x, y, policy.color(tile, wave));
                painted += 1;
            }
            count += 1;
        });
        info!("visited {count} points, filled {painted}");
        count
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        grid::{Cell, TimeRange},
        tiling::{Point, TilingFamily},
    };

    use std::collections::{HashMap, HashSet};

    fn grid(n: usize, t: usize) -> CanvasGrid {
        let range = TimeRange::new(1, t).unwrap();
        CanvasGrid::new(t, n + 1, n + 1, 10, range).unwrap()
    }

    #[test]
    fn wave_colors() {
        let mut p = WaveColors;
        let c = TileCoord::new3(0, 0, 0);
        assert_eq!(p.color(&c, -2), "red");
        assert_eq!(p.color(&c, -1), "yellow");
        assert_eq!(p.color(&c, 0), "green");
        assert_eq!(p.color(&c, 1), "red");
        assert_eq!(p.color(&c, -5), "red");
    }

    #[test]
    fn hash_colors() {
        assert_eq!(TileHash::tile_id(&TileCoord::new3(0, 0, 0)), 120);
        assert_eq!(TileHash::tile_id(&TileCoord::new3(-1, 0, 2)), 97);
        assert_eq!(TileHash::tile_id(&TileCoord::new2(1, -1)), 24);
        let mut h = TileHash;
        assert_eq!(h.color(&TileCoord::new3(0, 0, 0), 0), "white");
        assert_eq!(h.color(&TileCoord::new3(-4, -4, 2), 0), "green");
        assert_eq!(h.color(&TileCoord::new3(-4, -4, -1), 0), "white");
    }

    #[test]
    fn cycle_advances_on_change() {
        let mut p = PaletteCycle::new(2);
        let a = TileCoord::new3(0, 0, 0);
        let b = TileCoord::new3(0, 1, 0);
        let colors = [&a, &a, &b, &b, &a]
            .into_iter()
            .map(|c| p.color(c, 0))
            .collect::<Vec<_>>();
        assert_eq!(colors, ["yellow", "yellow", "lime", "lime", "blue"]);

        p.reset();
        assert_eq!(p.color(&b, 0), "yellow");

        let mut p = PaletteCycle::new(0);
        assert_eq!(p.color(&a, 0), "navy");
        assert_eq!(p.color(&b, 0), "navy");
    }

    #[test]
    fn pure_policies_ignore_order() {
        let tiling = TilingFamily::Diamonds.build(6).unwrap();
        let domain = Domain::square(4, 8).unwrap();
        for mode in [ColorMode::Wave, ColorMode::Hash] {
            let mut g = grid(8, 4);
            let mut p = Painter::new(
                tiling.as_ref(),
                mode.policy(1),
                PaintOptions::default(),
            )
            .unwrap();
            p.paint(&mut g, &domain);

            let mut policy = mode.policy(1);
            for (t, x, y, cell) in g.iter() {
                let pt = Point::new(t as i64, x as i64, y as i64);
                let tile = tiling.tile_of(pt);
                let c = policy.color(&tile, tiling.wavefront(&tile));
                assert_eq!(cell.fill, c, "{mode} at {pt:?}");
            }
        }
    }

    #[test]
    fn repaint_is_deterministic() {
        let tiling = TilingFamily::Pipelined.build(3).unwrap();
        let domain = Domain::square(5, 6).unwrap();
        let mut p = Painter::new(
            tiling.as_ref(),
            ColorMode::Cycle.policy(1),
            PaintOptions::default(),
        )
        .unwrap();
        let (mut a, mut b) = (grid(6, 5), grid(6, 5));
        assert_eq!(p.paint(&mut a, &domain), 5 * 7 * 7);
        p.paint(&mut b, &domain);
        assert!(a.iter().zip(b.iter()).all(|(a, b)| a == b));
    }

    #[test]
    fn cycle_colors_whole_tiles() {
        let tiling = TilingFamily::Diamonds.build(6).unwrap();
        let domain = Domain::square(4, 10).unwrap();
        let mut g = grid(10, 4);
        let mut p = Painter::new(
            tiling.as_ref(),
            ColorMode::Cycle.policy(1),
            PaintOptions::default(),
        )
        .unwrap();
        p.paint(&mut g, &domain);

        let mut fills: HashMap<TileCoord, HashSet<String>> = HashMap::new();
        for (t, x, y, cell) in g.iter() {
            let pt = Point::new(t as i64, x as i64, y as i64);
            fills
                .entry(tiling.tile_of(pt))
                .or_default()
                .insert(cell.fill.clone());
        }
        assert!(fills.len() > 1);
        for (tile, colors) in &fills {
            assert_eq!(colors.len(), 1, "tile {tile} has colors {colors:?}");
        }
    }

    #[test]
    fn single_tile() {
        let tiling = TilingFamily::Diamonds.build(15).unwrap();
        let domain = Domain::square(4, 10).unwrap();
        let target = TileCoord::new3(-1, 0, -1);
        for filter_labels in [false, true] {
            let mut g = grid(10, 4);
            let options = PaintOptions {
                label: true,
                filter_labels,
                only_tile: Some(target.clone()),
            };
            let mut p =
                Painter::new(tiling.as_ref(), Box::new(WaveColors), options)
                    .unwrap();
            p.paint(&mut g, &domain);

            let mut inside = 0;
            for (t, x, y, cell) in g.iter() {
                let pt = Point::new(t as i64, x as i64, y as i64);
                if tiling.tile_of(pt) == target {
                    inside += 1;
                    assert_eq!(cell.fill, "yellow");
                    assert_eq!(cell.label, "-1,0,-1");
                } else {
                    assert_eq!(cell.fill, Cell::default().fill);
                    if filter_labels {
                        assert_eq!(cell.label, "");
                    } else {
                        assert_ne!(cell.label, "");
                    }
                }
            }
            assert!(inside > 0);
        }
    }

    #[test]
    fn no_labels_by_default() {
        let tiling = TilingFamily::DiamondPrisms.build(4).unwrap();
        let domain = Domain::square(3, 5).unwrap();
        let mut g = grid(5, 3);
        let mut p = Painter::new(
            tiling.as_ref(),
            Box::new(WaveColors),
            PaintOptions::default(),
        )
        .unwrap();
        p.paint(&mut g, &domain);
        assert!(g.iter().all(|(_, _, _, c)| c.label.is_empty()));
        assert!(g.iter().all(|(_, _, _, c)| c.fill != "white"));
    }

    #[test]
    fn wrong_arity() {
        let tiling = TilingFamily::DiamondPrisms.build(4).unwrap();
        let options = PaintOptions {
            only_tile: Some(TileCoord::new3(0, 0, 0)),
            ..Default::default()
        };
        assert!(matches!(
            Painter::new(tiling.as_ref(), Box::new(TileHash), options),
            Err(Error::BadTileArity(3, 2))
        ));
    }
}
