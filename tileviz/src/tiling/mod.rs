//! Tile traversal engine
//!
//! A [`Tiling`] walks every point of a [`Domain`] exactly once, reporting each
//! point along with the coordinate of the tile that owns it.  Points are
//! visited in schedule order: tiles on earlier wavefronts come first.
//!
//! Three strategies are provided, selected by [`TilingFamily`]:
//!
//! - [`Diamonds`]: 3D diamond tiles over `(t, i, j)`
//! - [`Pipelined`]: time-blocked, skewed rectangular tiles
//! - [`DiamondPrisms`]: 2D diamonds over `(t, i)`, extruded along `j`
//!
//! ```
//! use tileviz::tiling::{Domain, TilingFamily};
//!
//! let tiling = TilingFamily::Diamonds.build(3)?;
//! let domain = Domain::square(4, 5)?;
//! let mut count = 0;
//! tiling.traverse(&domain, &mut |p, tile| {
//!     assert_eq!(tiling.tile_of(p), *tile);
//!     count += 1;
//! });
//! assert_eq!(count, domain.len());
//! # Ok::<(), tileviz::Error>(())
//! ```
use crate::Error;
use arrayvec::ArrayVec;

mod diamond;
mod pipelined;
mod prism;

pub use diamond::Diamonds;
pub use pipelined::Pipelined;
pub use prism::DiamondPrisms;

/// Floor division for a positive divisor
pub(crate) fn floor_div(a: i64, b: i64) -> i64 {
    debug_assert!(b > 0);
    a.div_euclid(b)
}

/// Ceiling division for a positive divisor
pub(crate) fn ceil_div(a: i64, b: i64) -> i64 {
    -floor_div(-a, b)
}

////////////////////////////////////////////////////////////////////////////////

/// Coordinate of a tile, with 2 or 3 components
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileCoord(ArrayVec<i64, 3>);

impl TileCoord {
    /// Builds a 3-component coordinate
    pub fn new3(a: i64, b: i64, c: i64) -> Self {
        Self(ArrayVec::from([a, b, c]))
    }

    /// Builds a 2-component coordinate
    pub fn new2(a: i64, b: i64) -> Self {
        let mut out = ArrayVec::new();
        out.push(a);
        out.push(b);
        Self(out)
    }

    /// Returns the number of components
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; coordinates have at least two components
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrows the components as a slice
    pub fn as_slice(&self) -> &[i64] {
        self.0.as_slice()
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (n, v) in self.0.iter().enumerate() {
            if n > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for TileCoord {
    type Err = Error;

    /// Parses a coordinate from `a,b` or `a,b,c` text
    fn from_str(s: &str) -> Result<Self, Error> {
        let err = || Error::BadTileCoord(s.to_owned());
        let mut out = ArrayVec::new();
        for c in s.split(',') {
            let v = c.trim().parse::<i64>().map_err(|_| err())?;
            out.try_push(v).map_err(|_| err())?;
        }
        if out.len() < 2 {
            return Err(err());
        }
        Ok(Self(out))
    }
}

/// Single point in the iteration space
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    /// Time step (1-based)
    pub t: i64,
    /// First spatial index
    pub i: i64,
    /// Second spatial index
    pub j: i64,
}

impl Point {
    /// Builds a new point
    pub fn new(t: i64, i: i64, j: i64) -> Self {
        Self { t, i, j }
    }
}

/// Iteration domain `[1, T] × [li, ui] × [lj, uj]`, inclusive
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Domain {
    time_steps: i64,
    li: i64,
    ui: i64,
    lj: i64,
    uj: i64,
}

impl Domain {
    /// Builds a new domain, checking that every axis is non-empty
    pub fn new(
        time_steps: i64,
        (li, ui): (i64, i64),
        (lj, uj): (i64, i64),
    ) -> Result<Self, Error> {
        if time_steps < 1 {
            Err(Error::BadTimeSteps)
        } else if li > ui {
            Err(Error::BadSpatialBounds(li, ui))
        } else if lj > uj {
            Err(Error::BadSpatialBounds(lj, uj))
        } else {
            Ok(Self {
                time_steps,
                li,
                ui,
                lj,
                uj,
            })
        }
    }

    /// Builds the domain `[1, T] × [0, n] × [0, n]`
    pub fn square(time_steps: i64, n: i64) -> Result<Self, Error> {
        Self::new(time_steps, (0, n), (0, n))
    }

    /// Number of time steps
    pub fn time_steps(&self) -> i64 {
        self.time_steps
    }

    /// Inclusive bounds of the `i` axis
    pub fn i_bounds(&self) -> (i64, i64) {
        (self.li, self.ui)
    }

    /// Inclusive bounds of the `j` axis
    pub fn j_bounds(&self) -> (i64, i64) {
        (self.lj, self.uj)
    }

    /// Checks whether the given point lies within the domain
    pub fn contains(&self, p: Point) -> bool {
        (1..=self.time_steps).contains(&p.t)
            && (self.li..=self.ui).contains(&p.i)
            && (self.lj..=self.uj).contains(&p.j)
    }

    /// Returns the number of points in the domain
    pub fn len(&self) -> usize {
        (self.time_steps * (self.ui - self.li + 1) * (self.uj - self.lj + 1))
            as usize
    }

    /// Always false; domains contain at least one point
    pub fn is_empty(&self) -> bool {
        false
    }
}

////////////////////////////////////////////////////////////////////////////////

/// A strategy for partitioning and walking an iteration space
pub trait Tiling {
    /// Returns the tile size
    fn tau(&self) -> i64;

    /// Returns the number of components in this tiling's coordinates
    fn arity(&self) -> usize;

    /// Returns the coordinate of the tile containing the given point
    fn tile_of(&self, p: Point) -> TileCoord;

    /// Returns the wavefront of a tile
    ///
    /// Tiles on the same wavefront are independent of each other.
    fn wavefront(&self, tile: &TileCoord) -> i64;

    /// Visits every point of the domain exactly once, in tile order
    fn traverse(&self, domain: &Domain, f: &mut dyn FnMut(Point, &TileCoord));
}

/// Family of tilings, selectable by name
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
pub enum TilingFamily {
    /// 3D diamond tiles
    #[default]
    Diamonds,
    /// Time-blocked skewed rectangles
    Pipelined,
    /// 2D diamonds extruded along `j`
    DiamondPrisms,
}

impl TilingFamily {
    /// Builds a tiling of this family with the given tile size
    pub fn build(&self, tau: i64) -> Result<Box<dyn Tiling>, Error> {
        Ok(match self {
            Self::Diamonds => Box::new(Diamonds::new(tau)?),
            Self::Pipelined => Box::new(Pipelined::new(tau)?),
            Self::DiamondPrisms => Box::new(DiamondPrisms::new(tau)?),
        })
    }

    /// Returns the number of components in this family's coordinates
    pub fn arity(&self) -> usize {
        match self {
            Self::Diamonds | Self::Pipelined => 3,
            Self::DiamondPrisms => 2,
        }
    }

    /// Looks up a family by name, e.g. `"diamond-prisms"`
    pub fn from_name(name: &str) -> Result<Self, Error> {
        name.parse()
            .map_err(|_| Error::UnknownTiling(name.to_owned()))
    }
}

/// Checks that `tau` is at least `min` and a multiple of `step`
pub(crate) fn check_tau(tau: i64, min: i64, step: i64) -> Result<(), Error> {
    if tau < min {
        Err(Error::TileTooSmall(tau, min))
    } else if tau % step != 0 {
        Err(Error::BadTileSize(tau, step))
    } else {
        Ok(())
    }
}
