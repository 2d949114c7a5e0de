//! Module containing the universal error type
use std::path::PathBuf;
use thiserror::Error;

/// Universal error type for `tileviz`
#[derive(Error, Debug)]
pub enum Error {
    /// Tile size does not meet the tiling's divisibility requirement
    #[error("bad tile size {0}; must be a positive multiple of {1}")]
    BadTileSize(i64, i64),

    /// Tile size is below the tiling's minimum
    #[error("bad tile size {0}; must be at least {1}")]
    TileTooSmall(i64, i64),

    /// Number of time steps must be positive
    #[error("number of time steps must be at least 1")]
    BadTimeSteps,

    /// Spatial bounds are inverted
    #[error("bad spatial bounds; lower bound {0} is above upper bound {1}")]
    BadSpatialBounds(i64, i64),

    /// Active time range is inverted
    #[error("bad time range; start ({0}) is after end ({1})")]
    BadActiveRange(usize, usize),

    /// Active time range does not fit within the grid's layers
    #[error("time range [{0}, {1}] is outside of [1, {2}]")]
    ActiveRangeOutOfBounds(usize, usize, usize),

    /// Cell spacing must be positive
    #[error("cell spacing must be positive")]
    BadSpacing,

    /// Tile coordinate arity does not match the tiling
    #[error("tile coordinate has {0} components, but the tiling uses {1}")]
    BadTileArity(usize, usize),

    /// Tile coordinate text could not be parsed
    #[error("bad tile coordinate `{0}`; expected 2 or 3 comma-separated integers")]
    BadTileCoord(String),

    /// Highlight region text could not be parsed
    #[error("bad region `{0}`; expected `x1,y1,x2,y2` with x1 <= x2, y1 <= y2")]
    BadRegion(String),

    /// Highlight region extends past the grid
    #[error("region ({0}, {1}) - ({2}, {3}) does not fit in a {4}x{5} grid")]
    RegionOutOfBounds(usize, usize, usize, usize, usize, usize),

    /// Unknown tiling family name
    #[error("unknown tiling family `{0}`")]
    UnknownTiling(String),

    /// Color table entry could not be parsed
    #[error("bad color table entry for `{0}`: `{1}`")]
    BadColorEntry(String, String),

    /// Color table file could not be read
    #[error("could not read color table {path:?}")]
    ColorTable {
        /// Path that we tried to read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// IO error; see inner code for details
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
