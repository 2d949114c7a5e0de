//! Tileviz draws tiled iteration spaces.
//!
//! An **iteration space** is the set of points `(t, i, j)` visited by a loop
//! nest: one time index and two spatial indices.  A **tiling** partitions that
//! space into tiles, which are grouped into **wavefronts** of tiles that may
//! run concurrently.  Diamond tiling, where tiles are diamonds (or octahedra)
//! in the skewed `(t, i, j)` space, is the main subject here.
//!
//! Tileviz walks every point of the space in tile order, picks a color (and
//! optionally a label) from the point's tile coordinate, then draws each time
//! step as a 2D slice of markers.  Slices are stacked down an SVG page, or
//! placed along one axis of a POV-Ray scene.
//!
//! # Traversal
//! Tilings implement the [`Tiling`](crate::tiling::Tiling) trait, and are
//! built by name through [`TilingFamily`](crate::tiling::TilingFamily):
//! ```
//! use tileviz::tiling::{Domain, Point, TilingFamily};
//!
//! let tiling = TilingFamily::Diamonds.build(6)?;
//! let tile = tiling.tile_of(Point::new(1, 0, 0));
//! assert_eq!(tile.to_string(), "0,0,0");
//!
//! let domain = Domain::square(2, 3)?;
//! let mut n = 0;
//! tiling.traverse(&domain, &mut |_p, _tile| n += 1);
//! assert_eq!(n, 2 * 4 * 4);
//! # Ok::<(), tileviz::Error>(())
//! ```
//!
//! # Painting and rendering
//! A [`Painter`](crate::paint::Painter) writes colors and labels into a
//! [`CanvasGrid`](crate::grid::CanvasGrid), which is then drawn by any
//! [`Renderer`](crate::render::Renderer).  Most users will want to go through
//! a [`SceneConfig`](crate::scene::SceneConfig), which does all of this in
//! one call:
//! ```
//! use tileviz::{color::ColorTable, scene::{OutputFormat, SceneConfig}};
//!
//! let cfg = SceneConfig {
//!     time_steps: 2,
//!     size: 4,
//!     ..Default::default()
//! };
//! let mut out = vec![];
//! cfg.render(OutputFormat::Pov, &ColorTable::builtin(), &mut out)?;
//! # Ok::<(), tileviz::Error>(())
//! ```
#![warn(missing_docs)]

mod error;
pub use error::Error;

pub mod color;
pub mod grid;
pub mod paint;
pub mod render;
pub mod scene;
pub mod tiling;
