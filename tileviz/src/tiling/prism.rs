use super::{Domain, Point, TileCoord, Tiling, ceil_div, check_tau, floor_div};
use crate::Error;

/// 2D diamond tiling over `(t, i)`, extruded along `j`
///
/// ```text
/// k1 = ⌊(t + i) / τ⌋
/// k2 = ⌊(t - i) / τ⌋
/// ```
///
/// Each tile is a prism holding every `j` in the domain.  Tiles on the same
/// wavefront `k1 + k2` are independent.
#[derive(Copy, Clone, Debug)]
pub struct DiamondPrisms {
    tau: i64,
}

impl DiamondPrisms {
    /// Builds a new prism tiling; `tau` must be a positive even number
    pub fn new(tau: i64) -> Result<Self, Error> {
        check_tau(tau, 2, 2)?;
        Ok(Self { tau })
    }
}

impl Tiling for DiamondPrisms {
    fn tau(&self) -> i64 {
        self.tau
    }

    fn arity(&self) -> usize {
        2
    }

    fn tile_of(&self, p: Point) -> TileCoord {
        let tau = self.tau;
        TileCoord::new2(floor_div(p.t + p.i, tau), floor_div(p.t - p.i, tau))
    }

    fn wavefront(&self, tile: &TileCoord) -> i64 {
        tile.as_slice().iter().sum()
    }

    fn traverse(&self, domain: &Domain, f: &mut dyn FnMut(Point, &TileCoord)) {
        let tau = self.tau;
        let time_steps = domain.time_steps();
        let (li, ui) = domain.i_bounds();
        let (lj, uj) = domain.j_bounds();

        for w in ceil_div(4 - 2 * tau, tau)..=floor_div(2 * time_steps, tau) {
            let k1_lo = ceil_div(2 * li + 1 + (w - 1) * tau, 2 * tau);
            let k1_hi = floor_div(2 * ui - 1 + (w + 1) * tau, 2 * tau);
            let t_lo = ceil_div(w * tau, 2).max(1);
            let t_hi = floor_div((w + 2) * tau - 2, 2).min(time_steps);
            for k1 in k1_lo..=k1_hi {
                let k2 = w - k1;
                let tile = TileCoord::new2(k1, k2);
                for t in t_lo..=t_hi {
                    let i_lo = li.max(k1 * tau - t).max(t - (k2 + 1) * tau + 1);
                    let i_hi = ui.min((k1 + 1) * tau - 1 - t).min(t - k2 * tau);
                    for i in i_lo..=i_hi {
                        for j in lj..=uj {
                            f(Point::new(t, i, j), &tile);
                        }
                    }
                }
            }
        }
    }
}
