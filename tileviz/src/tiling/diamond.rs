use super::{Domain, Point, TileCoord, Tiling, ceil_div, check_tau, floor_div};
use crate::Error;

/// 3D diamond tiling over `(t, i, j)`
///
/// Space is cut by three families of planes, `i + t`, `j + t`, and
/// `t - i - j`, each `τ` apart.  A point belongs to tile `(kt, k1, k2)` where
///
/// ```text
/// k1 = ⌊(j + t) / τ⌋
/// k2 = ⌊(t - i - j) / τ⌋
/// kt = ⌊(i + t) / τ⌋ + k1 + k2
/// ```
///
/// `kt` is the tile's wavefront; tiles sharing a `kt` may run concurrently.
/// Tiles are visited wavefront by wavefront, and each tile's points are
/// visited together, time step by time step.
#[derive(Copy, Clone, Debug)]
pub struct Diamonds {
    tau: i64,
}

impl Diamonds {
    /// Builds a new diamond tiling
    ///
    /// `tau` must be a positive multiple of 3.
    pub fn new(tau: i64) -> Result<Self, Error> {
        check_tau(tau, 3, 3)?;
        Ok(Self { tau })
    }
}

impl Tiling for Diamonds {
    fn tau(&self) -> i64 {
        self.tau
    }

    fn arity(&self) -> usize {
        3
    }

    fn tile_of(&self, p: Point) -> TileCoord {
        let tau = self.tau;
        let a = floor_div(p.i + p.t, tau);
        let k1 = floor_div(p.j + p.t, tau);
        let k2 = floor_div(p.t - p.i - p.j, tau);
        TileCoord::new3(a + k1 + k2, k1, k2)
    }

    fn wavefront(&self, tile: &TileCoord) -> i64 {
        tile.as_slice()[0]
    }

    fn traverse(&self, domain: &Domain, f: &mut dyn FnMut(Point, &TileCoord)) {
        let tau = self.tau;
        let time_steps = domain.time_steps();
        let (li, ui) = domain.i_bounds();
        let (lj, uj) = domain.j_bounds();

        for kt in ceil_div(6 - 3 * tau, tau)..=floor_div(3 * time_steps, tau) {
            let t_lo = ceil_div(kt * tau, 3).max(1);
            let t_hi = floor_div((kt + 3) * tau - 3, 3).min(time_steps);
            if t_lo > t_hi {
                continue;
            }
            let k1_lo = ceil_div(3 * lj + 2 + (kt - 2) * tau, 3 * tau);
            let k1_hi = floor_div(3 * uj + (kt + 2) * tau - 2, 3 * tau);
            // Skewed coordinate s = k1 + k2
            let s_lo = ceil_div((2 * kt - 2) * tau + 2 - 3 * ui, 3 * tau);
            let s_hi = floor_div((2 * kt + 2) * tau - 2 - 3 * li, 3 * tau);
            for k1 in k1_lo..=k1_hi {
                for s in s_lo..=s_hi {
                    let k2 = s - k1;
                    let tile = TileCoord::new3(kt, k1, k2);
                    for t in t_lo..=t_hi {
                        let i_lo = li
                            .max((kt - s) * tau - t)
                            .max(2 * t - (2 + s) * tau + 2);
                        let i_hi = ui
                            .min((1 + kt - s) * tau - t - 1)
                            .min(2 * t - s * tau);
                        for i in i_lo..=i_hi {
                            let j_lo = lj
                                .max(k1 * tau - t)
                                .max(t - i - (1 + k2) * tau + 1);
                            let j_hi = uj
                                .min((1 + k1) * tau - t - 1)
                                .min(t - i - k2 * tau);
                            for j in j_lo..=j_hi {
                                f(Point::new(t, i, j), &tile);
                            }
                        }
                    }
                }
            }
        }
    }
}
