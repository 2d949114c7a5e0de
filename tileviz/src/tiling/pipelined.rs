use super::{Domain, Point, TileCoord, Tiling, check_tau, floor_div};
use crate::Error;

/// Time-blocked, skewed rectangular tiling
///
/// Time is cut into blocks of `τ` steps; within each block, space is skewed
/// by `t` and cut into `τ × τ` squares:
///
/// ```text
/// kt = ⌊(t - 1) / τ⌋
/// k1 = ⌊(i + t) / τ⌋
/// k2 = ⌊(j + t) / τ⌋
/// ```
///
/// Within a time block, tiles run in pipelined wavefronts of `k1 + k2`.
#[derive(Copy, Clone, Debug)]
pub struct Pipelined {
    tau: i64,
}

impl Pipelined {
    /// Builds a new pipelined tiling; `tau` must be positive
    pub fn new(tau: i64) -> Result<Self, Error> {
        check_tau(tau, 1, 1)?;
        Ok(Self { tau })
    }
}

impl Tiling for Pipelined {
    fn tau(&self) -> i64 {
        self.tau
    }

    fn arity(&self) -> usize {
        3
    }

    fn tile_of(&self, p: Point) -> TileCoord {
        let tau = self.tau;
        TileCoord::new3(
            floor_div(p.t - 1, tau),
            floor_div(p.i + p.t, tau),
            floor_div(p.j + p.t, tau),
        )
    }

    fn wavefront(&self, tile: &TileCoord) -> i64 {
        let c = tile.as_slice();
        c[1] + c[2]
    }

    fn traverse(&self, domain: &Domain, f: &mut dyn FnMut(Point, &TileCoord)) {
        let tau = self.tau;
        let time_steps = domain.time_steps();
        let (li, ui) = domain.i_bounds();
        let (lj, uj) = domain.j_bounds();

        for kt in 0..=floor_div(time_steps - 1, tau) {
            let t_lo = kt * tau + 1;
            let t_hi = ((kt + 1) * tau).min(time_steps);
            let (k1_lo, k1_hi) =
                (floor_div(li + t_lo, tau), floor_div(ui + t_hi, tau));
            let (k2_lo, k2_hi) =
                (floor_div(lj + t_lo, tau), floor_div(uj + t_hi, tau));
            for w in k1_lo + k2_lo..=k1_hi + k2_hi {
                for k1 in k1_lo.max(w - k2_hi)..=k1_hi.min(w - k2_lo) {
                    let k2 = w - k1;
                    let tile = TileCoord::new3(kt, k1, k2);
                    for t in t_lo..=t_hi {
                        let i_lo = li.max(k1 * tau - t);
                        let i_hi = ui.min((k1 + 1) * tau - 1 - t);
                        let j_lo = lj.max(k2 * tau - t);
                        let j_hi = uj.min((k2 + 1) * tau - 1 - t);
                        for i in i_lo..=i_hi {
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
