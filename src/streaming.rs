use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::lattice::{E, OPP, Populations, Q};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What happens to populations that would leave the grid through the left or
/// right edge. The inlet and outlet passes overwrite both edge columns
/// afterwards, so the choice only shows up in intermediate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Discard them.
    #[default]
    Drop,
    /// Land them on the edge column they started from.
    Clamp,
}

/// How solid cells fill their next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BounceBack {
    /// `next[k] = current[opp(k)]` on the solid cell itself.
    #[default]
    OwnOpposite,
    /// Store what just arrived with directions reversed, so the cell sends
    /// back along `e_k` on the next step whatever reached it along `e_opp(k)`.
    /// Conserves the mass that hits the wall.
    FullWay,
}

/// Gathers the populations arriving at `(x, y)` from the current generation.
///
/// Written as a pull so every target cell is independent. It reproduces a
/// row-major push loop exactly, including the last-writer-wins overlap of
/// clamped streams on the right edge.
#[inline]
fn gather(
    current: &[Populations],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    policy: EdgePolicy,
) -> Populations {
    let mut incoming = [0.0; Q];
    for k in 0..Q {
        let [ex, ey] = E[k];
        // Top and bottom are periodic.
        let sy = (y as i64 - ey as i64).rem_euclid(height as i64) as usize;

        let sx = if policy == EdgePolicy::Clamp && ex == 1 && x == width - 1 {
            Some(x)
        } else {
            let sx = x as i64 - ex as i64;
            (0..width as i64).contains(&sx).then_some(sx as usize)
        };

        if let Some(sx) = sx {
            incoming[k] = current[sy * width + sx][k];
        }
    }
    incoming
}

/// Streams the current generation into `next`, bouncing back on solid cells.
/// Every entry of `next` is overwritten.
pub fn stream(field: &mut Field, policy: EdgePolicy, bounce_back: BounceBack) {
    let (width, height) = (field.width, field.height);
    let Field {
        current,
        next,
        obstacle,
        ..
    } = field;
    let current: &[Populations] = current;
    let obstacle: &[bool] = obstacle;

    let stream_row = |(y, row): (usize, &mut [Populations])| {
        for (x, cell) in row.iter_mut().enumerate() {
            let idx = y * width + x;
            if !obstacle[idx] {
                *cell = gather(current, width, height, x, y, policy);
                continue;
            }
            let source = match bounce_back {
                BounceBack::OwnOpposite => current[idx],
                BounceBack::FullWay => gather(current, width, height, x, y, policy),
            };
            for k in 0..Q {
                cell[k] = source[OPP[k]];
            }
        }
    };

    #[cfg(feature = "parallel")]
    next.par_chunks_mut(width).enumerate().for_each(stream_row);

    #[cfg(not(feature = "parallel"))]
    next.chunks_mut(width).enumerate().for_each(stream_row);
}
