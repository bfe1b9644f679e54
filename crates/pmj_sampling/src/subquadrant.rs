//! Subquadrant selection between the odd and even levels of a refinement round.
//!
//! After the diagonal pass of a round, each original sample's quadrant still has two
//! empty subquadrants. A strategy decides which one is filled first; the other is
//! filled by the diagonal pass that follows. The choice matters a lot for the error
//! of the final sequence:
//! - [`SubquadrantStrategy::Random`]: independent coin flip per sample. Baseline only.
//! - [`SubquadrantStrategy::SwapXOrY`]: one coin flip for the whole round. Keeps the
//!   next generation a (0,2) set; the default for PMJ02.
//! - [`SubquadrantStrategy::OxPlowing`]: row/column balancing sweep from Christensen
//!   et al.; the default for PMJ.
use tracing::debug;

use crate::candidate::cell_of;
use crate::random::RandomSource;
use crate::Point;

/// Number of sweeps OxPlowing tries before accepting an unbalanced assignment.
pub const OX_PLOWING_ATTEMPTS: usize = 10;

/// Strategy for picking the next subquadrant of every sample.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubquadrantStrategy {
    Random,
    SwapXOrY,
    OxPlowing,
}

impl SubquadrantStrategy {
    /// Target cells, in sample order, for the first `(dim / 2)^2` samples.
    ///
    /// `dim` is the grid dimension after the second subdivision of the round, so each
    /// returned cell is a sibling of the sample's own cell inside its quadrant.
    pub fn select<R: RandomSource + ?Sized>(
        self,
        samples: &[Point],
        dim: u32,
        rng: &mut R,
    ) -> Vec<(u32, u32)> {
        match self {
            SubquadrantStrategy::Random => select_randomly(samples, dim, rng),
            SubquadrantStrategy::SwapXOrY => select_swap_x_or_y(samples, dim, rng),
            SubquadrantStrategy::OxPlowing => select_ox_plowing(samples, dim, rng),
        }
    }
}

#[inline]
fn quadrant_count(dim: u32) -> usize {
    let quad_dim = (dim / 2) as usize;
    quad_dim * quad_dim
}

#[inline]
fn coin_flip<R: RandomSource + ?Sized>(rng: &mut R) -> bool {
    rng.uniform_real(0.0, 1.0) < 0.5
}

fn select_randomly<R: RandomSource + ?Sized>(
    samples: &[Point],
    dim: u32,
    rng: &mut R,
) -> Vec<(u32, u32)> {
    samples[..quadrant_count(dim)]
        .iter()
        .map(|&p| {
            let (x, y) = cell_of(p, dim);
            if coin_flip(rng) {
                (x ^ 1, y)
            } else {
                (x, y ^ 1)
            }
        })
        .collect()
}

fn select_swap_x_or_y<R: RandomSource + ?Sized>(
    samples: &[Point],
    dim: u32,
    rng: &mut R,
) -> Vec<(u32, u32)> {
    let swap_x = coin_flip(rng);
    samples[..quadrant_count(dim)]
        .iter()
        .map(|&p| {
            let (x, y) = cell_of(p, dim);
            if swap_x {
                (x ^ 1, y)
            } else {
                (x, y ^ 1)
            }
        })
        .collect()
}

fn select_ox_plowing<R: RandomSource + ?Sized>(
    samples: &[Point],
    dim: u32,
    rng: &mut R,
) -> Vec<(u32, u32)> {
    let quad_dim = (dim / 2) as usize;
    let n = quad_dim * quad_dim;
    let mut choices = vec![(0_u32, 0_u32); n];

    // Cell of the sample in each quadrant, and which sample that is.
    let mut first_cells = vec![(0_u32, 0_u32); n];
    let mut quadrant_order = vec![0_usize; n];
    for (i, &p) in samples[..n].iter().enumerate() {
        let (x, y) = cell_of(p, dim);
        let quadrant = (y as usize / 2) * quad_dim + (x as usize / 2);
        first_cells[quadrant] = (x, y);
        quadrant_order[quadrant] = i;
    }

    for attempt in 0..OX_PLOWING_ATTEMPTS {
        let mut balance_x = vec![0_i32; quad_dim];
        let mut balance_y = vec![0_i32; quad_dim];
        let mut up = true;
        for col in 0..quad_dim {
            up = !up;
            for i in 0..quad_dim {
                let row = if up { i } else { quad_dim - i - 1 };
                let quadrant = row * quad_dim + col;
                let (mut x, mut y) = first_cells[quadrant];

                let last = i == quad_dim - 1;
                let row_balance = balance_y[row];
                let col_balance = balance_x[col];

                // Row constraint first, then column, then chance.
                let swap_x = if row_balance != 0 && !last {
                    (row_balance > 0) != (y & 1 == 1)
                } else if col_balance != 0 {
                    (col_balance > 0) == (x & 1 == 1)
                } else {
                    coin_flip(rng)
                };

                if swap_x {
                    x ^= 1;
                } else {
                    y ^= 1;
                }
                choices[quadrant_order[quadrant]] = (x, y);

                balance_x[col] += if x & 1 == 1 { 1 } else { -1 };
                balance_y[row] += if y & 1 == 1 { 1 } else { -1 };
            }
        }

        // A single quadrant can never balance.
        if n == 1 {
            return choices;
        }

        if balance_y.iter().all(|&b| b == 0) {
            return choices;
        }
        if attempt + 1 == OX_PLOWING_ATTEMPTS {
            debug!(
                quadrants = n,
                attempts = OX_PLOWING_ATTEMPTS,
                "ox-plowing did not balance rows; keeping last attempt"
            );
        }
    }

    choices
}
