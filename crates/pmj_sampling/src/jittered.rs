//! Progressive jittered sequences.
//!
//! The simplest algorithm of Christensen et al.: every quadrupling round places,
//! per existing sample, its diagonal cell, then a randomly chosen adjacent cell, then
//! that cell's diagonal. No strata are tracked beyond the grid itself, so the result
//! is jittered but not multi-jittered. Useful as a baseline.
use crate::candidate::cell_of;
use crate::generate::check_sample_count;
use crate::random::RandomSource;
use crate::{Point, Result};

/// Progressive jittered samples.
pub fn progressive_jittered<R: RandomSource + ?Sized>(
    num_samples: usize,
    rng: &mut R,
) -> Result<Vec<Point>> {
    let num_samples = check_sample_count(num_samples)?;
    if num_samples == 0 {
        return Ok(Vec::new());
    }

    let mut samples = vec![Point::ZERO; num_samples];
    samples[0] = random_in(0.0, 1.0, 0.0, 1.0, rng);

    // Samples from the previous round, subquadrants per axis, subquadrant size.
    let mut n = 1;
    let mut dim = 2_u32;
    let mut grid_size = 0.5;
    while n < num_samples {
        for i in 0..n.min(num_samples - n) {
            let (x, y) = cell_of(samples[i], dim);
            fill_quadrant(&mut samples, n, i, (x, y), grid_size, rng);
        }
        n *= 4;
        dim *= 2;
        grid_size *= 0.5;
    }

    Ok(samples)
}

/// Place the diagonal, adjacent and adjacent-diagonal samples for sample `i`.
fn fill_quadrant<R: RandomSource + ?Sized>(
    samples: &mut [Point],
    n: usize,
    i: usize,
    (x, y): (u32, u32),
    grid_size: f64,
    rng: &mut R,
) {
    let total = samples.len();
    samples[n + i] = random_in_cell(x ^ 1, y ^ 1, grid_size, rng);

    if 2 * n + i >= total {
        return;
    }
    let (nx, ny) = if rng.uniform_real(0.0, 1.0) < 0.5 {
        (x ^ 1, y)
    } else {
        (x, y ^ 1)
    };
    samples[2 * n + i] = random_in_cell(nx, ny, grid_size, rng);

    if 3 * n + i >= total {
        return;
    }
    samples[3 * n + i] = random_in_cell(nx ^ 1, ny ^ 1, grid_size, rng);
}

fn random_in_cell<R: RandomSource + ?Sized>(x: u32, y: u32, size: f64, rng: &mut R) -> Point {
    let (x, y) = (f64::from(x), f64::from(y));
    random_in(x * size, (x + 1.0) * size, y * size, (y + 1.0) * size, rng)
}

fn random_in<R: RandomSource + ?Sized>(
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    rng: &mut R,
) -> Point {
    let x = rng.uniform_real(min_x, max_x);
    let y = rng.uniform_real(min_y, max_y);
    Point::new(x, y)
}
