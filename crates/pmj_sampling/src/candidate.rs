//! Candidate generation and best-candidate selection.
use tracing::trace;

use crate::grid::SampleGrid;
use crate::random::RandomSource;
use crate::strata::StrataTracker;
use crate::Point;

/// Generated samples together with the strata they occupy.
///
/// Owns the point buffer, the strata tracker and the nearest-neighbour grid for a
/// single generation call. New samples are always drawn inside unoccupied strata;
/// with more than one candidate the one farthest from the existing samples wins.
#[derive(Debug)]
pub struct SampleSet<S> {
    samples: Vec<Point>,
    len: usize,
    strata: S,
    grid: SampleGrid,
    num_candidates: usize,
}

impl<S: StrataTracker> SampleSet<S> {
    pub fn new(num_samples: usize, num_candidates: usize) -> Self {
        Self {
            samples: vec![Point::ZERO; num_samples],
            len: 0,
            strata: S::with_capacity(num_samples),
            grid: SampleGrid::new(1),
            num_candidates: num_candidates.max(1),
        }
    }

    /// Place the first sample uniformly over the unit square (x, then y).
    pub fn seed<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let x = rng.uniform_real(0.0, 1.0);
        let y = rng.uniform_real(0.0, 1.0);
        self.add_sample(0, Point::new(x, y));
    }

    /// Generate the sample at `index` inside grid cell `(cell_x, cell_y)`.
    pub fn generate_sample<R: RandomSource + ?Sized>(
        &mut self,
        index: usize,
        cell_x: u32,
        cell_y: u32,
        rng: &mut R,
    ) {
        let region = self.strata.valid_cells(cell_x, cell_y);

        let chosen = if self.num_candidates <= 1 {
            self.strata.draw(&region, rng)
        } else {
            let candidates: Vec<Point> = (0..self.num_candidates)
                .map(|_| self.strata.draw(&region, rng))
                .collect();
            self.best_candidate(&candidates)
        };

        trace!(index, cell_x, cell_y, x = chosen.x, y = chosen.y, "sample placed");
        self.add_sample(index, chosen);
    }

    /// Candidate with the largest distance to its nearest placed sample.
    ///
    /// Ties keep the earlier candidate.
    fn best_candidate(&self, candidates: &[Point]) -> Point {
        let placed = &self.samples[..self.len];
        let mut best = candidates[0];
        let mut best_d2 = -1.0_f64;
        for &c in candidates {
            let d2 = self.grid.nearest_distance_sq(c, placed, best_d2);
            if d2 > best_d2 {
                best_d2 = d2;
                best = c;
            }
        }
        best
    }

    /// Advance the strata one level and rebuild the grid at the new resolution.
    pub fn subdivide(&mut self) {
        let placed = &self.samples[..self.len];
        self.strata.subdivide(placed);
        self.grid.rebuild(self.strata.dim(), placed);
    }

    fn add_sample(&mut self, index: usize, point: Point) {
        debug_assert_eq!(index, self.len, "samples must be generated in order");
        self.samples[index] = point;
        self.len = self.len.max(index + 1);
        self.strata.insert(point);
        self.grid.insert(point, index as u32);
    }

    /// Samples placed so far.
    pub fn samples(&self) -> &[Point] {
        &self.samples[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn dim(&self) -> u32 {
        self.strata.dim()
    }

    /// Grid cell of sample `index` at the current resolution.
    pub fn cell_of(&self, index: usize) -> (u32, u32) {
        cell_of(self.samples[index], self.dim())
    }

    /// Hand back the point buffer.
    pub fn into_samples(self) -> Vec<Point> {
        self.samples
    }
}

/// Cell of `point` in a `dim x dim` grid over the unit square.
#[inline]
pub(crate) fn cell_of(point: Point, dim: u32) -> (u32, u32) {
    let d = dim as f64;
    let max = dim.saturating_sub(1);
    (
        ((point.x * d) as u32).min(max),
        ((point.y * d) as u32).min(max),
    )
}
