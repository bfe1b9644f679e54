//! Strata occupancy bookkeeping for progressive generation.
//!
//! A tracker knows, for the current refinement level, which strata already hold a
//! sample and how to draw a new point that avoids them. Two trackers exist:
//! - [`AxisStrata`]: one occupancy array per axis (progressive multi-jittered).
//! - [`ElementaryStrata`]: one occupancy matrix per elementary-interval shape
//!   (progressive multi-jittered (0,2)).
use crate::random::RandomSource;
use crate::Point;

pub mod axis;
pub mod elementary;

pub use axis::AxisStrata;
pub use elementary::{ElementaryStrata, ValidStrata};

/// Occupancy structure driven by the generation loop.
pub trait StrataTracker {
    /// Region of admissible positions for a target cell.
    type Region;

    /// Create a tracker able to hold `capacity` samples, at the initial 1x1 level.
    fn with_capacity(capacity: usize) -> Self;

    /// Advance one refinement level and re-register `placed` at the new resolution.
    ///
    /// Two successive calls quadruple the sample count: the first doubles both the pass
    /// count and the grid dimension, the second doubles only the pass count.
    fn subdivide(&mut self, placed: &[Point]);

    /// Admissible region for a new sample inside grid cell `(cell_x, cell_y)`.
    fn valid_cells(&self, cell_x: u32, cell_y: u32) -> Self::Region;

    /// Draw one point inside `region`.
    fn draw<R: RandomSource + ?Sized>(&self, region: &Self::Region, rng: &mut R) -> Point;

    /// Mark the strata covered by `point` as occupied.
    fn insert(&mut self, point: Point);

    /// Number of samples the current level holds when full.
    fn pass_count(&self) -> usize;

    /// Number of grid cells along one axis at the current level.
    fn dim(&self) -> u32;
}

/// Shared level bookkeeping for both trackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Level {
    /// Samples in a full pass at this level.
    pub(crate) n: usize,
    /// Grid cells along one axis.
    pub(crate) dim: u32,
    pub(crate) is_power_of_4: bool,
}

impl Level {
    pub(crate) const INITIAL: Level = Level {
        n: 1,
        dim: 1,
        is_power_of_4: true,
    };

    pub(crate) fn advance(&mut self) {
        self.n *= 2;
        self.is_power_of_4 = !self.is_power_of_4;
        if !self.is_power_of_4 {
            self.dim *= 2;
        }
    }
}

/// Smallest power of four that is `>= count`.
pub(crate) fn power_of_4_capacity(count: usize) -> usize {
    let mut size = 1;
    while size < count {
        size <<= 2;
    }
    size
}

/// Cell index of `coord` along an axis split into `cells` strata.
#[inline]
pub(crate) fn stratum(coord: f64, cells: usize) -> usize {
    ((coord * cells as f64) as usize).min(cells - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_alternates_dimension_growth() {
        let mut level = Level::INITIAL;
        let mut seen = Vec::new();
        for _ in 0..4 {
            level.advance();
            seen.push((level.n, level.dim));
        }
        assert_eq!(seen, vec![(2, 2), (4, 2), (8, 4), (16, 4)]);
    }

    #[test]
    fn capacity_rounds_up_to_power_of_four() {
        assert_eq!(power_of_4_capacity(0), 1);
        assert_eq!(power_of_4_capacity(1), 1);
        assert_eq!(power_of_4_capacity(2), 4);
        assert_eq!(power_of_4_capacity(16), 16);
        assert_eq!(power_of_4_capacity(17), 64);
    }

    #[test]
    fn stratum_clamps_to_last_cell() {
        assert_eq!(stratum(0.0, 4), 0);
        assert_eq!(stratum(0.2499, 4), 0);
        assert_eq!(stratum(0.25, 4), 1);
        assert_eq!(stratum(0.999_999, 4), 3);
    }
}
