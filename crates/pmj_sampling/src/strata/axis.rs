//! Per-axis strata for progressive multi-jittered sequences.
use crate::random::RandomSource;
use crate::strata::{power_of_4_capacity, stratum, Level, StrataTracker};
use crate::Point;

/// Two independent 1D occupancy arrays, one per axis.
///
/// A row or column stratum is occupied once some sample's coordinate falls in it. New
/// samples are drawn by rejection inside the target cell until both coordinates hit
/// a free stratum.
#[derive(Debug, Clone)]
pub struct AxisStrata {
    level: Level,
    grid_size: f64,
    x: Vec<bool>,
    y: Vec<bool>,
}

impl AxisStrata {
    /// Whether the x stratum at index `i` of the current level is occupied.
    pub fn is_x_occupied(&self, i: usize) -> bool {
        self.x[..self.level.n][i]
    }

    /// Whether the y stratum at index `i` of the current level is occupied.
    pub fn is_y_occupied(&self, i: usize) -> bool {
        self.y[..self.level.n][i]
    }

    fn mark(&mut self, point: Point) {
        let n = self.level.n;
        self.x[stratum(point.x, n)] = true;
        self.y[stratum(point.y, n)] = true;
    }
}

impl StrataTracker for AxisStrata {
    type Region = (u32, u32);

    fn with_capacity(capacity: usize) -> Self {
        let size = power_of_4_capacity(capacity);
        Self {
            level: Level::INITIAL,
            grid_size: 1.0,
            x: vec![false; size],
            y: vec![false; size],
        }
    }

    fn subdivide(&mut self, placed: &[Point]) {
        let was_power_of_4 = self.level.is_power_of_4;
        self.level.advance();
        if was_power_of_4 {
            self.grid_size *= 0.5;
        }

        let n = self.level.n;
        self.x[..n].fill(false);
        self.y[..n].fill(false);
        for &p in placed {
            self.mark(p);
        }
    }

    fn valid_cells(&self, cell_x: u32, cell_y: u32) -> Self::Region {
        (cell_x, cell_y)
    }

    fn draw<R: RandomSource + ?Sized>(&self, region: &Self::Region, rng: &mut R) -> Point {
        let (cell_x, cell_y) = *region;
        let n = self.level.n;
        Point::new(
            sample_1d(cell_x, n, self.grid_size, &self.x, rng),
            sample_1d(cell_y, n, self.grid_size, &self.y, rng),
        )
    }

    fn insert(&mut self, point: Point) {
        self.mark(point);
    }

    fn pass_count(&self) -> usize {
        self.level.n
    }

    fn dim(&self) -> u32 {
        self.level.dim
    }
}

/// Draw inside cell `pos` until the coordinate lands in a free stratum.
fn sample_1d<R: RandomSource + ?Sized>(
    pos: u32,
    n: usize,
    grid_size: f64,
    strata: &[bool],
    rng: &mut R,
) -> f64 {
    let lo = f64::from(pos) * grid_size;
    let hi = f64::from(pos + 1) * grid_size;
    debug_assert!(
        {
            let first = (lo * n as f64) as usize;
            let last = ((hi * n as f64) as usize).clamp(first + 1, n);
            strata[first..last].iter().any(|occupied| !occupied)
        },
        "no free stratum inside cell {pos}"
    );

    loop {
        let val = rng.uniform_real(lo, hi);
        if !strata[stratum(val, n)] {
            return val;
        }
    }
}
