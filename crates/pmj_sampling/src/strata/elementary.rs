//! Elementary-interval strata for progressive multi-jittered (0,2) sequences.
//!
//! For a pass of `n = 2^m` samples, every shape `2^a x 2^(m-a)` of elementary
//! intervals gets its own occupancy matrix. Shape `i` of the stack has `n >> i`
//! columns and `1 << i` rows, so the stack runs from `n x 1` down to `1 x n`.
//!
//! Finding where a new sample may go uses the tree descent from Pharr, "Efficient
//! Generation of Points that Satisfy Two-Dimensional Elementary Intervals" (2019):
//! each axis is resolved independently by walking from the square (or nearly square)
//! shape towards the finest strata of that axis, only descending into unoccupied
//! intervals.
use crate::random::RandomSource;
use crate::strata::{stratum, Level, StrataTracker};
use crate::Point;

/// Occupancy stack over every elementary-interval shape of the current pass.
#[derive(Debug, Clone)]
pub struct ElementaryStrata {
    level: Level,
    shapes: Vec<Vec<bool>>,
}

/// Finest unoccupied strata along each axis for one target cell.
///
/// Any point whose x lies in one of `x` and whose y lies in one of `y` (strata of
/// width `1 / n`) is unoccupied at every elementary-interval shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidStrata {
    pub x: Vec<u32>,
    pub y: Vec<u32>,
}

impl ElementaryStrata {
    /// Number of shapes in the stack (`log2(n) + 1`).
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the interval `(x, y)` of shape `shape` holds a sample.
    pub fn is_occupied(&self, shape: usize, x: usize, y: usize) -> bool {
        let cols = self.columns(shape);
        self.shapes[shape][y * cols + x]
    }

    #[inline]
    fn columns(&self, shape: usize) -> usize {
        1 << (self.shapes.len() - shape - 1)
    }

    fn mark(&mut self, point: Point) {
        let mut cols = self.level.n;
        let mut rows = 1;
        for occupancy in &mut self.shapes {
            let x = stratum(point.x, cols);
            let y = stratum(point.y, rows);
            occupancy[y * cols + x] = true;
            cols /= 2;
            rows *= 2;
        }
    }

    /// Collect x strata reachable from interval `(x, y)` of `shape`, descending
    /// towards the `n x 1` shape.
    fn collect_x(&self, x: usize, y: usize, shape: usize, out: &mut Vec<u32>) {
        if self.is_occupied(shape, x, y) {
            return;
        }
        if shape == 0 {
            out.push(x as u32);
        } else {
            self.collect_x(2 * x, y / 2, shape - 1, out);
            self.collect_x(2 * x + 1, y / 2, shape - 1, out);
        }
    }

    /// Collect y strata reachable from interval `(x, y)` of `shape`, descending
    /// towards the `1 x n` shape.
    fn collect_y(&self, x: usize, y: usize, shape: usize, out: &mut Vec<u32>) {
        if self.is_occupied(shape, x, y) {
            return;
        }
        if self.columns(shape) == 1 {
            out.push(y as u32);
        } else {
            self.collect_y(x / 2, 2 * y, shape + 1, out);
            self.collect_y(x / 2, 2 * y + 1, shape + 1, out);
        }
    }
}

impl StrataTracker for ElementaryStrata {
    type Region = ValidStrata;

    fn with_capacity(_capacity: usize) -> Self {
        Self {
            level: Level::INITIAL,
            shapes: vec![vec![false]],
        }
    }

    fn subdivide(&mut self, placed: &[Point]) {
        self.level.advance();

        // 1x1 -> {2x1, 1x2} -> {4x1, 2x2, 1x4} -> ...
        let n = self.level.n;
        self.shapes.push(Vec::new());
        for occupancy in &mut self.shapes {
            occupancy.clear();
            occupancy.resize(n, false);
        }
        for &p in placed {
            self.mark(p);
        }
    }

    fn valid_cells(&self, cell_x: u32, cell_y: u32) -> Self::Region {
        let (x, y) = (cell_x as usize, cell_y as usize);
        let depth = self.shapes.len();
        let mut valid = ValidStrata::default();

        if depth % 2 == 1 {
            // Square middle shape, dim x dim.
            self.collect_x(x, y, depth / 2, &mut valid.x);
            self.collect_y(x, y, depth / 2, &mut valid.y);
        } else {
            // Two middle shapes, dim x dim/2 and dim/2 x dim.
            self.collect_x(x, y / 2, depth / 2 - 1, &mut valid.x);
            self.collect_y(x / 2, y, depth / 2, &mut valid.y);
        }

        valid
    }

    fn draw<R: RandomSource + ?Sized>(&self, region: &Self::Region, rng: &mut R) -> Point {
        assert!(
            !region.x.is_empty() && !region.y.is_empty(),
            "no unoccupied elementary interval left for this cell"
        );

        let xi = region.x[rng.uniform_int(region.x.len() as u32) as usize];
        let yi = region.y[rng.uniform_int(region.y.len() as u32) as usize];

        let width = 1.0 / self.level.n as f64;
        Point::new(
            rng.uniform_real(width * f64::from(xi), width * (f64::from(xi) + 1.0)),
            rng.uniform_real(width * f64::from(yi), width * (f64::from(yi) + 1.0)),
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

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn strata_with(points: &[Point], subdivisions: usize) -> ElementaryStrata {
        let mut strata = ElementaryStrata::with_capacity(0);
        for _ in 0..subdivisions {
            strata.subdivide(points);
        }
        strata
    }

    #[test]
    fn stack_grows_one_shape_per_subdivision() {
        let strata = strata_with(&[], 4);
        assert_eq!(strata.shape_count(), 5);
        assert_eq!(strata.pass_count(), 16);
        assert_eq!(strata.dim(), 4);
        for shape in 0..5 {
            assert_eq!(strata.columns(shape), 16 >> shape);
        }
    }

    #[test]
    fn marks_every_shape() {
        let p = Point::new(0.3, 0.6);
        let strata = strata_with(&[p], 2);
        // n = 4: shapes 4x1, 2x2, 1x4.
        assert!(strata.is_occupied(0, 1, 0));
        assert!(strata.is_occupied(1, 0, 1));
        assert!(strata.is_occupied(2, 0, 2));
        assert!(!strata.is_occupied(0, 2, 0));
    }

    #[test]
    fn empty_tracker_allows_all_strata_in_cell() {
        let strata = strata_with(&[], 2);
        // n = 4, dim = 2, cell (1, 0) spans x strata {2, 3} and y strata {0, 1}.
        let valid = strata.valid_cells(1, 0);
        assert_eq!(valid.x, vec![2, 3]);
        assert_eq!(valid.y, vec![0, 1]);
    }

    #[test]
    fn odd_depth_query_excludes_occupied_strata() {
        // Two samples in opposite quadrants at n = 2, re-registered at n = 4.
        let placed = [Point::new(0.1, 0.1), Point::new(0.6, 0.6)];
        let strata = strata_with(&placed, 2);
        // Cell (1, 0): x strata 2 is taken by (0.6, _), y stratum 0 by (_, 0.1).
        let valid = strata.valid_cells(1, 0);
        assert_eq!(valid.x, vec![3]);
        assert_eq!(valid.y, vec![1]);
    }

    #[test]
    fn even_depth_query_uses_half_resolution_rows() {
        let placed = [Point::new(0.1, 0.1)];
        let strata = strata_with(&placed, 1);
        // n = 2, dim = 2: diagonal cell (1, 1).
        let valid = strata.valid_cells(1, 1);
        assert_eq!(valid.x, vec![1]);
        assert_eq!(valid.y, vec![1]);
        // The sample's own cell has nothing left.
        let blocked = strata.valid_cells(0, 0);
        assert!(blocked.x.is_empty());
    }

    #[test]
    fn draws_land_in_returned_strata() {
        let placed = [Point::new(0.1, 0.1), Point::new(0.6, 0.6)];
        let strata = strata_with(&placed, 2);
        let region = strata.valid_cells(1, 0);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..32 {
            let p = strata.draw(&region, &mut rng);
            assert!((0.75..1.0).contains(&p.x));
            assert!((0.25..0.5).contains(&p.y));
        }
    }

    #[test]
    #[should_panic(expected = "no unoccupied elementary interval")]
    fn drawing_from_empty_region_is_fatal() {
        let strata = strata_with(&[], 1);
        let mut rng = StdRng::seed_from_u64(1);
        strata.draw(&ValidStrata::default(), &mut rng);
    }
}
