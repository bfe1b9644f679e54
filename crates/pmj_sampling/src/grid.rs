//! Sparse cell-to-sample lookup used for nearest-neighbour queries.
use crate::strata::stratum;
use crate::Point;

/// Square grid mapping each occupied cell to the index of the sample inside it.
///
/// The grid stores indices into the point buffer, so it never borrows the buffer and
/// must be rebuilt whenever the resolution changes.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    dim: u32,
    cells: Vec<Option<u32>>,
}

impl SampleGrid {
    pub fn new(dim: u32) -> Self {
        let side = dim.max(1) as usize;
        Self {
            dim: dim.max(1),
            cells: vec![None; side * side],
        }
    }

    pub fn dim(&self) -> u32 {
        self.dim
    }

    /// Clear the grid at resolution `dim` and register `points[i]` under index `i`.
    pub fn rebuild(&mut self, dim: u32, points: &[Point]) {
        self.dim = dim.max(1);
        let side = self.dim as usize;
        self.cells.clear();
        self.cells.resize(side * side, None);
        for (i, &p) in points.iter().enumerate() {
            self.insert(p, i as u32);
        }
    }

    pub fn insert(&mut self, point: Point, index: u32) {
        let (x, y) = self.cell_of(point);
        let side = self.dim as usize;
        self.cells[y * side + x] = Some(index);
    }

    /// Index of the sample registered in cell `(x, y)`, if any.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        self.cells[(y * self.dim + x) as usize]
    }

    #[inline]
    fn cell_of(&self, point: Point) -> (usize, usize) {
        let side = self.dim as usize;
        (stratum(point.x, side), stratum(point.y, side))
    }

    /// Squared toroidal distance from `point` to the nearest registered sample.
    ///
    /// Cells are scanned in rings of growing Chebyshev radius around the cell of
    /// `point`. The scan ends once the next ring cannot hold anything closer, or as soon
    /// as the distance drops to `stop_below`, since the caller has no use for a
    /// value that small. Returns `f64::INFINITY` when the grid is empty.
    pub fn nearest_distance_sq(&self, point: Point, points: &[Point], stop_below: f64) -> f64 {
        let dim = self.dim as i64;
        let cell = 1.0 / self.dim as f64;
        let (cx, cy) = self.cell_of(point);
        let (cx, cy) = (cx as i64, cy as i64);

        let mut best = f64::INFINITY;
        let max_radius = dim / 2 + 1;
        for radius in 0..=max_radius {
            for dy in -radius..=radius {
                let on_edge_row = dy.abs() == radius;
                let step = if on_edge_row { 1 } else { 2 * radius.max(1) };
                let mut dx = -radius;
                while dx <= radius {
                    let x = (cx + dx).rem_euclid(dim) as u32;
                    let y = (cy + dy).rem_euclid(dim) as u32;
                    if let Some(i) = self.get(x, y) {
                        let d = toroidal_distance_sq(point, points[i as usize]);
                        if d < best {
                            best = d;
                        }
                    }
                    dx += step;
                }
            }

            if best <= stop_below {
                return best;
            }
            // Anything in ring `radius + 1` is at least `radius` whole cells away.
            let reach = radius as f64 * cell;
            if best <= reach * reach {
                break;
            }
        }

        best
    }
}

/// Squared distance on the unit torus.
#[inline]
pub fn toroidal_distance_sq(a: Point, b: Point) -> f64 {
    let mut dx = (a.x - b.x).abs();
    let mut dy = (a.y - b.y).abs();
    if dx > 0.5 {
        dx = 1.0 - dx;
    }
    if dy > 0.5 {
        dy = 1.0 - dy;
    }
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(point: Point, points: &[Point]) -> f64 {
        points
            .iter()
            .map(|&q| toroidal_distance_sq(point, q))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn rebuild_registers_indices() {
        let points = [Point::new(0.1, 0.1), Point::new(0.9, 0.6)];
        let mut grid = SampleGrid::new(1);
        grid.rebuild(2, &points);
        assert_eq!(grid.dim(), 2);
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.get(1, 1), Some(1));
        assert_eq!(grid.get(1, 0), None);
    }

    #[test]
    fn empty_grid_reports_infinity() {
        let grid = SampleGrid::new(4);
        assert_eq!(
            grid.nearest_distance_sq(Point::new(0.5, 0.5), &[], -1.0),
            f64::INFINITY
        );
    }

    #[test]
    fn toroidal_distance_wraps_edges() {
        let d = toroidal_distance_sq(Point::new(0.05, 0.5), Point::new(0.95, 0.5));
        assert!((d - 0.01).abs() < 1e-12);
    }

    #[test]
    fn ring_search_matches_brute_force() {
        // One point per cell of an 8x8 grid, jittered deterministically.
        let dim = 8;
        let mut points = Vec::new();
        for j in 0..dim {
            for i in 0..dim {
                if (i * 3 + j * 5) % 4 == 0 {
                    let jx = ((i * 7 + j * 13) % 10) as f64 / 10.0;
                    let jy = ((i * 11 + j * 3) % 10) as f64 / 10.0;
                    points.push(Point::new(
                        (i as f64 + jx) / dim as f64,
                        (j as f64 + jy) / dim as f64,
                    ));
                }
            }
        }
        let mut grid = SampleGrid::new(1);
        grid.rebuild(dim, &points);

        for k in 0..50 {
            let q = Point::new((k as f64 * 0.137) % 1.0, (k as f64 * 0.071 + 0.03) % 1.0);
            let expected = brute_force(q, &points);
            let got = grid.nearest_distance_sq(q, &points, -1.0);
            assert!((got - expected).abs() < 1e-12, "query {k}: {got} vs {expected}");
        }
    }

    #[test]
    fn stops_early_below_threshold() {
        let points = [Point::new(0.5, 0.5)];
        let mut grid = SampleGrid::new(1);
        grid.rebuild(4, &points);
        let d = grid.nearest_distance_sq(Point::new(0.55, 0.5), &points, 1.0);
        assert!(d <= 1.0);
    }
}
