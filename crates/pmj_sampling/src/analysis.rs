//! Quality checks for generated point sets.
//!
//! These are brute-force reference checks, meant for tests, tooling and examples
//! rather than hot paths.
use crate::grid::toroidal_distance_sq;
use crate::strata::stratum;
use crate::Point;

/// True if every cell of a `dim x dim` grid holds exactly one point.
pub fn is_jittered(points: &[Point], dim: u32) -> bool {
    let dim = dim as usize;
    if points.len() != dim * dim {
        return false;
    }
    exactly_one_per_cell(points, dim, dim)
}

/// True if the points form a Latin hypercube: with `n` points, every one of the `n`
/// strata along x holds one point, and likewise along y.
pub fn is_latin(points: &[Point]) -> bool {
    let n = points.len();
    exactly_one_per_cell(points, n, 1) && exactly_one_per_cell(points, 1, n)
}

/// True if `points.len()` is a power of two `2^m` and every elementary interval of every
/// shape `2^a x 2^(m-a)` holds exactly one point.
pub fn is_elementary(points: &[Point]) -> bool {
    let n = points.len();
    if !n.is_power_of_two() {
        return false;
    }
    let mut cols = n;
    let mut rows = 1;
    while cols >= 1 {
        if !exactly_one_per_cell(points, cols, rows) {
            return false;
        }
        cols /= 2;
        rows *= 2;
    }
    true
}

/// Elementary-interval shapes `(columns, rows)` the points violate, if any.
pub fn elementary_violations(points: &[Point]) -> Vec<(usize, usize)> {
    let n = points.len();
    if n == 0 || !n.is_power_of_two() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut cols = n;
    let mut rows = 1;
    while cols >= 1 {
        if !exactly_one_per_cell(points, cols, rows) {
            out.push((cols, rows));
        }
        cols /= 2;
        rows *= 2;
    }
    out
}

fn exactly_one_per_cell(points: &[Point], cols: usize, rows: usize) -> bool {
    if points.len() != cols * rows {
        return false;
    }
    let mut seen = vec![false; cols * rows];
    for p in points {
        let idx = stratum(p.y, rows) * cols + stratum(p.x, cols);
        if std::mem::replace(&mut seen[idx], true) {
            return false;
        }
    }
    true
}

/// Toroidal distance from every point to its nearest neighbour in the set.
pub fn nearest_neighbor_distances(points: &[Point]) -> Vec<f64> {
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &q)| toroidal_distance_sq(p, q))
                .fold(f64::INFINITY, f64::min)
                .sqrt()
        })
        .collect()
}

/// Mean toroidal nearest-neighbour distance; `0.0` for fewer than two points.
pub fn mean_nearest_neighbor_distance(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let d = nearest_neighbor_distances(points);
    d.iter().sum::<f64>() / d.len() as f64
}
