//! Polyline simplification (Ramer–Douglas–Peucker).
//!
//! Runs with an explicit work stack so that long freehand strokes cannot
//! exhaust the call stack.

use crate::geometry::perpendicular_distance;
use kurbo::Point;

/// Simplify a polyline, keeping every point farther than `epsilon` from the
/// chord of its enclosing kept segment. Endpoints are always kept and the
/// original order is preserved.
///
/// Inputs with fewer than three points, or a non-positive `epsilon`, are
/// returned unchanged.
pub fn simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 || epsilon <= 0.0 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (a, b) = (points[start], points[end]);
        let mut max_dist = 0.0;
        let mut max_index = start;
        for (i, p) in points.iter().enumerate().take(end).skip(start + 1) {
            let dist = perpendicular_distance(*p, a, b);
            if dist > max_dist {
                max_dist = dist;
                max_index = i;
            }
        }
        if max_dist > epsilon {
            keep[max_index] = true;
            stack.push((start, max_index));
            stack.push((max_index, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Largest distance from any point of `original` to the polyline `simplified`.
pub fn max_deviation(original: &[Point], simplified: &[Point]) -> f64 {
    original
        .iter()
        .map(|p| crate::geometry::point_to_polyline_dist(*p, simplified))
        .fold(0.0, f64::max)
}
