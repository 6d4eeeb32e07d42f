//! Path canonicalization: proximity filtering and orientation.
//!
//! Skeleton walks zig-zag between pixels one unit apart; the proximity
//! filter thins them so consecutive points are at least `min_dist` apart.
//! Orientation then makes traversal start at the end nearer `x = 0`.
use crate::types::{Path, PixelPath};
use nalgebra::{distance, Point2};

/// Keep a point only if it is at least `min_dist` from the last kept one.
/// The first point is always kept.
pub fn filter_nearby_points(points: &[Point2<f64>], min_dist: f64) -> Vec<Point2<f64>> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut kept = vec![first];
    let mut last = first;
    for &p in &points[1..] {
        if distance(&p, &last) >= min_dist {
            kept.push(p);
            last = p;
        }
    }
    kept
}

/// Reverse `points` when the last point has the smaller `|x|`.
/// Idempotent; fewer than two points pass through.
pub fn orient_from_origin(mut points: Vec<Point2<f64>>) -> Vec<Point2<f64>> {
    if points.len() < 2 {
        return points;
    }
    let first = points[0].x.abs();
    let last = points[points.len() - 1].x.abs();
    if last < first {
        points.reverse();
    }
    points
}

/// Filter then orient a raw pixel path. `None` when fewer than two points
/// survive.
pub fn canonicalize(raw: &PixelPath, min_dist: f64) -> Option<Path> {
    let points: Vec<Point2<f64>> = raw
        .iter()
        .map(|&[x, y]| Point2::new(x as f64, y as f64))
        .collect();
    let points = orient_from_origin(filter_nearby_points(&points, min_dist));
    (points.len() >= 2).then_some(Path { points })
}
