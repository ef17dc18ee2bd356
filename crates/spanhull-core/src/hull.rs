//! Convex hull by QuickHull (recursive divide and conquer).
//!
//! 1. The lexicographically smallest and largest points `a`, `b` are hull
//!    vertices. They split the remaining points into those left of `a -> b`
//!    and those right of it.
//! 2. For a baseline and the candidates on its outer side, the candidate
//!    farthest from the baseline is a new hull vertex `f`. Points inside
//!    the triangle `(p, f, q)` can never be hull vertices, so only the
//!    candidates outside `p -> f` and outside `f -> q` are handed to the
//!    two recursive calls.
//! 3. A baseline with no candidate beyond it is a hull edge.
//!
//! The collected vertices are deduplicated and returned in counterclockwise
//! order starting from the lexicographically smallest one, so the output
//! does not depend on recursion order.

use crate::geometry::{perpendicular_distance, side};
use crate::types::{Arc, Point, Side};

/// Compute the convex hull of `points`.
///
/// Returns the hull vertices in counterclockwise order starting from the
/// lexicographically smallest vertex, without duplicates. Points lying on
/// a hull edge between two vertices are not reported.
///
/// Degenerate inputs:
/// - no points: empty hull;
/// - all points equal: that single point;
/// - all points collinear: the two extreme points.
///
/// # Examples
///
/// ```
/// use spanhull_core::{Point, hull::quick_hull};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(0.5, 0.5),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// assert_eq!(
///     quick_hull(&points),
///     vec![
///         Point::new(0.0, 0.0),
///         Point::new(1.0, 0.0),
///         Point::new(1.0, 1.0),
///         Point::new(0.0, 1.0),
///     ],
/// );
/// ```
#[must_use = "returns the hull vertices"]
pub fn quick_hull(points: &[Point]) -> Vec<Point> {
    let Some((min, max)) = extreme_points(points) else {
        return Vec::new();
    };
    if min == max {
        return vec![min];
    }

    let baseline = Arc::new(min, max);
    let (left, right): (Vec<Point>, Vec<Point>) = points
        .iter()
        .copied()
        .filter(|&p| side(&baseline, p) != Side::OnLine)
        .partition(|&p| side(&baseline, p) == Side::Left);

    let mut hull = Vec::new();
    hull_side(baseline, Side::Left, &left, &mut hull);
    hull_side(baseline, Side::Right, &right, &mut hull);

    canonical_order(hull)
}

/// The lexicographically smallest and largest points.
///
/// The first occurrence wins among equal points.
fn extreme_points(points: &[Point]) -> Option<(Point, Point)> {
    let first = *points.first()?;
    Some(points.iter().skip(1).fold((first, first), |(min, max), &p| {
        (
            if p.lexicographic_cmp(&min).is_lt() { p } else { min },
            if p.lexicographic_cmp(&max).is_gt() { p } else { max },
        )
    }))
}

/// Collect the hull vertices between `line.from` and `line.to` on `outer`.
///
/// Every point in `candidates` lies strictly on the `outer` side of `line`.
fn hull_side(line: Arc, outer: Side, candidates: &[Point], hull: &mut Vec<Point>) {
    let Some(farthest) = farthest_point(&line, candidates) else {
        hull.push(line.from);
        hull.push(line.to);
        return;
    };

    // The outer side of each new baseline is the side away from the
    // opposite endpoint of the old one.
    let near = Arc::new(line.from, farthest);
    let near_outer = side(&near, line.to).opposite();
    let far = Arc::new(farthest, line.to);
    let far_outer = side(&far, line.from).opposite();
    debug_assert!(outer != Side::OnLine && near_outer != Side::OnLine);

    let near_candidates: Vec<Point> = candidates
        .iter()
        .copied()
        .filter(|&p| side(&near, p) == near_outer)
        .collect();
    let far_candidates: Vec<Point> = candidates
        .iter()
        .copied()
        .filter(|&p| side(&far, p) == far_outer)
        .collect();

    hull_side(near, near_outer, &near_candidates, hull);
    hull_side(far, far_outer, &far_candidates, hull);
}

/// The candidate with the greatest positive distance from `line`.
///
/// The first candidate wins among equal distances. A zero-length baseline
/// has no farthest point.
fn farthest_point(line: &Arc, candidates: &[Point]) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for &p in candidates {
        let distance = perpendicular_distance(line, p)?;
        if distance > 0.0 && best.is_none_or(|(_, d)| distance > d) {
            best = Some((p, distance));
        }
    }
    best.map(|(p, _)| p)
}

/// Deduplicate and order hull vertices counterclockwise around their
/// centroid, starting from the lexicographically smallest vertex.
fn canonical_order(mut hull: Vec<Point>) -> Vec<Point> {
    hull.sort_by(Point::lexicographic_cmp);
    hull.dedup();
    if hull.len() < 3 {
        return hull;
    }

    #[allow(clippy::cast_precision_loss)]
    let inv_count = 1.0 / hull.len() as f64;
    let centroid = hull
        .iter()
        .fold(Point::new(0.0, 0.0), |acc, &p| acc + p)
        * inv_count;
    let angle = |p: &Point| {
        let v = *p - centroid;
        v.y.atan2(v.x)
    };

    let start = hull[0];
    hull.sort_by(|a, b| angle(a).total_cmp(&angle(b)));
    if let Some(offset) = hull.iter().position(|&p| p == start) {
        hull.rotate_left(offset);
    }
    hull
}
