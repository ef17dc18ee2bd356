//! Geometry predicates shared by the spanning tree and hull builders.
//!
//! All functions are pure and operate on [`Point`] values. The side test is
//! the only predicate QuickHull needs, both for partitioning candidates and
//! for deciding when a baseline is a hull edge.

use crate::types::{Arc, Point, Side};

/// Euclidean distance between two points; the weight of an arc.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Twice the signed area of the triangle `(line.from, line.to, point)`.
///
/// Positive when `point` is counterclockwise of the directed line.
#[must_use]
pub fn signed_area(line: &Arc, point: Point) -> f64 {
    (line.to - line.from).cross(point - line.from)
}

/// Classify `point` against the directed line `line.from -> line.to`.
///
/// # Examples
///
/// ```
/// use spanhull_core::geometry::side;
/// use spanhull_core::{Arc, Point, Side};
///
/// let line = Arc::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
/// assert_eq!(side(&line, Point::new(0.5, 1.0)), Side::Left);
/// assert_eq!(side(&line, Point::new(0.5, -1.0)), Side::Right);
/// assert_eq!(side(&line, Point::new(2.0, 0.0)), Side::OnLine);
/// ```
#[must_use]
pub fn side(line: &Arc, point: Point) -> Side {
    let area = signed_area(line, point);
    if area > 0.0 {
        Side::Left
    } else if area < 0.0 {
        Side::Right
    } else {
        Side::OnLine
    }
}

/// Unsigned distance from `point` to the infinite line through `line`.
///
/// Returns `None` when the two endpoints coincide: the line is undefined
/// and the textbook formula would divide by zero.
#[must_use]
pub fn perpendicular_distance(line: &Arc, point: Point) -> Option<f64> {
    let length = line.length();
    if length == 0.0 {
        return None;
    }
    Some(signed_area(line, point).abs() / length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> Arc {
        Arc::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0))
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(-1.0, 2.0);
        let b = Point::new(2.0, 6.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-12);
        assert!((distance(b, a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn side_flips_with_line_direction() {
        let line = horizontal();
        let reversed = Arc::new(line.to, line.from);
        let above = Point::new(1.0, 1.0);
        assert_eq!(side(&line, above), Side::Left);
        assert_eq!(side(&reversed, above), Side::Right);
    }

    #[test]
    fn side_on_line_beyond_endpoints() {
        let line = horizontal();
        assert_eq!(side(&line, Point::new(-10.0, 0.0)), Side::OnLine);
        assert_eq!(side(&line, Point::new(10.0, 0.0)), Side::OnLine);
    }

    #[test]
    fn signed_area_is_twice_triangle_area() {
        let line = horizontal();
        assert!((signed_area(&line, Point::new(2.0, 3.0)) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_distance_horizontal() {
        let line = horizontal();
        let d = perpendicular_distance(&line, Point::new(2.0, -3.0));
        assert!((d.unwrap_or(f64::NAN) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_distance_diagonal() {
        let line = Arc::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let d = perpendicular_distance(&line, Point::new(1.0, 0.0));
        assert!((d.unwrap_or(f64::NAN) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_distance_measures_infinite_line() {
        // The foot of the perpendicular lies outside the segment.
        let line = horizontal();
        let d = perpendicular_distance(&line, Point::new(100.0, 2.0));
        assert!((d.unwrap_or(f64::NAN) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_distance_zero_length_baseline() {
        let p = Point::new(3.0, 3.0);
        let line = Arc::new(p, p);
        assert_eq!(perpendicular_distance(&line, Point::new(0.0, 0.0)), None);
    }
}
