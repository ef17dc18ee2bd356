//! Plain-text serializers.
//!
//! - [`to_point_list`]: a count line followed by one `x<TAB>y` line per
//!   point, the same layout [`spanhull_core::parse_points`] reads back.
//! - [`to_hull_pairs`]: one `(x, y)` line per hull vertex.
//! - [`to_arc_pairs`]: one `(x, y) -- (x, y)` line per tree arc.
//! - [`to_text`]: a whole [`RunResult`], each section introduced by a
//!   `#` comment line.
//!
//! These are pure functions with no I/O -- they return a `String`.

use std::fmt::Write;

use spanhull_core::{Point, RunResult, Tree};

/// Minimum field width of each coordinate in [`to_point_list`].
pub const POINT_FIELD_WIDTH: usize = 3;

/// Default number of decimal places in [`to_point_list`].
pub const DEFAULT_PRECISION: usize = 0;

/// Serialize points as a count line followed by `x<TAB>y` lines.
///
/// Each coordinate is right-aligned to [`POINT_FIELD_WIDTH`] characters
/// with `precision` decimal places.
///
/// # Examples
///
/// ```
/// use spanhull_core::Point;
/// use spanhull_export::text::to_point_list;
///
/// let text = to_point_list(&[Point::new(68.0, -21.0), Point::new(5.0, 26.0)], 0);
/// assert_eq!(text, "2\n 68\t-21\n  5\t 26\n");
/// ```
#[must_use]
pub fn to_point_list(points: &[Point], precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", points.len());
    for p in points {
        let _ = writeln!(
            out,
            "{:>width$.precision$}\t{:>width$.precision$}",
            p.x,
            p.y,
            width = POINT_FIELD_WIDTH,
        );
    }
    out
}

/// Serialize hull vertices as `(x, y)` lines, in hull order.
#[must_use]
pub fn to_hull_pairs(hull: &[Point]) -> String {
    let mut out = String::new();
    for p in hull {
        let _ = writeln!(out, "({}, {})", p.x, p.y);
    }
    out
}

/// Serialize tree arcs as `(x, y) -- (x, y)` lines, in tree order.
#[must_use]
pub fn to_arc_pairs(tree: &Tree) -> String {
    let mut out = String::new();
    for arc in tree.arcs() {
        let _ = writeln!(
            out,
            "({}, {}) -- ({}, {})",
            arc.from.x, arc.from.y, arc.to.x, arc.to.y,
        );
    }
    out
}

/// Serialize every section present in `result`.
///
/// The tree section starts with `# mst: <arcs> arcs, weight <w>` and the
/// hull section with `# hull: <n> vertices`. A run with both has the tree
/// first.
#[must_use]
pub fn to_text(result: &RunResult) -> String {
    let mut out = String::new();
    if let Some(tree) = &result.tree {
        let _ = writeln!(
            out,
            "# mst: {} arcs, weight {:.6}",
            tree.len(),
            tree.total_weight(),
        );
        out.push_str(&to_arc_pairs(tree));
    }
    if let Some(hull) = &result.hull {
        let _ = writeln!(out, "# hull: {} vertices", hull.len());
        out.push_str(&to_hull_pairs(hull));
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use spanhull_core::{Arc, parse_points};

    use super::*;

    #[test]
    fn point_list_empty() {
        assert_eq!(to_point_list(&[], 0), "0\n");
    }

    #[test]
    fn point_list_precision() {
        let text = to_point_list(&[Point::new(1.25, -0.5)], 2);
        assert_eq!(text, "1\n1.25\t-0.50\n");
    }

    #[test]
    fn point_list_reads_back() {
        let points = vec![
            Point::new(68.0, -21.0),
            Point::new(-72.0, 21.0),
            Point::new(0.0, 0.0),
        ];
        let parsed = parse_points(&to_point_list(&points, 0)).unwrap();
        assert_eq!(parsed.points(), points.as_slice());
    }

    #[test]
    fn hull_pairs_format() {
        let hull = [Point::new(0.0, 0.0), Point::new(1.5, -2.0)];
        assert_eq!(to_hull_pairs(&hull), "(0, 0)\n(1.5, -2)\n");
    }

    #[test]
    fn arc_pairs_format() {
        let tree = Tree::new(vec![Arc::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0))]);
        assert_eq!(to_arc_pairs(&tree), "(0, 0) -- (3, 4)\n");
    }

    #[test]
    fn text_sections() {
        let result = RunResult {
            tree: Some(Tree::new(vec![Arc::new(
                Point::new(0.0, 0.0),
                Point::new(3.0, 4.0),
            )])),
            hull: Some(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]),
        };
        assert_eq!(
            to_text(&result),
            "# mst: 1 arcs, weight 5.000000\n\
             (0, 0) -- (3, 4)\n\
             # hull: 2 vertices\n\
             (0, 0)\n\
             (3, 4)\n",
        );
    }

    #[test]
    fn text_hull_only() {
        let result = RunResult {
            tree: None,
            hull: Some(vec![Point::new(2.0, 2.0)]),
        };
        assert_eq!(to_text(&result), "# hull: 1 vertices\n(2, 2)\n");
    }
}
