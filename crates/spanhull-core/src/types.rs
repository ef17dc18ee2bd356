//! Shared types for the spanhull algorithms.

use std::cmp::Ordering;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::mst::MstAlgorithmKind;

/// A point in the plane.
///
/// Equality is exact coordinate equality. [`Point::lexicographic_cmp`]
/// provides the total order (x, then y) used for deduplication and for
/// deterministic output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Dot product, treating both points as vectors from the origin.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Z component of the 3-D cross product of the two vectors.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x.mul_add(other.y, -(self.y * other.x))
    }

    /// Compares two points first by `x`, then by `y`.
    ///
    /// Uses [`f64::total_cmp`] so NaN coordinates still sort
    /// deterministically instead of breaking the order.
    #[must_use]
    pub fn lexicographic_cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

/// An undirected edge between two points.
///
/// Also used as a directed baseline by the side test, where
/// `from -> to` fixes the orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// First endpoint.
    pub from: Point,
    /// Second endpoint.
    pub to: Point,
}

impl Arc {
    /// Create a new arc.
    #[must_use]
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Euclidean length of the arc.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    /// Returns `true` if `point` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, point: Point) -> bool {
        self.from == point || self.to == point
    }

    /// Returns `true` if both arcs join the same pair of points,
    /// in either direction.
    #[must_use]
    pub fn same_endpoints(&self, other: &Self) -> bool {
        (self.from == other.from && self.to == other.to)
            || (self.from == other.to && self.to == other.from)
    }
}

/// An arc paired with its weight (Euclidean length).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedArc {
    /// Arc weight.
    pub weight: f64,
    /// The arc itself.
    pub arc: Arc,
}

impl WeightedArc {
    /// Weigh `arc` by its Euclidean length.
    #[must_use]
    pub fn from_arc(arc: Arc) -> Self {
        Self {
            weight: arc.length(),
            arc,
        }
    }
}

/// Which side of a directed line a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Counterclockwise of the line (positive signed area).
    Left,
    /// Collinear with the line.
    OnLine,
    /// Clockwise of the line (negative signed area).
    Right,
}

impl Side {
    /// The side on the other half-plane. `OnLine` is its own opposite.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::OnLine => Self::OnLine,
            Self::Right => Self::Left,
        }
    }
}

/// An ordered sequence of arcs: an evolving or finished spanning tree.
///
/// Arc order is insertion order and carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree(Vec<Arc>);

impl Tree {
    /// Create a tree from a vector of arcs.
    #[must_use]
    pub const fn new(arcs: Vec<Arc>) -> Self {
        Self(arcs)
    }

    /// Returns `true` if the tree has no arcs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of arcs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all arcs.
    #[must_use]
    pub fn arcs(&self) -> &[Arc] {
        &self.0
    }

    /// Consumes the tree and returns the underlying arcs.
    #[must_use]
    pub fn into_arcs(self) -> Vec<Arc> {
        self.0
    }

    /// Appends an arc.
    pub fn push(&mut self, arc: Arc) {
        self.0.push(arc);
    }

    /// Sum of all arc lengths.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.0.iter().map(Arc::length).sum()
    }

    /// Degree of `point` in the tree: the number of arcs touching it.
    ///
    /// A point that is not in the tree has order 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use spanhull_core::{Arc, Point, Tree};
    ///
    /// let center = Point::new(0.0, 0.0);
    /// let tree = Tree::new(vec![
    ///     Arc::new(center, Point::new(1.0, 0.0)),
    ///     Arc::new(Point::new(0.0, 1.0), center),
    /// ]);
    /// assert_eq!(tree.order(center), 2);
    /// assert_eq!(tree.order(Point::new(1.0, 0.0)), 1);
    /// assert_eq!(tree.order(Point::new(5.0, 5.0)), 0);
    /// ```
    #[must_use]
    pub fn order(&self, point: Point) -> usize {
        self.0.iter().filter(|arc| arc.touches(point)).count()
    }

    /// Returns `true` if some arc joins `a` and `b` (in either direction).
    #[must_use]
    pub fn contains_arc(&self, a: Point, b: Point) -> bool {
        let probe = Arc::new(a, b);
        self.0.iter().any(|arc| arc.same_endpoints(&probe))
    }
}

/// An immutable, ordered collection of input points.
///
/// Order matters: it drives tie-breaking and the start index of the
/// greedy builder. Derived structures (tree, hull) are not cached here;
/// every builder returns a fresh result so two algorithms run on the
/// same set can never observe each other's output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSet(Vec<Point>);

impl PointSet {
    /// Create a point set from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the set has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the set and returns the underlying points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Kruskal-style EMST of the set.
    #[must_use]
    pub fn emst(&self) -> Tree {
        crate::mst::kruskal_mst(&self.0)
    }

    /// Greedy (Prim-style) EMST grown from the point at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`MstError::StartOutOfRange`] if `start` is not a valid
    /// index into a set of two or more points.
    pub fn emst_greedy(&self, start: usize) -> Result<Tree, MstError> {
        crate::greedy::greedy_mst(&self.0, start)
    }

    /// Greedy EMST from every start point, keeping the cheapest.
    #[must_use]
    pub fn emst_multistart(&self) -> crate::greedy::MultistartOutcome {
        crate::greedy::multistart_mst(&self.0)
    }

    /// Convex hull vertices in counterclockwise order.
    #[must_use]
    pub fn convex_hull(&self) -> Vec<Point> {
        crate::hull::quick_hull(&self.0)
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// Which derived structures a run should compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Only the minimum spanning tree.
    Mst,
    /// Only the convex hull.
    Hull,
    /// Both the tree and the hull.
    #[default]
    Both,
}

impl Mode {
    /// Returns `true` if this mode computes the spanning tree.
    #[must_use]
    pub const fn wants_mst(self) -> bool {
        matches!(self, Self::Mst | Self::Both)
    }

    /// Returns `true` if this mode computes the convex hull.
    #[must_use]
    pub const fn wants_hull(self) -> bool {
        matches!(self, Self::Hull | Self::Both)
    }
}

/// Configuration for a single run over a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Which structures to compute.
    pub mode: Mode,

    /// Which spanning tree builder to use (ignored for [`Mode::Hull`]).
    pub mst_algorithm: MstAlgorithmKind,
}

impl RunConfig {
    /// Default mode: compute both structures.
    pub const DEFAULT_MODE: Mode = Mode::Both;

    /// Default spanning tree builder.
    pub const DEFAULT_MST_ALGORITHM: MstAlgorithmKind = MstAlgorithmKind::Kruskal;

    /// Default start index for [`MstAlgorithmKind::Greedy`].
    pub const DEFAULT_GREEDY_START: usize = 0;
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: Self::DEFAULT_MODE,
            mst_algorithm: Self::DEFAULT_MST_ALGORITHM,
        }
    }
}

/// Output of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// The spanning tree, when the mode asked for one.
    pub tree: Option<Tree>,
    /// The hull vertices, when the mode asked for them.
    pub hull: Option<Vec<Point>>,
}

/// Errors raised by the spanning tree builders.
///
/// Numeric degeneracies (zero points, zero-length baselines) are not
/// errors; they are handled as edge cases inside the algorithms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum MstError {
    /// The requested greedy start index does not name a point.
    #[error("start index {start} is out of range for {len} points")]
    StartOutOfRange {
        /// Requested start index.
        start: usize,
        /// Number of points in the set.
        len: usize,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
        assert!((a.distance_squared(b) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(b - a, Point::new(2.0, -3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert!((a.dot(b) - 1.0).abs() < f64::EPSILON);
        assert!((a.cross(b) - (-7.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn point_lexicographic_order() {
        let mut points = vec![
            Point::new(1.0, 5.0),
            Point::new(0.0, 9.0),
            Point::new(1.0, -2.0),
        ];
        points.sort_by(Point::lexicographic_cmp);
        assert_eq!(
            points,
            vec![
                Point::new(0.0, 9.0),
                Point::new(1.0, -2.0),
                Point::new(1.0, 5.0),
            ]
        );
    }

    // --- Arc tests ---

    #[test]
    fn arc_same_endpoints_ignores_direction() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 1.0);
        assert!(Arc::new(a, b).same_endpoints(&Arc::new(b, a)));
        assert!(!Arc::new(a, b).same_endpoints(&Arc::new(a, a)));
    }

    #[test]
    fn weighted_arc_uses_length() {
        let wa = WeightedArc::from_arc(Arc::new(Point::new(0.0, 0.0), Point::new(0.0, 2.5)));
        assert!((wa.weight - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::OnLine.opposite(), Side::OnLine);
    }

    // --- Tree tests ---

    #[test]
    fn empty_tree_has_zero_weight() {
        let tree = Tree::default();
        assert!(tree.is_empty());
        assert!(tree.total_weight().abs() < f64::EPSILON);
        assert_eq!(tree.order(Point::new(0.0, 0.0)), 0);
    }

    #[test]
    fn tree_star_order() {
        // Star rooted at the origin.
        let center = Point::new(0.0, 0.0);
        let tree = Tree::new(vec![
            Arc::new(center, Point::new(1.0, 0.0)),
            Arc::new(center, Point::new(-1.0, 0.0)),
            Arc::new(Point::new(0.0, 1.0), center),
        ]);
        assert_eq!(tree.order(center), 3);
        assert_eq!(tree.order(Point::new(-1.0, 0.0)), 1);
        assert!((tree.total_weight() - 3.0).abs() < 1e-12);
        assert!(tree.contains_arc(Point::new(1.0, 0.0), center));
    }

    // --- Mode / config tests ---

    #[test]
    fn mode_flags() {
        assert!(Mode::Mst.wants_mst() && !Mode::Mst.wants_hull());
        assert!(!Mode::Hull.wants_mst() && Mode::Hull.wants_hull());
        assert!(Mode::Both.wants_mst() && Mode::Both.wants_hull());
    }

    #[test]
    fn run_config_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.mode, Mode::Both);
        assert_eq!(config.mst_algorithm, MstAlgorithmKind::Kruskal);
    }

    #[test]
    fn run_config_serde_round_trip() {
        let config = RunConfig {
            mode: Mode::Mst,
            mst_algorithm: MstAlgorithmKind::Greedy { start: 3 },
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn mst_error_display() {
        let err = MstError::StartOutOfRange { start: 7, len: 3 };
        assert_eq!(err.to_string(), "start index 7 is out of range for 3 points");
    }
}
