//! Euclidean minimum spanning trees.
//!
//! This module defines the [`SpanningTreeBuilder`] trait for pluggable
//! builders, the [`MstAlgorithmKind`] enum for runtime selection, and the
//! Kruskal-style builder. The greedy (Prim-style) builders live in
//! [`crate::greedy`].
//!
//! # Tie-breaking
//!
//! Candidate arcs are generated for every index pair `(i, j)` with `i < j`,
//! in row-major order, and sorted with a stable sort on weight. Arcs of
//! exactly equal weight are therefore considered in generation order, which
//! makes the result a deterministic function of the input order.

use serde::{Deserialize, Serialize};

use crate::forest::{Forest, weighted};
use crate::greedy::{greedy_mst, multistart_mst};
use crate::types::{MstError, Point, Tree, WeightedArc};

/// Selects which spanning tree builder to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MstAlgorithmKind {
    /// Sort every pairwise arc by length and merge components greedily,
    /// skipping arcs that would close a cycle.
    #[default]
    Kruskal,

    /// Grow a single tree from the point at `start`, repeatedly attaching
    /// the closest unconnected point.
    Greedy {
        /// Index of the first connected point.
        start: usize,
    },

    /// Run [`Greedy`](Self::Greedy) from every start point and keep the
    /// cheapest tree.
    Multistart,
}

impl MstAlgorithmKind {
    /// Short human-readable name, used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Kruskal => "Kruskal",
            Self::Greedy { .. } => "Greedy",
            Self::Multistart => "Multistart",
        }
    }
}

/// Trait for spanning tree builders.
///
/// Input: an ordered point sequence. Output: a [`Tree`] with `n - 1` arcs
/// for `n >= 2` points, or an empty tree otherwise.
pub trait SpanningTreeBuilder {
    /// Build a spanning tree over `points`.
    ///
    /// # Errors
    ///
    /// Returns an [`MstError`] when the builder's own parameters do not fit
    /// the input (e.g. a greedy start index beyond the last point).
    fn build(&self, points: &[Point]) -> Result<Tree, MstError>;
}

impl SpanningTreeBuilder for MstAlgorithmKind {
    fn build(&self, points: &[Point]) -> Result<Tree, MstError> {
        match *self {
            Self::Kruskal => Ok(kruskal_mst(points)),
            Self::Greedy { start } => greedy_mst(points, start),
            Self::Multistart => Ok(multistart_mst(points).tree),
        }
    }
}

/// All `n * (n - 1) / 2` point pairs as weighted arcs, sorted ascending
/// by weight. Equal weights keep generation order.
#[must_use]
pub fn sorted_candidate_arcs(points: &[Point]) -> Vec<(usize, usize, WeightedArc)> {
    let n = points.len();
    let mut arcs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            arcs.push((i, j, weighted(points, i, j)));
        }
    }
    arcs.sort_by(|a, b| a.2.weight.total_cmp(&b.2.weight));
    arcs
}

/// Build a Euclidean minimum spanning tree with Kruskal's algorithm.
///
/// Every pairwise arc is a candidate. Candidates are visited in ascending
/// weight; an arc joining two different subtrees of the [`Forest`] merges
/// them, an arc inside one subtree is discarded. The loop stops as soon as
/// a single subtree remains.
///
/// Returns an empty tree for fewer than two points.
///
/// # Examples
///
/// ```
/// use spanhull_core::{Point, mst::kruskal_mst};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 0.0),
///     Point::new(0.0, 4.0),
/// ];
/// let tree = kruskal_mst(&points);
/// assert_eq!(tree.len(), 2);
/// assert!((tree.total_weight() - 7.0).abs() < 1e-12);
/// ```
#[must_use = "returns the spanning tree"]
pub fn kruskal_mst(points: &[Point]) -> Tree {
    if points.len() <= 1 {
        return Tree::default();
    }

    let mut forest = Forest::new(points.len());
    for (i, j, arc) in sorted_candidate_arcs(points) {
        forest.merge(i, j, arc);
        if forest.len() == 1 {
            break;
        }
    }

    debug_assert_eq!(forest.len(), 1, "a complete graph always connects");
    forest.into_tree().unwrap_or_default()
}
