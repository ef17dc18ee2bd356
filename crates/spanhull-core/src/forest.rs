//! Connected components for Kruskal-style spanning tree construction.
//!
//! A [`Forest`] partitions the input points into [`SubTree`]s. Every point
//! starts in its own singleton subtree; merging two subtrees along a
//! connecting arc absorbs one into the other.
//!
//! Component lookup goes through a [`UnionFind`] keyed by the stable input
//! index of each point, so finding the subtree of a point is near-constant
//! time instead of a scan over every subtree.

use std::collections::BTreeSet;

use petgraph::unionfind::UnionFind;

use crate::types::{Arc, Point, Tree, WeightedArc};

/// A connected component under construction.
///
/// Holds the indices of its member points, the arcs already joining them,
/// and the accumulated weight of those arcs. The arcs always connect the
/// members into a single tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubTree {
    points: BTreeSet<usize>,
    arcs: Vec<Arc>,
    weight: f64,
}

impl SubTree {
    /// A subtree holding a single point and no arcs.
    #[must_use]
    pub fn singleton(point: usize) -> Self {
        let mut subtree = Self::default();
        subtree.add_point(point);
        subtree
    }

    /// Add a member point (by input index).
    pub fn add_point(&mut self, point: usize) {
        self.points.insert(point);
    }

    /// Add an arc between two members, accumulating its weight.
    ///
    /// The endpoints must already be members joined by no other path, or
    /// the subtree stops being a tree.
    pub fn add_arc(&mut self, arc: WeightedArc) {
        self.arcs.push(arc.arc);
        self.weight += arc.weight;
    }

    /// Returns `true` if the point with input index `point` is a member.
    #[must_use]
    pub fn contains(&self, point: usize) -> bool {
        self.points.contains(&point)
    }

    /// Absorb `other` and the arc that connects the two components.
    pub fn merge(&mut self, other: Self, connecting: WeightedArc) {
        self.points.extend(other.points);
        self.arcs.extend(other.arcs);
        self.weight += other.weight;
        self.add_arc(connecting);
    }

    /// Indices of the member points, ascending.
    pub fn points(&self) -> impl Iterator<Item = usize> + '_ {
        self.points.iter().copied()
    }

    /// Number of member points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// The arcs joining the members, in insertion order.
    #[must_use]
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Accumulated weight of all arcs.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Consumes the subtree and returns its arcs as a [`Tree`].
    #[must_use]
    pub fn into_tree(self) -> Tree {
        Tree::new(self.arcs)
    }
}

/// A partition of the input points into subtrees.
///
/// Every point belongs to exactly one subtree, and the union of all subtree
/// arcs never contains a cycle.
#[derive(Debug, Clone)]
pub struct Forest {
    components: UnionFind<usize>,
    /// Indexed by union-find root; `None` for indices that are no longer roots.
    subtrees: Vec<Option<SubTree>>,
    count: usize,
}

impl Forest {
    /// One singleton subtree per point index in `0..len`.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            components: UnionFind::new(len),
            subtrees: (0..len).map(|i| Some(SubTree::singleton(i))).collect(),
            count: len,
        }
    }

    /// Number of subtrees (connected components) remaining.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the forest holds no points at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The subtree containing the point with input index `point`.
    ///
    /// Returns `None` if `point` is out of range.
    #[must_use]
    pub fn subtree_of(&self, point: usize) -> Option<&SubTree> {
        if point >= self.subtrees.len() {
            return None;
        }
        let root = self.components.find(point);
        let subtree = self.subtrees[root].as_ref();
        debug_assert!(
            subtree.is_some_and(|s| s.contains(point)),
            "forest invariant violated: point {point} not owned by its root subtree {root}",
        );
        subtree
    }

    /// Returns `true` if both points already lie in the same subtree.
    #[must_use]
    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.components.equiv(a, b)
    }

    /// Merge the subtrees containing points `a` and `b` along `arc`.
    ///
    /// Returns `false` and leaves the forest unchanged when both points are
    /// already in the same subtree: the arc would close a cycle.
    pub fn merge(&mut self, a: usize, b: usize, arc: WeightedArc) -> bool {
        let root_a = self.components.find_mut(a);
        let root_b = self.components.find_mut(b);
        if root_a == root_b {
            return false;
        }

        self.components.union(root_a, root_b);
        let root = self.components.find_mut(root_a);
        let absorbed = if root == root_a { root_b } else { root_a };

        debug_assert!(
            self.subtrees[absorbed].is_some() && self.subtrees[root].is_some(),
            "forest invariant violated: roots {root} and {absorbed} must both own a subtree",
        );
        let Some(other) = self.subtrees[absorbed].take() else {
            return false;
        };
        let Some(survivor) = self.subtrees[root].as_mut() else {
            return false;
        };
        survivor.merge(other, arc);
        self.count -= 1;
        true
    }

    /// Iterate over the remaining subtrees in root-index order.
    pub fn subtrees(&self) -> impl Iterator<Item = &SubTree> + '_ {
        self.subtrees.iter().flatten()
    }

    /// The arcs of the single remaining subtree.
    ///
    /// Returns `None` while more than one subtree remains. An empty forest
    /// yields an empty tree.
    #[must_use]
    pub fn into_tree(self) -> Option<Tree> {
        match self.count {
            0 => Some(Tree::default()),
            1 => self.subtrees.into_iter().flatten().next().map(SubTree::into_tree),
            _ => None,
        }
    }
}

/// Weigh the arc between two points of `points` by their distance.
pub(crate) fn weighted(points: &[Point], a: usize, b: usize) -> WeightedArc {
    WeightedArc::from_arc(Arc::new(points[a], points[b]))
}
