//! Greedy (Prim-style) spanning trees and the multistart driver.
//!
//! The greedy builder grows a single component from a chosen start point,
//! each step attaching the unconnected point closest to any connected
//! point. Instead of rescanning every (unconnected, connected) pair per
//! step, each unconnected point remembers its closest connected point so
//! far, which keeps the whole build at O(n²).
//!
//! Ties are resolved as a full pairwise scan would resolve them with a
//! strict `<`: the lowest unconnected index wins, and for that point the
//! lowest connected index.

use serde::{Deserialize, Serialize};

use crate::types::{Arc, MstError, Point, Tree};

/// Closest connected point seen so far for one unconnected point.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    distance: f64,
    via: usize,
}

/// Build a spanning tree by growing it from `points[start]`.
///
/// Each arc is oriented from the already-connected point to the point it
/// attaches. Returns an empty tree for fewer than two points, whatever
/// `start` is.
///
/// # Errors
///
/// Returns [`MstError::StartOutOfRange`] if there are two or more points
/// and `start >= points.len()`.
///
/// # Examples
///
/// ```
/// use spanhull_core::{Point, greedy::greedy_mst};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(5.0, 0.0),
/// ];
/// let tree = greedy_mst(&points, 2).unwrap_or_default();
/// assert_eq!(tree.len(), 2);
/// assert!((tree.total_weight() - 5.0).abs() < 1e-12);
/// ```
pub fn greedy_mst(points: &[Point], start: usize) -> Result<Tree, MstError> {
    let n = points.len();
    if n <= 1 {
        return Ok(Tree::default());
    }
    if start >= n {
        return Err(MstError::StartOutOfRange { start, len: n });
    }

    let mut connected = vec![false; n];
    let mut frontier: Vec<Option<Frontier>> = vec![None; n];
    let mut tree = Tree::new(Vec::with_capacity(n - 1));

    let mut newest = start;
    connected[start] = true;

    while tree.len() < n - 1 {
        // Relax every unconnected point against the newly connected one.
        for (i, slot) in frontier.iter_mut().enumerate() {
            if connected[i] {
                continue;
            }
            let distance = points[i].distance(points[newest]);
            let better = slot.is_none_or(|f| {
                distance < f.distance || (distance == f.distance && newest < f.via)
            });
            if better {
                *slot = Some(Frontier {
                    distance,
                    via: newest,
                });
            }
        }

        let mut closest: Option<(usize, Frontier)> = None;
        for (i, slot) in frontier.iter().enumerate() {
            if connected[i] {
                continue;
            }
            if let Some(f) = *slot
                && closest.is_none_or(|(_, best)| f.distance < best.distance)
            {
                closest = Some((i, f));
            }
        }

        // Only reachable with NaN coordinates, where no distance compares.
        let Some((index, f)) = closest else {
            break;
        };

        tree.push(Arc::new(points[f.via], points[index]));
        connected[index] = true;
        newest = index;
    }

    Ok(tree)
}

/// Result of [`multistart_mst`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultistartOutcome {
    /// The cheapest tree found.
    pub tree: Tree,
    /// Start index that produced [`tree`](Self::tree); `None` for an empty
    /// point set.
    pub best_start: Option<usize>,
    /// Total weight of [`tree`](Self::tree).
    pub cost: f64,
    /// Total weight of the tree grown from each start index, in order.
    pub trial_costs: Vec<f64>,
}

impl MultistartOutcome {
    /// Spread between the most and least expensive trial.
    ///
    /// In exact arithmetic every start reaches a true MST, so anything
    /// beyond rounding noise points at a builder defect.
    #[must_use]
    pub fn cost_spread(&self) -> f64 {
        let min = self.trial_costs.iter().copied().reduce(f64::min);
        let max = self.trial_costs.iter().copied().reduce(f64::max);
        match (min, max) {
            (Some(min), Some(max)) => max - min,
            _ => 0.0,
        }
    }
}

/// Run [`greedy_mst`] once from every start index and keep the cheapest.
///
/// Every trial builds its tree from the untouched input slice, and each
/// tree's cost is computed on its own before comparison, so no trial can
/// leak state into another or into the running best. The first start
/// reaching the minimum cost wins.
#[must_use = "returns the cheapest spanning tree"]
pub fn multistart_mst(points: &[Point]) -> MultistartOutcome {
    let mut best: Option<(usize, Tree, f64)> = None;
    let mut trial_costs = Vec::with_capacity(points.len());

    for start in 0..points.len() {
        let Ok(tree) = greedy_mst(points, start) else {
            continue;
        };
        let cost = tree.total_weight();
        trial_costs.push(cost);

        if best.as_ref().is_none_or(|(_, _, best_cost)| cost < *best_cost) {
            best = Some((start, tree, cost));
        }
    }

    match best {
        Some((start, tree, cost)) => MultistartOutcome {
            tree,
            best_start: Some(start),
            cost,
            trial_costs,
        },
        None => MultistartOutcome {
            tree: Tree::default(),
            best_start: None,
            cost: 0.0,
            trial_costs,
        },
    }
}
