//! spanhull-core: Pure computational geometry over 2-D point sets (sans-IO).
//!
//! Derives two structures from an ordered sequence of points:
//!
//! - the Euclidean minimum spanning tree, built with Kruskal's algorithm
//!   over every pairwise arc, or grown greedily from a start point
//!   (optionally from every start point, keeping the cheapest tree);
//! - the convex hull, built with QuickHull.
//!
//! This crate has **no I/O dependencies** -- it parses and processes
//! in-memory text and point slices and returns structured data. Files,
//! the command line, and output formats live in `spanhull-cli` and
//! `spanhull-export`.

pub mod diagnostics;
pub mod forest;
pub mod geometry;
pub mod greedy;
pub mod hull;
pub mod mst;
pub mod parse;
pub mod types;

pub use diagnostics::{Clock, RunDiagnostics, process_with_diagnostics};
pub use forest::{Forest, SubTree};
pub use greedy::MultistartOutcome;
pub use mst::{MstAlgorithmKind, SpanningTreeBuilder};
pub use parse::{ParseError, ParseErrorKind, parse_points};
pub use types::{
    Arc, Mode, MstError, Point, PointSet, RunConfig, RunResult, Side, Tree, WeightedArc,
};

/// Compute the structures `config` asks for over `points`.
///
/// # Steps
///
/// 1. Spanning tree, with the configured [`MstAlgorithmKind`]
///    (skipped for [`Mode::Hull`])
/// 2. Convex hull by QuickHull (skipped for [`Mode::Mst`])
///
/// # Errors
///
/// Returns [`MstError::StartOutOfRange`] if a greedy start index does not
/// name one of two or more points.
pub fn process(points: &[Point], config: &RunConfig) -> Result<RunResult, MstError> {
    let tree = if config.mode.wants_mst() {
        Some(config.mst_algorithm.build(points)?)
    } else {
        None
    };

    let hull = config.mode.wants_hull().then(|| hull::quick_hull(points));

    Ok(RunResult { tree, hull })
}
