//! Run diagnostics: timing and counts for each algorithm stage.
//!
//! The library never reads the wall clock itself. Callers pass a
//! [`Clock`], so the same code is timed by `std::time::Instant` in the CLI
//! and by a fake clock in tests.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::greedy::multistart_mst;
use crate::hull::quick_hull;
use crate::mst::{MstAlgorithmKind, SpanningTreeBuilder};
use crate::types::{MstError, Point, RunConfig, RunResult};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Source of timestamps for stage timing.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Current timestamp.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Diagnostics collected from a single run.
///
/// Stages the [`Mode`](crate::Mode) skipped are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDiagnostics {
    /// Number of input points.
    pub point_count: usize,
    /// Spanning tree construction.
    pub mst: Option<StageDiagnostics>,
    /// Convex hull construction.
    pub hull: Option<StageDiagnostics>,
    /// Wall-clock duration of the whole run (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
}

/// Diagnostics for a single stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDiagnostics {
    /// Wall-clock duration of this stage (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Stage-specific metrics.
    pub metrics: StageMetrics,
}

/// Stage-specific metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageMetrics {
    /// Spanning tree metrics.
    Mst {
        /// Which builder ran.
        algorithm: String,
        /// Arcs in the resulting tree.
        arc_count: usize,
        /// Total arc length.
        total_weight: f64,
        /// Start index of the returned tree (greedy and multistart only).
        start: Option<usize>,
        /// Number of greedy trials (multistart only).
        trials: Option<usize>,
        /// Max minus min trial cost (multistart only).
        cost_spread: Option<f64>,
    },
    /// Convex hull metrics.
    Hull {
        /// Number of hull vertices.
        vertex_count: usize,
        /// Input points not on the hull.
        interior_count: usize,
    },
}

impl RunDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Run Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!("Points: {}", self.point_count));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<16} {:>10} {:>10}  {}",
            "Stage", "Duration", "% Total", "Details"
        ));
        lines.push("-".repeat(72));

        let total_ms = duration_ms(self.total_duration);
        let stages = [("MST", self.mst.as_ref()), ("Hull", self.hull.as_ref())];
        for (name, diag) in stages {
            let Some(diag) = diag else {
                continue;
            };
            let ms = duration_ms(diag.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            let details = format_metrics(&diag.metrics);
            lines.push(format!("{name:<16} {ms:>8.3}ms {pct:>9.1}%  {details}"));
        }

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format stage metrics into a compact detail string.
fn format_metrics(metrics: &StageMetrics) -> String {
    match metrics {
        StageMetrics::Mst {
            algorithm,
            arc_count,
            total_weight,
            start,
            trials,
            cost_spread,
        } => {
            let mut details = format!("{algorithm} {arc_count} arcs, weight={total_weight:.3}");
            if let Some(start) = start {
                details.push_str(&format!(" start={start}"));
            }
            if let Some(trials) = trials {
                details.push_str(&format!(" trials={trials}"));
            }
            if let Some(spread) = cost_spread {
                details.push_str(&format!(" spread={spread:.3e}"));
            }
            details
        }
        StageMetrics::Hull {
            vertex_count,
            interior_count,
        } => format!("{vertex_count} vertices, {interior_count} other points"),
    }
}

/// Run the configured algorithms, timing each stage with `clock`.
///
/// Produces the same [`RunResult`] as [`crate::process`].
///
/// # Errors
///
/// Returns [`MstError`] if the configured spanning tree builder rejects
/// its parameters.
pub fn process_with_diagnostics<C: Clock>(
    points: &[Point],
    config: &RunConfig,
    clock: &C,
) -> Result<(RunResult, RunDiagnostics), MstError> {
    let run_start = clock.now();

    let (tree, mst) = if config.mode.wants_mst() {
        let start = clock.now();
        let algorithm = config.mst_algorithm;
        let (tree, start_index, trials, cost_spread) = match algorithm {
            MstAlgorithmKind::Multistart => {
                let outcome = multistart_mst(points);
                let spread = outcome.cost_spread();
                (
                    outcome.tree,
                    outcome.best_start,
                    Some(outcome.trial_costs.len()),
                    Some(spread),
                )
            }
            MstAlgorithmKind::Greedy { start } => (algorithm.build(points)?, Some(start), None, None),
            MstAlgorithmKind::Kruskal => (algorithm.build(points)?, None, None, None),
        };
        let duration = clock.elapsed(&start);
        let diag = StageDiagnostics {
            duration,
            metrics: StageMetrics::Mst {
                algorithm: algorithm.name().to_string(),
                arc_count: tree.len(),
                total_weight: tree.total_weight(),
                start: start_index,
                trials,
                cost_spread,
            },
        };
        (Some(tree), Some(diag))
    } else {
        (None, None)
    };

    let (hull, hull_diag) = if config.mode.wants_hull() {
        let start = clock.now();
        let hull = quick_hull(points);
        let duration = clock.elapsed(&start);
        let interior_count = points.iter().filter(|p| !hull.contains(p)).count();
        let diag = StageDiagnostics {
            duration,
            metrics: StageMetrics::Hull {
                vertex_count: hull.len(),
                interior_count,
            },
        };
        (Some(hull), Some(diag))
    } else {
        (None, None)
    };

    let diagnostics = RunDiagnostics {
        point_count: points.len(),
        mst,
        hull: hull_diag,
        total_duration: clock.elapsed(&run_start),
    };

    Ok((RunResult { tree, hull }, diagnostics))
}
