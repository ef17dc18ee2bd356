//! spanhull: Euclidean minimum spanning tree and convex hull of a point file.
//!
//! Reads a point file (a count line, then one `x y` pair per line), builds
//! the spanning tree and/or the convex hull, and writes the result as plain
//! text, Graphviz DOT, or SVG. Per-stage diagnostics go to stderr so stdout
//! carries only the requested output.
//!
//! - `--bench` times every spanning tree builder and the hull on the input
//!   instead of writing output.
//! - `--order X Y` prints the degree of a point in the computed tree.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin spanhull -- [OPTIONS] <INPUT> [OUTPUT]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use serde::Serialize;
use spanhull_core::diagnostics::{Clock, RunDiagnostics, process_with_diagnostics};
use spanhull_core::{Mode, MstAlgorithmKind, MstError, ParseError, Point, PointSet, RunConfig};

/// Euclidean minimum spanning tree and QuickHull convex hull of a 2-D
/// point set.
///
/// The input file holds a point count followed by that many `x y` lines.
/// When OUTPUT is omitted the result is written to stdout.
#[derive(Parser)]
#[command(name = "spanhull", version)]
struct Cli {
    /// Path to the input point file.
    input: PathBuf,

    /// Path to write the result to (stdout when omitted).
    output: Option<PathBuf>,

    /// Which structures to compute.
    #[arg(long, value_enum, default_value_t = CLI_DEFAULT_MODE)]
    mode: CliMode,

    /// Spanning tree builder.
    #[arg(long, value_enum, default_value_t = CLI_DEFAULT_ALGORITHM)]
    algorithm: Algorithm,

    /// Start point index for the greedy builder.
    #[arg(long, default_value_t = RunConfig::DEFAULT_GREEDY_START)]
    start: usize,

    /// Shorthand for `--algorithm greedy`.
    #[arg(short, long)]
    improved: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Shorthand for `--format dot`.
    #[arg(short, long)]
    dot: bool,

    /// Decimal places for `--format points`.
    #[arg(long, default_value_t = spanhull_export::text::DEFAULT_PRECISION)]
    precision: usize,

    /// Print the degree of the point (X, Y) in the spanning tree.
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["X", "Y"],
        allow_negative_numbers = true
    )]
    order: Option<Vec<f64>>,

    /// Time every spanning tree builder and the hull instead of writing
    /// output.
    #[arg(short, long)]
    bench: bool,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,

    /// Full run config as a JSON string.
    ///
    /// When provided, `--mode`, `--algorithm`, `--start`, and `--improved`
    /// are ignored. The JSON must be a valid `RunConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,
}

/// Structure selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliMode {
    /// Spanning tree only.
    Mst,
    /// Convex hull only.
    Hull,
    /// Spanning tree and convex hull.
    Both,
}

/// Spanning tree builder selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Sort all pairwise arcs and merge components.
    Kruskal,
    /// Grow one tree from `--start`, attaching the closest point each step.
    Greedy,
    /// Greedy from every start point, keeping the cheapest tree.
    Multistart,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Tree arcs and hull vertices as `(x, y)` text.
    Text,
    /// Graphviz DOT for the `neato` layout engine.
    Dot,
    /// SVG drawing.
    Svg,
    /// The parsed input, re-serialized as a point file.
    Points,
}

/// Maps a core [`Mode`] to the local CLI [`CliMode`] enum.
const fn mode_from_core(mode: Mode) -> CliMode {
    match mode {
        Mode::Mst => CliMode::Mst,
        Mode::Hull => CliMode::Hull,
        Mode::Both => CliMode::Both,
    }
}

/// Maps a core [`MstAlgorithmKind`] to the local CLI [`Algorithm`] enum.
const fn algorithm_from_core(kind: MstAlgorithmKind) -> Algorithm {
    match kind {
        MstAlgorithmKind::Kruskal => Algorithm::Kruskal,
        MstAlgorithmKind::Greedy { .. } => Algorithm::Greedy,
        MstAlgorithmKind::Multistart => Algorithm::Multistart,
    }
}

/// CLI defaults derived from [`RunConfig`] so the two cannot silently
/// diverge.
const CLI_DEFAULT_MODE: CliMode = mode_from_core(RunConfig::DEFAULT_MODE);
const CLI_DEFAULT_ALGORITHM: Algorithm = algorithm_from_core(RunConfig::DEFAULT_MST_ALGORITHM);

/// Everything that can stop a run.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Error parsing --config-json: {0}")]
    ConfigJson(#[source] serde_json::Error),

    #[error("Error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing {}:\n{}", .path.display(), .source.render())]
    Parse { path: PathBuf, source: ParseError },

    #[error("Error: {0}")]
    Mst(#[from] MstError),

    #[error("--order needs a spanning tree, but --mode is hull")]
    OrderWithoutTree,

    #[error("Error serializing diagnostics: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Build a [`RunConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual algorithm flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<RunConfig, CliError> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(CliError::ConfigJson);
    }

    let algorithm = if cli.improved {
        Algorithm::Greedy
    } else {
        cli.algorithm
    };

    Ok(RunConfig {
        mode: match cli.mode {
            CliMode::Mst => Mode::Mst,
            CliMode::Hull => Mode::Hull,
            CliMode::Both => Mode::Both,
        },
        mst_algorithm: match algorithm {
            Algorithm::Kruskal => MstAlgorithmKind::Kruskal,
            Algorithm::Greedy => MstAlgorithmKind::Greedy { start: cli.start },
            Algorithm::Multistart => MstAlgorithmKind::Multistart,
        },
    })
}

/// Output format after applying the `-d` shorthand.
const fn effective_format(cli: &Cli) -> Format {
    if cli.dot { Format::Dot } else { cli.format }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = config_from_cli(cli)?;
    let points = read_points(&cli.input)?;

    eprintln!("Input: {} ({} points)", cli.input.display(), points.len());

    if cli.bench {
        return run_bench(points.points(), cli.runs, cli.json);
    }

    eprintln!("Config: {config:?}");
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut all_diagnostics = Vec::with_capacity(cli.runs);
    let mut first_result = None;
    for _ in 0..cli.runs {
        let (result, diagnostics) = process_with_diagnostics(points.points(), &config, &StdClock)?;
        if cli.json {
            let json = serde_json::to_string_pretty(&diagnostics).map_err(CliError::Json)?;
            eprintln!("{json}");
        } else {
            eprintln!("{}", diagnostics.report());
            eprintln!();
        }
        all_diagnostics.push(diagnostics);
        first_result.get_or_insert(result);
    }

    if cli.runs > 1 {
        eprintln!("{}", multi_run_summary("Summary", &all_diagnostics));
    }

    let Some(result) = first_result else {
        return Ok(());
    };

    if let Some(ref xy) = cli.order
        && let &[x, y] = xy.as_slice()
    {
        let tree = result.tree.as_ref().ok_or(CliError::OrderWithoutTree)?;
        println!("Order of point {x}, {y}: {}", tree.order(Point::new(x, y)));
    }

    let rendered = match effective_format(cli) {
        Format::Text => spanhull_export::to_text(&result),
        Format::Points => spanhull_export::to_point_list(points.points(), cli.precision),
        Format::Dot => spanhull_export::to_dot(
            points.points(),
            result.tree.as_ref(),
            result.hull.as_deref(),
        ),
        Format::Svg => {
            let title = cli
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("spanhull");
            let desc = describe(&config);
            let metadata = spanhull_export::SvgMetadata {
                title: Some(title),
                description: Some(&desc),
            };
            spanhull_export::to_svg(
                points.points(),
                result.tree.as_ref(),
                result.hull.as_deref(),
                &metadata,
            )
        }
    };

    write_output(cli.output.as_deref(), &rendered)
}

/// Read and parse the point file at `path`.
fn read_points(path: &Path) -> Result<PointSet, CliError> {
    let input = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    spanhull_core::parse_points(&input).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `rendered` to `output`, or to stdout when there is no path.
fn write_output(output: Option<&Path>, rendered: &str) -> Result<(), CliError> {
    let Some(path) = output else {
        print!("{rendered}");
        return Ok(());
    };
    std::fs::write(path, rendered).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    eprintln!(
        "Output written to {} ({} bytes)",
        path.display(),
        rendered.len(),
    );
    Ok(())
}

/// One-line human-readable description of a run config.
fn describe(config: &RunConfig) -> String {
    let mode = match config.mode {
        Mode::Mst => "mst",
        Mode::Hull => "hull",
        Mode::Both => "both",
    };
    match config.mst_algorithm {
        MstAlgorithmKind::Greedy { start } if config.mode.wants_mst() => {
            format!("mode={mode}, algorithm=greedy, start={start}")
        }
        kind if config.mode.wants_mst() => {
            format!("mode={mode}, algorithm={}", kind.name().to_lowercase())
        }
        _ => format!("mode={mode}"),
    }
}

/// Timings for one benchmarked configuration.
#[derive(Serialize)]
struct BenchEntry {
    name: &'static str,
    runs: Vec<RunDiagnostics>,
}

/// Time every spanning tree builder and the hull on `points`.
fn run_bench(points: &[Point], runs: usize, json: bool) -> Result<(), CliError> {
    let candidates = [
        ("Kruskal", Mode::Mst, MstAlgorithmKind::Kruskal),
        (
            "Greedy",
            Mode::Mst,
            MstAlgorithmKind::Greedy {
                start: RunConfig::DEFAULT_GREEDY_START,
            },
        ),
        ("Multistart", Mode::Mst, MstAlgorithmKind::Multistart),
        ("QuickHull", Mode::Hull, RunConfig::DEFAULT_MST_ALGORITHM),
    ];

    let mut entries = Vec::with_capacity(candidates.len());
    for (name, mode, mst_algorithm) in candidates {
        let config = RunConfig {
            mode,
            mst_algorithm,
        };
        let mut diagnostics = Vec::with_capacity(runs);
        for _ in 0..runs {
            let (_, diag) = process_with_diagnostics(points, &config, &StdClock)?;
            diagnostics.push(diag);
        }
        entries.push(BenchEntry {
            name,
            runs: diagnostics,
        });
    }

    if json {
        let out = serde_json::to_string_pretty(&entries).map_err(CliError::Json)?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "{:<12} {:>12} {:>12} {:>12}  {}",
        "Algorithm", "Min (ms)", "Mean (ms)", "Max (ms)", "Result"
    );
    println!("{}", "-".repeat(72));
    for entry in &entries {
        let stats = DurationStats::of(&entry.runs);
        let detail = entry.runs.first().map_or_else(String::new, |d| {
            d.mst.as_ref().or(d.hull.as_ref()).map_or_else(String::new, |stage| {
                format!("{:?}", stage.metrics)
            })
        });
        println!(
            "{:<12} {:>10.3}ms {:>10.3}ms {:>10.3}ms  {detail}",
            entry.name, stats.min, stats.mean, stats.max,
        );
    }
    Ok(())
}

/// Min, mean, and max total duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DurationStats {
    min: f64,
    mean: f64,
    max: f64,
}

impl DurationStats {
    #[allow(clippy::cast_precision_loss)]
    fn of(all_diagnostics: &[RunDiagnostics]) -> Self {
        let durations: Vec<f64> = all_diagnostics
            .iter()
            .map(|d| d.total_duration.as_secs_f64() * 1000.0)
            .collect();

        let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
        let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
        let mean = if durations.is_empty() {
            0.0
        } else {
            durations.iter().sum::<f64>() / durations.len() as f64
        };
        Self { min, mean, max }
    }
}

/// Function pointer type for extracting a stage duration from diagnostics.
type StageExtractor = fn(&RunDiagnostics) -> Option<Duration>;

/// Aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn multi_run_summary(heading: &str, all_diagnostics: &[RunDiagnostics]) -> String {
    let mut lines = vec![format!(
        "{heading} ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    )];

    let stats = DurationStats::of(all_diagnostics);
    lines.push(format!(
        "Total duration: min={:.3}ms  mean={:.3}ms  max={:.3}ms",
        stats.min, stats.mean, stats.max,
    ));
    lines.push(String::new());
    lines.push(format!("{:<24} {:>12}", "Stage", "Mean (ms)"));
    lines.push("-".repeat(40));

    let stage_extractors: &[(&str, StageExtractor)] = &[
        ("MST", |d| d.mst.as_ref().map(|s| s.duration)),
        ("Hull", |d| d.hull.as_ref().map(|s| s.duration)),
    ];

    for (name, extractor) in stage_extractors {
        let stage_durations: Vec<f64> = all_diagnostics
            .iter()
            .filter_map(extractor)
            .map(|dur| dur.as_secs_f64() * 1000.0)
            .collect();

        if stage_durations.is_empty() {
            continue;
        }

        let stage_mean = stage_durations.iter().sum::<f64>() / stage_durations.len() as f64;
        lines.push(format!("{name:<24} {stage_mean:>10.3}ms"));
    }

    lines.join("\n")
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spanhull").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_run_config() {
        let cli = parse(&["points.txt"]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(effective_format(&cli), Format::Text);
        assert!(cli.output.is_none());
    }

    #[test]
    fn improved_selects_greedy() {
        let cli = parse(&["-i", "--start", "3", "in.txt", "out.txt"]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.mst_algorithm, MstAlgorithmKind::Greedy { start: 3 });
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn algorithm_and_mode_flags() {
        let cli = parse(&["--mode", "hull", "--algorithm", "multistart", "in.txt"]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.mode, Mode::Hull);
        assert_eq!(config.mst_algorithm, MstAlgorithmKind::Multistart);
    }

    #[test]
    fn dot_shorthand() {
        let cli = parse(&["-d", "in.txt"]);
        assert_eq!(effective_format(&cli), Format::Dot);
    }

    #[test]
    fn order_accepts_negative_coordinates() {
        let cli = parse(&["in.txt", "-o", "-72", "21"]);
        assert_eq!(cli.order, Some(vec![-72.0, 21.0]));
    }

    #[test]
    fn order_needs_two_values() {
        let result = Cli::try_parse_from(["spanhull", "in.txt", "--order", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn runs_must_be_positive() {
        let result = Cli::try_parse_from(["spanhull", "in.txt", "--runs", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_json_overrides_flags() {
        let json = serde_json::to_string(&RunConfig {
            mode: Mode::Mst,
            mst_algorithm: MstAlgorithmKind::Greedy { start: 2 },
        })
        .unwrap();
        let cli = parse(&["--mode", "hull", "--config-json", &json, "in.txt"]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.mode, Mode::Mst);
        assert_eq!(config.mst_algorithm, MstAlgorithmKind::Greedy { start: 2 });
    }

    #[test]
    fn bad_config_json_is_reported() {
        let cli = parse(&["--config-json", "{not json", "in.txt"]);
        let err = config_from_cli(&cli).unwrap_err();
        assert!(err.to_string().starts_with("Error parsing --config-json"));
    }

    #[test]
    fn describe_config() {
        assert_eq!(describe(&RunConfig::default()), "mode=both, algorithm=kruskal");
        assert_eq!(
            describe(&RunConfig {
                mode: Mode::Mst,
                mst_algorithm: MstAlgorithmKind::Greedy { start: 4 },
            }),
            "mode=mst, algorithm=greedy, start=4",
        );
        assert_eq!(
            describe(&RunConfig {
                mode: Mode::Hull,
                mst_algorithm: MstAlgorithmKind::Multistart,
            }),
            "mode=hull",
        );
    }

    #[test]
    fn duration_stats() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let diagnostics: Vec<RunDiagnostics> = (0..3)
            .map(|_| {
                process_with_diagnostics(&points, &RunConfig::default(), &StdClock)
                    .unwrap()
                    .1
            })
            .collect();
        let stats = DurationStats::of(&diagnostics);
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        let summary = multi_run_summary("Summary", &diagnostics);
        assert!(summary.starts_with("Summary (3 runs)"));
        assert!(summary.contains("MST"));
        assert!(summary.contains("Hull"));
    }

    #[test]
    fn duration_stats_empty() {
        let stats = DurationStats::of(&[]);
        assert_eq!(
            stats,
            DurationStats {
                min: 0.0,
                mean: 0.0,
                max: 0.0,
            },
        );
    }
}
