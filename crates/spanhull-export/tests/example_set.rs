//! Integration test: run the ten-point example set through the core
//! algorithms and every serializer.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use spanhull_core::{RunConfig, parse_points, process};

const EXAMPLE: &str = "10
68 -21
57 60
82 -60
-33\t54
-44\t11
-5 26
-27\t3
90 83
27 43
-72\t21
";

#[test]
fn example_set_exports() {
    let points = parse_points(EXAMPLE).expect("example set should parse");
    let result = process(points.points(), &RunConfig::default()).expect("run should succeed");
    let tree = result.tree.as_ref().unwrap();
    let hull = result.hull.as_deref().unwrap();
    eprintln!(
        "Example set: {} arcs, weight {:.3}, {} hull vertices",
        tree.len(),
        tree.total_weight(),
        hull.len(),
    );

    let text = spanhull_export::to_text(&result);
    assert!(text.starts_with("# mst: 9 arcs"));
    assert_eq!(text.lines().filter(|l| l.contains(" -- ")).count(), 9);
    assert!(text.contains(&format!("# hull: {} vertices", hull.len())));

    let dot = spanhull_export::to_dot(points.points(), Some(tree), Some(hull));
    assert_eq!(dot.matches("pos=").count(), 10);
    assert_eq!(dot.matches("color=\"black\"").count(), 9);
    assert_eq!(dot.matches("color=\"red\"").count(), hull.len());
    assert!(dot.trim_end().ends_with('}'));

    let metadata = spanhull_export::SvgMetadata {
        title: Some("example"),
        description: Some("mode=both algorithm=kruskal"),
    };
    let svg = spanhull_export::to_svg(points.points(), Some(tree), Some(hull), &metadata);
    assert!(svg.contains("<title>example</title>"));
    assert_eq!(svg.matches("<circle").count(), 10);
    assert_eq!(svg.matches("<line").count(), 9);
    assert!(svg.contains("</svg>"));

    let listed = spanhull_export::to_point_list(points.points(), 0);
    assert_eq!(parse_points(&listed).unwrap(), points);
}
