//! Graphviz DOT export serializer.
//!
//! Produces an undirected `graph G` meant for the `neato` layout engine.
//! Every distinct point becomes a small filled node pinned at its
//! coordinates (`pos="x,y!"`), so the drawing keeps the input geometry.
//! Tree arcs are drawn in [`TREE_COLOR`]; hull edges close the polygon
//! ring in [`HULL_COLOR`].
//!
//! This is a pure function with no I/O -- it returns a `String`.

use std::collections::HashMap;
use std::fmt::Write;

use spanhull_core::{Point, Tree};

/// Edge colour for spanning tree arcs.
pub const TREE_COLOR: &str = "black";

/// Edge colour for convex hull edges.
pub const HULL_COLOR: &str = "red";

/// Node ids keyed by exact coordinates, in first-seen order.
#[derive(Default)]
struct NodeTable {
    ids: HashMap<(u64, u64), usize>,
    points: Vec<Point>,
}

impl NodeTable {
    /// Id of `p`, registering it if it is new.
    fn id(&mut self, p: Point) -> usize {
        // `+ 0.0` folds -0.0 into 0.0 so both hash alike.
        let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
        *self.ids.entry(key).or_insert_with(|| {
            self.points.push(p);
            self.points.len() - 1
        })
    }
}

/// Serialize points, an optional spanning tree, and an optional hull into
/// a DOT graph.
///
/// Node ids are assigned to distinct points in input order. Endpoints of
/// tree arcs or hull vertices missing from `points` get nodes of their
/// own. A hull with fewer than two vertices has no edges; a two-vertex hull
/// is a single edge.
///
/// # Examples
///
/// ```
/// use spanhull_core::{Arc, Point, Tree};
/// use spanhull_export::dot::to_dot;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(1.0, 2.5);
/// let tree = Tree::new(vec![Arc::new(a, b)]);
/// let dot = to_dot(&[a, b], Some(&tree), None);
/// assert!(dot.starts_with("graph G {\n  layout=neato;\n"));
/// assert!(dot.contains("pos=\"1.00,2.50!\""));
/// assert!(dot.contains("  0 -- 1 [\n"));
/// ```
#[must_use]
pub fn to_dot(points: &[Point], tree: Option<&Tree>, hull: Option<&[Point]>) -> String {
    let mut nodes = NodeTable::default();
    for &p in points {
        nodes.id(p);
    }

    let tree_edges: Vec<(usize, usize)> = tree
        .map(|t| {
            t.arcs()
                .iter()
                .map(|arc| (nodes.id(arc.from), nodes.id(arc.to)))
                .collect()
        })
        .unwrap_or_default();

    let hull_ids: Vec<usize> = hull
        .map(|h| h.iter().map(|&p| nodes.id(p)).collect())
        .unwrap_or_default();
    let hull_edges: Vec<(usize, usize)> = match hull_ids.len() {
        0 | 1 => Vec::new(),
        2 => vec![(hull_ids[0], hull_ids[1])],
        n => (0..n).map(|i| (hull_ids[i], hull_ids[(i + 1) % n])).collect(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "graph G {{");
    let _ = writeln!(out, "  layout=neato;");
    let _ = writeln!(out, "  overlap=false;");
    let _ = writeln!(out, "  bgcolor=white;");
    let _ = writeln!(
        out,
        "  node [style=filled, color=black, fillcolor=black, width=0.05, height=0.05, shape=point];",
    );

    for (id, p) in nodes.points.iter().enumerate() {
        let _ = writeln!(out, "  {id} [");
        let _ = writeln!(out, "    pos=\"{:.2},{:.2}!\"", p.x, p.y);
        let _ = writeln!(out, "  ];");
    }

    for (edges, color) in [(&tree_edges, TREE_COLOR), (&hull_edges, HULL_COLOR)] {
        for &(a, b) in edges {
            write_edge(&mut out, a, b, color);
        }
    }

    let _ = writeln!(out, "}}");
    out
}

fn write_edge(out: &mut String, a: usize, b: usize, color: &str) {
    let _ = writeln!(out, "  {a} -- {b} [");
    let _ = writeln!(out, "    color=\"{color}\"");
    let _ = writeln!(out, "    penwidth=1");
    let _ = writeln!(out, "  ];");
}
