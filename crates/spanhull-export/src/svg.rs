//! SVG export serializer.
//!
//! Draws the input points, an optional spanning tree, and an optional
//! convex hull using the [`svg`] crate for document construction, XML
//! escaping, and path data formatting.
//!
//! Input coordinates are mathematical (y up). The `viewBox` is fitted to
//! the bounding box of everything drawn plus a margin, and y is flipped so
//! the picture is not upside down.
//!
//! Optional [`SvgMetadata`] embeds `<title>` and `<desc>` elements.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::Text;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Description, Group, Line, Path, Title};

use spanhull_core::{Point, Tree};

/// Margin around the drawing as a fraction of its larger extent.
const MARGIN_FRACTION: f64 = 0.05;

/// Point radius as a fraction of the larger extent.
const POINT_RADIUS_FRACTION: f64 = 0.006;

/// Stroke width as a fraction of the larger extent.
const STROKE_FRACTION: f64 = 0.003;

/// Metadata to embed in the SVG document.
///
/// Both fields are optional. Text values are XML-escaped automatically by
/// the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title -- emitted as `<title>`.
    ///
    /// Typically the input file name.
    pub title: Option<&'a str>,

    /// Document description -- emitted as `<desc>`.
    pub description: Option<&'a str>,
}

/// Maps input coordinates into the flipped, margin-padded `viewBox`.
#[derive(Debug, Clone, Copy)]
struct Frame {
    min_x: f64,
    max_y: f64,
    margin: f64,
    width: f64,
    height: f64,
    extent: f64,
}

impl Frame {
    fn fit<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for p in points {
            bounds = Some(match bounds {
                None => (p.x, p.y, p.x, p.y),
                Some((x0, y0, x1, y1)) => (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
            });
        }
        let (min_x, min_y, max_x, max_y) = bounds.unwrap_or((0.0, 0.0, 0.0, 0.0));

        // A single point or a flat set still needs a visible canvas.
        let extent = (max_x - min_x).max(max_y - min_y).max(1.0);
        let margin = extent * MARGIN_FRACTION;
        Self {
            min_x,
            max_y,
            margin,
            width: 2.0f64.mul_add(margin, max_x - min_x),
            height: 2.0f64.mul_add(margin, max_y - min_y),
            extent,
        }
    }

    fn map(&self, p: Point) -> (f64, f64) {
        (
            p.x - self.min_x + self.margin,
            self.max_y - p.y + self.margin,
        )
    }
}

/// Serialize points, an optional spanning tree, and an optional hull into
/// an SVG document string.
///
/// Layers are emitted back to front: hull (`<g id="hull">`, a closed red
/// path), tree (`<g id="tree">`, one black `<line>` per arc), then points
/// (`<g id="points">`, one `<circle>` per input point).
///
/// # Examples
///
/// ```
/// use spanhull_core::Point;
/// use spanhull_export::svg::{SvgMetadata, to_svg};
///
/// let points = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
/// let svg = to_svg(&points, None, None, &SvgMetadata::default());
/// assert!(svg.starts_with("<?xml"));
/// assert_eq!(svg.matches("<circle").count(), 2);
/// ```
#[must_use]
pub fn to_svg(
    points: &[Point],
    tree: Option<&Tree>,
    hull: Option<&[Point]>,
    metadata: &SvgMetadata<'_>,
) -> String {
    let arc_endpoints = tree
        .into_iter()
        .flat_map(|t| t.arcs().iter().flat_map(|arc| [arc.from, arc.to]))
        .collect::<Vec<_>>();
    let frame = Frame::fit(
        points
            .iter()
            .chain(hull.unwrap_or_default())
            .chain(&arc_endpoints),
    );
    let radius = frame.extent * POINT_RADIUS_FRACTION;
    let stroke = frame.extent * STROKE_FRACTION;

    let mut doc = Document::new()
        .set("width", frame.width)
        .set("height", frame.height)
        .set(
            "viewBox",
            format!("0 0 {} {}", frame.width, frame.height),
        );

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    if let Some(hull) = hull
        && let Some((&first, rest)) = hull.split_first()
        && !rest.is_empty()
    {
        let mut data = Data::new().move_to(frame.map(first));
        for &p in rest {
            data = data.line_to(frame.map(p));
        }
        let path = Path::new()
            .set("d", data.close())
            .set("fill", "none")
            .set("stroke", "red")
            .set("stroke-width", stroke);
        doc = doc.add(Group::new().set("id", "hull").add(path));
    }

    if let Some(tree) = tree {
        let mut group = Group::new()
            .set("id", "tree")
            .set("stroke", "black")
            .set("stroke-width", stroke);
        for arc in tree.arcs() {
            let (x1, y1) = frame.map(arc.from);
            let (x2, y2) = frame.map(arc.to);
            group = group.add(
                Line::new()
                    .set("x1", x1)
                    .set("y1", y1)
                    .set("x2", x2)
                    .set("y2", y2),
            );
        }
        doc = doc.add(group);
    }

    let mut group = Group::new().set("id", "points").set("fill", "black");
    for &p in points {
        let (cx, cy) = frame.map(p);
        group = group.add(Circle::new().set("cx", cx).set("cy", cy).set("r", radius));
    }
    doc = doc.add(group);

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}

#[cfg(test)]
mod tests {
    use spanhull_core::Arc;

    use super::*;

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 50.0),
        ]
    }

    #[test]
    fn frame_flips_y_and_pads() {
        let frame = Frame::fit(&triangle());
        assert!((frame.margin - 5.0).abs() < 1e-12);
        assert!((frame.width - 110.0).abs() < 1e-12);
        assert!((frame.height - 60.0).abs() < 1e-12);
        assert_eq!(frame.map(Point::new(0.0, 50.0)), (5.0, 5.0));
        assert_eq!(frame.map(Point::new(100.0, 0.0)), (105.0, 55.0));
    }

    #[test]
    fn frame_of_single_point_is_not_empty() {
        let frame = Frame::fit(&[Point::new(3.0, 3.0)]);
        assert!(frame.width > 0.0);
        assert!(frame.height > 0.0);
    }

    #[test]
    fn empty_document() {
        let svg = to_svg(&[], None, None, &SvgMetadata::default());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn all_layers_present() {
        let points = triangle();
        let tree = Tree::new(vec![
            Arc::new(points[0], points[2]),
            Arc::new(points[0], points[1]),
        ]);
        let svg = to_svg(&points, Some(&tree), Some(&points), &SvgMetadata::default());
        assert!(svg.contains(r#"id="hull""#));
        assert!(svg.contains(r#"id="tree""#));
        assert!(svg.contains(r#"id="points""#));
        assert_eq!(svg.matches("<line").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<path").count(), 1);
    }

    #[test]
    fn single_vertex_hull_has_no_path() {
        let p = [Point::new(1.0, 1.0)];
        let svg = to_svg(&p, None, Some(&p), &SvgMetadata::default());
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn metadata_is_escaped() {
        let metadata = SvgMetadata {
            title: Some("points & <hull>"),
            description: Some("mode=both"),
        };
        let svg = to_svg(&triangle(), None, None, &metadata);
        assert!(svg.contains("<title>points &amp; &lt;hull&gt;</title>"));
        assert!(svg.contains("<desc>mode=both</desc>"));
    }
}
