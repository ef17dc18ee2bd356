//! spanhull-export: Pure format serializers (sans-IO)
//!
//! Converts point sets, spanning trees, and hulls into output formats:
//! plain text, Graphviz DOT, and SVG.

pub mod dot;
pub mod svg;
pub mod text;

pub use dot::to_dot;
pub use svg::{SvgMetadata, to_svg};
pub use text::{to_arc_pairs, to_hull_pairs, to_point_list, to_text};
