//! Static SVG rendering of the threat graph
//!
//! Presentation only: edges are drawn as arrows whose stroke width scales
//! with `count / mean(count) * width_constant`, labelled with the count;
//! vertices are lightblue circles labelled with their id. The output is
//! an opaque artifact with no downstream consumers.

use super::layout::{circular_layout, Point};
use crate::graph::DiGraph;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const NODE_RADIUS: f64 = 12.0;
const EDGE_LABEL_FONT: f64 = 6.0;
const NODE_LABEL_FONT: f64 = 9.0;
const MARGIN: f64 = 60.0;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("io error writing artifact: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// SVG renderer for a [`DiGraph`]
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    /// Square canvas side length in pixels
    pub canvas_size: f64,
    /// Multiplier applied to the mean-normalized count
    pub width_constant: f64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        SvgRenderer {
            canvas_size: 1000.0,
            width_constant: 0.5,
        }
    }
}

impl SvgRenderer {
    pub fn new(canvas_size: f64, width_constant: f64) -> Self {
        SvgRenderer {
            canvas_size,
            width_constant,
        }
    }

    /// Render the graph to an SVG document
    pub fn render(&self, graph: &DiGraph) -> String {
        let size = self.canvas_size;
        let positions = circular_layout(graph);
        let mean = graph.mean_count();

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
        );
        let _ = writeln!(svg, r#"<rect width="{size}" height="{size}" fill="white"/>"#);
        let _ = writeln!(
            svg,
            r#"<defs><marker id="arrow" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="black"/></marker></defs>"#
        );

        for edge in graph.edges() {
            let (Some(from), Some(to)) = (positions.get(&edge.src), positions.get(&edge.dst))
            else {
                continue;
            };
            let from = self.to_canvas(*from);
            let to = self.to_canvas(*to);
            let width = edge_width(edge.count, mean, self.width_constant);

            let _ = writeln!(
                svg,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black" stroke-width="{:.3}" stroke-opacity="0.9" marker-end="url(#arrow)"/>"#,
                from.x, from.y, to.x, to.y, width
            );

            let mid_x = (from.x + to.x) / 2.0;
            let mid_y = (from.y + to.y) / 2.0;
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" fill="red" font-size="{EDGE_LABEL_FONT}" text-anchor="middle">{}</text>"#,
                mid_x, mid_y, edge.count
            );
        }

        for id in graph.vertices() {
            let point = self.to_canvas(positions[id]);
            let _ = writeln!(
                svg,
                r#"<circle cx="{:.2}" cy="{:.2}" r="{NODE_RADIUS}" fill="lightblue" fill-opacity="0.9" stroke="black" stroke-width="0.3"/>"#,
                point.x, point.y
            );
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" font-size="{NODE_LABEL_FONT}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                point.x,
                point.y,
                xml_escape(id)
            );
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Render the graph and write the artifact to disk
    pub fn render_to_file(&self, graph: &DiGraph, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render(graph))?;
        info!(
            path = %path.display(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "rendered graph"
        );
        Ok(())
    }

    fn to_canvas(&self, point: Point) -> Point {
        let half = self.canvas_size / 2.0;
        let radius = half - MARGIN;
        Point {
            x: half + point.x * radius,
            y: half + point.y * radius,
        }
    }
}

/// Visual width for an edge: mean-normalized count times the constant
fn edge_width(count: u64, mean: f64, constant: f64) -> f64 {
    if mean <= 0.0 {
        return constant;
    }
    count as f64 / mean * constant
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
