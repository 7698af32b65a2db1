//! Circular vertex layout
//!
//! Vertices are spaced evenly on the unit circle in insertion order.
//! Purely a function of the graph's vertex ordering, so the same graph
//! always lays out the same way.

use crate::graph::DiGraph;
use indexmap::IndexMap;

/// A 2D position in the unit square centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Place each vertex on the unit circle, evenly spaced in insertion order
pub fn circular_layout(graph: &DiGraph) -> IndexMap<String, Point> {
    let n = graph.vertex_count();
    let mut positions = IndexMap::with_capacity(n);
    for (idx, id) in graph.vertices().enumerate() {
        let angle = 2.0 * std::f64::consts::PI * idx as f64 / n.max(1) as f64;
        positions.insert(
            id.to_string(),
            Point {
                x: angle.cos(),
                y: angle.sin(),
            },
        );
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::AggregatedEdge;

    #[test]
    fn test_positions_on_unit_circle() {
        let graph = DiGraph::from_ranked(&[
            AggregatedEdge::new("US", "CN", 2),
            AggregatedEdge::new("FR", "DE", 1),
        ]);
        let positions = circular_layout(&graph);

        assert_eq!(positions.len(), 4);
        for point in positions.values() {
            let radius = (point.x * point.x + point.y * point.y).sqrt();
            assert!((radius - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_first_vertex_at_angle_zero() {
        let graph = DiGraph::from_ranked(&[AggregatedEdge::new("US", "CN", 1)]);
        let positions = circular_layout(&graph);

        let first = positions.get("US").unwrap();
        assert!((first.x - 1.0).abs() < 1e-9);
        assert!(first.y.abs() < 1e-9);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let graph = DiGraph::from_ranked(&[
            AggregatedEdge::new("US", "CN", 2),
            AggregatedEdge::new("CN", "RS", 1),
        ]);
        assert_eq!(circular_layout(&graph), circular_layout(&graph));
    }

    #[test]
    fn test_empty_graph_has_empty_layout() {
        assert!(circular_layout(&DiGraph::new()).is_empty());
    }
}
