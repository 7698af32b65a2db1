//! Directed render graph built from the top-ranked aggregated edges
//!
//! A small insertion-ordered view for the presentation stage: the vertex
//! set is exactly the ids referenced by the selected edges, so vertices
//! the top-N never touches are excluded even if they exist in the vertex
//! table. Insertion order drives the layout, keeping renders
//! deterministic.

use crate::pipeline::AggregatedEdge;
use indexmap::IndexSet;
use serde::Serialize;

/// One graph edge with its aggregated count attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub src: String,
    pub dst: String,
    pub count: u64,
}

/// Directed graph keyed by vertex id
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiGraph {
    vertices: IndexSet<String>,
    edges: Vec<GraphEdge>,
}

impl DiGraph {
    pub fn new() -> Self {
        DiGraph::default()
    }

    /// Build the graph from a ranked prefix of aggregated edges
    pub fn from_ranked(edges: &[AggregatedEdge]) -> Self {
        let mut graph = DiGraph::new();
        for edge in edges {
            graph.add_edge(&edge.src, &edge.dst, edge.count);
        }
        graph
    }

    /// Insert an edge, adding its endpoints as needed
    pub fn add_edge(&mut self, src: &str, dst: &str, count: u64) {
        self.vertices.insert(src.to_string());
        self.vertices.insert(dst.to_string());
        self.edges.push(GraphEdge {
            src: src.to_string(),
            dst: dst.to_string(),
            count,
        });
    }

    /// Vertex ids in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.vertices.iter().map(String::as_str)
    }

    /// Position of a vertex in insertion order
    pub fn vertex_index(&self, id: &str) -> Option<usize> {
        self.vertices.get_index_of(id)
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.vertices.contains(id)
    }

    /// Mean count over all edges; zero for an empty graph
    pub fn mean_count(&self) -> f64 {
        if self.edges.is_empty() {
            return 0.0;
        }
        let total: u64 = self.edges.iter().map(|e| e.count).sum();
        total as f64 / self.edges.len() as f64
    }
}
