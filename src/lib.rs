//! Threatgraph
//!
//! Batch analysis of GDELT event data: ingest the tab-separated event
//! export, keep the threat-category events (CAMEO root code `13`), build
//! a directed country-to-country graph, and render the most frequent
//! threat pairs as a static image.
//!
//! The pipeline is a strict left-to-right chain of pure batch
//! transformations:
//!
//! ```text
//! ingest -> category filter -> vertex/edge projection
//!        -> group-by count -> rank -> top-N -> render
//! ```
//!
//! Records are immutable once read, every stage produces a new
//! collection, and a run is fully deterministic for a fixed input
//! ordering. Derived vertex and edge tables are persisted with
//! create-or-replace semantics between the projection and analysis
//! phases.
//!
//! # Example
//!
//! ```rust
//! use threatgraph::config::PipelineConfig;
//! use threatgraph::graph::DiGraph;
//! use threatgraph::pipeline::Pipeline;
//! use threatgraph::render::SvgRenderer;
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let records = Vec::new(); // parsed with `schema::parse_row` in a real run
//! let output = pipeline.run(&records);
//!
//! let top = output.ranked.top(pipeline.config().top_n);
//! let graph = DiGraph::from_ranked(top);
//! let svg = SvgRenderer::default().render(&graph);
//! assert!(svg.starts_with("<svg"));
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod ingest;
pub mod lookup;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod store;

// Re-export main types for convenience
pub use config::PipelineConfig;
pub use graph::{DiGraph, GraphEdge};
pub use ingest::{read_events, IngestError, IngestResult};
pub use lookup::{CameoCodebook, LookupError, THREAT_ROOT_CODE};
pub use pipeline::{
    AggregatedEdge, EdgeRecord, Pipeline, PipelineOutput, RankedEdgeList, VertexRecord,
};
pub use render::SvgRenderer;
pub use schema::{parse_row, EventRecord, SchemaError};
pub use store::{StoreError, TableStore};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
