//! The threat-analysis pipeline: filter, project, aggregate, rank
//!
//! Stages run strictly left to right, each consuming an immutable input
//! collection and producing a new one:
//!
//! ```text
//! records -> category filter -> vertex/edge projection -> group-by count -> rank
//! ```
//!
//! [`Pipeline`] is the explicit session handle carrying the configuration;
//! no stage reads ambient global state.

pub mod aggregate;
pub mod filter;
pub mod project;
pub mod records;

pub use aggregate::{aggregate_edges, AggregateOptions};
pub use filter::filter_by_root_code;
pub use project::{project_edges, project_vertices};
pub use records::{AggregatedEdge, EdgeRecord, RankedEdgeList, VertexRecord};

use crate::config::PipelineConfig;
use crate::schema::EventRecord;
use tracing::info;

/// Everything a full pipeline run derives from the raw records
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Deduplicated vertices from the filtered records
    pub vertices: Vec<VertexRecord>,
    /// Projected edges, multiplicity preserved
    pub edges: Vec<EdgeRecord>,
    /// Aggregated pairs ranked by count descending
    pub ranked: RankedEdgeList,
}

/// Explicit pipeline session
///
/// Holds the run configuration and orchestrates the stages. Runs are
/// pure: the same records and configuration always produce the same
/// output.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Category filter plus both projections
    pub fn filter_and_project(
        &self,
        records: &[EventRecord],
    ) -> (Vec<VertexRecord>, Vec<EdgeRecord>) {
        let filtered = filter_by_root_code(records, &self.config.root_code);
        info!(
            total = records.len(),
            matched = filtered.len(),
            root_code = %self.config.root_code,
            "filtered events"
        );

        let vertices = project_vertices(&filtered);
        let edges = project_edges(&filtered);
        info!(vertices = vertices.len(), edges = edges.len(), "projected records");
        (vertices, edges)
    }

    /// Group, count, and rank a projected edge collection
    pub fn aggregate(&self, edges: &[EdgeRecord]) -> RankedEdgeList {
        let options = AggregateOptions {
            exclude_self_loops: self.config.exclude_self_loops,
        };
        aggregate_edges(edges, options)
    }

    /// Run the whole pipeline in memory
    pub fn run(&self, records: &[EventRecord]) -> PipelineOutput {
        let (vertices, edges) = self.filter_and_project(records);
        let ranked = self.aggregate(&edges);
        info!(pairs = ranked.len(), "ranked aggregated edges");
        PipelineOutput {
            vertices,
            edges,
            ranked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;

    fn record(root: &str, a1cc: Option<&str>, a2cc: Option<&str>) -> EventRecord {
        EventRecord {
            global_event_id: 0,
            event_root_code: root.to_string(),
            goldstein_scale: Some(-5.0),
            actor1_geo_full_name: a1cc.map(|c| format!("{c} full name")),
            actor1_geo_country_code: a1cc.map(String::from),
            actor2_geo_country_code: a2cc.map(String::from),
        }
    }

    #[test]
    fn test_full_run() {
        let records = vec![
            record("13", Some("US"), Some("CN")),
            record("13", Some("US"), Some("CN")),
            record("01", Some("US"), Some("CN")),
            record("13", Some("CN"), Some("US")),
            record("13", Some("RS"), None),
            record("13", None, Some("US")),
        ];

        let pipeline = Pipeline::new(PipelineConfig::default());
        let output = pipeline.run(&records);

        // RS contributes a vertex but no edge; the null-src record
        // contributes nothing.
        assert_eq!(output.vertices.len(), 3);
        assert_eq!(output.edges.len(), 3);
        assert_eq!(
            output.ranked.as_slice(),
            &[
                AggregatedEdge::new("US", "CN", 2),
                AggregatedEdge::new("CN", "US", 1),
            ]
        );
    }

    #[test]
    fn test_run_is_idempotent() {
        let records = vec![
            record("13", Some("US"), Some("CN")),
            record("13", Some("CN"), Some("US")),
        ];
        let pipeline = Pipeline::new(PipelineConfig::default());
        assert_eq!(pipeline.run(&records), pipeline.run(&records));
    }

    #[test]
    fn test_count_conservation() {
        let records = vec![
            record("13", Some("US"), Some("CN")),
            record("13", Some("US"), Some("CN")),
            record("13", Some("FR"), Some("DE")),
        ];
        let pipeline = Pipeline::new(PipelineConfig::default());
        let output = pipeline.run(&records);
        assert_eq!(output.ranked.total_count(), output.edges.len() as u64);
    }
}
