//! End-to-end pipeline coverage over synthetic event exports

mod common;

use common::make_row;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use threatgraph::config::PipelineConfig;
use threatgraph::graph::DiGraph;
use threatgraph::ingest::read_events;
use threatgraph::pipeline::{AggregatedEdge, Pipeline, VertexRecord};
use threatgraph::render::SvgRenderer;

fn write_export(dir: &Path, name: &str, rows: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    path
}

fn sample_rows() -> Vec<String> {
    vec![
        make_row(1, "13", Some("United States"), Some("US"), Some("CN"), Some(-4.0)),
        make_row(2, "13", Some("United States"), Some("US"), Some("CN"), Some(-6.0)),
        make_row(3, "13", Some("United States"), Some("US"), Some("CN"), Some(-2.0)),
        make_row(4, "13", Some("China"), Some("CN"), Some("US"), Some(-5.0)),
        make_row(5, "13", Some("China"), Some("CN"), Some("US"), Some(-5.0)),
        // Non-threat event: filtered out before projection.
        make_row(6, "01", Some("France"), Some("FR"), Some("DE"), Some(1.0)),
        // Missing originating code: no vertex, no edge.
        make_row(7, "13", Some("Somewhere"), None, Some("US"), Some(-3.0)),
        // Missing target code: vertex only.
        make_row(8, "13", Some("Russia"), Some("RS"), None, Some(-7.0)),
        // Self-loop: excluded from aggregation by default.
        make_row(9, "13", Some("China"), Some("CN"), Some("CN"), Some(-1.0)),
    ]
}

#[test]
fn test_file_to_ranked_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path(), "20190101.export.CSV", &sample_rows());

    let records = read_events(&path).unwrap();
    assert_eq!(records.len(), 9);

    let pipeline = Pipeline::new(PipelineConfig::default());
    let output = pipeline.run(&records);

    assert_eq!(
        output.vertices,
        vec![
            VertexRecord::new("US", "United States"),
            VertexRecord::new("CN", "China"),
            VertexRecord::new("RS", "Russia"),
        ]
    );
    // Projected edges keep multiplicity and the self-loop.
    assert_eq!(output.edges.len(), 6);
    // Aggregation drops the self-loop and ranks descending.
    assert_eq!(
        output.ranked.as_slice(),
        &[
            AggregatedEdge::new("US", "CN", 3),
            AggregatedEdge::new("CN", "US", 2),
        ]
    );
    assert_eq!(output.ranked.total_count(), 5);
}

#[test]
fn test_top_n_selection_semantics() {
    let pipeline = Pipeline::new(PipelineConfig::default());
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path(), "events.tsv", &sample_rows());
    let output = pipeline.run(&read_events(&path).unwrap());

    let top2 = output.ranked.top(2);
    assert_eq!(top2.len(), 2);
    assert!(top2[0].count >= top2[1].count);

    let top1 = output.ranked.top(1);
    assert_eq!(top1, &[AggregatedEdge::new("US", "CN", 3)]);

    // N beyond the list length is clamped, not an error.
    assert_eq!(output.ranked.top(300).len(), 2);
}

#[test]
fn test_pipeline_is_deterministic_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path(), "events.tsv", &sample_rows());
    let records = read_events(&path).unwrap();

    let pipeline = Pipeline::new(PipelineConfig::default());
    let first = pipeline.run(&records);
    let second = pipeline.run(&records);
    assert_eq!(first, second);
}

#[test]
fn test_aggregation_order_independent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path(), "events.tsv", &sample_rows());
    let records = read_events(&path).unwrap();
    let mut reversed = records.clone();
    reversed.reverse();

    let pipeline = Pipeline::new(PipelineConfig::default());
    let forward = pipeline.run(&records).ranked;
    let backward = pipeline.run(&reversed).ranked;

    assert_eq!(forward.len(), backward.len());
    for pair in forward.iter() {
        assert!(backward.iter().any(|other| other == pair));
    }
}

#[test]
fn test_graph_and_svg_from_top_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path(), "events.tsv", &sample_rows());

    let pipeline = Pipeline::new(PipelineConfig::default());
    let output = pipeline.run(&read_events(&path).unwrap());

    let graph = DiGraph::from_ranked(output.ranked.top(300));
    // RS has a vertex record but no surviving edge, so it is not drawn.
    assert_eq!(graph.vertex_count(), 2);
    assert!(!graph.contains_vertex("RS"));

    let svg_path = dir.path().join("threats.svg");
    SvgRenderer::default()
        .render_to_file(&graph, &svg_path)
        .unwrap();

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains(">US</text>"));
    assert!(svg.contains(">CN</text>"));
    assert!(svg.contains(">3</text>"));
}

#[test]
fn test_configured_category_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(dir.path(), "events.tsv", &sample_rows());
    let records = read_events(&path).unwrap();

    let config = PipelineConfig {
        root_code: "01".to_string(),
        ..PipelineConfig::default()
    };
    let output = Pipeline::new(config).run(&records);

    assert_eq!(output.ranked.as_slice(), &[AggregatedEdge::new("FR", "DE", 1)]);
}
