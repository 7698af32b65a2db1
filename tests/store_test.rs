//! Persisted-table semantics across the projection/analysis boundary

mod common;

use common::make_row;
use std::fs::File;
use std::io::Write;
use threatgraph::config::PipelineConfig;
use threatgraph::ingest::read_events;
use threatgraph::pipeline::{AggregatedEdge, Pipeline};
use threatgraph::store::{TableStore, EDGE_TABLE, VERTEX_TABLE};

#[test]
fn test_projection_persist_reload_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("events.tsv");
    let mut file = File::create(&export).unwrap();
    for row in [
        make_row(1, "13", Some("United States"), Some("US"), Some("CN"), Some(-4.0)),
        make_row(2, "13", Some("United States"), Some("US"), Some("CN"), Some(-5.0)),
        make_row(3, "13", Some("China"), Some("CN"), Some("US"), Some(-2.0)),
    ] {
        writeln!(file, "{}", row).unwrap();
    }

    let records = read_events(&export).unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default());
    let (vertices, edges) = pipeline.filter_and_project(&records);

    let store = TableStore::open(dir.path().join("data")).unwrap();
    store.save_vertices(&vertices).unwrap();
    store.save_edges(&edges).unwrap();

    // The analysis phase works off the reloaded tables and must agree
    // with the in-memory run.
    let reloaded = store.load_edges().unwrap();
    assert_eq!(reloaded, edges);

    let ranked = pipeline.aggregate(&reloaded);
    assert_eq!(
        ranked.as_slice(),
        &[
            AggregatedEdge::new("US", "CN", 2),
            AggregatedEdge::new("CN", "US", 1),
        ]
    );

    assert_eq!(store.table_meta(VERTEX_TABLE).unwrap().rows, vertices.len());
    assert_eq!(store.table_meta(EDGE_TABLE).unwrap().rows, edges.len());
}

#[test]
fn test_rerun_overwrites_tables() {
    let dir = tempfile::tempdir().unwrap();
    let store = TableStore::open(dir.path()).unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default());

    let first = vec![threatgraph::pipeline::EdgeRecord::new("US", "CN", Some(-1.0))];
    store.save_edges(&first).unwrap();

    let second = vec![
        threatgraph::pipeline::EdgeRecord::new("FR", "DE", None),
        threatgraph::pipeline::EdgeRecord::new("FR", "DE", None),
    ];
    store.save_edges(&second).unwrap();

    let reloaded = store.load_edges().unwrap();
    assert_eq!(reloaded, second);
    assert_eq!(
        pipeline.aggregate(&reloaded).as_slice(),
        &[AggregatedEdge::new("FR", "DE", 2)]
    );
}
