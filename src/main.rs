//! Threatgraph pipeline runner
//!
//! Runs the whole analysis end to end: ingest the event export, look up
//! the category description, filter and project, persist the derived
//! vertex/edge tables, re-read them for the analysis phase, aggregate
//! and rank, and render the top pairs as an SVG artifact.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use threatgraph::config::PipelineConfig;
use threatgraph::graph::DiGraph;
use threatgraph::ingest::read_events;
use threatgraph::lookup::{CameoCodebook, CAMEO_EVENTCODES_URL};
use threatgraph::pipeline::Pipeline;
use threatgraph::render::SvgRenderer;
use threatgraph::store::TableStore;
use tracing::info;

#[derive(Parser)]
#[command(name = "threatgraph", version, about = "GDELT threat-event graph analysis")]
struct Cli {
    /// Event export file, or a directory of export files
    input: PathBuf,

    /// Optional YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the persisted vertex/edge tables (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Number of top-ranked pairs to draw (overrides config)
    #[arg(long)]
    top: Option<usize>,

    /// Output path for the rendered SVG
    #[arg(long, default_value = "threat_graph.svg")]
    out: PathBuf,

    /// Skip the CAMEO codebook fetch and rely on the configured root code
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(top) = cli.top {
        config.top_n = top;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }

    if !cli.offline {
        let codebook = CameoCodebook::fetch(CAMEO_EVENTCODES_URL)
            .await
            .context("fetching CAMEO codebook")?;
        match codebook.describe(&config.root_code) {
            Some(description) => {
                info!(code = %config.root_code, description, "analysis category")
            }
            None => info!(code = %config.root_code, "analysis category not in codebook"),
        }
    }

    let records = read_events(&cli.input)
        .with_context(|| format!("ingesting events from {}", cli.input.display()))?;

    let pipeline = Pipeline::new(config.clone());
    let (vertices, edges) = pipeline.filter_and_project(&records);

    let store = TableStore::open(&config.data_dir)
        .with_context(|| format!("opening table store at {}", config.data_dir.display()))?;
    store.save_vertices(&vertices)?;
    store.save_edges(&edges)?;

    // Analysis phase works off the persisted tables, not the in-memory
    // projection, so a saved run can be re-analyzed as-is.
    let edges = store.load_edges()?;
    let ranked = pipeline.aggregate(&edges);
    let top = ranked.top(config.top_n);
    info!(pairs = ranked.len(), selected = top.len(), "ranked threat pairs");

    let graph = DiGraph::from_ranked(top);
    let renderer = SvgRenderer::new(config.canvas_size, config.width_constant);
    renderer
        .render_to_file(&graph, &cli.out)
        .with_context(|| format!("writing {}", cli.out.display()))?;

    println!(
        "{} events -> {} threat edges -> {} pairs; drew top {} to {}",
        records.len(),
        edges.len(),
        ranked.len(),
        top.len(),
        cli.out.display()
    );
    Ok(())
}
