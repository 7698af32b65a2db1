//! Persisted derived tables
//!
//! Two tables are written per run: `threat_vertices` (`id`, `name`) and
//! `threat_edges` (`src`, `dst`, `gscale`), each as a headered TSV file
//! plus a JSON meta sidecar with the row count and write timestamp.
//! Writes are create-or-replace: the table is staged to a temp file and
//! atomically renamed over the previous version. There is no incremental
//! append.

use crate::pipeline::{EdgeRecord, VertexRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Vertex table name
pub const VERTEX_TABLE: &str = "threat_vertices";

/// Edge table name
pub const EDGE_TABLE: &str = "threat_edges";

const VERTEX_HEADER: &str = "id\tname";
const EDGE_HEADER: &str = "src\tdst\tgscale";

/// Table storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("table {table} has unexpected header {found:?}")]
    BadHeader { table: &'static str, found: String },

    #[error("table {table}, row {row}: malformed line")]
    MalformedRow { table: &'static str, row: usize },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Sidecar metadata written alongside each table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMeta {
    pub table: String,
    pub rows: usize,
    pub written_at: String,
}

/// File-backed store for the derived vertex and edge tables
#[derive(Debug, Clone)]
pub struct TableStore {
    dir: PathBuf,
}

impl TableStore {
    /// Open a store rooted at a data directory, creating it if absent
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(TableStore { dir })
    }

    /// Replace the vertex table with the given rows
    pub fn save_vertices(&self, rows: &[VertexRecord]) -> StoreResult<()> {
        let lines = rows
            .iter()
            .map(|v| format!("{}\t{}", v.id, v.name))
            .collect::<Vec<_>>();
        self.replace_table(VERTEX_TABLE, VERTEX_HEADER, &lines)?;
        info!(table = VERTEX_TABLE, rows = rows.len(), "table replaced");
        Ok(())
    }

    /// Replace the edge table with the given rows
    pub fn save_edges(&self, rows: &[EdgeRecord]) -> StoreResult<()> {
        let lines = rows
            .iter()
            .map(|e| {
                let gscale = e
                    .gscale
                    .map(|g| g.to_string())
                    .unwrap_or_default();
                format!("{}\t{}\t{}", e.src, e.dst, gscale)
            })
            .collect::<Vec<_>>();
        self.replace_table(EDGE_TABLE, EDGE_HEADER, &lines)?;
        info!(table = EDGE_TABLE, rows = rows.len(), "table replaced");
        Ok(())
    }

    /// Read the vertex table back
    pub fn load_vertices(&self) -> StoreResult<Vec<VertexRecord>> {
        let body = self.read_table(VERTEX_TABLE, VERTEX_HEADER)?;
        body.iter()
            .enumerate()
            .map(|(idx, line)| {
                let (id, name) = line.split_once('\t').ok_or(StoreError::MalformedRow {
                    table: VERTEX_TABLE,
                    row: idx + 2,
                })?;
                Ok(VertexRecord::new(id, name))
            })
            .collect()
    }

    /// Read the edge table back
    pub fn load_edges(&self) -> StoreResult<Vec<EdgeRecord>> {
        let body = self.read_table(EDGE_TABLE, EDGE_HEADER)?;
        body.iter()
            .enumerate()
            .map(|(idx, line)| {
                let malformed = || StoreError::MalformedRow {
                    table: EDGE_TABLE,
                    row: idx + 2,
                };
                let mut cells = line.splitn(3, '\t');
                let src = cells.next().ok_or_else(malformed)?;
                let dst = cells.next().ok_or_else(malformed)?;
                let gscale_cell = cells.next().ok_or_else(malformed)?;
                let gscale = if gscale_cell.is_empty() {
                    None
                } else {
                    Some(gscale_cell.parse::<f64>().map_err(|_| malformed())?)
                };
                Ok(EdgeRecord::new(src, dst, gscale))
            })
            .collect()
    }

    /// Meta sidecar for a table, if present
    pub fn table_meta(&self, table: &str) -> StoreResult<TableMeta> {
        let text = fs::read_to_string(self.meta_path(table))?;
        Ok(serde_json::from_str(&text)?)
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.tsv"))
    }

    fn meta_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.meta.json"))
    }

    fn replace_table(&self, table: &str, header: &str, lines: &[String]) -> StoreResult<()> {
        let final_path = self.table_path(table);
        let tmp_path = self.dir.join(format!("{table}.tsv.tmp"));

        let mut file = fs::File::create(&tmp_path)?;
        writeln!(file, "{header}")?;
        for line in lines {
            writeln!(file, "{line}")?;
        }
        file.sync_all()?;
        fs::rename(&tmp_path, &final_path)?;

        let meta = TableMeta {
            table: table.to_string(),
            rows: lines.len(),
            written_at: Utc::now().to_rfc3339(),
        };
        fs::write(self.meta_path(table), serde_json::to_string_pretty(&meta)?)?;
        Ok(())
    }

    fn read_table(&self, table: &'static str, header: &str) -> StoreResult<Vec<String>> {
        let text = fs::read_to_string(self.table_path(table))?;
        let mut lines = text.lines();
        match lines.next() {
            Some(first) if first == header => {}
            other => {
                return Err(StoreError::BadHeader {
                    table,
                    found: other.unwrap_or_default().to_string(),
                })
            }
        }
        Ok(lines
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}
