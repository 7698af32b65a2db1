//! Record source: bulk ingestion of tab-separated event export files
//!
//! Accepts either a single export file or a directory of them. Files are
//! parsed in parallel (one partition per file) and concatenated in
//! lexicographic file order, so the resulting record ordering is
//! deterministic and equivalent to sequential ingestion. Any schema
//! violation aborts the whole run; there is no partial-row recovery.

use crate::schema::{parse_row, EventRecord, SchemaError};
use rayon::prelude::*;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Filename pattern for event export files inside a directory
const EXPORT_FILE_PATTERN: &str = r"(?i)\.(export\.csv|csv|tsv)$";

/// Ingestion errors
#[derive(Error, Debug)]
pub enum IngestError {
    /// I/O failure reading a path
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row failed schema validation
    #[error("{path}:{line}: {source}")]
    Schema {
        path: PathBuf,
        line: usize,
        #[source]
        source: SchemaError,
    },

    /// Directory contained no export files
    #[error("no export files found under {0}")]
    NoInputFiles(PathBuf),
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Read all event records from a file or a directory of export files
pub fn read_events(path: impl AsRef<Path>) -> IngestResult<Vec<EventRecord>> {
    let path = path.as_ref();
    let files = collect_input_files(path)?;
    if files.is_empty() {
        return Err(IngestError::NoInputFiles(path.to_path_buf()));
    }

    debug!(files = files.len(), "ingesting export files");

    // One partition per file; merge preserves file order.
    let partitions: Vec<Vec<EventRecord>> = files
        .par_iter()
        .map(|file| read_file(file))
        .collect::<IngestResult<_>>()?;

    let records: Vec<EventRecord> = partitions.into_iter().flatten().collect();
    info!(records = records.len(), files = files.len(), "ingest complete");
    Ok(records)
}

/// Read event records from a single export file
pub fn read_file(path: impl AsRef<Path>) -> IngestResult<Vec<EventRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.is_empty() {
            continue;
        }
        let record = parse_row(&line).map_err(|source| IngestError::Schema {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

fn collect_input_files(path: &Path) -> IngestResult<Vec<PathBuf>> {
    let meta = std::fs::metadata(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if meta.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let pattern = Regex::new(EXPORT_FILE_PATTERN).expect("static pattern");
    let mut files = Vec::new();
    let entries = std::fs::read_dir(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entry_path = entry.path();
        if !entry_path.is_file() {
            continue;
        }
        let name = entry.file_name();
        if pattern.is_match(&name.to_string_lossy()) {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}
