//! GDELT event-table schema and typed row parsing
//!
//! The event export is tab-separated with no header and a fixed 58-column
//! layout (the published table definition plus the trailing SOURCEURL
//! column carried by the export files). Rows are validated eagerly at
//! ingestion: a wrong column count or a cell that does not parse as its
//! declared type aborts the run with a typed error instead of producing
//! silently misaligned columns.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Declared type of a schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    String,
    Double,
    Float,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "int",
            ColumnType::String => "string",
            ColumnType::Double => "double",
            ColumnType::Float => "float",
        };
        write!(f, "{}", name)
    }
}

/// Number of columns in one event row
pub const COLUMN_COUNT: usize = 58;

/// Column layout of the GDELT event table, in wire order
pub const EVENT_COLUMNS: [(&str, ColumnType); COLUMN_COUNT] = [
    ("GLOBALEVENTID", ColumnType::Int),
    ("SQLDATE", ColumnType::Int),
    ("MonthYear", ColumnType::String),
    ("Year", ColumnType::String),
    ("FractionDate", ColumnType::Double),
    ("Actor1Code", ColumnType::String),
    ("Actor1Name", ColumnType::String),
    ("Actor1CountryCode", ColumnType::String),
    ("Actor1KnownGroupCode", ColumnType::String),
    ("Actor1EthnicCode", ColumnType::String),
    ("Actor1Religion1Code", ColumnType::String),
    ("Actor1Religion2Code", ColumnType::String),
    ("Actor1Type1Code", ColumnType::String),
    ("Actor1Type2Code", ColumnType::String),
    ("Actor1Type3Code", ColumnType::String),
    ("Actor2Code", ColumnType::String),
    ("Actor2Name", ColumnType::String),
    ("Actor2CountryCode", ColumnType::String),
    ("Actor2KnownGroupCode", ColumnType::String),
    ("Actor2EthnicCode", ColumnType::String),
    ("Actor2Religion1Code", ColumnType::String),
    ("Actor2Religion2Code", ColumnType::String),
    ("Actor2Type1Code", ColumnType::String),
    ("Actor2Type2Code", ColumnType::String),
    ("Actor2Type3Code", ColumnType::String),
    ("IsRootEvent", ColumnType::Int),
    ("EventCode", ColumnType::String),
    ("EventBaseCode", ColumnType::String),
    ("EventRootCode", ColumnType::String),
    ("QuadClass", ColumnType::Int),
    ("GoldsteinScale", ColumnType::Double),
    ("NumMentions", ColumnType::Int),
    ("NumSources", ColumnType::Int),
    ("NumArticles", ColumnType::Int),
    ("AvgTone", ColumnType::Double),
    ("Actor1Geo_Type", ColumnType::Int),
    ("Actor1Geo_FullName", ColumnType::String),
    ("Actor1Geo_CountryCode", ColumnType::String),
    ("Actor1Geo_ADM1Code", ColumnType::String),
    ("Actor1Geo_Lat", ColumnType::Float),
    ("Actor1Geo_Long", ColumnType::Float),
    ("Actor1Geo_FeatureID", ColumnType::Int),
    ("Actor2Geo_Type", ColumnType::Int),
    ("Actor2Geo_FullName", ColumnType::String),
    ("Actor2Geo_CountryCode", ColumnType::String),
    ("Actor2Geo_ADM1Code", ColumnType::String),
    ("Actor2Geo_Lat", ColumnType::Float),
    ("Actor2Geo_Long", ColumnType::Float),
    ("Actor2Geo_FeatureID", ColumnType::Int),
    ("ActionGeo_Type", ColumnType::Int),
    ("ActionGeo_FullName", ColumnType::String),
    ("ActionGeo_CountryCode", ColumnType::String),
    ("ActionGeo_ADM1Code", ColumnType::String),
    ("ActionGeo_Lat", ColumnType::Float),
    ("ActionGeo_Long", ColumnType::Float),
    ("ActionGeo_FeatureID", ColumnType::Int),
    ("DATEADDED", ColumnType::Int),
    ("SOURCEURL", ColumnType::String),
];

// Column positions consumed by the pipeline. Pinned by tests against
// EVENT_COLUMNS so the table and the indices cannot drift apart.
const IDX_GLOBAL_EVENT_ID: usize = 0;
const IDX_EVENT_ROOT_CODE: usize = 28;
const IDX_GOLDSTEIN_SCALE: usize = 30;
const IDX_ACTOR1_GEO_FULL_NAME: usize = 36;
const IDX_ACTOR1_GEO_COUNTRY_CODE: usize = 37;
const IDX_ACTOR2_GEO_COUNTRY_CODE: usize = 44;

/// Errors raised while validating a raw event row
#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("column {column} ({ty}): invalid value {value:?}")]
    InvalidValue {
        column: &'static str,
        ty: ColumnType,
        value: String,
    },
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// One parsed event row, reduced to the fields the pipeline consumes
///
/// Empty cells in the export are nulls and surface as `None`. Records are
/// immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Globally unique event identifier
    pub global_event_id: i64,

    /// CAMEO root code classifying the event category
    pub event_root_code: String,

    /// Goldstein intensity score, -10..+10 nominal range
    pub goldstein_scale: Option<f64>,

    /// Full geographic name of the originating actor's location
    pub actor1_geo_full_name: Option<String>,

    /// Country code of the originating actor's location
    pub actor1_geo_country_code: Option<String>,

    /// Country code of the target actor's location
    pub actor2_geo_country_code: Option<String>,
}

fn cell_to_option(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

fn validate_cell(cell: &str, column: &'static str, ty: ColumnType) -> SchemaResult<()> {
    if cell.is_empty() {
        return Ok(());
    }
    let ok = match ty {
        ColumnType::Int => cell.parse::<i64>().is_ok(),
        ColumnType::Double | ColumnType::Float => cell.parse::<f64>().is_ok(),
        ColumnType::String => true,
    };
    if ok {
        Ok(())
    } else {
        Err(SchemaError::InvalidValue {
            column,
            ty,
            value: cell.to_string(),
        })
    }
}

/// Parse and validate one raw tab-separated event row
///
/// Every cell is checked against its declared column type, not just the
/// fields the pipeline keeps. Fails fast on the first mismatch.
pub fn parse_row(line: &str) -> SchemaResult<EventRecord> {
    let cells: Vec<&str> = line.split('\t').collect();
    if cells.len() != COLUMN_COUNT {
        return Err(SchemaError::ColumnCount {
            expected: COLUMN_COUNT,
            found: cells.len(),
        });
    }

    for (cell, (name, ty)) in cells.iter().zip(EVENT_COLUMNS.iter()) {
        validate_cell(cell, name, *ty)?;
    }

    // Cells are type-checked above; these parses cannot fail.
    let global_event_id = cells[IDX_GLOBAL_EVENT_ID].parse::<i64>().map_err(|_| {
        SchemaError::InvalidValue {
            column: EVENT_COLUMNS[IDX_GLOBAL_EVENT_ID].0,
            ty: ColumnType::Int,
            value: cells[IDX_GLOBAL_EVENT_ID].to_string(),
        }
    })?;
    let goldstein_scale = if cells[IDX_GOLDSTEIN_SCALE].is_empty() {
        None
    } else {
        cells[IDX_GOLDSTEIN_SCALE].parse::<f64>().ok()
    };

    Ok(EventRecord {
        global_event_id,
        event_root_code: cells[IDX_EVENT_ROOT_CODE].to_string(),
        goldstein_scale,
        actor1_geo_full_name: cell_to_option(cells[IDX_ACTOR1_GEO_FULL_NAME]),
        actor1_geo_country_code: cell_to_option(cells[IDX_ACTOR1_GEO_COUNTRY_CODE]),
        actor2_geo_country_code: cell_to_option(cells[IDX_ACTOR2_GEO_COUNTRY_CODE]),
    })
}
