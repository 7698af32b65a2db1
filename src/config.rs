//! Pipeline configuration
//!
//! Every knob defaults to the standard threat analysis (root code `13`,
//! top 300 pairs, self-loops excluded, width constant 0.5), so an empty
//! config file and no config file behave identically.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Pipeline run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// CAMEO root code selecting the event category
    pub root_code: String,

    /// Number of top-ranked pairs to visualize
    pub top_n: usize,

    /// Drop `src == dst` edges before aggregation
    pub exclude_self_loops: bool,

    /// Edge width multiplier applied to `count / mean(count)`
    pub width_constant: f64,

    /// Rendered canvas size in pixels (square)
    pub canvas_size: f64,

    /// Directory holding the persisted derived tables
    pub data_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            root_code: crate::lookup::THREAT_ROOT_CODE.to_string(),
            top_n: 300,
            exclude_self_loops: true,
            width_constant: 0.5,
            canvas_size: 1000.0,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }
}
