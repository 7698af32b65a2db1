//! CAMEO event-code lookup table
//!
//! The codebook maps CAMEO event codes to human-readable descriptions and
//! is published as a tab-separated flat file. It is consumed read-only and
//! only to identify the category under analysis; the pipeline itself runs
//! off a configured root code, so a lookup outage never blocks it.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::info;

/// CAMEO root code for threat events
pub const THREAT_ROOT_CODE: &str = "13";

/// Published location of the codebook flat file
pub const CAMEO_EVENTCODES_URL: &str =
    "https://www.gdeltproject.org/data/lookups/CAMEO.eventcodes.txt";

const HEADER: &str = "CAMEOEVENTCODE\tEVENTDESCRIPTION";

/// Lookup errors
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("codebook is missing the CAMEOEVENTCODE/EVENTDESCRIPTION header")]
    MissingHeader,

    #[error("codebook line {0}: expected two tab-separated fields")]
    MalformedRow(usize),
}

pub type LookupResult<T> = Result<T, LookupError>;

/// In-memory CAMEO codebook, in published order
#[derive(Debug, Clone, Default)]
pub struct CameoCodebook {
    codes: IndexMap<String, String>,
}

impl CameoCodebook {
    /// Fetch and parse the codebook from a flat-file URL
    pub async fn fetch(url: &str) -> LookupResult<Self> {
        let body = reqwest::get(url).await?.error_for_status()?.text().await?;
        let codebook = Self::parse(&body)?;
        info!(codes = codebook.len(), url, "fetched CAMEO codebook");
        Ok(codebook)
    }

    /// Parse the tab-separated codebook text
    pub fn parse(text: &str) -> LookupResult<Self> {
        let mut lines = text.lines().enumerate();
        match lines.next() {
            Some((_, header)) if header.trim_end() == HEADER => {}
            _ => return Err(LookupError::MissingHeader),
        }

        let mut codes = IndexMap::new();
        for (idx, line) in lines {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let (code, description) = line
                .split_once('\t')
                .ok_or(LookupError::MalformedRow(idx + 1))?;
            codes.insert(code.to_string(), description.to_string());
        }
        Ok(CameoCodebook { codes })
    }

    /// Description for an exact event code
    pub fn describe(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    /// All codes under a root code (the root itself plus its refinements)
    pub fn refinements(&self, root: &str) -> Vec<(&str, &str)> {
        self.codes
            .iter()
            .filter(|(code, _)| code.starts_with(root))
            .map(|(code, desc)| (code.as_str(), desc.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
