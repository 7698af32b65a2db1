//! Vertex and edge projection from filtered event records
//!
//! Both projections silently drop candidates missing required country
//! codes; a missing identifier is expected data, not an error.

use super::records::{EdgeRecord, VertexRecord};
use crate::schema::EventRecord;
use indexmap::IndexMap;

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Project deduplicated vertices from the originating side of each record
///
/// Dedup key is the country code alone; the first-seen name wins when the
/// same code appears under different spellings. Output preserves first
/// appearance order.
pub fn project_vertices(records: &[EventRecord]) -> Vec<VertexRecord> {
    let mut seen: IndexMap<&str, &str> = IndexMap::new();
    for record in records {
        let Some(id) = non_empty(&record.actor1_geo_country_code) else {
            continue;
        };
        let name = non_empty(&record.actor1_geo_full_name).unwrap_or("");
        seen.entry(id).or_insert(name);
    }

    seen.into_iter()
        .map(|(id, name)| VertexRecord::new(id, name))
        .collect()
}

/// Project one candidate edge per record, keeping multiplicity
///
/// A record missing either country code contributes no edge. No
/// deduplication happens here; repeated `(src, dst)` pairs feed the
/// aggregation count.
pub fn project_edges(records: &[EventRecord]) -> Vec<EdgeRecord> {
    records
        .iter()
        .filter_map(|record| {
            let src = non_empty(&record.actor1_geo_country_code)?;
            let dst = non_empty(&record.actor2_geo_country_code)?;
            Some(EdgeRecord::new(src, dst, record.goldstein_scale))
        })
        .collect()
}
