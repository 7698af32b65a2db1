//! Edge aggregation and ranking
//!
//! Group-by over `(src, dst)` with an exact occurrence count, then a
//! descending sort. The count is pure multiplicity; the Goldstein score
//! rides along on the raw edges but never enters the aggregation.

use super::records::{AggregatedEdge, EdgeRecord, RankedEdgeList};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Aggregation options
#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
    /// Drop `src == dst` edges before grouping
    pub exclude_self_loops: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        AggregateOptions {
            exclude_self_loops: true,
        }
    }
}

/// Group edges by `(src, dst)`, count, and rank by count descending
///
/// Ties on count break by first appearance of the pair, so the result is
/// identical for any permutation of the input up to tie order, and fully
/// deterministic for a fixed input ordering. Empty input yields an empty
/// list.
pub fn aggregate_edges(edges: &[EdgeRecord], options: AggregateOptions) -> RankedEdgeList {
    // (count, first appearance index) per pair
    let mut groups: FxHashMap<(&str, &str), (u64, usize)> = FxHashMap::default();
    let mut kept = 0usize;

    for edge in edges {
        if edge.src.is_empty() || edge.dst.is_empty() {
            continue;
        }
        if options.exclude_self_loops && edge.src == edge.dst {
            continue;
        }
        let next_index = groups.len();
        let entry = groups
            .entry((edge.src.as_str(), edge.dst.as_str()))
            .or_insert((0, next_index));
        entry.0 += 1;
        kept += 1;
    }

    let mut rows: Vec<((&str, &str), (u64, usize))> = groups.into_iter().collect();
    rows.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    debug!(input = edges.len(), kept, pairs = rows.len(), "aggregated edges");

    RankedEdgeList::from_sorted(
        rows.into_iter()
            .map(|((src, dst), (count, _))| AggregatedEdge::new(src, dst, count))
            .collect(),
    )
}
