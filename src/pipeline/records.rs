//! Derived record types flowing between pipeline stages
//!
//! Every stage consumes an immutable collection and produces a new one;
//! nothing here is mutated in place after construction.

use serde::{Deserialize, Serialize};

/// A deduplicated graph vertex: country code plus display name
///
/// `name` is the first-seen geographic full name for the code; records
/// with a null name but a present code keep an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: String,
    pub name: String,
}

impl VertexRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        VertexRecord {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One projected threat edge: originating country, target country, and
/// the Goldstein score of the underlying event
///
/// Multiple edges may share the same `(src, dst)`; multiplicity is what
/// the aggregation counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub src: String,
    pub dst: String,
    pub gscale: Option<f64>,
}

impl EdgeRecord {
    pub fn new(src: impl Into<String>, dst: impl Into<String>, gscale: Option<f64>) -> Self {
        EdgeRecord {
            src: src.into(),
            dst: dst.into(),
            gscale,
        }
    }
}

/// One aggregated `(src, dst)` pair with its exact occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedEdge {
    pub src: String,
    pub dst: String,
    pub count: u64,
}

impl AggregatedEdge {
    pub fn new(src: impl Into<String>, dst: impl Into<String>, count: u64) -> Self {
        AggregatedEdge {
            src: src.into(),
            dst: dst.into(),
            count,
        }
    }
}

/// Aggregated edges sorted by count descending
///
/// Ties break by first appearance of the pair in the input collection,
/// so the ordering is deterministic for a fixed input ordering.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedEdgeList(Vec<AggregatedEdge>);

impl RankedEdgeList {
    pub(crate) fn from_sorted(edges: Vec<AggregatedEdge>) -> Self {
        RankedEdgeList(edges)
    }

    /// Prefix of the `min(n, len)` highest-ranked pairs
    pub fn top(&self, n: usize) -> &[AggregatedEdge] {
        &self.0[..n.min(self.0.len())]
    }

    /// Sum of all pair counts
    pub fn total_count(&self) -> u64 {
        self.0.iter().map(|edge| edge.count).sum()
    }

    pub fn as_slice(&self) -> &[AggregatedEdge] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AggregatedEdge> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for RankedEdgeList {
    type Item = AggregatedEdge;
    type IntoIter = std::vec::IntoIter<AggregatedEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedEdgeList {
    type Item = &'a AggregatedEdge;
    type IntoIter = std::slice::Iter<'a, AggregatedEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
