//! The consumed search-index capability and its response shape.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::query::SearchRequest;

/// Capability to execute a search request against a named index.
///
/// One call per incoming request, synchronous; timeouts and retries are the
/// hosting layer's concern. A failing client surfaces through
/// [`StoreQueryError::IndexUnavailable`](crate::error::StoreQueryError).
pub trait SearchClient {
    /// Execute the request against `index`.
    fn search(&self, request: &SearchRequest, index: &str) -> Result<SearchResponse>;
}

/// Response from the search index: scored documents plus facet counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The matched documents.
    #[serde(default)]
    pub hits: SearchHits,
    /// Bucketed counts keyed by aggregation name.
    #[serde(default)]
    pub aggregations: HashMap<String, AggregationResult>,
}

/// The hits section of a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHits {
    /// Total matching document count.
    #[serde(default)]
    pub total: TotalHits,
    /// Highest score in the result window.
    #[serde(default)]
    pub max_score: Option<f64>,
    /// The scored documents, best first.
    #[serde(default)]
    pub hits: Vec<ScoredDoc>,
}

/// Total hit count with its accuracy relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalHits {
    /// Number of matching documents.
    #[serde(default)]
    pub value: u64,
    /// `"eq"` or `"gte"` when the count is a lower bound.
    #[serde(default)]
    pub relation: Option<String>,
}

/// One scored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDoc {
    /// Document identifier.
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Relevance score, absent when sorting by a field.
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    /// The stored document fields.
    #[serde(rename = "_source", default)]
    pub source: Value,
}

/// One aggregation's counts: either a plain document count (missing-field
/// aggregations) or a list of buckets (terms and range aggregations).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Document count for single-value aggregations.
    #[serde(default)]
    pub doc_count: Option<u64>,
    /// Buckets for terms/range aggregations.
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

/// One bucket of a terms or range aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Bucket key (a term, or a range label like `$$`).
    #[serde(default)]
    pub key: String,
    /// Documents in this bucket.
    #[serde(default)]
    pub doc_count: u64,
    /// Range lower bound, range aggregations only.
    #[serde(default)]
    pub from: Option<f64>,
    /// Range upper bound, range aggregations only.
    #[serde(default)]
    pub to: Option<f64>,
}
