//! Ranking and aggregation configuration for query construction.
//!
//! All the fixed design constants that shape a search request live here as
//! named, immutable values: field weights for the full-text match, the
//! sales-rank signal fields and their missing-value substitute, the result
//! page size, and the static aggregation definitions that drive the facet UI.
//! The [`QueryBuilder`](crate::query::QueryBuilder) receives these explicitly,
//! so tests can run alternate weight schemes without touching query code.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A full-text match field together with its relevance weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBoost {
    /// The field name.
    pub field: String,
    /// Multiplicative weight, or `None` for the implicit weight of 1.
    pub boost: Option<u32>,
}

impl FieldBoost {
    /// Create a weighted match field.
    pub fn new<S: Into<String>>(field: S, boost: u32) -> Self {
        FieldBoost {
            field: field.into(),
            boost: Some(boost),
        }
    }

    /// Create a match field with the implicit weight of 1.
    pub fn unboosted<S: Into<String>>(field: S) -> Self {
        FieldBoost {
            field: field.into(),
            boost: None,
        }
    }

    /// Render the field in the index's `field^boost` notation.
    pub fn render(&self) -> String {
        match self.boost {
            Some(boost) => format!("{}^{}", self.field, boost),
            None => self.field.clone(),
        }
    }
}

/// Fixed ranking configuration owned by the query builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Weighted fields for the full-text must-clause, in priority order.
    pub match_fields: Vec<FieldBoost>,
    /// Sales-rank signal fields whose reciprocals multiply the base score.
    pub rank_signals: Vec<String>,
    /// Substitute rank for documents missing a signal. Large enough that the
    /// reciprocal is near zero, so documents without sales history get a
    /// near-neutral boost instead of an error or an advantage.
    pub rank_missing: u64,
    /// Fixed result window per request.
    pub page_size: usize,
    /// Sort field meaning pure relevance ordering.
    pub relevance_sort: String,
}

impl Default for RankingConfig {
    fn default() -> Self {
        RankingConfig {
            match_fields: vec![
                FieldBoost::new("name", 100),
                FieldBoost::new("shortDescription", 50),
                FieldBoost::new("longDescription", 10),
                FieldBoost::unboosted("department"),
            ],
            rank_signals: vec![
                "salesRankShortTerm".to_string(),
                "salesRankMediumTerm".to_string(),
                "salesRankLongTerm".to_string(),
            ],
            rank_missing: 100_000_000,
            page_size: 10,
            relevance_sort: "_score".to_string(),
        }
    }
}

impl RankingConfig {
    /// Render the match fields as the index expects them.
    pub fn rendered_match_fields(&self) -> Vec<String> {
        self.match_fields.iter().map(FieldBoost::render).collect()
    }
}

/// One bucket of a range aggregation. Lower bound inclusive, upper exclusive;
/// an absent bound leaves that side open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBucket {
    /// Bucket label shown in the facet UI.
    pub key: String,
    /// Minimum value (inclusive).
    pub from: Option<f64>,
    /// Maximum value (exclusive).
    pub to: Option<f64>,
}

impl RangeBucket {
    /// Create a new range bucket.
    pub fn new<S: Into<String>>(key: S, from: Option<f64>, to: Option<f64>) -> Self {
        RangeBucket {
            key: key.into(),
            from,
            to,
        }
    }

    fn to_value(&self) -> Value {
        let mut bucket = json!({ "key": self.key });
        if let Some(from) = self.from {
            bucket["from"] = json!(from);
        }
        if let Some(to) = self.to {
            bucket["to"] = json!(to);
        }
        bucket
    }
}

/// Static aggregation definitions attached to every search request,
/// independent of user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationsConfig {
    /// Untokenized field for the department terms aggregation.
    pub department_field: String,
    /// Untokenized field whose absence the missing-image count tracks.
    pub missing_image_field: String,
    /// Numeric field for the price range aggregation.
    pub price_field: String,
    /// Price buckets, cheapest first.
    pub price_buckets: Vec<RangeBucket>,
}

impl Default for AggregationsConfig {
    fn default() -> Self {
        AggregationsConfig {
            department_field: "department.keyword".to_string(),
            missing_image_field: "image.keyword".to_string(),
            price_field: "regularPrice".to_string(),
            price_buckets: vec![
                RangeBucket::new("$", Some(0.0), Some(100.0)),
                RangeBucket::new("$$", Some(100.0), Some(200.0)),
                RangeBucket::new("$$$", Some(200.0), Some(300.0)),
                RangeBucket::new("$$$$", Some(300.0), Some(400.0)),
                RangeBucket::new("$$$$$", Some(400.0), None),
            ],
        }
    }
}

impl AggregationsConfig {
    /// Render the `aggs` section of a search request.
    pub fn to_value(&self) -> Value {
        let ranges: Vec<Value> = self.price_buckets.iter().map(RangeBucket::to_value).collect();
        json!({
            "department": { "terms": { "field": self.department_field } },
            "missing_images": { "missing": { "field": self.missing_image_field } },
            "regularPrice": {
                "range": {
                    "field": self.price_field,
                    "ranges": ranges,
                }
            },
        })
    }
}
