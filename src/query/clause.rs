//! Structured filter clauses in the index's filter language.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Optional bounds for a range clause: inclusive lower, exclusive upper.
/// An absent bound leaves that side open; both absent is degenerate but valid
/// (matches any value for the field).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBounds {
    /// Greater-than-or-equal bound.
    pub gte: Option<String>,
    /// Less-than bound.
    pub lt: Option<String>,
}

/// One fragment of the index's boolean filter language.
///
/// Bound values stay as the strings they arrived as; the index coerces them
/// against the field's mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryClause {
    /// Bounded range test on a field.
    Range {
        /// Field being constrained.
        field: String,
        /// The bounds, either side optional.
        bounds: RangeBounds,
    },
    /// Exact-match test against the field's untokenized form.
    Term {
        /// Field being constrained.
        field: String,
        /// Exact term to match.
        value: String,
    },
    /// Existence test on a field; placed in must_not to keep documents where
    /// the field is absent.
    Exists {
        /// Field whose presence is tested.
        field: String,
    },
}

impl QueryClause {
    /// Create a range clause.
    pub fn range<S: Into<String>>(field: S, gte: Option<String>, lt: Option<String>) -> Self {
        QueryClause::Range {
            field: field.into(),
            bounds: RangeBounds { gte, lt },
        }
    }

    /// Create an exact-match clause.
    pub fn term<S: Into<String>, V: Into<String>>(field: S, value: V) -> Self {
        QueryClause::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an existence clause.
    pub fn exists<S: Into<String>>(field: S) -> Self {
        QueryClause::Exists {
            field: field.into(),
        }
    }

    /// Render the clause as its index DSL fragment.
    pub fn to_value(&self) -> Value {
        match self {
            QueryClause::Range { field, bounds } => {
                let mut body = Map::new();
                if let Some(gte) = &bounds.gte {
                    body.insert("gte".to_string(), json!(gte));
                }
                if let Some(lt) = &bounds.lt {
                    body.insert("lt".to_string(), json!(lt));
                }
                json!({ "range": { (field.as_str()): body } })
            }
            QueryClause::Term { field, value } => {
                // Equality runs against the untokenized sub-field, never the
                // analyzed text.
                json!({ "term": { (format!("{field}.keyword")): value } })
            }
            QueryClause::Exists { field } => {
                json!({ "exists": { "field": field } })
            }
        }
    }
}
