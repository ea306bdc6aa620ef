//! # storequery
//!
//! A search-relevance query layer for a product search engine.
//!
//! storequery turns a free-text user query plus user-selected facet filters
//! into a structured, scored search request in the index's JSON DSL, and
//! round-trips applied-filter state so a UI can iteratively refine results.
//!
//! ## Features
//!
//! - Facet filter parsing (range, terms, missing-field) with best-effort
//!   handling of malformed links
//! - Three co-derived filter representations: query clauses, display
//!   strings, and a re-embeddable query-string fragment
//! - Weighted multi-field relevance blended with reciprocal sales-rank
//!   signals via a multiplicative function score
//! - Static facet aggregations (department, missing images, price buckets)
//! - A `SearchClient` seam for the index collaborator

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod query;
pub mod search;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
