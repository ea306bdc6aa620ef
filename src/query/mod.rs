//! Query construction: filter clauses and the scored search request.

pub mod builder;
pub mod clause;

pub use self::builder::{QueryBuilder, SearchRequest, SortDirection, SortSpec};
pub use self::clause::{QueryClause, RangeBounds};
