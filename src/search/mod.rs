//! Search orchestration and the search-index capability boundary.

pub mod client;
pub mod orchestrator;

pub use self::client::{
    AggregationResult, Bucket, ScoredDoc, SearchClient, SearchHits, SearchResponse, TotalHits,
};
pub use self::orchestrator::{QueryMode, RenderPayload, SearchOrchestrator};
