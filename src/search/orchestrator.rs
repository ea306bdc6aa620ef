//! Request-level control flow: route, build, submit, assemble.

use log::{debug, info};

use crate::error::{Result, StoreQueryError};
use crate::filter::{AppliedFilterState, QueryParams, parse_filters};
use crate::query::{QueryBuilder, SortDirection, SortSpec};
use crate::search::client::{SearchClient, SearchResponse};

/// How a request is routed: a fresh text query, or a refinement carrying
/// facet filters. An empty `filter.name` list is a fresh query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Text submitted (or page loaded) with no filters.
    Fresh,
    /// Facet click-through with filters present.
    Filtered,
}

impl QueryMode {
    /// Decide the mode from the request parameters.
    pub fn of(params: &QueryParams) -> Self {
        if params.filter_names().is_empty() {
            QueryMode::Fresh
        } else {
            QueryMode::Filtered
        }
    }
}

/// Everything the result page needs: the echoed query, the raw index
/// response, and the applied-filter state to thread through further links.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPayload {
    /// The query text as executed (blank input becomes `*`).
    pub query: String,
    /// The raw search response (results and aggregation buckets).
    pub response: SearchResponse,
    /// Display strings for the applied filters, empty when none.
    pub display_filters: Vec<String>,
    /// Re-embeddable fragment preserving the applied filters, empty when none.
    pub applied_filters: String,
    /// Sort field in effect.
    pub sort: String,
    /// Sort direction in effect.
    pub sort_dir: SortDirection,
}

/// Per-request search orchestration over a [`SearchClient`] capability.
///
/// Stateless across requests: every invocation reads only its own parameters
/// and returns its own payload, so concurrent requests never interact.
#[derive(Debug)]
pub struct SearchOrchestrator<C: SearchClient> {
    client: C,
    builder: QueryBuilder,
    index: String,
}

impl<C: SearchClient> SearchOrchestrator<C> {
    /// Create an orchestrator searching `index` through `client`.
    pub fn new<S: Into<String>>(client: C, builder: QueryBuilder, index: S) -> Self {
        SearchOrchestrator {
            client,
            builder,
            index: index.into(),
        }
    }

    /// Handle one request's parameters end to end.
    ///
    /// Blank query text defaults to the `*` match-all wildcard and blank sort
    /// parameters default to relevance ordering. A failing index call
    /// propagates as [`StoreQueryError::IndexUnavailable`]; it is never
    /// rendered as a silent empty result set.
    pub fn execute(&self, params: &QueryParams) -> Result<RenderPayload> {
        let query = params.first_non_empty("query").unwrap_or("*").to_string();
        let sort = SortSpec::new(
            params.first_non_empty("sort").unwrap_or("_score"),
            SortDirection::parse(params.first_non_empty("sortDir")),
        );

        let mode = QueryMode::of(params);
        let state = match mode {
            QueryMode::Filtered => parse_filters(&params.filter_names(), params),
            QueryMode::Fresh => AppliedFilterState::empty(),
        };
        debug!("mode {mode:?}, query '{query}', {} filter(s)", state.filters.len());

        let request = self
            .builder
            .build(&query, &state.filters, &state.must_not, sort.clone());

        let response = self
            .client
            .search(&request, &self.index)
            .map_err(|err| match err {
                unavailable @ StoreQueryError::IndexUnavailable(_) => unavailable,
                other => StoreQueryError::index_unavailable(other.to_string()),
            })?;
        info!(
            "query '{query}' matched {} document(s)",
            response.hits.total.value
        );

        Ok(RenderPayload {
            query,
            response,
            display_filters: state.display_filters,
            applied_filters: state.applied_filters,
            sort: sort.field,
            sort_dir: sort.direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::query::SearchRequest;

    /// Records the last request body and replies with a canned response.
    struct RecordingClient {
        last_body: RefCell<Option<serde_json::Value>>,
        fail: bool,
    }

    impl RecordingClient {
        fn new() -> Self {
            RecordingClient {
                last_body: RefCell::new(None),
                fail: false,
            }
        }

        fn failing() -> Self {
            RecordingClient {
                last_body: RefCell::new(None),
                fail: true,
            }
        }
    }

    impl SearchClient for RecordingClient {
        fn search(&self, request: &SearchRequest, _index: &str) -> Result<SearchResponse> {
            if self.fail {
                return Err(StoreQueryError::other("connection reset"));
            }
            *self.last_body.borrow_mut() = Some(request.body().clone());
            Ok(SearchResponse::default())
        }
    }

    fn orchestrator(client: RecordingClient) -> SearchOrchestrator<RecordingClient> {
        SearchOrchestrator::new(client, QueryBuilder::with_defaults(), "products")
    }

    #[test]
    fn test_blank_query_defaults_to_wildcard() {
        let orchestrator = orchestrator(RecordingClient::new());
        let payload = orchestrator.execute(&QueryParams::parse("query=")).unwrap();

        assert_eq!(payload.query, "*");
        assert_eq!(payload.sort, "_score");
        assert_eq!(payload.sort_dir, SortDirection::Desc);
    }

    #[test]
    fn test_fresh_query_has_empty_filter_state() {
        let orchestrator = orchestrator(RecordingClient::new());
        let payload = orchestrator
            .execute(&QueryParams::parse("query=laptop"))
            .unwrap();

        assert!(payload.display_filters.is_empty());
        assert_eq!(payload.applied_filters, "");
    }

    #[test]
    fn test_filtered_query_threads_filter_state() {
        let orchestrator = orchestrator(RecordingClient::new());
        let payload = orchestrator
            .execute(&QueryParams::parse(
                "query=laptop&filter.name=department&department.type=terms&department.key=Computers",
            ))
            .unwrap();

        assert_eq!(payload.display_filters, vec!["department: Computers"]);
        assert!(payload.applied_filters.contains("filter.name=department"));

        let body = orchestrator.client.last_body.borrow().clone().unwrap();
        assert_eq!(
            body["query"]["function_score"]["query"]["bool"]["filter"][0]["term"]
                ["department.keyword"],
            "Computers"
        );
    }

    #[test]
    fn test_empty_filter_name_list_routes_fresh() {
        let with_blank = QueryParams::parse("query=laptop&filter.name=");
        let without = QueryParams::parse("query=laptop");

        assert_eq!(QueryMode::of(&with_blank), QueryMode::Fresh);

        let orchestrator = orchestrator(RecordingClient::new());
        let a = orchestrator.execute(&with_blank).unwrap();
        let b = orchestrator.execute(&without).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_explicit_sort_passed_through() {
        let orchestrator = orchestrator(RecordingClient::new());
        let payload = orchestrator
            .execute(&QueryParams::parse("query=tv&sort=regularPrice&sortDir=asc"))
            .unwrap();

        assert_eq!(payload.sort, "regularPrice");
        assert_eq!(payload.sort_dir, SortDirection::Asc);

        let body = orchestrator.client.last_body.borrow().clone().unwrap();
        assert_eq!(body["sort"][0]["regularPrice"]["order"], "asc");
    }

    #[test]
    fn test_client_failure_surfaces_as_index_unavailable() {
        let orchestrator = orchestrator(RecordingClient::failing());
        let err = orchestrator
            .execute(&QueryParams::parse("query=laptop"))
            .unwrap_err();

        match err {
            StoreQueryError::IndexUnavailable(msg) => {
                assert!(msg.contains("connection reset"));
            }
            other => panic!("expected IndexUnavailable, got {other:?}"),
        }
    }
}
