//! Construction of the scored, aggregated search request.

use log::debug;
use serde_json::{Value, json};

use crate::config::{AggregationsConfig, RankingConfig};
use crate::query::clause::QueryClause;

/// Sort direction for an explicit sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Decode a request parameter, defaulting to descending for anything
    /// blank or unrecognized.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    /// The wire form of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A sort field and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by; `_score` means pure relevance ordering.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create a sort spec.
    pub fn new<S: Into<String>>(field: S, direction: SortDirection) -> Self {
        SortSpec {
            field: field.into(),
            direction,
        }
    }

    /// Pure relevance ordering (`_score` descending).
    pub fn relevance() -> Self {
        SortSpec::new("_score", SortDirection::Desc)
    }

    /// Whether this spec means pure relevance ordering.
    pub fn is_relevance(&self) -> bool {
        self.field == "_score"
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::relevance()
    }
}

/// A fully built search request: immutable, self-contained, request-scoped.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// The free-text query (`*` matches all).
    pub text: String,
    /// Positive filter clauses.
    pub filters: Vec<QueryClause>,
    /// Negated clauses.
    pub must_not: Vec<QueryClause>,
    /// Requested ordering.
    pub sort: SortSpec,
    /// Result window size.
    pub size: usize,
    body: Value,
}

impl SearchRequest {
    /// The request body in the index's JSON DSL.
    pub fn body(&self) -> &Value {
        &self.body
    }
}

/// Builds search requests from query text, filter clauses, and the fixed
/// ranking/aggregation configuration.
///
/// Building is a pure function of the inputs: two calls with identical
/// arguments yield structurally identical requests.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    ranking: RankingConfig,
    aggregations: AggregationsConfig,
}

impl QueryBuilder {
    /// Create a builder with explicit configuration.
    pub fn new(ranking: RankingConfig, aggregations: AggregationsConfig) -> Self {
        QueryBuilder {
            ranking,
            aggregations,
        }
    }

    /// Create a builder with the production configuration.
    pub fn with_defaults() -> Self {
        QueryBuilder::new(RankingConfig::default(), AggregationsConfig::default())
    }

    /// The ranking configuration in use.
    pub fn ranking(&self) -> &RankingConfig {
        &self.ranking
    }

    /// Build a search request.
    ///
    /// The text becomes a weighted multi-field must-clause, the filter lists
    /// become the bool query's `filter` and `must_not` sections, and the
    /// whole match is wrapped in a function score that multiplies base
    /// relevance by the average reciprocal of the sales-rank signals. An
    /// explicit `sort` section is attached only when the requested sort
    /// deviates from pure relevance ordering.
    pub fn build(
        &self,
        text: &str,
        filters: &[QueryClause],
        must_not: &[QueryClause],
        sort: SortSpec,
    ) -> SearchRequest {
        let match_query = json!({
            "bool": {
                "must": [
                    {
                        "multi_match": {
                            "query": text,
                            "fields": self.ranking.rendered_match_fields(),
                        }
                    }
                ],
                "filter": render_clauses(filters),
                "must_not": render_clauses(must_not),
            }
        });

        let functions: Vec<Value> = self
            .ranking
            .rank_signals
            .iter()
            .map(|field| {
                json!({
                    "field_value_factor": {
                        "field": field,
                        "modifier": "reciprocal",
                        "missing": self.ranking.rank_missing,
                    }
                })
            })
            .collect();

        // The functions average together, then that average multiplies the
        // base relevance score.
        let scored_query = json!({
            "function_score": {
                "query": match_query,
                "boost_mode": "multiply",
                "score_mode": "avg",
                "functions": functions,
            }
        });

        let mut body = json!({
            "size": self.ranking.page_size,
            "query": scored_query,
            "aggs": self.aggregations.to_value(),
        });

        if sort.field != self.ranking.relevance_sort {
            body["sort"] = json!([{ (sort.field.as_str()): { "order": sort.direction.as_str() } }]);
        }

        debug!("built search request: {body}");

        SearchRequest {
            text: text.to_string(),
            filters: filters.to_vec(),
            must_not: must_not.to_vec(),
            sort,
            size: self.ranking.page_size,
            body,
        }
    }
}

fn render_clauses(clauses: &[QueryClause]) -> Vec<Value> {
    clauses.iter().map(QueryClause::to_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> QueryBuilder {
        QueryBuilder::with_defaults()
    }

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse(Some("asc")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("ASC")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(None), SortDirection::Desc);
    }

    #[test]
    fn test_match_clause_field_weights() {
        let request = builder().build("iphone", &[], &[], SortSpec::relevance());
        let body = request.body();

        let must = &body["query"]["function_score"]["query"]["bool"]["must"];
        assert_eq!(must[0]["multi_match"]["query"], "iphone");
        assert_eq!(
            must[0]["multi_match"]["fields"],
            json!(["name^100", "shortDescription^50", "longDescription^10", "department"])
        );
    }

    #[test]
    fn test_filters_and_must_not_sections() {
        let filters = vec![QueryClause::term("department", "Phones")];
        let must_not = vec![QueryClause::exists("image")];
        let request = builder().build("*", &filters, &must_not, SortSpec::relevance());
        let bool_query = &request.body()["query"]["function_score"]["query"]["bool"];

        assert_eq!(
            bool_query["filter"],
            json!([{ "term": { "department.keyword": "Phones" } }])
        );
        assert_eq!(
            bool_query["must_not"],
            json!([{ "exists": { "field": "image" } }])
        );
    }

    #[test]
    fn test_function_score_configuration() {
        let request = builder().build("tv", &[], &[], SortSpec::relevance());
        let score = &request.body()["query"]["function_score"];

        assert_eq!(score["boost_mode"], "multiply");
        assert_eq!(score["score_mode"], "avg");

        let functions = score["functions"].as_array().unwrap();
        assert_eq!(functions.len(), 3);
        for (function, field) in functions
            .iter()
            .zip(["salesRankShortTerm", "salesRankMediumTerm", "salesRankLongTerm"])
        {
            let factor = &function["field_value_factor"];
            assert_eq!(factor["field"], field);
            assert_eq!(factor["modifier"], "reciprocal");
            // Documents without sales history fall back to a huge rank whose
            // reciprocal is near zero, a neutral contribution rather than a
            // crash or an exclusion.
            assert_eq!(factor["missing"], 100_000_000u64);
        }
    }

    #[test]
    fn test_fixed_page_size_and_aggregations() {
        let request = builder().build("tv", &[], &[], SortSpec::relevance());
        let body = request.body();

        assert_eq!(body["size"], 10);
        assert!(body["aggs"]["department"].is_object());
        assert!(body["aggs"]["missing_images"].is_object());
        assert_eq!(
            body["aggs"]["regularPrice"]["range"]["ranges"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
    }

    #[test]
    fn test_relevance_sort_attaches_no_sort_section() {
        let request = builder().build("tv", &[], &[], SortSpec::relevance());
        assert!(request.body().get("sort").is_none());
    }

    #[test]
    fn test_explicit_sort_attached_when_not_relevance() {
        let sort = SortSpec::new("regularPrice", SortDirection::Asc);
        let request = builder().build("tv", &[], &[], sort);

        assert_eq!(
            request.body()["sort"],
            json!([{ "regularPrice": { "order": "asc" } }])
        );
    }

    #[test]
    fn test_build_is_pure() {
        let filters = vec![QueryClause::range(
            "regularPrice",
            Some("100".to_string()),
            Some("200".to_string()),
        )];
        let must_not = vec![QueryClause::exists("image")];

        let a = builder().build("laptop", &filters, &must_not, SortSpec::relevance());
        let b = builder().build("laptop", &filters, &must_not, SortSpec::relevance());

        assert_eq!(a, b);
        assert_eq!(a.body(), b.body());
    }

    #[test]
    fn test_alternate_weight_scheme() {
        use crate::config::FieldBoost;

        let ranking = RankingConfig {
            match_fields: vec![FieldBoost::new("title", 2)],
            page_size: 25,
            ..RankingConfig::default()
        };
        let builder = QueryBuilder::new(ranking, AggregationsConfig::default());
        let request = builder.build("tv", &[], &[], SortSpec::relevance());

        assert_eq!(request.body()["size"], 25);
        assert_eq!(
            request.body()["query"]["function_score"]["query"]["bool"]["must"][0]["multi_match"]
                ["fields"],
            json!(["title^2"])
        );
    }
}
