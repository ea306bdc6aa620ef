//! Command implementations for the storequery CLI.

use serde::Serialize;
use serde_json::Value;

use crate::cli::args::*;
use crate::cli::output::output_result;
use crate::error::Result;
use crate::filter::{QueryParams, parse_filters};
use crate::query::{QueryBuilder, QueryClause, SortDirection, SortSpec};

/// Execute a CLI command.
pub fn execute_command(args: StoreQueryArgs) -> Result<()> {
    match &args.command {
        Command::BuildQuery(build_args) => build_query(build_args.clone(), &args),
        Command::ParseFilters(parse_args) => parse_filter_params(parse_args.clone(), &args),
    }
}

/// Result structure for query construction.
#[derive(Debug, Serialize)]
struct BuildQueryResult {
    query: String,
    sort: String,
    sort_dir: String,
    display_filters: Vec<String>,
    applied_filters: String,
    body: Value,
}

/// Build a search request from a query and a filter fragment and print it.
fn build_query(args: BuildQueryArgs, cli_args: &StoreQueryArgs) -> Result<()> {
    let params = QueryParams::parse(&args.params);

    let query = if args.query.is_empty() {
        "*".to_string()
    } else {
        args.query
    };
    let sort = SortSpec::new(
        params.first_non_empty("sort").unwrap_or("_score"),
        SortDirection::parse(params.first_non_empty("sortDir")),
    );

    let state = parse_filters(&params.filter_names(), &params);
    let request = QueryBuilder::with_defaults().build(
        &query,
        &state.filters,
        &state.must_not,
        sort.clone(),
    );

    output_result(
        &format!("Search request for '{query}'"),
        &BuildQueryResult {
            query,
            sort: sort.field,
            sort_dir: sort.direction.as_str().to_string(),
            display_filters: state.display_filters,
            applied_filters: state.applied_filters,
            body: request.body().clone(),
        },
        cli_args,
    )
}

/// Result structure for filter parsing.
#[derive(Debug, Serialize)]
struct ParseFiltersResult {
    filters: Vec<Value>,
    must_not: Vec<Value>,
    display_filters: Vec<String>,
    applied_filters: String,
}

/// Parse a filter fragment and print its three representations.
fn parse_filter_params(args: ParseFiltersArgs, cli_args: &StoreQueryArgs) -> Result<()> {
    let params = QueryParams::parse(&args.params);
    let names = params.filter_names();
    let state = parse_filters(&names, &params);

    output_result(
        &format!("Parsed {} filter(s)", names.len()),
        &ParseFiltersResult {
            filters: state.filters.iter().map(QueryClause::to_value).collect(),
            must_not: state.must_not.iter().map(QueryClause::to_value).collect(),
            display_filters: state.display_filters,
            applied_filters: state.applied_filters,
        },
        cli_args,
    )
}
