//! Filter parsing: request parameters to query clauses, display strings, and
//! a re-embeddable applied-filter fragment.

use log::{debug, warn};

use crate::filter::params::ParamLookup;
use crate::filter::spec::{FilterKind, FilterSpec};
use crate::query::QueryClause;

/// The three co-derived representations of the active filter set.
///
/// All sequences preserve the order of the incoming `filter.name` list, and
/// decoding `applied_filters` reconstructs an equivalent filter set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedFilterState {
    /// Positive filter clauses for the bool query.
    pub filters: Vec<QueryClause>,
    /// Negated clauses for the bool query's must_not list.
    pub must_not: Vec<QueryClause>,
    /// Human-readable strings for the applied-filter display.
    pub display_filters: Vec<String>,
    /// Query-string fragment that re-applies the current filters when
    /// concatenated onto a facet or pagination link.
    pub applied_filters: String,
}

impl AppliedFilterState {
    /// State with no filters applied.
    pub fn empty() -> Self {
        AppliedFilterState::default()
    }
}

/// Process the filters requested by the user.
///
/// Each name in `names` is expanded through its `{name}.type`,
/// `{name}.displayName`, `{name}.from`, `{name}.to` and `{name}.key`
/// parameters. Parsing is best-effort: a filter missing the fields its kind
/// requires is skipped for query purposes but still appears in the display
/// strings and the applied-filter fragment, so one bad facet link never
/// breaks the whole search.
pub fn parse_filters<P: ParamLookup>(names: &[String], params: &P) -> AppliedFilterState {
    let mut state = AppliedFilterState::empty();

    for name in names {
        let spec = FilterSpec::from_params(name, params);

        // Bookkeeping happens for every filter, query clauses only for
        // well-formed recognized kinds.
        spec.encode_into(&mut state.applied_filters);
        state.display_filters.push(spec.display());

        match &spec.kind {
            FilterKind::Range => {
                state.filters.push(QueryClause::range(
                    spec.name.as_str(),
                    spec.from.clone(),
                    spec.to.clone(),
                ));
            }
            FilterKind::Terms => match &spec.key {
                Some(key) => state
                    .filters
                    .push(QueryClause::term(spec.name.as_str(), key.as_str())),
                None => warn!("terms filter '{}' has no key, skipping clause", spec.name),
            },
            FilterKind::Missing => match &spec.key {
                Some(key) => state.must_not.push(QueryClause::exists(key.as_str())),
                None => warn!("missing filter '{}' has no key, skipping clause", spec.name),
            },
            FilterKind::Unknown(tag) => {
                debug!(
                    "filter '{}' has unrecognized type '{}', keeping display state only",
                    spec.name, tag
                );
            }
        }
    }

    state
}
