//! Facet filter parsing and round-trippable filter state.

pub mod params;
pub mod parser;
pub mod spec;

pub use self::params::{ParamLookup, QueryParams};
pub use self::parser::{AppliedFilterState, parse_filters};
pub use self::spec::{FilterKind, FilterSpec};
