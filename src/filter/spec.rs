//! Filter specifications decoded from request parameters.

use crate::filter::params::ParamLookup;

/// The interpretation of a facet filter.
///
/// `Unknown` carries the raw tag (empty when the `type` parameter was absent)
/// so the filter stays visible and removable in the UI state even though it
/// contributes nothing to the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// Bounded range test, inclusive lower / exclusive upper.
    Range,
    /// Exact-match test on the field's untokenized form.
    Terms,
    /// Negated existence test: keep documents where the field is absent.
    Missing,
    /// Unrecognized tag, inert for query purposes.
    Unknown(String),
}

impl FilterKind {
    /// Decode the `{name}.type` parameter value.
    pub fn parse(tag: Option<&str>) -> Self {
        match tag {
            Some("range") => FilterKind::Range,
            Some("terms") => FilterKind::Terms,
            Some("missing") => FilterKind::Missing,
            Some(other) => FilterKind::Unknown(other.to_string()),
            None => FilterKind::Unknown(String::new()),
        }
    }

    /// The wire tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            FilterKind::Range => "range",
            FilterKind::Terms => "terms",
            FilterKind::Missing => "missing",
            FilterKind::Unknown(tag) => tag,
        }
    }
}

/// One user-selected facet constraint, immutable once constructed.
///
/// `from`/`to` are only meaningful for [`FilterKind::Range`] and `key` only
/// for [`FilterKind::Terms`] / [`FilterKind::Missing`]; the display string and
/// wire fragment carry whatever was supplied regardless, so malformed links
/// stay visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// Field identifier being filtered.
    pub name: String,
    /// Interpretation tag.
    pub kind: FilterKind,
    /// Label shown to the user; defaults to `name`.
    pub display_name: String,
    /// Lower bound (inclusive), range filters.
    pub from: Option<String>,
    /// Upper bound (exclusive), range filters.
    pub to: Option<String>,
    /// Exact term (terms) or absent field (missing).
    pub key: Option<String>,
}

impl FilterSpec {
    /// Construct a spec from the five `{name}.*` request parameters.
    ///
    /// Absent parameters are "feature not specified", never fatal; blank
    /// values are treated as absent.
    pub fn from_params<P: ParamLookup>(name: &str, params: &P) -> Self {
        let kind = FilterKind::parse(non_empty(params.get(&format!("{name}.type"))));
        let display_name = non_empty(params.get(&format!("{name}.displayName")))
            .unwrap_or(name)
            .to_string();

        FilterSpec {
            name: name.to_string(),
            kind,
            display_name,
            from: non_empty(params.get(&format!("{name}.from"))).map(String::from),
            to: non_empty(params.get(&format!("{name}.to"))).map(String::from),
            key: non_empty(params.get(&format!("{name}.key"))).map(String::from),
        }
    }

    /// Human-readable description of the applied filter, e.g.
    /// `"Price from: 100 to: 200"` or `"Department: Phones"`.
    pub fn display(&self) -> String {
        let mut display = self.display_name.clone();
        if let Some(key) = &self.key {
            display.push_str(&format!(": {key}"));
        }
        if let Some(from) = &self.from {
            display.push_str(&format!(" from: {from}"));
        }
        if let Some(to) = &self.to {
            display.push_str(&format!(" to: {to}"));
        }
        display
    }

    /// Append this filter's re-embeddable `&key=value` fragment to `out`.
    ///
    /// `name`, `type` and `displayName` are always emitted so the fragment
    /// re-parses even for kinds with no further parameters; decoding the
    /// result reconstructs an equivalent spec.
    pub fn encode_into(&self, out: &mut String) {
        let name = &self.name;
        out.push_str(&format!(
            "&filter.name={}&{name}.type={}&{name}.displayName={}",
            urlencoding::encode(name),
            urlencoding::encode(self.kind.as_str()),
            urlencoding::encode(&self.display_name),
        ));
        if let Some(key) = &self.key {
            out.push_str(&format!("&{name}.key={}", urlencoding::encode(key)));
        }
        if let Some(from) = &self.from {
            out.push_str(&format!("&{name}.from={}", urlencoding::encode(from)));
        }
        if let Some(to) = &self.to {
            out.push_str(&format!("&{name}.to={}", urlencoding::encode(to)));
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
