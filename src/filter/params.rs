//! Flat request-parameter access and query-string decoding.
//!
//! Filter state travels on the wire as a flat `&key=value` fragment
//! (`filter.name=regularPrice&regularPrice.type=range&...`). [`QueryParams`]
//! decodes that form while keeping repeated `filter.name` entries in order,
//! and [`ParamLookup`] is the seam through which the parser reads parameters,
//! so callers that already hold parsed parameters can plug in a plain map.

use std::collections::HashMap;

/// Capability to fetch a named request parameter.
pub trait ParamLookup {
    /// Get the value for a parameter key, if present.
    fn get(&self, key: &str) -> Option<&str>;
}

impl ParamLookup for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

/// Decoded query-string parameters, order-preserving.
///
/// Scalar lookups return the first occurrence of a key; repeated keys are kept
/// so that `filter.name` lists survive intact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode a raw query-string fragment. A leading `?` or `&` is tolerated,
    /// pairs without `=` decode to an empty value, and percent-encoded text is
    /// decoded best-effort (undecodable sequences are kept verbatim).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim_start_matches('?');
        let mut pairs = Vec::new();

        for piece in raw.split('&') {
            if piece.is_empty() {
                continue;
            }
            let (key, value) = match piece.split_once('=') {
                Some((key, value)) => (key, value),
                None => (piece, ""),
            };
            pairs.push((decode(key), decode(value)));
        }

        QueryParams { pairs }
    }

    /// Build from already-decoded key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        QueryParams {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// First value for a key, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First non-empty value for a key, if any.
    pub fn first_non_empty(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    /// All values for `filter.name`, in request order, blanks dropped.
    pub fn filter_names(&self) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, v)| k == "filter.name" && !v.is_empty())
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Whether no parameters were supplied.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl ParamLookup for QueryParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.first(key)
    }
}

fn decode(text: &str) -> String {
    // '+' means space in form encoding, which is what the facet links emit.
    let text = text.replace('+', " ");
    match urlencoding::decode(&text) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => text,
    }
}
