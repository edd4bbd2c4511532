//! Search query construction.
//!
//! Queries are built fresh per call as plain JSON documents: either a
//! single-field match or a boolean `must` over several field/value pairs,
//! always followed by a sort clause on the timestamp field.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{LogsError, Result};

/// Document field every query sorts on.
pub(crate) const TIMESTAMP_FIELD: &str = "@timestamp";

/// Sort order for returned log documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest logs first.
    #[default]
    Asc,
    /// Newest logs first.
    Desc,
}

impl SortOrder {
    /// Returns the order keyword as the engine expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// How log documents are filtered to one job, workflow, or component.
///
/// The two forms are mutually exclusive by construction; there is no way to
/// supply both or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Match a single field against the fetched identifier.
    Field(String),
    /// Match every field/value pair at once.
    All(Vec<(String, String)>),
}

impl Matcher {
    /// Single-field matcher on `field`.
    #[must_use]
    pub fn field(field: impl Into<String>) -> Self {
        Self::Field(field.into())
    }

    /// Multi-field matcher requiring every pair to match.
    #[must_use]
    pub fn all<F, V>(pairs: impl IntoIterator<Item = (F, V)>) -> Self
    where
        F: Into<String>,
        V: Into<String>,
    {
        Self::All(
            pairs
                .into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

/// Builds the query document for one fetch call.
///
/// `id` is the identifier a [`Matcher::Field`] matches against; a
/// [`Matcher::All`] carries its values inline and ignores it.
pub(crate) fn build_query(matcher: &Matcher, id: &str, order: SortOrder) -> Result<Value> {
    let clause = match matcher {
        Matcher::Field(field) => json!({ "match": { field: id } }),
        Matcher::All(pairs) => {
            if pairs.is_empty() {
                return Err(LogsError::EmptyMatcher);
            }
            let must: Vec<Value> = pairs
                .iter()
                .map(|(field, value)| json!({ "match": { field: value } }))
                .collect();
            json!({ "bool": { "must": must } })
        }
    };

    Ok(json!({
        "query": clause,
        "sort": [{ TIMESTAMP_FIELD: { "order": order.as_str() } }],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_match_query_shape() {
        let matcher = Matcher::field("kubernetes.labels.job-name.keyword");
        let query = build_query(&matcher, "job-42", SortOrder::Asc).expect("query");

        assert_eq!(
            query["query"]["match"]["kubernetes.labels.job-name.keyword"],
            json!("job-42")
        );
        assert_eq!(query["sort"][0]["@timestamp"]["order"], json!("asc"));
        // Exactly one clause, no bool wrapper.
        assert_eq!(query["query"].as_object().expect("object").len(), 1);
        assert!(query["query"].get("bool").is_none());
    }

    #[test]
    fn multi_match_query_has_one_entry_per_pair() {
        let matcher = Matcher::all([
            ("kubernetes.labels.heron/cluster-name.keyword", "heron-run-cluster-wf-1"),
            ("kubernetes.labels.heron/component", "scheduler"),
        ]);
        let query = build_query(&matcher, "ignored", SortOrder::Asc).expect("query");

        let must = query["query"]["bool"]["must"].as_array().expect("must");
        assert_eq!(must.len(), 2);
        assert!(must.contains(&json!({
            "match": { "kubernetes.labels.heron/cluster-name.keyword": "heron-run-cluster-wf-1" }
        })));
        assert!(must.contains(&json!({
            "match": { "kubernetes.labels.heron/component": "scheduler" }
        })));
    }

    #[test]
    fn sort_clause_follows_configured_order() {
        let matcher = Matcher::field("field");
        let asc = build_query(&matcher, "id", SortOrder::Asc).expect("query");
        let desc = build_query(&matcher, "id", SortOrder::Desc).expect("query");
        assert_eq!(asc["sort"][0]["@timestamp"]["order"], json!("asc"));
        assert_eq!(desc["sort"][0]["@timestamp"]["order"], json!("desc"));
    }

    #[test]
    fn empty_multi_matcher_is_rejected() {
        let matcher = Matcher::All(Vec::new());
        let result = build_query(&matcher, "id", SortOrder::Asc);
        assert!(matches!(result, Err(LogsError::EmptyMatcher)));
    }

    #[test]
    fn sort_order_default_and_keywords() {
        assert_eq!(SortOrder::default(), SortOrder::Asc);
        assert_eq!(SortOrder::Asc.as_str(), "asc");
        assert_eq!(SortOrder::Desc.as_str(), "desc");
    }
}
