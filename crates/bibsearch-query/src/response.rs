//! Engine response adaptation.
//!
//! Wraps one raw engine response and exposes it as three independent,
//! lazily built read views. The underlying payload is never mutated and
//! every view can be constructed repeatedly.

use std::collections::HashMap;

use serde_json::{json, Value};

use bibsearch_types::RecordId;

/// Strategy for wrapping a raw engine response.
pub trait ResponseAdapter: Send + Sync {
    fn adapt(&self, raw: Value) -> SearchResponse;
}

/// Default adapter: wraps the payload as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughAdapter;

impl ResponseAdapter for PassthroughAdapter {
    fn adapt(&self, raw: Value) -> SearchResponse {
        SearchResponse::new(raw)
    }
}

/// One raw engine response with typed views over it.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    data: Value,
}

impl SearchResponse {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// The unmodified engine payload.
    pub fn raw(&self) -> &Value {
        &self.data
    }

    /// View over the matched identifiers.
    pub fn hits(&self) -> Hits {
        let total = self.data["hits"]["total"].as_u64().unwrap_or(0);
        let page = self
            .page_hits()
            .filter_map(hit_id)
            .collect();
        Hits { total, page }
    }

    /// Facet name to aggregation payload, passed through unmodified.
    pub fn facets(&self) -> HashMap<String, Value> {
        self.data
            .get("aggregations")
            .and_then(Value::as_object)
            .map(|aggs| {
                aggs.iter()
                    .map(|(name, payload)| (name.clone(), payload.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Matched identifier to highlight payload. Hits without highlight
    /// data map to an empty object, not absence.
    pub fn highlights(&self) -> HashMap<RecordId, Value> {
        self.page_hits()
            .filter_map(|hit| {
                let id = hit_id(hit)?;
                let highlight = hit.get("highlight").cloned().unwrap_or_else(|| json!({}));
                Some((id, highlight))
            })
            .collect()
    }

    fn page_hits(&self) -> impl Iterator<Item = &Value> {
        self.data["hits"]["hits"]
            .as_array()
            .map(|hits| hits.iter())
            .into_iter()
            .flatten()
    }
}

fn hit_id(hit: &Value) -> Option<RecordId> {
    match &hit["_id"] {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Matched-identifier view.
///
/// `len` reports the engine's total match count; iteration yields only the
/// page the engine actually returned. Fetching further pages is the
/// caller's job via the offset/size window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hits {
    total: u64,
    page: Vec<RecordId>,
}

impl Hits {
    /// Engine-reported total number of matches.
    pub fn len(&self) -> usize {
        self.total as usize
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Identifiers of the returned page, in rank order.
    pub fn ids(&self) -> &[RecordId] {
        &self.page
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.page.iter().copied()
    }
}

impl IntoIterator for Hits {
    type Item = RecordId;
    type IntoIter = std::vec::IntoIter<RecordId>;

    fn into_iter(self) -> Self::IntoIter {
        self.page.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Response with hits 5, 9, 12 and highlight data only for 9.
    fn sample_response() -> SearchResponse {
        PassthroughAdapter.adapt(json!({
            "hits": {
                "total": 3,
                "hits": [
                    {"_id": "5"},
                    {"_id": "9", "highlight": {"title.title": ["<em>Higgs</em> searches"]}},
                    {"_id": "12"}
                ]
            },
            "aggregations": {
                "authors": {"Ellis, J.": 4}
            }
        }))
    }

    #[test]
    fn test_hits_view() {
        let hits = sample_response().hits();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits.ids(), [5, 9, 12]);
        let collected: Vec<RecordId> = hits.iter().collect();
        assert_eq!(collected, [5, 9, 12]);
    }

    #[test]
    fn test_facets_view_passthrough() {
        let facets = sample_response().facets();
        assert_eq!(facets.len(), 1);
        assert_eq!(facets["authors"], json!({"Ellis, J.": 4}));
    }

    #[test]
    fn test_highlights_view_defaults_to_empty_payload() {
        let highlights = sample_response().highlights();
        assert_eq!(highlights.len(), 3);
        assert_eq!(highlights[&5], json!({}));
        assert_eq!(highlights[&12], json!({}));
        assert_eq!(
            highlights[&9]["title.title"][0],
            "<em>Higgs</em> searches"
        );
    }

    #[test]
    fn test_views_are_independent_and_repeatable() {
        let response = sample_response();
        let first = response.hits();
        let second = response.hits();
        assert_eq!(first, second);
        // Raw payload is untouched by view construction.
        assert_eq!(response.raw()["hits"]["total"], 3);
    }

    #[test]
    fn test_total_larger_than_page() {
        let response = PassthroughAdapter.adapt(json!({
            "hits": {
                "total": 4200,
                "hits": [{"_id": "1"}, {"_id": "2"}]
            }
        }));

        let hits = response.hits();
        assert_eq!(hits.len(), 4200);
        assert_eq!(hits.ids().len(), 2);
    }

    #[test]
    fn test_empty_response() {
        let response = PassthroughAdapter.adapt(json!({"hits": {"total": 0, "hits": []}}));
        assert!(response.hits().is_empty());
        assert!(response.facets().is_empty());
        assert!(response.highlights().is_empty());
    }

    #[test]
    fn test_numeric_ids_accepted() {
        let response = PassthroughAdapter.adapt(json!({
            "hits": {"total": 1, "hits": [{"_id": 77}]}
        }));
        assert_eq!(response.hits().ids(), [77]);
    }
}
