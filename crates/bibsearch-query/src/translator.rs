//! Query translation into engine-native syntax.
//!
//! The base clause matches the free text against record fields OR, via a
//! child join, against the extracted full text; filters are attached as
//! post-scoring filter clauses so they never influence relevance. Facet
//! aggregation and highlighting are always requested.

use serde_json::{json, Map, Value};

use crate::params::{SearchParams, SortSpec};

/// Engine document type holding extracted full text.
const FULLTEXT_TYPE: &str = "fulltext";
/// Analyzed field holding extracted full text.
const FULLTEXT_FIELD: &str = "fulltext";
/// Engine document type holding collection memberships.
const COLLECTION_TYPE: &str = "collection";
/// Exact-match collection name field.
const COLLECTION_NAME_FIELD: &str = "name";
/// Exact-match author representation used for faceting.
const AUTHOR_FACET_FIELD: &str = "authors.full_name.facet";
/// Fields highlighted in every search.
const HIGHLIGHT_FIELDS: [&str; 2] = ["title.title", "authors.full_name"];

const HIGHLIGHT_FRAGMENT_SIZE: usize = 100;
const HIGHLIGHT_FRAGMENTS: usize = 3;
const DEFAULT_FACET_SIZE: usize = 10;

/// Strategy for turning [`SearchParams`] into an engine query body.
pub trait QueryTranslator: Send + Sync {
    fn translate(&self, params: &SearchParams) -> Value;
}

/// Default translator producing a composite boolean query.
pub struct BoolQueryTranslator {
    facet_size: usize,
}

impl Default for BoolQueryTranslator {
    fn default() -> Self {
        Self {
            facet_size: DEFAULT_FACET_SIZE,
        }
    }
}

impl BoolQueryTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of top facet terms to request.
    pub fn with_facet_size(mut self, facet_size: usize) -> Self {
        self.facet_size = facet_size;
        self
    }

    /// Scoring clause: free text against the default searchable fields,
    /// OR a fulltext child document matching the same text. At least one
    /// branch must match.
    fn base_clause(text: &str) -> Value {
        json!({
            "bool": {
                "should": [
                    {
                        "simple_query_string": {"query": text}
                    },
                    {
                        "has_child": {
                            "type": FULLTEXT_TYPE,
                            "query": {
                                "simple_query_string": {
                                    "fields": [FULLTEXT_FIELD],
                                    "query": text
                                }
                            }
                        }
                    }
                ],
                "minimum_should_match": 1
            }
        })
    }

    /// Post-scoring filter clauses: one term filter per equality filter,
    /// one child-join filter per requested collection. Each collection
    /// filter tests its own collection name.
    fn filter_clauses(params: &SearchParams) -> Vec<Value> {
        let mut clauses = Vec::with_capacity(params.filters.len() + params.collections.len());

        for (field, value) in &params.filters {
            clauses.push(json!({ "term": { (field.as_str()): value } }));
        }

        for collection in &params.collections {
            clauses.push(json!({
                "has_child": {
                    "type": COLLECTION_TYPE,
                    "query": {
                        "term": { (COLLECTION_NAME_FIELD): collection }
                    }
                }
            }));
        }

        clauses
    }

    /// Sort representation of a field: the primary integer key sorts
    /// directly, analyzed fields sort on their `.sort` sub-field.
    fn sort_clause(sort: &SortSpec) -> Value {
        let field = if sort.field == "recid" {
            sort.field.clone()
        } else {
            format!("{}.sort", sort.field)
        };
        json!([{ (field): { "order": sort.order.as_str() } }])
    }

    fn highlight_request() -> Value {
        let mut fields = Map::new();
        for field in HIGHLIGHT_FIELDS {
            fields.insert(
                field.to_string(),
                json!({
                    "fragment_size": HIGHLIGHT_FRAGMENT_SIZE,
                    "number_of_fragments": HIGHLIGHT_FRAGMENTS
                }),
            );
        }
        json!({ "fields": fields })
    }
}

impl QueryTranslator for BoolQueryTranslator {
    fn translate(&self, params: &SearchParams) -> Value {
        let base = Self::base_clause(&params.text);

        // Without filters the base clause is used unmodified; with
        // filters it is wrapped with a must-match-all filter conjunction.
        let query = if params.has_filters() {
            json!({
                "bool": {
                    "must": [base],
                    "filter": Self::filter_clauses(params)
                }
            })
        } else {
            base
        };

        let mut body = json!({
            "query": query,
            "from": params.offset,
            "size": params.size,
            "aggs": {
                "authors": {
                    "terms": {
                        "field": AUTHOR_FACET_FIELD,
                        "size": self.facet_size
                    }
                }
            },
            "highlight": Self::highlight_request()
        });

        if let Some(sort) = &params.sort {
            body["sort"] = Self::sort_clause(sort);
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{SortOrder, SortSpec};

    fn translate(params: &SearchParams) -> Value {
        BoolQueryTranslator::new().translate(params)
    }

    #[test]
    fn test_base_clause_without_filters() {
        let body = translate(&SearchParams::new("quark gluon plasma"));
        let query = &body["query"];

        // No filtered wrapper when no filters are present.
        assert!(query["bool"].get("filter").is_none());
        let should = query["bool"]["should"].as_array().unwrap();
        assert_eq!(should.len(), 2);
        assert_eq!(
            should[0]["simple_query_string"]["query"],
            "quark gluon plasma"
        );
        assert_eq!(should[1]["has_child"]["type"], "fulltext");
        assert_eq!(
            should[1]["has_child"]["query"]["simple_query_string"]["fields"][0],
            "fulltext"
        );
        assert_eq!(query["bool"]["minimum_should_match"], 1);
    }

    #[test]
    fn test_filters_wrap_but_do_not_change_base_clause() {
        let plain = translate(&SearchParams::new("neutrino"));
        let filtered = translate(
            &SearchParams::new("neutrino").with_filter("authors.full_name.facet", "Ellis, J."),
        );

        // The scoring clause is identical with and without the filter.
        assert_eq!(filtered["query"]["bool"]["must"][0], plain["query"]);

        let filters = filtered["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filters.len(), 1);
        assert_eq!(
            filters[0]["term"]["authors.full_name.facet"],
            "Ellis, J."
        );
    }

    #[test]
    fn test_each_collection_filter_uses_its_own_name() {
        let body = translate(
            &SearchParams::new("*")
                .with_filter("email", "ellis@cern.ch")
                .with_collection("Articles")
                .with_collection("Preprints"),
        );

        let filters = body["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filters.len(), 3);

        let names: Vec<&str> = filters[1..]
            .iter()
            .map(|f| f["has_child"]["query"]["term"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Articles", "Preprints"]);
        assert!(filters[1..]
            .iter()
            .all(|f| f["has_child"]["type"] == "collection"));
    }

    #[test]
    fn test_facets_and_highlights_always_requested() {
        for params in [
            SearchParams::new("top quark"),
            SearchParams::new("top quark").with_collection("Articles"),
        ] {
            let body = translate(&params);
            assert_eq!(
                body["aggs"]["authors"]["terms"]["field"],
                "authors.full_name.facet"
            );
            assert_eq!(body["aggs"]["authors"]["terms"]["size"], 10);
            assert!(body["highlight"]["fields"]
                .get("title.title")
                .is_some());
            assert!(body["highlight"]["fields"]
                .get("authors.full_name")
                .is_some());
        }
    }

    #[test]
    fn test_sort_uses_sort_representation_descending_by_default() {
        let body = translate(
            &SearchParams::new("*").with_sort(SortSpec::descending("title.title")),
        );
        assert_eq!(body["sort"][0]["title.title.sort"]["order"], "desc");

        let body = translate(
            &SearchParams::new("*").with_sort(SortSpec::new("title.title", SortOrder::Asc)),
        );
        assert_eq!(body["sort"][0]["title.title.sort"]["order"], "asc");
    }

    #[test]
    fn test_recid_sorts_directly() {
        let body = translate(&SearchParams::new("*").with_sort(SortSpec::descending("recid")));
        assert_eq!(body["sort"][0]["recid"]["order"], "desc");
    }

    #[test]
    fn test_no_sort_clause_by_default() {
        let body = translate(&SearchParams::new("*"));
        assert!(body.get("sort").is_none());
    }

    #[test]
    fn test_pagination_window() {
        let body = translate(&SearchParams::new("*").with_page(40, 20));
        assert_eq!(body["from"], 40);
        assert_eq!(body["size"], 20);
    }

    #[test]
    fn test_configurable_facet_size() {
        let translator = BoolQueryTranslator::new().with_facet_size(25);
        let body = translator.translate(&SearchParams::new("*"));
        assert_eq!(body["aggs"]["authors"]["terms"]["size"], 25);
    }
}
