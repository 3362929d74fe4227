//! Field-mapping registry.
//!
//! Declares, per document kind, the typed fields and their indexing
//! treatment. Pure data: the same call always returns the same payload,
//! which keeps index setup idempotent and lets tests compare the expected
//! schema literally.
//!
//! Multi-representation fields:
//! - `title.title` is analyzed for matching and carries a simple-analyzed
//!   `sort` sub-field for ordering
//! - `authors.full_name` is analyzed for matching and carries a keyword
//!   `facet` sub-field for exact-match faceting

use serde_json::{json, Value};

use bibsearch_types::DocKind;

/// Field mapping for bibliographic records.
pub fn record_mapping() -> Value {
    json!({
        // integer so the primary sort key orders numerically
        "recid": {"type": "integer"},
        "email": {"type": "keyword"},
        "primary_report_number": {"type": "keyword"},
        "creation_date": {"type": "date"},
        "modification_date": {"type": "date"},
        "keywords": {
            "properties": {
                "term": {"type": "keyword"}
            }
        },
        "title": {
            "properties": {
                "title": {
                    "type": "text",
                    "analyzer": "standard",
                    "fields": {
                        "sort": {"type": "text", "analyzer": "simple"}
                    }
                }
            }
        },
        "authors": {
            "properties": {
                "affiliation": {"type": "text"},
                "first_name": {"type": "text"},
                "last_name": {"type": "text"},
                "full_name": {
                    "type": "text",
                    "analyzer": "standard",
                    "fields": {
                        "facet": {"type": "keyword"}
                    }
                }
            }
        }
    })
}

/// Field mapping for extracted full text (child of a record).
pub fn fulltext_mapping() -> Value {
    json!({
        "recid": {"type": "integer"},
        "fulltext": {"type": "text"}
    })
}

/// Field mapping for collection memberships (child of a record).
pub fn collection_mapping() -> Value {
    json!({
        "recid": {"type": "integer"},
        "name": {"type": "keyword"}
    })
}

/// Full mapping payload for one kind, rooted at the engine document type
/// and declaring the parent type for child kinds.
pub fn mapping_for(kind: DocKind) -> Value {
    let properties = match kind {
        DocKind::Record => record_mapping(),
        DocKind::Fulltext => fulltext_mapping(),
        DocKind::Collection => collection_mapping(),
    };

    let mut body = json!({ "properties": properties });
    if let Some(parent) = kind.parent() {
        body["_parent"] = json!({ "type": parent.as_str() });
    }

    json!({ (kind.as_str()): body })
}
