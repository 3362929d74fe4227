//! Per-kind document sources.
//!
//! A document source turns one record identifier into the engine documents
//! to index for its kind. Record sources yield exactly one document,
//! fulltext sources zero or one (extraction can come up empty), and
//! collection sources one per membership with an explicit placeholder when
//! the record is unresolved.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use bibsearch_engine::PARENT_FIELD;
use bibsearch_types::{DocKind, RecordId};

use crate::collections::CollectionContext;
use crate::error::IndexError;
use crate::sources::{FulltextExtractor, RecordStore};

/// Identifier field present in every indexed document; doubles as the
/// engine document id.
pub const ID_FIELD: &str = "recid";

/// Internal bookkeeping field stripped from record store output.
pub const META_FIELD: &str = "__meta_metadata__";

/// Produces the documents to index for one kind.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// The kind this source produces.
    fn kind(&self) -> DocKind;

    /// Documents to index for this identifier, in indexing order. An empty
    /// vector means "nothing to index" and is not an error. A source
    /// failure for one identifier is an `Err` the pipeline records as a
    /// per-document failure without aborting the batch.
    async fn produce(&self, id: RecordId) -> Result<Vec<Value>, IndexError>;
}

/// Source for bibliographic record documents.
pub struct RecordSource {
    store: Arc<dyn RecordStore>,
}

impl RecordSource {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DocumentSource for RecordSource {
    fn kind(&self) -> DocKind {
        DocKind::Record
    }

    async fn produce(&self, id: RecordId) -> Result<Vec<Value>, IndexError> {
        let mut doc = self.store.get(id).await?;
        if let Some(fields) = doc.as_object_mut() {
            fields.remove(META_FIELD);
            fields.insert(ID_FIELD.to_string(), json!(id));
        }
        Ok(vec![doc])
    }
}

/// Source for extracted full-text child documents.
pub struct FulltextSource {
    extractor: Arc<dyn FulltextExtractor>,
}

impl FulltextSource {
    pub fn new(extractor: Arc<dyn FulltextExtractor>) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl DocumentSource for FulltextSource {
    fn kind(&self) -> DocKind {
        DocKind::Fulltext
    }

    async fn produce(&self, id: RecordId) -> Result<Vec<Value>, IndexError> {
        let text = self.extractor.text(id).await?;
        match text {
            Some(text) if !text.trim().is_empty() => Ok(vec![json!({
                (ID_FIELD): id,
                "fulltext": text,
                (PARENT_FIELD): id,
            })]),
            _ => {
                // Never index an empty fulltext document.
                debug!(recid = id, "No extracted text, skipping");
                Ok(Vec::new())
            }
        }
    }
}

/// Source for collection-membership child documents.
///
/// Borrows the caller-owned [`CollectionContext`]; the context must be
/// rebuilt before the indexing run it feeds.
pub struct CollectionSource<'a> {
    context: &'a CollectionContext,
}

impl<'a> CollectionSource<'a> {
    pub fn new(context: &'a CollectionContext) -> Self {
        Self { context }
    }

    fn membership_doc(id: RecordId, name: &str) -> Value {
        json!({
            (ID_FIELD): id,
            "name": name,
            (PARENT_FIELD): id,
        })
    }
}

#[async_trait]
impl DocumentSource for CollectionSource<'_> {
    fn kind(&self) -> DocKind {
        DocKind::Collection
    }

    async fn produce(&self, id: RecordId) -> Result<Vec<Value>, IndexError> {
        let names = self.context.collections_for(id);
        if names.is_empty() {
            // Explicit placeholder so every record has a membership
            // baseline for child-join filtering.
            return Ok(vec![Self::membership_doc(id, "")]);
        }
        Ok(names
            .iter()
            .map(|name| Self::membership_doc(id, name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceError;
    use std::collections::HashMap;

    struct StubStore;

    #[async_trait]
    impl RecordStore for StubStore {
        async fn get(&self, id: RecordId) -> Result<Value, SourceError> {
            if id == 404 {
                return Err(SourceError::NotFound(id));
            }
            Ok(json!({
                "title": {"title": "Supersymmetry and cosmology"},
                (META_FIELD): {"checksum": "abc"},
            }))
        }
    }

    struct StubExtractor;

    #[async_trait]
    impl FulltextExtractor for StubExtractor {
        async fn text(&self, id: RecordId) -> Result<Option<String>, SourceError> {
            match id {
                1 => Ok(Some("dark matter constraints".to_string())),
                2 => Ok(Some("   ".to_string())),
                _ => Ok(None),
            }
        }
    }

    #[tokio::test]
    async fn test_record_source_strips_meta_and_sets_id() {
        let source = RecordSource::new(Arc::new(StubStore));
        assert_eq!(source.kind(), DocKind::Record);

        let docs = source.produce(12).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0][ID_FIELD], 12);
        assert!(docs[0].get(META_FIELD).is_none());
        assert_eq!(docs[0]["title"]["title"], "Supersymmetry and cosmology");
    }

    #[tokio::test]
    async fn test_record_source_propagates_store_failure() {
        let source = RecordSource::new(Arc::new(StubStore));
        assert!(source.produce(404).await.is_err());
    }

    #[tokio::test]
    async fn test_fulltext_source_wraps_text_with_parent() {
        let source = FulltextSource::new(Arc::new(StubExtractor));
        let docs = source.produce(1).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0][ID_FIELD], 1);
        assert_eq!(docs[0][PARENT_FIELD], 1);
        assert_eq!(docs[0]["fulltext"], "dark matter constraints");
    }

    #[tokio::test]
    async fn test_fulltext_source_skips_empty_text() {
        let source = FulltextSource::new(Arc::new(StubExtractor));
        assert!(source.produce(2).await.unwrap().is_empty());
        assert!(source.produce(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collection_source_one_doc_per_membership() {
        let mut map = HashMap::new();
        map.insert(5, vec!["Articles".to_string(), "Preprints".to_string()]);
        let context = CollectionContext::from_map(map);
        let source = CollectionSource::new(&context);

        let docs = source.produce(5).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["name"], "Articles");
        assert_eq!(docs[1]["name"], "Preprints");
        assert!(docs.iter().all(|d| d[PARENT_FIELD] == 5));
    }

    #[tokio::test]
    async fn test_collection_source_placeholder_for_unresolved() {
        let context = CollectionContext::from_map(HashMap::new());
        let source = CollectionSource::new(&context);

        let docs = source.produce(9).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["name"], "");
        assert_eq!(docs[0][ID_FIELD], 9);
    }
}
