//! The bibsearch facade.
//!
//! Wires one engine handle, the three external collaborators (record
//! store, fulltext extractor, collection resolver) and the query/response
//! strategies into a single entry point exposing the system's operations.

use std::sync::Arc;

use tracing::{info, instrument};

use bibsearch_engine::SearchEngine;
use bibsearch_index::{
    BulkPipeline, CollectionContext, CollectionResolver, CollectionSource, CreateOutcome,
    DeleteOutcome, DocumentSource, FulltextExtractor, FulltextSource, IndexLifecycle, RecordSource,
    RecordStore,
};
use bibsearch_query::{
    BoolQueryTranslator, PassthroughAdapter, QueryTranslator, ResponseAdapter, SearchParams,
    SearchResponse,
};
use bibsearch_types::{BibSearchConfig, DocKind, IndexingFailure, RecordId};

use crate::error::ServiceError;

/// Fields compared by the similarity query.
const SIMILARITY_FIELDS: [&str; 1] = ["_all"];

/// Caller-facing service.
///
/// Construction wires the default strategies; [`with_translator`] and
/// [`with_response_adapter`] swap them out without touching the rest of
/// the wiring.
///
/// [`with_translator`]: Self::with_translator
/// [`with_response_adapter`]: Self::with_response_adapter
pub struct BibSearchService {
    engine: Arc<dyn SearchEngine>,
    records: Arc<dyn RecordStore>,
    fulltext: Arc<dyn FulltextExtractor>,
    collections: Arc<dyn CollectionResolver>,
    translator: Box<dyn QueryTranslator>,
    adapter: Box<dyn ResponseAdapter>,
    config: BibSearchConfig,
}

impl BibSearchService {
    pub fn new(
        engine: Arc<dyn SearchEngine>,
        records: Arc<dyn RecordStore>,
        fulltext: Arc<dyn FulltextExtractor>,
        collections: Arc<dyn CollectionResolver>,
        config: BibSearchConfig,
    ) -> Self {
        let translator = BoolQueryTranslator::new().with_facet_size(config.facet_size);
        Self {
            engine,
            records,
            fulltext,
            collections,
            translator: Box::new(translator),
            adapter: Box::new(PassthroughAdapter),
            config,
        }
    }

    /// Replace the query translation strategy.
    pub fn with_translator(mut self, translator: Box<dyn QueryTranslator>) -> Self {
        self.translator = translator;
        self
    }

    /// Replace the response adaptation strategy.
    pub fn with_response_adapter(mut self, adapter: Box<dyn ResponseAdapter>) -> Self {
        self.adapter = adapter;
        self
    }

    fn lifecycle(&self) -> IndexLifecycle {
        IndexLifecycle::new(self.engine.clone(), &self.config.index_name)
    }

    fn pipeline(&self) -> BulkPipeline {
        BulkPipeline::new(self.engine.clone(), &self.config.index_name)
            .with_refresh(self.config.refresh_on_write)
    }

    fn batch_size(&self, batch_size: Option<usize>) -> usize {
        batch_size.unwrap_or(self.config.batch_size)
    }

    /// Engine reachability probe; returns the engine's status line.
    pub async fn status(&self) -> Result<String, ServiceError> {
        Ok(self.engine.health().await?)
    }

    /// Create the index with settings and all kind mappings.
    pub async fn create_index(&self) -> Result<CreateOutcome, ServiceError> {
        Ok(self.lifecycle().create().await?)
    }

    /// Delete the index; deleting a missing index is an ordinary outcome.
    pub async fn delete_index(&self) -> Result<DeleteOutcome, ServiceError> {
        Ok(self.lifecycle().delete().await?)
    }

    /// Delete (if present) and recreate from scratch.
    pub async fn recreate_index(&self) -> Result<CreateOutcome, ServiceError> {
        Ok(self.lifecycle().recreate().await?)
    }

    /// Index bibliographic record documents for the given identifiers.
    ///
    /// `batch_size` of `None` uses the configured default. Per-document
    /// failures come back as data; only a failed bulk call is an `Err`.
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn index_records(
        &self,
        ids: &[RecordId],
        batch_size: Option<usize>,
    ) -> Result<Vec<IndexingFailure>, ServiceError> {
        let source = RecordSource::new(self.records.clone());
        self.run(&source, ids, batch_size).await
    }

    /// Index extracted full-text child documents for the given identifiers.
    /// Identifiers without extractable text are skipped, not failed.
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn index_fulltext(
        &self,
        ids: &[RecordId],
        batch_size: Option<usize>,
    ) -> Result<Vec<IndexingFailure>, ServiceError> {
        let source = FulltextSource::new(self.fulltext.clone());
        self.run(&source, ids, batch_size).await
    }

    /// Build the identifier-to-collections context for a membership run.
    pub async fn rebuild_collections(
        &self,
        force_refresh: bool,
    ) -> Result<CollectionContext, ServiceError> {
        Ok(CollectionContext::rebuild(self.collections.as_ref(), force_refresh).await?)
    }

    /// Index collection-membership child documents against a context built
    /// by [`rebuild_collections`](Self::rebuild_collections).
    #[instrument(skip(self, context, ids), fields(ids = ids.len()))]
    pub async fn index_collections(
        &self,
        context: &CollectionContext,
        ids: &[RecordId],
        batch_size: Option<usize>,
    ) -> Result<Vec<IndexingFailure>, ServiceError> {
        let source = CollectionSource::new(context);
        self.run(&source, ids, batch_size).await
    }

    async fn run(
        &self,
        source: &dyn DocumentSource,
        ids: &[RecordId],
        batch_size: Option<usize>,
    ) -> Result<Vec<IndexingFailure>, ServiceError> {
        let failures = self
            .pipeline()
            .index_all(source, ids, self.batch_size(batch_size))
            .await?;
        Ok(failures)
    }

    /// Translate the parameters, run the search against record documents
    /// and wrap the response.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse, ServiceError> {
        let body = self.translator.translate(params);
        let raw = self
            .engine
            .search(
                &self.config.index_name,
                DocKind::Record.as_str(),
                &body,
            )
            .await?;
        Ok(self.adapter.adapt(raw))
    }

    /// Identifiers of records similar to the given one, in rank order.
    pub async fn find_similar(&self, id: RecordId) -> Result<Vec<RecordId>, ServiceError> {
        let raw = self
            .engine
            .more_like_this(
                &self.config.index_name,
                DocKind::Record.as_str(),
                &id.to_string(),
                &SIMILARITY_FIELDS,
            )
            .await?;
        let similar = self.adapter.adapt(raw).hits().ids().to_vec();
        info!(recid = id, similar = similar.len(), "Similarity lookup");
        Ok(similar)
    }
}
