//! Bulk indexing pipeline.
//!
//! Streams an identifier sequence through a document source into
//! bounded-size batches and submits each batch as one bulk write.
//!
//! Two error channels are kept apart:
//! - per-document failures (a source failing for one id, or the engine
//!   rejecting one document inside a bulk write) are aggregated and
//!   returned as data;
//! - a failure of a bulk call itself aborts the whole run with `Err` and
//!   no partial result.

use std::sync::Arc;

use tracing::{debug, info, warn};

use bibsearch_engine::{EngineError, SearchEngine};
use bibsearch_types::{IndexingFailure, RecordId};

use crate::document::{DocumentSource, ID_FIELD};
use crate::error::IndexError;

/// Pipeline bound to one engine index.
pub struct BulkPipeline {
    engine: Arc<dyn SearchEngine>,
    index: String,
    refresh: bool,
}

impl BulkPipeline {
    pub fn new(engine: Arc<dyn SearchEngine>, index: impl Into<String>) -> Self {
        Self {
            engine,
            index: index.into(),
            refresh: false,
        }
    }

    /// Ask the engine to refresh after each bulk write (tests, smoke runs).
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Index all identifiers through the given source.
    ///
    /// Identifiers are processed in order; a batch is submitted whenever it
    /// reaches `batch_size` and the final partial batch is always
    /// submitted. `batch_size` 0 means unbounded: one batch for the whole
    /// input. Batches are submitted sequentially, so the returned failures
    /// are input-order-stable.
    pub async fn index_all(
        &self,
        source: &dyn DocumentSource,
        ids: &[RecordId],
        batch_size: usize,
    ) -> Result<Vec<IndexingFailure>, IndexError> {
        let cap = if batch_size == 0 {
            usize::MAX
        } else {
            batch_size
        };

        let mut failures = Vec::new();
        let mut batch: Vec<serde_json::Value> = Vec::new();
        let mut batch_ids: Vec<RecordId> = Vec::new();

        for &id in ids {
            match source.produce(id).await {
                Ok(docs) => {
                    for doc in docs {
                        batch.push(doc);
                        batch_ids.push(id);
                    }
                }
                Err(err) => {
                    warn!(recid = id, kind = %source.kind(), error = %err, "Document production failed");
                    failures.push(IndexingFailure::new(id, err.to_string()));
                }
            }

            if batch.len() >= cap {
                self.submit(source, &mut batch, &mut batch_ids, &mut failures)
                    .await?;
            }
        }

        if !batch.is_empty() {
            self.submit(source, &mut batch, &mut batch_ids, &mut failures)
                .await?;
        }

        info!(
            kind = %source.kind(),
            ids = ids.len(),
            failures = failures.len(),
            "Indexing run complete"
        );
        Ok(failures)
    }

    /// Submit the current batch and fold engine-reported per-document
    /// failures into the aggregate.
    async fn submit(
        &self,
        source: &dyn DocumentSource,
        batch: &mut Vec<serde_json::Value>,
        batch_ids: &mut Vec<RecordId>,
        failures: &mut Vec<IndexingFailure>,
    ) -> Result<(), IndexError> {
        let docs = std::mem::take(batch);
        let ids = std::mem::take(batch_ids);

        let report = self
            .engine
            .bulk_write(
                &self.index,
                source.kind().as_str(),
                &docs,
                ID_FIELD,
                self.refresh,
            )
            .await?;

        // Response items mirror submission order; anything else means the
        // response cannot be trusted.
        if report.len() != docs.len() {
            return Err(IndexError::Engine(EngineError::Malformed(format!(
                "bulk response has {} items for {} documents",
                report.len(),
                docs.len()
            ))));
        }

        for (id, item) in ids.iter().zip(report.items.iter()) {
            if let Some(error) = &item.error {
                failures.push(IndexingFailure::new(*id, error.clone()));
            }
        }

        debug!(
            kind = %source.kind(),
            count = docs.len(),
            "Submitted batch"
        );
        Ok(())
    }
}
