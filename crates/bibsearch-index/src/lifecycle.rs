//! Index lifecycle: creation, deletion, mapping installation.
//!
//! Outcomes are explicit. "Already exists" and "was missing" are ordinary
//! results the caller can act on; only transport failures are errors.

use std::sync::Arc;

use tracing::{debug, info};

use bibsearch_engine::SearchEngine;
use bibsearch_types::DocKind;

use crate::error::IndexError;
use crate::mapping::mapping_for;
use crate::settings::index_settings;

/// Result of a create-index request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Index was created and all kind mappings installed.
    Created,
    /// Index already existed; nothing was changed.
    AlreadyExists,
}

/// Result of a delete-index request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Index did not exist; not an error.
    Missing,
}

/// Manages one engine index and its document-kind mappings.
pub struct IndexLifecycle {
    engine: Arc<dyn SearchEngine>,
    index: String,
}

impl IndexLifecycle {
    pub fn new(engine: Arc<dyn SearchEngine>, index: impl Into<String>) -> Self {
        Self {
            engine,
            index: index.into(),
        }
    }

    /// Create the index with its settings and install the mapping for
    /// every document kind, parents before children.
    pub async fn create(&self) -> Result<CreateOutcome, IndexError> {
        if self.engine.index_exists(&self.index).await? {
            debug!(index = %self.index, "Index already exists");
            return Ok(CreateOutcome::AlreadyExists);
        }

        self.engine
            .create_index(&self.index, &index_settings())
            .await?;

        for kind in DocKind::all() {
            self.engine
                .put_mapping(&self.index, kind.as_str(), &mapping_for(kind))
                .await?;
            debug!(index = %self.index, kind = %kind, "Installed mapping");
        }

        info!(index = %self.index, "Created index with mappings");
        Ok(CreateOutcome::Created)
    }

    /// Delete the index. Deleting a missing index is not an error.
    pub async fn delete(&self) -> Result<DeleteOutcome, IndexError> {
        let deleted = self.engine.delete_index(&self.index).await?;
        if deleted {
            info!(index = %self.index, "Deleted index");
            Ok(DeleteOutcome::Deleted)
        } else {
            debug!(index = %self.index, "Index was already missing");
            Ok(DeleteOutcome::Missing)
        }
    }

    /// Delete (if present) and recreate from scratch.
    pub async fn recreate(&self) -> Result<CreateOutcome, IndexError> {
        self.delete().await?;
        self.create().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibsearch_engine::MockEngine;

    fn lifecycle(engine: &Arc<MockEngine>) -> IndexLifecycle {
        IndexLifecycle::new(engine.clone() as Arc<dyn SearchEngine>, "biblio")
    }

    #[tokio::test]
    async fn test_create_installs_all_mappings() {
        let engine = Arc::new(MockEngine::new());
        let outcome = lifecycle(&engine).create().await.unwrap();

        assert_eq!(outcome, CreateOutcome::Created);
        assert_eq!(engine.indices(), ["biblio"]);
        let types: Vec<String> = engine.mappings().into_iter().map(|(_, t)| t).collect();
        assert_eq!(types, ["record", "fulltext", "collection"]);
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let engine = Arc::new(MockEngine::new());
        let lifecycle = lifecycle(&engine);

        assert_eq!(lifecycle.create().await.unwrap(), CreateOutcome::Created);
        assert_eq!(
            lifecycle.create().await.unwrap(),
            CreateOutcome::AlreadyExists
        );
        // Mappings installed only once.
        assert_eq!(engine.mappings().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_missing_then_create_succeeds() {
        let engine = Arc::new(MockEngine::new());
        let lifecycle = lifecycle(&engine);

        assert_eq!(lifecycle.delete().await.unwrap(), DeleteOutcome::Missing);
        assert_eq!(lifecycle.create().await.unwrap(), CreateOutcome::Created);
        assert_eq!(lifecycle.delete().await.unwrap(), DeleteOutcome::Deleted);
    }

    #[tokio::test]
    async fn test_recreate() {
        let engine = Arc::new(MockEngine::new());
        let lifecycle = lifecycle(&engine);

        lifecycle.create().await.unwrap();
        assert_eq!(lifecycle.recreate().await.unwrap(), CreateOutcome::Created);
    }
}
