//! Traits for the external collaborators feeding the indexing side.
//!
//! Each of these is a blocking remote call from the core's point of view.
//! Timeouts and retries belong to the implementations' transport layers;
//! the pipeline never retries.

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use bibsearch_types::RecordId;

/// Errors reported by the external collaborators.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The record store has no record with this identifier.
    #[error("no record with id {0}")]
    NotFound(RecordId),

    /// The collaborator itself failed (connectivity, backend error).
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// The record/metadata store: supplies the serializable form of a record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the record's serializable document. Fails for unknown ids.
    async fn get(&self, id: RecordId) -> Result<Value, SourceError>;
}

/// The full-text extraction service.
#[async_trait]
pub trait FulltextExtractor: Send + Sync {
    /// Extracted text for the record, or None when extraction yields
    /// nothing. An empty string is treated the same as None by callers.
    async fn text(&self, id: RecordId) -> Result<Option<String>, SourceError>;
}

/// The collection-membership resolver, with an internal cache the caller
/// can explicitly invalidate.
#[async_trait]
pub trait CollectionResolver: Send + Sync {
    /// Names of all known collections.
    async fn collection_names(&self) -> Result<Vec<String>, SourceError>;

    /// Member record identifiers of one collection.
    async fn members(&self, name: &str) -> Result<HashSet<RecordId>, SourceError>;

    /// Drop the resolver's internal cache so subsequent calls observe a
    /// fresh snapshot.
    async fn invalidate_cache(&self) -> Result<(), SourceError>;
}
