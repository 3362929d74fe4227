//! The engine protocol trait.
//!
//! Everything the core needs from the remote engine: index lifecycle,
//! mapping installation, bulk writes, search, more-like-this, and cluster
//! health. All calls are blocking remote calls; timeouts and retries
//! belong to the transport layer, never to this trait's callers.

use async_trait::async_trait;
use serde_json::Value;

use crate::bulk::BulkReport;
use crate::error::EngineError;

/// Document payload key carrying the parent reference for child documents.
///
/// Bulk implementations lift this key out of the document source and into
/// the write's routing metadata.
pub const PARENT_FIELD: &str = "_parent";

/// Request/response interface to the remote search engine.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Cluster health status ("green", "yellow", "red").
    async fn health(&self) -> Result<String, EngineError>;

    /// Whether the named index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, EngineError>;

    /// Create the named index with the given settings payload.
    async fn create_index(&self, index: &str, settings: &Value) -> Result<(), EngineError>;

    /// Delete the named index. Returns false when the index was missing,
    /// which is not an error.
    async fn delete_index(&self, index: &str) -> Result<bool, EngineError>;

    /// Install a field mapping for one document type. The mapping payload
    /// is rooted at the document type name and may declare a parent type.
    async fn put_mapping(
        &self,
        index: &str,
        doc_type: &str,
        mapping: &Value,
    ) -> Result<(), EngineError>;

    /// Submit one batch of documents as a single bulk write.
    ///
    /// The document id is taken from `id_field` inside each document; a
    /// [`PARENT_FIELD`] key, when present, becomes parent routing metadata
    /// and is not indexed as a source field. Per-document failures are
    /// reported inside the returned [`BulkReport`]; only a failure of the
    /// call itself is an `Err`.
    async fn bulk_write(
        &self,
        index: &str,
        doc_type: &str,
        docs: &[Value],
        id_field: &str,
        refresh: bool,
    ) -> Result<BulkReport, EngineError>;

    /// Execute a search with an engine-native query body against one
    /// document type. Returns the raw response payload.
    async fn search(&self, index: &str, doc_type: &str, body: &Value)
        -> Result<Value, EngineError>;

    /// Find documents similar to the one with the given id, comparing the
    /// named fields. Returns the raw response payload.
    async fn more_like_this(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        fields: &[&str],
    ) -> Result<Value, EngineError>;
}
