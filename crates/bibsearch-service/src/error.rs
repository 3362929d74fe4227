//! Service-level error type.

use bibsearch_engine::EngineError;
use bibsearch_index::IndexError;
use thiserror::Error;

/// Errors surfaced by the service facade.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Engine call failed.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Indexing-side failure (sources, pipeline, lifecycle).
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}
