//! Error types for the indexing side.

use bibsearch_engine::EngineError;
use thiserror::Error;

use crate::sources::SourceError;

/// Errors that can occur while building documents or driving the engine.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Engine call failed (transport, status, malformed response).
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// An external collaborator failed for one identifier.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// JSON encoding/decoding errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceError;

    #[test]
    fn test_error_display() {
        let err = IndexError::Source(SourceError::NotFound(17));
        assert_eq!(err.to_string(), "Source error: no record with id 17");
    }
}
