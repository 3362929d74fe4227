//! Engine protocol error types.

use thiserror::Error;

/// Errors raised by calls across the engine boundary.
///
/// These are transport-level failures and are fatal to the enclosing
/// operation. Per-document indexing failures are not errors; they are
/// returned as data inside [`crate::BulkReport`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// The HTTP request itself failed (connection refused, timeout, ...).
    #[error("Engine unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The engine answered with a non-success status.
    #[error("Engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The engine answered successfully but the body did not have the
    /// expected shape.
    #[error("Malformed engine response: {0}")]
    Malformed(String),

    /// A request payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A document handed to the bulk writer is missing its id field.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}
