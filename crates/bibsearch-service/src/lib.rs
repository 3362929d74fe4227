//! # bibsearch-service
//!
//! The caller-facing facade of bibsearch. Owns the engine handle, the
//! three external collaborator handles, and the query/response strategies,
//! and exposes the system's operations: index lifecycle, the three
//! per-kind indexing runs, search, and more-like-this.

pub mod error;
pub mod service;

pub use error::ServiceError;
pub use service::BibSearchService;
