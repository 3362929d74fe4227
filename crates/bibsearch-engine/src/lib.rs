//! # bibsearch-engine
//!
//! Protocol boundary to the remote search engine.
//!
//! The engine is an external service spoken to over a request/response
//! protocol; this crate defines the [`SearchEngine`] trait the rest of the
//! system programs against, plus two implementations:
//! - [`HttpEngine`]: the real REST client
//! - [`MockEngine`]: an in-memory recording engine for tests and local
//!   smoke runs
//!
//! Two error channels are kept strictly apart: a failed call (connectivity,
//! non-success status, malformed body) is an [`EngineError`]; per-document
//! failures inside an otherwise successful bulk write come back as data in
//! a [`BulkReport`].

pub mod bulk;
pub mod error;
pub mod http;
pub mod mock;
pub mod protocol;

pub use bulk::{BulkItem, BulkReport};
pub use error::EngineError;
pub use http::HttpEngine;
pub use mock::{BulkCall, MockEngine};
pub use protocol::{SearchEngine, PARENT_FIELD};
