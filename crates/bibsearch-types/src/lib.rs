//! # bibsearch-types
//!
//! Shared domain types for the bibsearch system.
//!
//! This crate defines the vocabulary used by every other crate:
//! - [`RecordId`]: the stable identifier of a bibliographic record
//! - [`DocKind`]: the three indexed entity kinds (record, fulltext,
//!   collection membership)
//! - [`IndexingFailure`]: a per-document error inside an otherwise
//!   successful bulk write
//! - [`BibSearchConfig`]: layered process configuration

pub mod config;
pub mod error;
pub mod kind;

pub use config::BibSearchConfig;
pub use error::ConfigError;
pub use kind::{DocKind, IndexingFailure, RecordId};
