//! # bibsearch-index
//!
//! Indexing side of bibsearch: turns record identifiers into engine
//! documents and streams them into the remote engine in bounded batches.
//!
//! Modules:
//! - [`mapping`] / [`settings`]: the declarative field schema and index
//!   settings (pure data, reproducible byte for byte)
//! - [`sources`]: traits for the external collaborators (record store,
//!   full-text extractor, collection resolver)
//! - [`document`]: per-kind document sources shaping collaborator output
//!   into indexable documents
//! - [`collections`]: the explicit identifier-to-collections context built
//!   before a membership indexing run
//! - [`pipeline`]: the bulk indexing pipeline with per-document error
//!   aggregation
//! - [`lifecycle`]: index create/delete with explicit outcomes

pub mod collections;
pub mod document;
pub mod error;
pub mod lifecycle;
pub mod mapping;
pub mod pipeline;
pub mod settings;
pub mod sources;

pub use collections::CollectionContext;
pub use document::{
    CollectionSource, DocumentSource, FulltextSource, RecordSource, ID_FIELD, META_FIELD,
};
pub use error::IndexError;
pub use lifecycle::{CreateOutcome, DeleteOutcome, IndexLifecycle};
pub use mapping::{collection_mapping, fulltext_mapping, mapping_for, record_mapping};
pub use pipeline::BulkPipeline;
pub use settings::index_settings;
pub use sources::{CollectionResolver, FulltextExtractor, RecordStore, SourceError};
