//! Identifier-to-collections context for membership indexing.
//!
//! The resolver answers "which records belong to collection X"; indexing
//! needs the inverse. The context is built explicitly before a membership
//! run and passed into the indexing call, so its lifetime and refresh are
//! under caller control. It is read-only once built; callers running
//! concurrent indexing runs must serialize rebuilds themselves.

use std::collections::HashMap;

use tracing::{debug, info};

use bibsearch_types::RecordId;

use crate::error::IndexError;
use crate::sources::CollectionResolver;

/// Inverted membership mapping: record id -> collection names.
#[derive(Debug, Clone, Default)]
pub struct CollectionContext {
    by_record: HashMap<RecordId, Vec<String>>,
}

impl CollectionContext {
    /// Build the context from the resolver.
    ///
    /// With `force_refresh` (the default for callers) the resolver's
    /// internal cache is invalidated first; opting out only makes sense
    /// for repeated builds within one consistent snapshot.
    pub async fn rebuild(
        resolver: &dyn CollectionResolver,
        force_refresh: bool,
    ) -> Result<Self, IndexError> {
        if force_refresh {
            resolver.invalidate_cache().await?;
            debug!("Invalidated collection resolver cache");
        }

        let mut by_record: HashMap<RecordId, Vec<String>> = HashMap::new();
        let names = resolver.collection_names().await?;
        for name in &names {
            for id in resolver.members(name).await? {
                by_record.entry(id).or_default().push(name.clone());
            }
        }

        info!(
            collections = names.len(),
            records = by_record.len(),
            "Built collection context"
        );
        Ok(Self { by_record })
    }

    /// Build directly from a prepared mapping (tests, replays).
    pub fn from_map(by_record: HashMap<RecordId, Vec<String>>) -> Self {
        Self { by_record }
    }

    /// Collection names the record belongs to; empty when unresolved.
    pub fn collections_for(&self, id: RecordId) -> &[String] {
        self.by_record
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of records with at least one known membership.
    pub fn record_count(&self) -> usize {
        self.by_record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_record.is_empty()
    }
}
