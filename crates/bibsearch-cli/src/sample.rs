//! Synthetic sample corpus for smoke runs.
//!
//! Deterministic collaborators so repeated runs index identical data:
//! record fields cycle through small pools, every third record has no
//! extractable text, and collection membership follows the identifier.

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::{json, Value};

use bibsearch_index::{CollectionResolver, FulltextExtractor, RecordStore, SourceError};
use bibsearch_types::RecordId;

const TITLES: [&str; 5] = [
    "Search for the Higgs boson in four-lepton final states",
    "Supersymmetry and cosmology",
    "Neutrino oscillations in matter",
    "Lattice QCD at finite temperature",
    "Dark matter direct detection with xenon targets",
];

const AUTHORS: [&str; 4] = ["Ellis, J.", "Ibanez, L. E.", "Mariethoz, J.", "Caffaro, J."];

const KEYWORDS: [&str; 4] = ["higgs", "supersymmetry", "neutrino", "dark matter"];

pub const COLLECTIONS: [&str; 3] = ["Articles", "Preprints", "Theses"];

fn pick<T: Copy>(pool: &[T], id: RecordId) -> T {
    pool[(id as usize) % pool.len()]
}

/// Record store serving generated bibliographic records.
pub struct SampleStore {
    /// Identifiers above this bound behave as missing records.
    max_id: RecordId,
}

impl SampleStore {
    pub fn new(max_id: RecordId) -> Self {
        Self { max_id }
    }
}

#[async_trait]
impl RecordStore for SampleStore {
    async fn get(&self, id: RecordId) -> Result<Value, SourceError> {
        if id == 0 || id > self.max_id {
            return Err(SourceError::NotFound(id));
        }
        Ok(json!({
            "title": {"title": pick(&TITLES, id)},
            "authors": [
                {"full_name": pick(&AUTHORS, id)},
                {"full_name": pick(&AUTHORS, id + 1)},
            ],
            "keywords": [{"term": pick(&KEYWORDS, id)}],
            "primary_report_number": format!("CERN-TH-{:04}", id),
            "creation_date": "2014-03-01",
        }))
    }
}

/// Extractor with text for two records out of three.
pub struct SampleExtractor;

#[async_trait]
impl FulltextExtractor for SampleExtractor {
    async fn text(&self, id: RecordId) -> Result<Option<String>, SourceError> {
        if id % 3 == 0 {
            return Ok(None);
        }
        Ok(Some(format!(
            "{} Full text of record {} mentioning the {} keyword.",
            pick(&TITLES, id),
            id,
            pick(&KEYWORDS, id)
        )))
    }
}

/// Resolver assigning membership by identifier: even records are
/// Articles, multiples of three are Preprints, multiples of five are
/// Theses. Odd non-multiples stay unassigned.
pub struct SampleResolver {
    max_id: RecordId,
}

impl SampleResolver {
    pub fn new(max_id: RecordId) -> Self {
        Self { max_id }
    }

    fn belongs(name: &str, id: RecordId) -> bool {
        match name {
            "Articles" => id % 2 == 0,
            "Preprints" => id % 3 == 0,
            "Theses" => id % 5 == 0,
            _ => false,
        }
    }
}

#[async_trait]
impl CollectionResolver for SampleResolver {
    async fn collection_names(&self) -> Result<Vec<String>, SourceError> {
        Ok(COLLECTIONS.iter().map(|name| name.to_string()).collect())
    }

    async fn members(&self, name: &str) -> Result<HashSet<RecordId>, SourceError> {
        Ok((1..=self.max_id)
            .filter(|&id| Self::belongs(name, id))
            .collect())
    }

    async fn invalidate_cache(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_is_deterministic() {
        let store = SampleStore::new(100);
        let first = store.get(7).await.unwrap();
        let second = store.get(7).await.unwrap();
        assert_eq!(first, second);
        assert!(first["title"]["title"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_store_rejects_out_of_range() {
        let store = SampleStore::new(10);
        assert!(store.get(0).await.is_err());
        assert!(store.get(11).await.is_err());
    }

    #[tokio::test]
    async fn test_extractor_skips_every_third() {
        let extractor = SampleExtractor;
        assert!(extractor.text(3).await.unwrap().is_none());
        assert!(extractor.text(4).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_resolver_membership() {
        let resolver = SampleResolver::new(30);
        let articles = resolver.members("Articles").await.unwrap();
        assert_eq!(articles.len(), 15);
        assert!(articles.contains(&2));
        assert!(!articles.contains(&3));
        // Record 30 is in all three collections.
        for name in COLLECTIONS {
            assert!(resolver.members(name).await.unwrap().contains(&30));
        }
    }
}
