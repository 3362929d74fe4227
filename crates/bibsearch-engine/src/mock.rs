//! In-memory engine used by tests and local smoke runs.
//!
//! Records every bulk write so callers can assert on batching behavior,
//! and can be scripted to reject individual documents, fail the bulk
//! transport outright, or answer searches with a canned response.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::bulk::{BulkItem, BulkReport};
use crate::error::EngineError;
use crate::protocol::SearchEngine;

/// One recorded bulk write.
#[derive(Debug, Clone)]
pub struct BulkCall {
    pub index: String,
    pub doc_type: String,
    pub docs: Vec<Value>,
    pub id_field: String,
    pub refresh: bool,
}

#[derive(Default)]
struct MockState {
    indices: HashSet<String>,
    mappings: Vec<(String, String)>,
    bulk_calls: Vec<BulkCall>,
    fail_ids: HashSet<String>,
    fail_bulk_transport: bool,
    search_response: Option<Value>,
    health: Option<String>,
}

/// Recording fake of the engine protocol.
#[derive(Default)]
pub struct MockEngine {
    state: Mutex<MockState>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every search (and more-like-this) with this payload.
    pub fn with_search_response(self, response: Value) -> Self {
        self.state().search_response = Some(response);
        self
    }

    /// Reject the document with this id in every subsequent bulk write.
    pub fn fail_document(&self, id: &str) {
        self.state().fail_ids.insert(id.to_string());
    }

    /// Fail every subsequent bulk write at the transport level.
    pub fn fail_bulk_transport(&self) {
        self.state().fail_bulk_transport = true;
    }

    /// Report this cluster health status instead of "green".
    pub fn set_health(&self, status: &str) {
        self.state().health = Some(status.to_string());
    }

    /// All bulk writes recorded so far, in submission order.
    pub fn bulk_calls(&self) -> Vec<BulkCall> {
        self.state().bulk_calls.clone()
    }

    /// Names of indices currently existing.
    pub fn indices(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state().indices.iter().cloned().collect();
        names.sort();
        names
    }

    /// Installed mappings as (index, doc_type) pairs, in install order.
    pub fn mappings(&self) -> Vec<(String, String)> {
        self.state().mappings.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SearchEngine for MockEngine {
    async fn health(&self) -> Result<String, EngineError> {
        Ok(self.state().health.clone().unwrap_or_else(|| "green".to_string()))
    }

    async fn index_exists(&self, index: &str) -> Result<bool, EngineError> {
        Ok(self.state().indices.contains(index))
    }

    async fn create_index(&self, index: &str, _settings: &Value) -> Result<(), EngineError> {
        let mut state = self.state();
        if !state.indices.insert(index.to_string()) {
            return Err(EngineError::Status {
                status: 400,
                body: format!("index {} already exists", index),
            });
        }
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<bool, EngineError> {
        Ok(self.state().indices.remove(index))
    }

    async fn put_mapping(
        &self,
        index: &str,
        doc_type: &str,
        _mapping: &Value,
    ) -> Result<(), EngineError> {
        let mut state = self.state();
        if !state.indices.contains(index) {
            return Err(EngineError::Status {
                status: 404,
                body: format!("no such index: {}", index),
            });
        }
        state
            .mappings
            .push((index.to_string(), doc_type.to_string()));
        Ok(())
    }

    async fn bulk_write(
        &self,
        index: &str,
        doc_type: &str,
        docs: &[Value],
        id_field: &str,
        refresh: bool,
    ) -> Result<BulkReport, EngineError> {
        let mut state = self.state();
        if state.fail_bulk_transport {
            return Err(EngineError::Status {
                status: 503,
                body: "bulk transport failure".to_string(),
            });
        }

        let mut items = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = match doc.get(id_field) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => {
                    return Err(EngineError::InvalidDocument(format!(
                        "document has no {} field",
                        id_field
                    )))
                }
            };
            let error = state
                .fail_ids
                .contains(&id)
                .then(|| format!("MapperParsingException[rejected document {}]", id));
            items.push(BulkItem { id, error });
        }

        state.bulk_calls.push(BulkCall {
            index: index.to_string(),
            doc_type: doc_type.to_string(),
            docs: docs.to_vec(),
            id_field: id_field.to_string(),
            refresh,
        });

        Ok(BulkReport { items })
    }

    async fn search(
        &self,
        _index: &str,
        _doc_type: &str,
        _body: &Value,
    ) -> Result<Value, EngineError> {
        Ok(self
            .state()
            .search_response
            .clone()
            .unwrap_or_else(|| json!({"hits": {"total": 0, "hits": []}})))
    }

    async fn more_like_this(
        &self,
        index: &str,
        doc_type: &str,
        _id: &str,
        _fields: &[&str],
    ) -> Result<Value, EngineError> {
        self.search(index, doc_type, &Value::Null).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_lifecycle() {
        let engine = MockEngine::new();
        assert!(!engine.index_exists("biblio").await.unwrap());

        engine.create_index("biblio", &json!({})).await.unwrap();
        assert!(engine.index_exists("biblio").await.unwrap());

        // Creating twice is an engine-side error.
        assert!(engine.create_index("biblio", &json!({})).await.is_err());

        assert!(engine.delete_index("biblio").await.unwrap());
        assert!(!engine.delete_index("biblio").await.unwrap());
    }

    #[tokio::test]
    async fn test_bulk_write_records_calls_and_failures() {
        let engine = MockEngine::new();
        engine.fail_document("2");

        let docs = vec![json!({"recid": 1}), json!({"recid": 2})];
        let report = engine
            .bulk_write("biblio", "record", &docs, "recid", false)
            .await
            .unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(engine.bulk_calls().len(), 1);
        assert_eq!(engine.bulk_calls()[0].docs.len(), 2);
    }

    #[tokio::test]
    async fn test_bulk_transport_failure() {
        let engine = MockEngine::new();
        engine.fail_bulk_transport();

        let docs = vec![json!({"recid": 1})];
        let err = engine
            .bulk_write("biblio", "record", &docs, "recid", false)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Status { status: 503, .. }));
        assert!(engine.bulk_calls().is_empty());
    }

    #[tokio::test]
    async fn test_canned_search_response() {
        let engine =
            MockEngine::new().with_search_response(json!({"hits": {"total": 1, "hits": []}}));
        let response = engine.search("biblio", "record", &json!({})).await.unwrap();
        assert_eq!(response["hits"]["total"], 1);
    }
}
