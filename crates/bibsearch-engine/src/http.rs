//! REST implementation of the engine protocol.
//!
//! Speaks the engine's HTTP API: index lifecycle via `PUT`/`DELETE` on the
//! index, mappings via `_mapping`, batches via the newline-delimited
//! `_bulk` endpoint, queries via `_search`.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::bulk::BulkReport;
use crate::error::EngineError;
use crate::protocol::{SearchEngine, PARENT_FIELD};

/// HTTP client for a remote search engine.
pub struct HttpEngine {
    client: Client,
    base_url: String,
}

impl HttpEngine {
    /// Create a client for the engine at `base_url`
    /// (e.g. `http://localhost:9200`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        info!(url = %base_url, "Created engine client");
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Map a non-success response to an `EngineError::Status` with the
    /// response body as the cause.
    async fn check(response: Response) -> Result<Response, EngineError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(EngineError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Build the newline-delimited bulk payload.
    ///
    /// Each document becomes an action line plus a source line. The id is
    /// read from `id_field`; a `_parent` key is lifted out of the source
    /// and into the action's routing metadata.
    fn bulk_body(
        index: &str,
        doc_type: &str,
        docs: &[Value],
        id_field: &str,
    ) -> Result<String, EngineError> {
        let mut body = String::new();
        for doc in docs {
            let id = doc.get(id_field).map(scalar_to_string).ok_or_else(|| {
                EngineError::InvalidDocument(format!("document has no {} field", id_field))
            })?;

            let mut action = Map::new();
            action.insert("_index".to_string(), json!(index));
            action.insert("_type".to_string(), json!(doc_type));
            action.insert("_id".to_string(), json!(id));

            let source = match doc {
                Value::Object(fields) => {
                    let mut source = fields.clone();
                    if let Some(parent) = source.remove(PARENT_FIELD) {
                        action.insert("parent".to_string(), json!(scalar_to_string(&parent)));
                    }
                    Value::Object(source)
                }
                other => other.clone(),
            };

            body.push_str(&serde_json::to_string(&json!({ "index": action }))?);
            body.push('\n');
            body.push_str(&serde_json::to_string(&source)?);
            body.push('\n');
        }
        Ok(body)
    }
}

#[async_trait]
impl SearchEngine for HttpEngine {
    async fn health(&self) -> Result<String, EngineError> {
        let response = self
            .client
            .get(self.url("_cluster/health"))
            .send()
            .await?;
        let body: Value = Self::check(response).await?.json().await?;
        body.get("status")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| EngineError::Malformed("health response has no status".into()))
    }

    async fn index_exists(&self, index: &str) -> Result<bool, EngineError> {
        let response = self.client.head(self.url(index)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => {
                Self::check(response).await?;
                Ok(false)
            }
        }
    }

    async fn create_index(&self, index: &str, settings: &Value) -> Result<(), EngineError> {
        debug!(index, "Creating index");
        let response = self
            .client
            .put(self.url(index))
            .json(&json!({ "settings": settings }))
            .send()
            .await?;
        Self::check(response).await?;
        info!(index, "Created index");
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<bool, EngineError> {
        debug!(index, "Deleting index");
        let response = self.client.delete(self.url(index)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::check(response).await?;
        info!(index, "Deleted index");
        Ok(true)
    }

    async fn put_mapping(
        &self,
        index: &str,
        doc_type: &str,
        mapping: &Value,
    ) -> Result<(), EngineError> {
        debug!(index, doc_type, "Installing mapping");
        let response = self
            .client
            .put(self.url(&format!("{}/_mapping/{}", index, doc_type)))
            .json(mapping)
            .send()
            .await?;
        Self::check(response).await?;
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
        let body = Self::bulk_body(index, doc_type, docs, id_field)?;
        debug!(index, doc_type, count = docs.len(), "Submitting bulk write");

        let mut request = self
            .client
            .post(self.url("_bulk"))
            .header("Content-Type", "application/x-ndjson")
            .body(body);
        if refresh {
            request = request.query(&[("refresh", "true")]);
        }

        let response = Self::check(request.send().await?).await?;
        let payload: Value = response.json().await?;
        BulkReport::from_value(&payload)
    }

    async fn search(
        &self,
        index: &str,
        doc_type: &str,
        body: &Value,
    ) -> Result<Value, EngineError> {
        debug!(index, doc_type, "Executing search");
        let response = self
            .client
            .post(self.url(&format!("{}/{}/_search", index, doc_type)))
            .json(body)
            .send()
            .await?;
        let payload = Self::check(response).await?.json().await?;
        Ok(payload)
    }

    async fn more_like_this(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        fields: &[&str],
    ) -> Result<Value, EngineError> {
        let body = json!({
            "query": {
                "more_like_this": {
                    "fields": fields,
                    "like": [{"_type": doc_type, "_id": id}],
                    "min_term_freq": 1,
                    "min_doc_freq": 1
                }
            }
        });
        self.search(index, doc_type, &body).await
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_body_shape() {
        let docs = vec![
            json!({"recid": 5, "title": {"title": "CP violation"}}),
            json!({"recid": 9, "fulltext": "lattice QCD", "_parent": 9}),
        ];

        let body = HttpEngine::bulk_body("biblio", "fulltext", &docs, "recid").unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 4);

        let action: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(action["index"]["_index"], "biblio");
        assert_eq!(action["index"]["_id"], "5");
        assert!(action["index"].get("parent").is_none());

        // Child action carries parent routing; source no longer does.
        let child_action: Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(child_action["index"]["parent"], "9");
        let child_source: Value = serde_json::from_str(lines[3]).unwrap();
        assert!(child_source.get(PARENT_FIELD).is_none());
        assert_eq!(child_source["fulltext"], "lattice QCD");
    }

    #[test]
    fn test_bulk_body_missing_id_field() {
        let docs = vec![json!({"title": "no id here"})];
        let err = HttpEngine::bulk_body("biblio", "record", &docs, "recid").unwrap_err();
        assert!(matches!(err, EngineError::InvalidDocument(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let engine = HttpEngine::new("http://localhost:9200/");
        assert_eq!(engine.url("_bulk"), "http://localhost:9200/_bulk");
    }
}
