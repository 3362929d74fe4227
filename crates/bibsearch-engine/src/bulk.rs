//! Bulk write response parsing.
//!
//! A bulk write succeeds as a call even when individual documents are
//! rejected; those rejections are carried here as data, item by item, in
//! the same order the documents were submitted.

use serde_json::Value;

use crate::error::EngineError;

/// Outcome of one document inside a bulk write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItem {
    /// Document id as echoed by the engine.
    pub id: String,
    /// Error description when the document was rejected.
    pub error: Option<String>,
}

impl BulkItem {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Parsed bulk write response: one item per submitted document, in
/// submission order.
#[derive(Debug, Clone, Default)]
pub struct BulkReport {
    pub items: Vec<BulkItem>,
}

impl BulkReport {
    /// Parse an engine bulk response body.
    ///
    /// Expected shape: `{"items": [{"index": {"_id": ..., "error": ...}}]}`
    /// where each item is keyed by the action name and `error` is either a
    /// string or a structured object.
    pub fn from_value(value: &Value) -> Result<Self, EngineError> {
        let raw_items = value
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| EngineError::Malformed("bulk response has no items array".into()))?;

        let mut items = Vec::with_capacity(raw_items.len());
        for raw in raw_items {
            // Each item is an object with a single action key.
            let body = raw
                .as_object()
                .and_then(|obj| obj.values().next())
                .ok_or_else(|| EngineError::Malformed("bulk item is not an object".into()))?;

            let id = body
                .get("_id")
                .map(id_to_string)
                .ok_or_else(|| EngineError::Malformed("bulk item has no _id".into()))?;

            let error = body.get("error").map(|err| match err {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });

            items.push(BulkItem { id, error });
        }

        Ok(Self { items })
    }

    /// Number of items in the report.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any document was rejected.
    pub fn has_failures(&self) -> bool {
        self.items.iter().any(BulkItem::is_failed)
    }

    /// Iterator over the rejected items only.
    pub fn failures(&self) -> impl Iterator<Item = &BulkItem> {
        self.items.iter().filter(|item| item.is_failed())
    }
}

fn id_to_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
