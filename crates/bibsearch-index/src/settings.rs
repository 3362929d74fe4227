//! Engine-level index settings.

use serde_json::{json, Value};

/// Settings installed when the index is created.
///
/// A single shard keeps facet counts exact; automatic type detection is
/// disabled because the inferred type would depend on indexing order.
pub fn index_settings() -> Value {
    json!({
        "number_of_shards": 1,
        "number_of_replicas": 1,
        "date_detection": false,
        "numeric_detection": false
    })
}
