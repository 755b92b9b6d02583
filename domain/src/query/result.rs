//! Query results as returned by the analytics API

use serde::{Deserialize, Serialize};

/// One row of results: dimension labels followed by metric values, in the
/// same order they were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(default)]
    pub dimensions: Vec<String>,
    pub metrics: Vec<serde_json::Number>,
}

/// Response metadata. Only populated for the `include` flags that were set;
/// unknown keys the API may add are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ResultMeta {
    pub fn is_empty(&self) -> bool {
        self.time_labels.is_none() && self.total_rows.is_none() && self.extra.is_empty()
    }
}

/// A complete query response: rows, optional metadata, and the query as the
/// API echoed it back (useful for seeing applied defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub results: Vec<ResultRow>,
    #[serde(default, skip_serializing_if = "ResultMeta::is_empty")]
    pub meta: ResultMeta,
    #[serde(default)]
    pub query: serde_json::Value,
}
