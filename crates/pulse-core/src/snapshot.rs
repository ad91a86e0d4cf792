//! Snapshot — the JSON document the poller writes and the CLI reads.
//!
//! A snapshot is one consistent view of the cluster: the node table, the
//! guest list, and the metrics captured in the same poll cycle. The query
//! engine is handed these three pieces fresh on every call; it never holds
//! state between snapshots.

use crate::types::{Guest, MetricsTable, Node};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One consistent poll of the cluster.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the poller captured this view (UTC).
    pub generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(default)]
    pub metrics: MetricsTable,
}

/// Why a snapshot could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Snapshot {
    /// Load a snapshot from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
