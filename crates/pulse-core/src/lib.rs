//! pulse-core — shared data model for the Pulse dashboard.
//!
//! This crate holds the types that cross layer boundaries: guest and node
//! records, the per-resource metrics table, the poll snapshot document, and
//! application configuration. The query engine in the root `pulse` crate
//! consumes these; the poller (out of scope here) produces them.

pub mod config;
pub mod snapshot;
pub mod types;

pub use snapshot::{Snapshot, SnapshotError};
pub use types::{
    resolve_node_name, CpuMetric, Guest, GuestId, GuestType, MetricsTable, Node, PercentMetric,
    RateMetric, Role,
};
