//! pulse — guest query engine for a Proxmox VE / PBS monitoring dashboard.
//!
//! The dashboard polls node, guest, storage, and backup state and renders
//! sortable/filterable tables. This crate holds the one genuinely subtle
//! piece of that stack: the multi-criteria search/filter engine applied to
//! guest records.
//!
//! # Architecture
//!
//! ```text
//! Poller ──► Snapshot ──► Query engine ──► Table rendering
//!               (pulse-core)   (this crate)     (out of scope)
//! ```
//!
//! The engine is a pure synchronous function over in-memory data; the
//! poller and renderer are external collaborators that supply and consume
//! plain `Vec<Guest>` values.

pub mod query;

pub use pulse_core::{Guest, GuestId, GuestType, MetricsTable, Node, Role, Snapshot};
pub use query::{filter_and_sort, Query};
