//! Core types for pulse-core.
//!
//! This module defines the data structures shared across all layers: the
//! [`Guest`] record as reported by the poller, its [`GuestType`] and derived
//! [`Role`], the [`Node`] lookup entry, and the per-resource [`MetricsTable`].

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Guest identity
// ---------------------------------------------------------------------------

/// A guest identifier (`vmid`).
///
/// Proxmox vmids are numeric, but the wire value may arrive as either a JSON
/// number or a string depending on the endpoint. We normalise to a
/// string-backed newtype and expose [`GuestId::as_number`] for the callers
/// that want numeric ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GuestId(String);

impl GuestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if the whole id parses as one.
    pub fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl std::fmt::Display for GuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for GuestId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for GuestId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for GuestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for GuestId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = GuestId;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a vmid as a string or number")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<GuestId, E> {
                Ok(GuestId(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<GuestId, E> {
                Ok(GuestId(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<GuestId, E> {
                Ok(GuestId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

// ---------------------------------------------------------------------------
// Guest
// ---------------------------------------------------------------------------

/// Whether a guest is a QEMU virtual machine or an LXC container.
///
/// Anything that is not `qemu` on the wire is treated as a container; the
/// dashboard only distinguishes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestType {
    Qemu,
    Lxc,
}

impl GuestType {
    pub fn is_vm(self) -> bool {
        self == GuestType::Qemu
    }
}

impl std::fmt::Display for GuestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuestType::Qemu => write!(f, "qemu"),
            GuestType::Lxc => write!(f, "lxc"),
        }
    }
}

impl<'de> Deserialize<'de> for GuestType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.eq_ignore_ascii_case("qemu") {
            Ok(GuestType::Qemu)
        } else {
            Ok(GuestType::Lxc)
        }
    }
}

/// Replication role of a guest relative to its home node.
///
/// Always derived from `shared`/`primary_node`, never stored on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Secondary,
    Unshared,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Primary => write!(f, "primary"),
            Role::Secondary => write!(f, "secondary"),
            Role::Unshared => write!(f, "none"),
        }
    }
}

/// A VM or container record as supplied by the poller.
///
/// Numeric resource usage is *not* stored here; it lives in the separately
/// keyed [`MetricsTable`] so that a metrics refresh never touches the guest
/// list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    /// Guest identifier, unique within a node.
    pub vmid: GuestId,
    /// Human-readable display name.
    pub name: String,
    /// `qemu` or `lxc`.
    #[serde(rename = "type")]
    pub guest_type: GuestType,
    /// Current status (`running`, `stopped`, possibly others). Compared
    /// case-insensitively everywhere.
    pub status: String,
    /// Identifier of the hosting node; resolved to a display name via the
    /// [`Node`] table.
    pub node: String,
    /// Whether the guest is replicated across nodes.
    #[serde(default)]
    pub shared: bool,
    /// Home node of a shared guest. Meaningless when `shared` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_node: Option<String>,
    /// Comma-separated tag string (if any).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Uptime in seconds (if running).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
}

impl Guest {
    /// Derive the replication role: primary if this node is the home node of
    /// a shared guest, secondary if some other node is, unshared otherwise.
    pub fn role(&self) -> Role {
        if !self.shared {
            return Role::Unshared;
        }
        match &self.primary_node {
            Some(primary) if *primary == self.node => Role::Primary,
            _ => Role::Secondary,
        }
    }

    /// Individual tag tokens, trimmed, empty tokens skipped.
    pub fn tag_tokens(&self) -> impl Iterator<Item = &str> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Node lookup table
// ---------------------------------------------------------------------------

/// A cluster node: identifier plus display name.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Node {
    pub id: String,
    pub name: String,
}

/// Resolve a node id to its display name, falling back to the raw id when
/// the lookup table has no entry for it.
pub fn resolve_node_name<'a>(node_id: &'a str, nodes: &'a [Node]) -> &'a str {
    nodes
        .iter()
        .find(|n| n.id == node_id)
        .map_or(node_id, |n| n.name.as_str())
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// CPU usage sample. `usage` is a fraction in 0–1; conversion to a 0–100
/// percentage happens exactly once, at the query matcher boundary.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
pub struct CpuMetric {
    pub usage: f64,
}

/// Memory or disk usage sample, already a 0–100 percentage.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PercentMetric {
    pub usage_percent: f64,
}

/// Network throughput sample in bytes/sec per direction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RateMetric {
    pub in_rate: f64,
    pub out_rate: f64,
}

/// Current resource metrics, keyed by guest id per resource. A guest absent
/// from a map simply has no data for that resource.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct MetricsTable {
    #[serde(default)]
    pub cpu: HashMap<GuestId, CpuMetric>,
    #[serde(default)]
    pub memory: HashMap<GuestId, PercentMetric>,
    #[serde(default)]
    pub disk: HashMap<GuestId, PercentMetric>,
    #[serde(default)]
    pub network: HashMap<GuestId, RateMetric>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
