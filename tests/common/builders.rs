//! Test builders — ergonomic constructors for `Guest`, metrics, and queries.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning
//! `Result`.

use pulse_core::{CpuMetric, Guest, GuestType, MetricsTable, Node, PercentMetric, RateMetric};

// ---------------------------------------------------------------------------
// GuestBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Guest`] test fixtures.
///
/// # Example
///
/// ```rust
/// let guest = GuestBuilder::new(101, "web-server")
///     .lxc()
///     .stopped()
///     .on_node("pve2")
///     .shared_primary("pve2")
///     .tags("prod,web")
///     .build();
/// ```
pub struct GuestBuilder {
    guest: Guest,
}

impl GuestBuilder {
    pub fn new(vmid: impl ToString, name: impl Into<String>) -> Self {
        Self {
            guest: Guest {
                vmid: vmid.to_string().into(),
                name: name.into(),
                guest_type: GuestType::Qemu,
                status: "running".to_string(),
                node: "pve1".to_string(),
                shared: false,
                primary_node: None,
                tags: None,
                uptime: None,
            },
        }
    }

    pub fn lxc(mut self) -> Self {
        self.guest.guest_type = GuestType::Lxc;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.guest.status = status.into();
        self
    }

    pub fn stopped(self) -> Self {
        self.status("stopped")
    }

    pub fn on_node(mut self, node: impl Into<String>) -> Self {
        self.guest.node = node.into();
        self
    }

    /// Mark the guest shared with the given home node. Whether it is primary
    /// or secondary depends on the node it sits on.
    pub fn shared_primary(mut self, primary_node: impl Into<String>) -> Self {
        self.guest.shared = true;
        self.guest.primary_node = Some(primary_node.into());
        self
    }

    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.guest.tags = Some(tags.into());
        self
    }

    pub fn uptime(mut self, seconds: u64) -> Self {
        self.guest.uptime = Some(seconds);
        self
    }

    pub fn build(self) -> Guest {
        self.guest
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A running, unshared QEMU VM on `pve1`.
pub fn vm(vmid: u32, name: &str) -> Guest {
    GuestBuilder::new(vmid, name).build()
}

/// A running, unshared LXC container on `pve1`.
pub fn ct(vmid: u32, name: &str) -> Guest {
    GuestBuilder::new(vmid, name).lxc().build()
}

/// A shared VM that is primary on its own node.
pub fn primary_vm(vmid: u32, name: &str, node: &str) -> Guest {
    GuestBuilder::new(vmid, name)
        .on_node(node)
        .shared_primary(node)
        .build()
}

/// A shared VM running away from its home node (secondary).
pub fn secondary_vm(vmid: u32, name: &str, node: &str, home: &str) -> Guest {
    GuestBuilder::new(vmid, name)
        .on_node(node)
        .shared_primary(home)
        .build()
}

// ---------------------------------------------------------------------------
// MetricsBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a [`MetricsTable`] keyed by vmid.
pub struct MetricsBuilder {
    metrics: MetricsTable,
}

impl MetricsBuilder {
    pub fn new() -> Self {
        Self {
            metrics: MetricsTable::default(),
        }
    }

    /// CPU usage as a 0–1 fraction.
    pub fn cpu(mut self, vmid: impl ToString, usage: f64) -> Self {
        self.metrics
            .cpu
            .insert(vmid.to_string().into(), CpuMetric { usage });
        self
    }

    /// Memory usage as a 0–100 percentage.
    pub fn memory(mut self, vmid: impl ToString, usage_percent: f64) -> Self {
        self.metrics
            .memory
            .insert(vmid.to_string().into(), PercentMetric { usage_percent });
        self
    }

    /// Disk usage as a 0–100 percentage.
    pub fn disk(mut self, vmid: impl ToString, usage_percent: f64) -> Self {
        self.metrics
            .disk
            .insert(vmid.to_string().into(), PercentMetric { usage_percent });
        self
    }

    /// Network rates in bytes/sec.
    pub fn network(mut self, vmid: impl ToString, in_rate: f64, out_rate: f64) -> Self {
        self.metrics
            .network
            .insert(vmid.to_string().into(), RateMetric { in_rate, out_rate });
        self
    }

    pub fn build(self) -> MetricsTable {
        self.metrics
    }
}

impl Default for MetricsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a node lookup table from `(id, name)` pairs.
pub fn nodes(pairs: &[(&str, &str)]) -> Vec<Node> {
    pairs
        .iter()
        .map(|(id, name)| Node {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}
