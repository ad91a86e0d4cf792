//! Static cluster fixtures used across harnesses.
//!
//! [`replication_cluster`] is the canonical three-guest scenario: two
//! primaries and one secondary, all running, spread over two nodes. Several
//! harness tests assert exact result sets against it.

use super::builders::*;
use pulse_core::{Guest, MetricsTable, Node};

/// The three-guest replication scenario:
///
/// | vmid | name             | node | role      |
/// |------|------------------|------|-----------|
/// | 101  | web-server       | pve1 | primary   |
/// | 102  | database-primary | pve1 | primary   |
/// | 201  | web-secondary    | pve2 | secondary |
pub fn replication_cluster() -> Vec<Guest> {
    vec![
        primary_vm(101, "web-server", "pve1"),
        primary_vm(102, "database-primary", "pve1"),
        secondary_vm(201, "web-secondary", "pve2", "pve1"),
    ]
}

/// A mixed fleet exercising every classification the matcher knows about:
/// VMs and containers, running and stopped, shared and unshared, tagged and
/// untagged, plus the deliberately confusing names the regression tests
/// need (`sprint-server`, `standalone-pri-app`).
pub fn mixed_fleet() -> Vec<Guest> {
    vec![
        primary_vm(101, "web-server", "pve1"),
        primary_vm(102, "database-primary", "pve1"),
        secondary_vm(201, "web-secondary", "pve2", "pve1"),
        vm(103, "sprint-server"),
        vm(104, "standalone-pri-app"),
        GuestBuilder::new(105, "backup-target").stopped().build(),
        GuestBuilder::new(300, "cache")
            .lxc()
            .tags("prod,redis,zfs")
            .build(),
        GuestBuilder::new(301, "build-runner")
            .lxc()
            .stopped()
            .on_node("pve2")
            .build(),
    ]
}

/// Metrics for [`mixed_fleet`]: a busy primary, an idle container, and no
/// data at all for the stopped guests.
pub fn mixed_fleet_metrics() -> MetricsTable {
    MetricsBuilder::new()
        .cpu(101, 0.92)
        .cpu(102, 0.45)
        .cpu(201, 0.10)
        .cpu(300, 0.02)
        .memory(101, 80.0)
        .memory(102, 55.0)
        .memory(300, 20.0)
        .disk(101, 70.0)
        .disk(102, 88.0)
        .network(101, 8.0 * 131072.0, 2.0 * 131072.0) // 10 Mbps total
        .network(102, 131072.0, 131072.0) // 2 Mbps total
        .build()
}

/// The two-node lookup table used by the fixtures.
pub fn cluster_nodes() -> Vec<Node> {
    nodes(&[("pve1", "alpha"), ("pve2", "bravo")])
}
