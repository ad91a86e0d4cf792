//! Sort comparator for the filtered guest list.
//!
//! Numeric keys compare on live metric values with missing data coercing to
//! 0; `id` compares numerically when both ids parse as numbers and
//! lexicographically otherwise; everything else compares case-insensitively.
//! `slice::sort_by` is stable, so equal keys keep their pre-sort order and
//! the output is deterministic.

use crate::query::matcher::metric_value;
use crate::query::term::MetricKind;
use pulse_core::{Guest, GuestId, MetricsTable};
use std::cmp::Ordering;
use std::str::FromStr;

/// Which column to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    Type,
    Status,
    Node,
    Cpu,
    Memory,
    Disk,
    Download,
    Upload,
    Uptime,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" | "vmid" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "type" => Ok(SortKey::Type),
            "status" => Ok(SortKey::Status),
            "node" => Ok(SortKey::Node),
            "cpu" => Ok(SortKey::Cpu),
            "memory" | "mem" => Ok(SortKey::Memory),
            "disk" => Ok(SortKey::Disk),
            "download" | "netin" => Ok(SortKey::Download),
            "upload" | "netout" => Ok(SortKey::Upload),
            "uptime" => Ok(SortKey::Uptime),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// A sort specification: key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: Direction,
}

impl Sort {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: Direction::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: Direction::Desc,
        }
    }
}

pub(crate) fn sort_guests(guests: &mut [Guest], sort: &Sort, metrics: &MetricsTable) {
    guests.sort_by(|a, b| {
        let ord = compare(a, b, sort.key, metrics);
        match sort.direction {
            Direction::Asc => ord,
            Direction::Desc => ord.reverse(),
        }
    });
}

fn compare(a: &Guest, b: &Guest, key: SortKey, metrics: &MetricsTable) -> Ordering {
    match key {
        SortKey::Id => compare_ids(&a.vmid, &b.vmid),
        SortKey::Name => compare_text(&a.name, &b.name),
        SortKey::Type => compare_text(&a.guest_type.to_string(), &b.guest_type.to_string()),
        SortKey::Status => compare_text(&a.status, &b.status),
        SortKey::Node => compare_text(&a.node, &b.node),
        _ => numeric_value(a, key, metrics).total_cmp(&numeric_value(b, key, metrics)),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_ids(a: &GuestId, b: &GuestId) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.as_str().cmp(b.as_str()),
    }
}

fn numeric_value(g: &Guest, key: SortKey, metrics: &MetricsTable) -> f64 {
    match key {
        SortKey::Cpu => metric_value(MetricKind::Cpu, &g.vmid, metrics).unwrap_or(0.0),
        SortKey::Memory => metric_value(MetricKind::Memory, &g.vmid, metrics).unwrap_or(0.0),
        SortKey::Disk => metric_value(MetricKind::Disk, &g.vmid, metrics).unwrap_or(0.0),
        SortKey::Download => metrics.network.get(&g.vmid).map_or(0.0, |m| m.in_rate),
        SortKey::Upload => metrics.network.get(&g.vmid).map_or(0.0, |m| m.out_rate),
        SortKey::Uptime => g.uptime.unwrap_or(0) as f64,
        // Non-numeric keys never reach here.
        _ => 0.0,
    }
}
