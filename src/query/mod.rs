//! Query engine — filter and sort a set of guest records.
//!
//! One synchronous, pure pipeline over in-memory data:
//!
//! ```text
//! guests ──► type filter ──► status filter ──► search terms ──► metric
//! thresholds ──► stable sort ──► Vec<Guest>
//! ```
//!
//! Every stage is a no-op when its input is absent/`All`/empty. The engine
//! holds no state between calls: guests, nodes, and metrics are supplied
//! fresh on every invocation and never mutated.

mod blob;
mod matcher;
mod sort;
mod term;

pub use blob::searchable_blob;
pub use sort::{Direction, Sort, SortKey};

use matcher::SearchContext;
use pulse_core::{Guest, MetricsTable, Node};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Filter enums
// ---------------------------------------------------------------------------

/// Status filter: an explicit tri-state, never a nullable boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    RunningOnly,
    StoppedOnly,
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "running" => Ok(StatusFilter::RunningOnly),
            "stopped" => Ok(StatusFilter::StoppedOnly),
            other => Err(format!("unknown status filter: {other}")),
        }
    }
}

/// Guest type filter. `ct` is accepted as a synonym for `lxc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Vm,
    Lxc,
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "vm" | "qemu" => Ok(TypeFilter::Vm),
            "lxc" | "ct" | "container" => Ok(TypeFilter::Lxc),
            other => Err(format!("unknown guest type filter: {other}")),
        }
    }
}

/// Per-metric minimum thresholds (>= comparisons). cpu/memory/disk are
/// percentages; download/upload are bytes/sec against the per-direction
/// network rates. A guest with no data for a configured metric is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricThresholds {
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub disk: Option<f64>,
    pub download: Option<f64>,
    pub upload: Option<f64>,
}

impl MetricThresholds {
    fn is_empty(&self) -> bool {
        self.cpu.is_none()
            && self.memory.is_none()
            && self.disk.is_none()
            && self.download.is_none()
            && self.upload.is_none()
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Everything the caller wants applied to the guest list.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub sort: Option<Sort>,
    pub status: StatusFilter,
    pub guest_type: TypeFilter,
    pub thresholds: MetricThresholds,
    /// Free-form search terms, AND-combined.
    pub terms: Vec<String>,
    /// Optional extra term (e.g. the live text-input value), appended to
    /// `terms` if non-empty and not already present.
    pub extra_term: Option<String>,
}

impl Query {
    /// Deduplicated union of `terms` and `extra_term`, trimmed, preserving
    /// order. Blank terms are dropped here rather than matched as no-ops.
    fn effective_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = Vec::with_capacity(self.terms.len() + 1);
        for term in self
            .terms
            .iter()
            .map(String::as_str)
            .chain(self.extra_term.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        terms
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Filter and sort a guest list. Returns a fresh `Vec`; the inputs are
/// never mutated. An empty guest list short-circuits to an empty result.
pub fn filter_and_sort(
    guests: &[Guest],
    query: &Query,
    metrics: &MetricsTable,
    nodes: &[Node],
) -> Vec<Guest> {
    if guests.is_empty() {
        return Vec::new();
    }

    let terms = query.effective_terms();
    tracing::debug!(guests = guests.len(), terms = ?terms, "filtering guest list");

    let mut out: Vec<Guest> = guests
        .iter()
        .filter(|g| passes_type(g, query.guest_type))
        .filter(|g| passes_status(g, query.status))
        .filter(|g| {
            if terms.is_empty() {
                return true;
            }
            let ctx = SearchContext::new(g, metrics, nodes);
            terms.iter().all(|t| ctx.matches(t))
        })
        .filter(|g| passes_thresholds(g, &query.thresholds, metrics))
        .cloned()
        .collect();

    if let Some(sort) = &query.sort {
        sort::sort_guests(&mut out, sort, metrics);
    }
    out
}

/// Does one guest match a single raw term? Exposed for callers that match
/// incrementally (and for benchmarks).
pub fn guest_matches_term(
    guest: &Guest,
    term: &str,
    metrics: &MetricsTable,
    nodes: &[Node],
) -> bool {
    SearchContext::new(guest, metrics, nodes).matches(term)
}

fn passes_type(g: &Guest, filter: TypeFilter) -> bool {
    match filter {
        TypeFilter::All => true,
        TypeFilter::Vm => g.guest_type.is_vm(),
        TypeFilter::Lxc => !g.guest_type.is_vm(),
    }
}

fn passes_status(g: &Guest, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::RunningOnly => g.status.eq_ignore_ascii_case("running"),
        StatusFilter::StoppedOnly => g.status.eq_ignore_ascii_case("stopped"),
    }
}

fn passes_thresholds(g: &Guest, thresholds: &MetricThresholds, metrics: &MetricsTable) -> bool {
    if thresholds.is_empty() {
        return true;
    }
    let above = |value: Option<f64>, min: Option<f64>| match min {
        None => true,
        // Missing data fails closed.
        Some(min) => value.is_some_and(|v| v >= min),
    };
    above(
        matcher::metric_value(term::MetricKind::Cpu, &g.vmid, metrics),
        thresholds.cpu,
    ) && above(
        matcher::metric_value(term::MetricKind::Memory, &g.vmid, metrics),
        thresholds.memory,
    ) && above(
        matcher::metric_value(term::MetricKind::Disk, &g.vmid, metrics),
        thresholds.disk,
    ) && above(
        metrics.network.get(&g.vmid).map(|m| m.in_rate),
        thresholds.download,
    ) && above(
        metrics.network.get(&g.vmid).map(|m| m.out_rate),
        thresholds.upload,
    )
}
