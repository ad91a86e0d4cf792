//! Single-term matcher — the delicate part of the query engine.
//!
//! Terms are evaluated by a small recursive-descent walk with an explicit
//! ordered rule list, so the precedence stays auditable rule-by-rule:
//!
//! 1. empty term matches everything
//! 2. exact type aliases (`vm`, `virtual machine`, `ct`, `container`)
//! 3. `|` splits into OR branches (`|` binds looser than space)
//! 4. whole-term metric comparison (`cpu>50`, `mem >= 80`, incomplete `cpu>`)
//! 5. internal whitespace splits into AND sub-terms
//! 6. atomic terms: column-qualified `prefix:value`, bare resource keyword,
//!    single character, exact role shorthand, substring fallback
//!
//! The role shorthands (`pri`, `sec`, `primary`, …) are exact full-term
//! matches only. `pri` alone is the primary-role predicate and must never
//! degrade into a three-letter substring search (which would also match
//! "sprint-server"); a term like `pri-app` is not a recognised keyword and
//! falls through to the substring rule, which is how a guest named
//! "standalone-pri-app" stays reachable.

use crate::query::term::{MetricExpr, MetricKind};
use pulse_core::{resolve_node_name, Guest, GuestId, MetricsTable, Node, Role};

/// Bytes/sec to Mbps.
const MBPS_DIVISOR: f64 = 1024.0 * 1024.0 / 8.0;

/// Current value of a resource metric for one guest, in the units the query
/// language compares against: cpu as a 0–100 percentage (converted from the
/// stored 0–1 fraction exactly here), memory/disk as their stored
/// percentage, network as total Mbps. `None` means no data.
pub(crate) fn metric_value(kind: MetricKind, id: &GuestId, metrics: &MetricsTable) -> Option<f64> {
    match kind {
        MetricKind::Cpu => metrics.cpu.get(id).map(|m| m.usage * 100.0),
        MetricKind::Memory => metrics.memory.get(id).map(|m| m.usage_percent),
        MetricKind::Disk => metrics.disk.get(id).map(|m| m.usage_percent),
        MetricKind::Network => metrics
            .network
            .get(id)
            .map(|m| (m.in_rate + m.out_rate) / MBPS_DIVISOR),
    }
}

/// Per-guest matching context: the guest, its searchable blob, and the
/// lower-cased fields the column-qualified rules compare against. Built once
/// per guest per query, then reused for every term.
pub(crate) struct SearchContext<'a> {
    guest: &'a Guest,
    metrics: &'a MetricsTable,
    blob: String,
    name_lower: String,
    status_lower: String,
    node_lower: String,
    node_name_lower: String,
}

impl<'a> SearchContext<'a> {
    pub(crate) fn new(guest: &'a Guest, metrics: &'a MetricsTable, nodes: &[Node]) -> Self {
        let node_name = resolve_node_name(&guest.node, nodes);
        Self {
            guest,
            metrics,
            blob: super::blob::searchable_blob(guest, node_name),
            name_lower: guest.name.to_lowercase(),
            status_lower: guest.status.to_lowercase(),
            node_lower: guest.node.to_lowercase(),
            node_name_lower: node_name.to_lowercase(),
        }
    }

    /// Does this guest match one raw term? Case-insensitive, trimmed.
    pub(crate) fn matches(&self, term: &str) -> bool {
        self.eval(&term.to_lowercase())
    }

    fn eval(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }

        // Exact type aliases short-circuit before substring search, so
        // "container" cannot accidentally substring-match unrelated text.
        // `virtual machine` must also win before the whitespace-AND split.
        match term {
            "ct" | "container" => return !self.guest.guest_type.is_vm(),
            "vm" | "virtual machine" => return self.guest.guest_type.is_vm(),
            _ => {}
        }

        // OR before AND: `|` binds looser than space. Each branch re-enters
        // the whole chain.
        if term.contains('|') {
            return term.split('|').any(|branch| self.eval(branch));
        }

        // A spaced comparison like `cpu > 50` is one expression, not an AND
        // of three sub-terms, so it must be recognised before the split.
        if let Some(expr) = MetricExpr::parse(term) {
            return self.eval_metric_expr(expr);
        }

        if term.split_whitespace().nth(1).is_some() {
            return term.split_whitespace().all(|sub| self.eval(sub));
        }

        self.atom(term)
    }

    fn eval_metric_expr(&self, expr: MetricExpr) -> bool {
        match expr {
            MetricExpr::Complete {
                kind,
                op,
                threshold,
            } => self
                .metric(kind)
                .is_some_and(|value| op.eval(value, threshold)),
            // Operator typed, number not yet: keep every guest that has
            // data for the resource so the table does not blank mid-typing.
            MetricExpr::Incomplete { kind } => self.metric(kind).is_some(),
        }
    }

    /// A term with no `|`, no whitespace, and no operator.
    fn atom(&self, term: &str) -> bool {
        if let Some((prefix, value)) = term.split_once(':') {
            return self.column(prefix, value.trim());
        }

        // Bare resource keyword: typing `cpu` must not filter out rows.
        if MetricKind::from_keyword(term).is_some() {
            return true;
        }

        // Single character: a digit is an id-prefix filter, a letter is a
        // broad contains-this-letter test against the blob.
        let mut chars = term.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_digit() {
                return self.guest.vmid.as_str().starts_with(c);
            }
            return self.blob.contains(c);
        }

        // Role shorthands are exact full-term matches only; anything else
        // falls through to the substring rule.
        match term {
            "role" | "shared" => self.guest.shared,
            "primary" | "pri" => self.guest.role() == Role::Primary,
            "secondary" | "sec" => self.guest.role() == Role::Secondary,
            _ => self.blob.contains(term),
        }
    }

    /// Column-qualified term `prefix:value`. `value` is already trimmed.
    fn column(&self, prefix: &str, value: &str) -> bool {
        // Empty value: `role:` while still typing must not drop every row.
        if value.is_empty() {
            return true;
        }

        // Metric prefixes compare with >= against the current value; a
        // non-numeric literal matches nothing.
        if let Some(kind) = MetricKind::from_keyword(prefix) {
            return match value.parse::<f64>() {
                Ok(threshold) => self.metric(kind).is_some_and(|v| v >= threshold),
                Err(_) => false,
            };
        }

        match prefix {
            "name" => self.name_lower.contains(value),
            "id" => self.guest.vmid.as_str().contains(value),
            "status" => self.status_lower.contains(value),
            "node" => {
                self.node_lower.contains(value) || self.node_name_lower.contains(value)
            }
            "type" => match value {
                "qemu" => self.guest.guest_type.is_vm(),
                "lxc" => !self.guest.guest_type.is_vm(),
                _ => self.blob.contains(value),
            },
            "role" => match value {
                "p" | "pri" | "primary" => self.guest.role() == Role::Primary,
                "s" | "sec" | "secondary" => self.guest.role() == Role::Secondary,
                "-" | "none" => !self.guest.shared,
                "shared" => self.guest.shared,
                _ => self.blob.contains(value),
            },
            // Unknown prefix: search the blob for the value alone.
            _ => self.blob.contains(value),
        }
    }

    fn metric(&self, kind: MetricKind) -> Option<f64> {
        metric_value(kind, &self.guest.vmid, self.metrics)
    }
}
