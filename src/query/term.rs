//! Metric comparison expressions — `cpu>50`, `mem >= 80`, `network<10`.
//!
//! A whole search term can be a relational comparison against a live
//! resource metric. Both the tight (`cpu>50`) and spaced (`cpu > 50`)
//! surface syntaxes are accepted. An *incomplete* expression (operator
//! typed, number not yet — `cpu>`) is recognised separately so the caller
//! can keep every guest with data for that resource visible mid-typing.

use regex::Regex;
use std::sync::OnceLock;

/// Which resource a metric term refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MetricKind {
    Cpu,
    Memory,
    Disk,
    Network,
}

impl MetricKind {
    /// Map a resource keyword (including the `mem`/`net` short forms) to its
    /// kind. Returns `None` for anything else.
    pub(crate) fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "cpu" => Some(MetricKind::Cpu),
            "memory" | "mem" => Some(MetricKind::Memory),
            "disk" => Some(MetricKind::Disk),
            "network" | "net" => Some(MetricKind::Network),
            _ => None,
        }
    }
}

/// Relational operator in a metric expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CmpOp {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
}

impl CmpOp {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(CmpOp::Gt),
            "<" => Some(CmpOp::Lt),
            ">=" => Some(CmpOp::Ge),
            "<=" => Some(CmpOp::Le),
            "=" => Some(CmpOp::Eq),
            _ => None,
        }
    }

    pub(crate) fn eval(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CmpOp::Gt => lhs > rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Eq => lhs == rhs,
        }
    }
}

/// A parsed metric term. `Incomplete` carries no operator because the only
/// thing it can do is check for the presence of data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MetricExpr {
    Complete {
        kind: MetricKind,
        op: CmpOp,
        threshold: f64,
    },
    Incomplete {
        kind: MetricKind,
    },
}

// `>=`/`<=` must come before `>`/`<` in the alternation or the two-character
// operators never match.
fn complete_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(cpu|memory|mem|disk|network|net)\s*(>=|<=|>|<|=)\s*(\d+)$")
            .expect("metric expression pattern must compile")
    })
}

fn incomplete_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(cpu|memory|mem|disk|network|net)\s*(>=|<=|>|<|=)\s*$")
            .expect("incomplete metric expression pattern must compile")
    })
}

impl MetricExpr {
    /// Parse a whole term as a metric expression. Returns `None` when the
    /// term is not one (it then falls through to the other matching rules).
    pub(crate) fn parse(term: &str) -> Option<Self> {
        if let Some(caps) = complete_re().captures(term) {
            let kind = MetricKind::from_keyword(&caps[1])?;
            let op = CmpOp::from_symbol(&caps[2])?;
            // \d+ guarantees the literal parses.
            let threshold: f64 = caps[3].parse().ok()?;
            return Some(MetricExpr::Complete {
                kind,
                op,
                threshold,
            });
        }
        if let Some(caps) = incomplete_re().captures(term) {
            let kind = MetricKind::from_keyword(&caps[1])?;
            return Some(MetricExpr::Incomplete { kind });
        }
        None
    }
}
