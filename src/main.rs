use clap::Parser;
use pulse::query::{filter_and_sort, Direction, Query, Sort, SortKey, StatusFilter, TypeFilter};
use pulse_core::config::Config;
use pulse_core::{resolve_node_name, Snapshot};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pulse", about = "Pulse — query a Proxmox cluster snapshot")]
struct Cli {
    /// Path to a poller snapshot JSON file.
    #[arg(long)]
    snapshot: PathBuf,

    /// Search term, AND-combined with other --query flags. Repeatable.
    #[arg(long = "query", short = 'q')]
    query: Vec<String>,

    /// Sort specification: `key` or `key:direction` (e.g. `cpu:desc`).
    #[arg(long)]
    sort: Option<String>,

    /// Status filter: all, running, stopped.
    #[arg(long, default_value = "all")]
    status: String,

    /// Guest type filter: all, vm, lxc, ct.
    #[arg(long = "type", default_value = "all")]
    guest_type: String,

    /// Write debug logs to /tmp/pulse-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/pulse-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("pulse debug log started — tail -f /tmp/pulse-debug.log");
    }

    let config = Config::load()?;
    let snapshot = Snapshot::load(&cli.snapshot)?;

    let query = Query {
        sort: Some(parse_sort(cli.sort.as_deref(), &config)?),
        status: cli.status.parse::<StatusFilter>().map_err(anyhow::Error::msg)?,
        guest_type: cli
            .guest_type
            .parse::<TypeFilter>()
            .map_err(anyhow::Error::msg)?,
        terms: cli.query,
        ..Query::default()
    };

    let rows = filter_and_sort(&snapshot.guests, &query, &snapshot.metrics, &snapshot.nodes);

    println!(
        "snapshot from {} — {} of {} guests",
        snapshot
            .generated_at
            .format(&config.display.timestamp_format),
        rows.len(),
        snapshot.guests.len(),
    );
    println!(
        "{:>6}  {:<24} {:<5} {:<8} {:<12} {:<9} {:>6} {:>6} {:>6}",
        "VMID", "NAME", "TYPE", "STATUS", "NODE", "ROLE", "CPU%", "MEM%", "DISK%"
    );
    for g in &rows {
        let node = if config.display.show_node_names {
            resolve_node_name(&g.node, &snapshot.nodes)
        } else {
            &g.node
        };
        println!(
            "{:>6}  {:<24} {:<5} {:<8} {:<12} {:<9} {:>6} {:>6} {:>6}",
            g.vmid,
            g.name,
            g.guest_type,
            g.status,
            node,
            g.role(),
            percent(snapshot.metrics.cpu.get(&g.vmid).map(|m| m.usage * 100.0)),
            percent(snapshot.metrics.memory.get(&g.vmid).map(|m| m.usage_percent)),
            percent(snapshot.metrics.disk.get(&g.vmid).map(|m| m.usage_percent)),
        );
    }

    Ok(())
}

/// Parse `key` or `key:direction`, falling back to the configured defaults
/// when no --sort was given.
fn parse_sort(spec: Option<&str>, config: &Config) -> anyhow::Result<Sort> {
    let (key, direction) = match spec {
        Some(spec) => match spec.split_once(':') {
            Some((key, dir)) => (key.to_string(), dir.to_string()),
            None => (spec.to_string(), config.query.default_direction.clone()),
        },
        None => (
            config.query.default_sort.clone(),
            config.query.default_direction.clone(),
        ),
    };
    Ok(Sort {
        key: key.parse::<SortKey>().map_err(anyhow::Error::msg)?,
        direction: direction.parse::<Direction>().map_err(anyhow::Error::msg)?,
    })
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.0}"),
        None => "-".to_string(),
    }
}
