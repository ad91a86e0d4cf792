//! Configuration types for pulse.
//!
//! [`Config::load`] reads `~/.config/pulse/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[query]
default_sort      = "name"
default_direction = "asc"

[display]
show_node_names  = true
timestamp_format = "%Y-%m-%d %H:%M:%S"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from
/// `~/.config/pulse/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// `[query]` section of `config.toml` — defaults applied when the caller
/// does not specify a sort.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_sort")]
    pub default_sort: String,
    #[serde(default = "default_direction")]
    pub default_direction: String,
}

fn default_sort() -> String { "name".to_string() }
fn default_direction() -> String { "asc".to_string() }

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            default_direction: default_direction(),
        }
    }
}

/// `[display]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_show_node_names")]
    pub show_node_names: bool,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_show_node_names() -> bool { true }
fn default_timestamp_format() -> String { "%Y-%m-%d %H:%M:%S".to_string() }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_node_names: default_show_node_names(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/pulse/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not
    /// exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("pulse")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
