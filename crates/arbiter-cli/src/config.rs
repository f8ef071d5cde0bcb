// crates/arbiter-cli/src/config.rs
//
// Runtime configuration for the arbiter CLI.
// Loaded from a TOML file or populated with sensible defaults; command-line
// flags override individual values.

use serde::Deserialize;
use std::fs;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArbiterConfig {
    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// JSON registry snapshot for lineage lookups. When absent, tree score
    /// runs without a registry and `lineage` is unavailable.
    #[serde(default)]
    pub registry_path: Option<String>,

    /// Output format: "table" or "json".
    #[serde(default = "default_output")]
    pub output: String,

    /// Depth limit for `arbiter lineage`.
    #[serde(default = "default_lineage_max_depth")]
    pub lineage_max_depth: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output() -> String {
    "table".to_string()
}

fn default_lineage_max_depth() -> usize {
    arbiter_lineage::graph::DEFAULT_MAX_DEPTH
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            registry_path: None,
            output: default_output(),
            lineage_max_depth: default_lineage_max_depth(),
        }
    }
}

impl ArbiterConfig {
    /// Load configuration from a TOML file at the given path (`~` allowed).
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: ArbiterConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Registry path with `~` expanded.
    pub fn registry_path(&self) -> Option<String> {
        self.registry_path.as_deref().map(expand_tilde)
    }
}

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.display(), &path[1..]);
        }
    }
    path.to_string()
}
