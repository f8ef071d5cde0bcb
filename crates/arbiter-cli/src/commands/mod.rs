// crates/arbiter-cli/src/commands/mod.rs
//
// Command module declarations for the arbiter CLI, plus the settings every
// command shares.

pub mod license;
pub mod lineage;
pub mod score;

use std::path::Path;
use std::sync::Arc;

use arbiter_core::RegistryReader;
use arbiter_lineage::InMemoryRegistry;

use crate::config::ArbiterConfig;
use crate::output::OutputFormat;

/// Resolved settings after applying command-line overrides to the config.
#[derive(Debug, Clone)]
pub struct Settings {
    pub format: OutputFormat,
    pub registry_path: Option<String>,
    pub lineage_max_depth: usize,
}

impl Settings {
    pub fn from_config(config: &ArbiterConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            format: config.output.parse()?,
            registry_path: config.registry_path(),
            lineage_max_depth: config.lineage_max_depth,
        })
    }

    /// Load the configured registry snapshot, if any.
    pub fn load_registry(&self) -> Result<Option<Arc<dyn RegistryReader>>, Box<dyn std::error::Error>> {
        match &self.registry_path {
            Some(path) => {
                let registry = InMemoryRegistry::from_json_file(Path::new(path))?;
                Ok(Some(Arc::new(registry)))
            }
            None => Ok(None),
        }
    }
}
