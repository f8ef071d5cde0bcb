// crates/arbiter-core/src/registry.rs

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactCategory;
use crate::identity::ArtifactId;

/// What the engine can read back about a previously registered artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Human-readable name of the artifact.
    pub name: String,
    /// Source URL the artifact was registered from.
    pub url: String,
    /// Registered category.
    pub category: ArtifactCategory,
    /// Net score stored at registration; `None` for incomplete entries.
    #[serde(default)]
    pub net_score: Option<f64>,
    /// Declared parent references (`base_model`), in declaration order.
    #[serde(default)]
    pub base_models: Vec<String>,
}

impl RegistryEntry {
    /// A scored model entry with the given parents.
    pub fn model(url: impl Into<String>, net_score: f64, base_models: &[&str]) -> Self {
        let url = url.into();
        let name = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&url)
            .to_string();
        Self {
            name,
            url,
            category: ArtifactCategory::Model,
            net_score: Some(net_score),
            base_models: base_models.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Registry id this entry is stored under.
    pub fn id(&self) -> ArtifactId {
        ArtifactId::derive(self.category, &self.url)
    }
}
