// crates/arbiter-lineage/src/memory.rs
//
// InMemoryRegistry: a RegistryReader over a map held in memory.
//
// Used by the CLI (seeded from a JSON snapshot file) and by tests. The
// production registry lives outside this workspace and implements the same
// trait.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use arbiter_core::{ArbiterError, ArtifactId, RegistryEntry, RegistryReader};

/// Registry entries keyed by their derived artifact id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    entries: Arc<RwLock<HashMap<ArtifactId, RegistryEntry>>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from already-known entries.
    pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
        let map: HashMap<ArtifactId, RegistryEntry> =
            entries.into_iter().map(|e| (e.id(), e)).collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Load a registry snapshot: a JSON array of `RegistryEntry` objects.
    pub fn from_json_file(path: &Path) -> Result<Self, ArbiterError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ArbiterError::Io(format!("Failed to read registry {}: {}", path.display(), e))
        })?;
        let entries: Vec<RegistryEntry> = serde_json::from_str(&contents)?;
        tracing::info!(
            "Loaded {} registry entries from {}",
            entries.len(),
            path.display()
        );
        Ok(Self::from_entries(entries))
    }

    /// Insert or replace an entry under its derived id. Returns the id.
    pub async fn insert(&self, entry: RegistryEntry) -> ArtifactId {
        let id = entry.id();
        self.entries.write().await.insert(id.clone(), entry);
        id
    }

    /// Register a scored model at `url` with the given declared parents.
    pub async fn register(&self, url: &str, net_score: f64, parents: &[&str]) -> ArtifactId {
        self.insert(RegistryEntry::model(url, net_score, parents)).await
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RegistryReader for InMemoryRegistry {
    async fn lookup(&self, id: &ArtifactId) -> Result<Option<RegistryEntry>, ArbiterError> {
        Ok(self.entries.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_core::ArtifactCategory;
    use std::io::Write;

    #[tokio::test]
    async fn register_then_lookup() {
        let registry = InMemoryRegistry::new();
        let id = registry
            .register("https://huggingface.co/org/base", 0.8, &[])
            .await;

        let entry = registry.lookup(&id).await.unwrap().unwrap();
        assert_eq!(entry.name, "base");
        assert_eq!(entry.net_score, Some(0.8));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn bare_reference_finds_registered_url() {
        let registry = InMemoryRegistry::new();
        registry
            .register("https://huggingface.co/org/base", 0.8, &[])
            .await;

        let id = ArtifactId::derive(ArtifactCategory::Model, "org/base");
        assert!(registry.lookup(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let registry = InMemoryRegistry::new();
        let id = ArtifactId::derive(ArtifactCategory::Model, "org/missing");
        assert!(registry.lookup(&id).await.unwrap().is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn loads_json_snapshot() {
        let path = std::env::temp_dir().join(format!(
            "arbiter-registry-{}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[
                {{"name": "base", "url": "https://huggingface.co/org/base", "category": "MODEL", "net_score": 0.7}},
                {{"name": "tuned", "url": "https://huggingface.co/org/tuned", "category": "MODEL", "net_score": 0.9, "base_models": ["org/base"]}}
            ]"#
        )
        .unwrap();

        let registry = InMemoryRegistry::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(registry.len().await, 2);
        let tuned = ArtifactId::derive(ArtifactCategory::Model, "https://huggingface.co/org/tuned");
        let entry = registry.lookup(&tuned).await.unwrap().unwrap();
        assert_eq!(entry.base_models, vec!["org/base".to_string()]);
    }

    #[test]
    fn missing_snapshot_is_io_error() {
        let err = InMemoryRegistry::from_json_file(Path::new("/nonexistent/registry.json"))
            .unwrap_err();
        assert!(matches!(err, ArbiterError::Io(_)));
    }
}
