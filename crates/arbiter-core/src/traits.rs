// crates/arbiter-core/src/traits.rs

use std::sync::Arc;

use async_trait::async_trait;

use crate::artifact::ArtifactMetadata;
use crate::error::ArbiterError;
use crate::identity::ArtifactId;
use crate::metric::{MetricKind, MetricResult};
use crate::registry::RegistryEntry;

/// Read-only access to the external artifact registry.
///
/// Implemented by arbiter-lineage (in-memory and JSON snapshot readers) and
/// by whatever persistent store the surrounding system runs.
#[async_trait]
pub trait RegistryReader: Send + Sync {
    /// Look up a registered artifact by id. `Ok(None)` when not registered.
    async fn lookup(&self, id: &ArtifactId) -> Result<Option<RegistryEntry>, ArbiterError>;
}

/// Everything a metric plugin may read during one evaluation.
#[derive(Clone)]
pub struct MetricContext {
    /// The artifact under evaluation, shared read-only by all plugins.
    pub metadata: Arc<ArtifactMetadata>,
    /// Registry access; `None` outside a registry context.
    pub registry: Option<Arc<dyn RegistryReader>>,
}

impl MetricContext {
    pub fn new(metadata: ArtifactMetadata) -> Self {
        Self {
            metadata: Arc::new(metadata),
            registry: None,
        }
    }

    pub fn with_registry(mut self, registry: Arc<dyn RegistryReader>) -> Self {
        self.registry = Some(registry);
        self
    }
}

/// One independent quality sub-metric.
///
/// Implemented by arbiter-metrics and arbiter-lineage. `compute` must be
/// total: internal failures resolve to a safe default rather than escaping.
#[async_trait]
pub trait MetricPlugin: Send + Sync {
    /// Which metric this plugin produces.
    fn kind(&self) -> MetricKind;

    /// Result substituted by the orchestrator if `compute` never returns.
    fn default_result(&self) -> MetricResult {
        self.kind().default_result()
    }

    /// Score the artifact in `ctx`.
    async fn compute(&self, ctx: &MetricContext) -> MetricResult;
}
