// crates/arbiter-engine/src/lib.rs
//
// arbiter-engine: the `evaluate` call boundary of the Arbiter artifact
// trust engine.
//
// One evaluation validates the metadata, fans out to every registered
// metric plugin (orchestrator), and folds the resulting ScoreReport into a
// single net score (net_score). The only error surfaced to callers is
// `ArbiterError::InvalidMetadata`; every other failure degrades into a
// conservative default inside the report.

pub mod net_score;
pub mod orchestrator;
pub mod plugins;

use std::sync::Arc;

use chrono::Utc;

use arbiter_core::{
    ArbiterError, ArtifactMetadata, Evaluation, MetricContext, MetricKind, MetricPlugin,
    RegistryReader,
};

pub use net_score::aggregate;
pub use orchestrator::run_plugins;
pub use plugins::standard_plugins;

/// A fixed set of metric plugins.
#[derive(Clone)]
pub struct Engine {
    plugins: Vec<Arc<dyn MetricPlugin>>,
}

impl Engine {
    /// Engine with the eleven standard plugins.
    pub fn standard() -> Self {
        Self::with_plugins(standard_plugins())
    }

    /// Engine with a custom plugin set.
    pub fn with_plugins(plugins: Vec<Arc<dyn MetricPlugin>>) -> Self {
        Self { plugins }
    }

    /// Metric kinds this engine reports.
    pub fn kinds(&self) -> Vec<MetricKind> {
        self.plugins.iter().map(|p| p.kind()).collect()
    }

    /// Score one artifact.
    ///
    /// `registry` gives the tree-score plugin access to previously scored
    /// ancestors; without it tree score falls back to its neutral default.
    pub async fn evaluate(
        &self,
        metadata: ArtifactMetadata,
        registry: Option<Arc<dyn RegistryReader>>,
    ) -> Result<Evaluation, ArbiterError> {
        metadata.validate()?;

        let source_id = metadata.source_id.clone();
        let category = metadata.category;
        tracing::info!("Evaluating {} ({})", source_id, category);

        let mut ctx = MetricContext::new(metadata);
        if let Some(registry) = registry {
            ctx = ctx.with_registry(registry);
        }

        let report = run_plugins(&self.plugins, &ctx).await;
        let net_score = aggregate(&report);
        tracing::info!(
            "Evaluated {}: net score {:.4} ({} metrics)",
            source_id,
            net_score.value,
            report.len()
        );

        Ok(Evaluation {
            source_id,
            category,
            net_score,
            report,
            evaluated_at: Utc::now(),
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Score one artifact with the standard plugin set.
pub async fn evaluate(
    metadata: ArtifactMetadata,
    registry: Option<Arc<dyn RegistryReader>>,
) -> Result<Evaluation, ArbiterError> {
    Engine::standard().evaluate(metadata, registry).await
}
