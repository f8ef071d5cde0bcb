// crates/arbiter-lineage/src/tree_score.rs
//
// Tree-Score: quality of an artifact's declared ancestry.
//
// Policy:
//   - no declared parent                      -> 1.0
//   - parents declared, none resolvable       -> 0.25
//   - some parents resolvable                 -> mean over resolved parents
//   - no registry access at all               -> 0.5
//
// A resolved parent's score is the mean of its stored net score and the
// recursively resolved scores of its own parents. Recursion stops after
// three hops; a reference already on the current path is treated as
// unresolvable for that branch. Every call to `score` gets its own memo
// cache, so concurrent evaluations never share state.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use arbiter_core::{
    clamp_unit, round4, ArtifactCategory, ArtifactId, ArtifactMetadata, MetricContext, MetricKind,
    MetricPlugin, MetricResult, RegistryReader,
};

/// Maximum number of hops followed from the evaluated artifact.
pub const MAX_DEPTH: usize = 3;

/// Score when the artifact declares no parents.
pub const NO_PARENTS_SCORE: f64 = 1.0;

/// Score when parents are declared but none resolve.
pub const UNRESOLVED_SCORE: f64 = 0.25;

/// Score when no registry is available.
pub const NO_REGISTRY_SCORE: f64 = 0.5;

type ScoreFuture<'a> = Pin<Box<dyn Future<Output = Option<f64>> + Send + 'a>>;

/// Resolves tree scores against one registry.
#[derive(Clone)]
pub struct TreeScoreResolver {
    registry: Arc<dyn RegistryReader>,
    max_depth: usize,
}

impl TreeScoreResolver {
    pub fn new(registry: Arc<dyn RegistryReader>) -> Self {
        Self {
            registry,
            max_depth: MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Tree score for an artifact declaring `parents`.
    pub async fn score(&self, parents: &[String]) -> f64 {
        if parents.is_empty() {
            tracing::debug!("No declared parents, tree score is {}", NO_PARENTS_SCORE);
            return NO_PARENTS_SCORE;
        }

        let mut walk = Walk {
            registry: self.registry.as_ref(),
            max_depth: self.max_depth,
            cache: HashMap::new(),
        };

        let mut resolved = Vec::with_capacity(parents.len());
        for parent in parents {
            if let Some(score) = walk.parent_score(parent.clone(), 0, Vec::new()).await {
                resolved.push(score);
            }
        }

        if resolved.is_empty() {
            tracing::warn!(
                "Declared parents {:?} not found in registry, tree score is {}",
                parents,
                UNRESOLVED_SCORE
            );
            return UNRESOLVED_SCORE;
        }

        let mean = resolved.iter().sum::<f64>() / resolved.len() as f64;
        tracing::debug!(
            "Tree score over {} resolved parent(s): {:.4}",
            resolved.len(),
            mean
        );
        round4(clamp_unit(mean))
    }
}

/// State of one top-level resolution.
struct Walk<'r> {
    registry: &'r dyn RegistryReader,
    max_depth: usize,
    /// Successfully resolved parents, keyed by derived id so that different
    /// spellings of one reference share an entry. Misses are not cached: a
    /// parent cut off by the path check in one branch may resolve in another.
    cache: HashMap<ArtifactId, f64>,
}

impl<'r> Walk<'r> {
    /// Score of `reference` averaged with its resolvable ancestors, or
    /// `None` when it cannot be resolved on this branch.
    ///
    /// `path` holds the ids already on the current branch; each recursive
    /// call gets its own copy.
    fn parent_score<'a>(
        &'a mut self,
        reference: String,
        depth: usize,
        path: Vec<ArtifactId>,
    ) -> ScoreFuture<'a> {
        Box::pin(async move {
            let id = ArtifactId::derive(ArtifactCategory::Model, &reference);
            if let Some(&cached) = self.cache.get(&id) {
                tracing::debug!("Tree score cache hit for {}", reference);
                return Some(cached);
            }
            if depth >= self.max_depth {
                tracing::debug!("Max depth {} reached at {}", self.max_depth, reference);
                return None;
            }
            if path.contains(&id) {
                tracing::warn!("Circular lineage detected at {}", reference);
                return None;
            }

            let entry = match self.registry.lookup(&id).await {
                Ok(Some(entry)) => entry,
                Ok(None) => {
                    tracing::debug!("Parent {} not found in registry", reference);
                    return None;
                }
                Err(e) => {
                    tracing::warn!("Registry lookup for {} failed: {}", reference, e);
                    return None;
                }
            };
            let Some(net_score) = entry.net_score else {
                tracing::warn!("Parent {} is registered without a net score", reference);
                return None;
            };

            let mut branch = path;
            branch.push(id.clone());

            let mut scores = vec![clamp_unit(net_score)];
            for ancestor in &entry.base_models {
                if let Some(score) = self
                    .parent_score(ancestor.clone(), depth + 1, branch.clone())
                    .await
                {
                    scores.push(score);
                }
            }

            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            tracing::debug!(
                "Parent {}: net={:.4}, ancestors={}, mean={:.4}",
                reference,
                net_score,
                scores.len() - 1,
                mean
            );
            self.cache.insert(id, mean);
            Some(mean)
        })
    }
}

/// Tree score of `meta`, or the neutral default without a registry.
pub async fn tree_score(meta: &ArtifactMetadata, registry: Option<Arc<dyn RegistryReader>>) -> f64 {
    match registry {
        Some(registry) => {
            TreeScoreResolver::new(registry)
                .score(&meta.declared_parents())
                .await
        }
        None => {
            tracing::warn!(
                "No registry available for {}, tree score is {}",
                meta.source_id,
                NO_REGISTRY_SCORE
            );
            NO_REGISTRY_SCORE
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TreeScoreMetric;

#[async_trait]
impl MetricPlugin for TreeScoreMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::TreeScore
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::scalar(tree_score(&ctx.metadata, ctx.registry.clone()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRegistry;
    use arbiter_core::{ArbiterError, RegistryEntry};
    use serde_json::json;
    use std::sync::Mutex;

    fn child(parents: serde_json::Value) -> ArtifactMetadata {
        ArtifactMetadata::new("https://huggingface.co/org/child", ArtifactCategory::Model)
            .with_card(json!({ "base_model": parents }))
    }

    fn shared(registry: InMemoryRegistry) -> Option<Arc<dyn RegistryReader>> {
        Some(Arc::new(registry))
    }

    #[tokio::test]
    async fn no_registry_is_neutral() {
        let score = tree_score(&child(json!("org/base")), None).await;
        assert!((score - NO_REGISTRY_SCORE).abs() < 1e-10);
    }

    #[tokio::test]
    async fn no_parents_scores_one() {
        let meta = ArtifactMetadata::new("https://huggingface.co/org/scratch", ArtifactCategory::Model);
        let score = tree_score(&meta, shared(InMemoryRegistry::new())).await;
        assert!((score - 1.0).abs() < 1e-10);
    }

    #[tokio::test]
    async fn unregistered_parent_scores_quarter() {
        let score = tree_score(&child(json!("org/unknown")), shared(InMemoryRegistry::new())).await;
        assert!((score - 0.25).abs() < 1e-10);
    }

    #[tokio::test]
    async fn parent_without_net_score_is_unresolved() {
        let registry = InMemoryRegistry::new();
        let mut entry = RegistryEntry::model("https://huggingface.co/org/base", 0.0, &[]);
        entry.net_score = None;
        registry.insert(entry).await;

        let score = tree_score(&child(json!("org/base")), shared(registry)).await;
        assert!((score - 0.25).abs() < 1e-10);
    }

    #[tokio::test]
    async fn single_parent_uses_its_net_score() {
        let registry = InMemoryRegistry::new();
        registry
            .register("https://huggingface.co/org/base", 0.8, &[])
            .await;

        let score = tree_score(&child(json!("org/base")), shared(registry)).await;
        assert!((score - 0.8).abs() < 1e-10);
    }

    #[tokio::test]
    async fn ancestors_are_averaged_into_parent() {
        let registry = InMemoryRegistry::new();
        registry
            .register("https://huggingface.co/org/grandparent", 0.4, &[])
            .await;
        registry
            .register("https://huggingface.co/org/parent", 0.8, &["org/grandparent"])
            .await;

        // parent = mean(0.8, 0.4)
        let score = tree_score(&child(json!("org/parent")), shared(registry)).await;
        assert!((score - 0.6).abs() < 1e-10);
    }

    #[tokio::test]
    async fn merged_parents_are_averaged_and_misses_ignored() {
        let registry = InMemoryRegistry::new();
        registry.register("https://huggingface.co/org/a", 0.9, &[]).await;
        registry.register("https://huggingface.co/org/b", 0.5, &[]).await;

        let meta = child(json!(["org/a", "org/b", "org/missing"]));
        let score = tree_score(&meta, shared(registry)).await;
        assert!((score - 0.7).abs() < 1e-10);
    }

    #[tokio::test]
    async fn cycle_terminates_within_bounds() {
        let registry = InMemoryRegistry::new();
        registry
            .register("https://huggingface.co/org/a", 0.6, &["org/b"])
            .await;
        registry
            .register("https://huggingface.co/org/b", 0.2, &["org/a"])
            .await;

        let meta = ArtifactMetadata::new("https://huggingface.co/org/a", ArtifactCategory::Model)
            .with_card(json!({ "base_model": "org/b" }));
        let score = tree_score(&meta, shared(registry)).await;

        // b -> a -> (b is on the path): a = 0.6, b = mean(0.2, 0.6)
        assert!((0.0..=1.0).contains(&score));
        assert!((score - 0.4).abs() < 1e-10);
    }

    #[tokio::test]
    async fn depth_is_bounded_at_three_hops() {
        let registry = InMemoryRegistry::new();
        registry.register("https://huggingface.co/org/l3", 0.0, &[]).await;
        registry.register("https://huggingface.co/org/l2", 1.0, &["org/l3"]).await;
        registry.register("https://huggingface.co/org/l1", 1.0, &["org/l2"]).await;
        registry.register("https://huggingface.co/org/l0", 1.0, &["org/l1"]).await;

        // l0 (depth 0), l1 (1), l2 (2); l3 would be depth 3 and is cut off.
        let score = tree_score(&child(json!("org/l0")), shared(registry)).await;
        assert!((score - 1.0).abs() < 1e-10);
    }

    struct FailingRegistry;

    #[async_trait]
    impl RegistryReader for FailingRegistry {
        async fn lookup(&self, _id: &ArtifactId) -> Result<Option<RegistryEntry>, ArbiterError> {
            Err(ArbiterError::Registry("unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn registry_errors_count_as_misses() {
        let score = tree_score(&child(json!("org/base")), Some(Arc::new(FailingRegistry))).await;
        assert!((score - 0.25).abs() < 1e-10);
    }

    #[tokio::test]
    async fn plugin_reads_registry_from_context() {
        let registry = InMemoryRegistry::new();
        registry
            .register("https://huggingface.co/org/base", 0.8, &[])
            .await;
        let ctx = MetricContext::new(child(json!("org/base"))).with_registry(Arc::new(registry));

        let result = TreeScoreMetric.compute(&ctx).await;
        assert_eq!(result, MetricResult::Scalar(0.8));
    }

    #[tokio::test]
    async fn cycle_is_detected_across_reference_spellings() {
        let registry = InMemoryRegistry::new();
        registry
            .register("https://huggingface.co/org/a", 0.6, &["org/b"])
            .await;
        registry
            .register("https://huggingface.co/org/b", 0.2, &["https://huggingface.co/org/a/"])
            .await;
        let counting = Arc::new(CountingRegistry::new(registry));

        let score = tree_score(&child(json!("org/a")), Some(counting.clone())).await;

        // a -> b -> a (same id, different spelling): b = 0.2, a = mean(0.6, 0.2)
        assert!((score - 0.4).abs() < 1e-10);
        assert_eq!(counting.total(), 2);
    }

    /// Registry wrapper recording how often each id is looked up.
    struct CountingRegistry {
        inner: InMemoryRegistry,
        lookups: Mutex<HashMap<ArtifactId, usize>>,
    }

    impl CountingRegistry {
        fn new(inner: InMemoryRegistry) -> Self {
            Self {
                inner,
                lookups: Mutex::new(HashMap::new()),
            }
        }

        fn count(&self, reference: &str) -> usize {
            let id = ArtifactId::derive(ArtifactCategory::Model, reference);
            self.lookups.lock().unwrap().get(&id).copied().unwrap_or(0)
        }

        fn total(&self) -> usize {
            self.lookups.lock().unwrap().values().sum()
        }
    }

    #[async_trait]
    impl RegistryReader for CountingRegistry {
        async fn lookup(&self, id: &ArtifactId) -> Result<Option<RegistryEntry>, ArbiterError> {
            *self.lookups.lock().unwrap().entry(id.clone()).or_insert(0) += 1;
            self.inner.lookup(id).await
        }
    }

    #[tokio::test]
    async fn shared_ancestor_is_resolved_once_per_call() {
        let registry = InMemoryRegistry::new();
        registry.register("https://huggingface.co/org/g", 0.4, &[]).await;
        registry.register("https://huggingface.co/org/p1", 0.8, &["org/g"]).await;
        registry.register("https://huggingface.co/org/p2", 1.0, &["org/g"]).await;
        let counting = Arc::new(CountingRegistry::new(registry));
        let meta = child(json!(["org/p1", "org/p2"]));

        // p1 = mean(0.8, 0.4) = 0.6, p2 = mean(1.0, 0.4) = 0.7
        let score = tree_score(&meta, Some(counting.clone())).await;
        assert!((score - 0.65).abs() < 1e-10);
        assert_eq!(counting.count("org/g"), 1);
        assert_eq!(counting.count("org/p1"), 1);
        assert_eq!(counting.count("org/p2"), 1);

        // A second evaluation starts with an empty cache.
        let again = tree_score(&meta, Some(counting.clone())).await;
        assert!((again - 0.65).abs() < 1e-10);
        assert_eq!(counting.count("org/g"), 2);
    }
}
