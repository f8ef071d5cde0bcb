// crates/arbiter-metrics/src/bus_factor.rs
//
// Bus-factor metric: how concentrated commit ownership is.
//
// Score = 1 - Gini(commit counts per author). Even ownership scores 1.0;
// a repository carried by one author among many scores near 0.0.

use std::collections::HashMap;

use arbiter_core::{round4, ArtifactMetadata, CommitInfo, MetricContext, MetricKind, MetricPlugin, MetricResult};
use async_trait::async_trait;

/// Commits per lower-cased author. An author listed twice on the same
/// commit is counted once.
pub fn commit_counts_by_author(commits: &[CommitInfo]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for commit in commits {
        let mut names: Vec<String> = commit
            .authors
            .iter()
            .filter(|a| !a.is_empty())
            .map(|a| a.to_lowercase())
            .collect();
        names.sort();
        names.dedup();
        for name in names {
            *counts.entry(name).or_insert(0) += 1;
        }
    }
    counts
}

/// Gini coefficient of a count distribution.
///
/// Zero counts are ignored. Fewer than two contributors or a zero total
/// yield 0.0.
pub fn gini(counts: &[u64]) -> f64 {
    let mut values: Vec<u64> = counts.iter().copied().filter(|&c| c > 0).collect();
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }
    let total: u64 = values.iter().sum();
    if total == 0 {
        return 0.0;
    }
    values.sort_unstable();

    let weighted: f64 = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i + 1) as f64 * v as f64)
        .sum();
    let n = n as f64;
    (2.0 * weighted) / (n * total as f64) - (n + 1.0) / n
}

/// Score the artifact's commit history. Missing history scores 1.0.
pub fn score_bus_factor(meta: &ArtifactMetadata) -> f64 {
    let Some(commits) = meta.commits.as_deref() else {
        tracing::debug!("No commit history for {}, bus factor defaults to 1.0", meta.source_id);
        return 1.0;
    };

    let counts: Vec<u64> = commit_counts_by_author(commits).into_values().collect();
    let g = gini(&counts).clamp(0.0, 1.0);
    round4(1.0 - g)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BusFactorMetric;

#[async_trait]
impl MetricPlugin for BusFactorMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::BusFactor
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::scalar(score_bus_factor(&ctx.metadata))
    }
}
