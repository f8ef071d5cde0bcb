// crates/arbiter-metrics/src/reviewedness.rs
//
// Reviewedness metric.
//
// Hubs expose no pull-request or review data, so review coverage is
// approximated by three proxies:
// - author diversity (40%): distinct commit authors
// - community engagement (30%): sigmoid over likes and downloads
// - publication evidence (30%): links to peer-reviewed venues in the README

use std::collections::HashSet;

use arbiter_core::{round4, ArtifactMetadata, MetricContext, MetricKind, MetricPlugin, MetricResult};
use async_trait::async_trait;

use crate::readme;

const W_AUTHORS: f64 = 0.40;
const W_ENGAGEMENT: f64 = 0.30;
const W_PUBLICATION: f64 = 0.30;

const PUBLICATION_INDICATORS: [&str; 14] = [
    "arxiv.org",
    "doi:",
    "doi.org",
    "proceedings",
    "conference",
    "journal",
    "acm.org",
    "ieee.org",
    "neurips",
    "icml",
    "iclr",
    "cvpr",
    "emnlp",
    "acl anthology",
];

/// Stepped score over the number of distinct commit authors.
pub fn author_diversity(meta: &ArtifactMetadata) -> f64 {
    let authors: HashSet<&str> = meta
        .commits
        .iter()
        .flatten()
        .flat_map(|c| c.authors.iter())
        .map(|a| a.as_str())
        .filter(|a| !a.is_empty())
        .collect();

    match authors.len() {
        0 | 1 => 0.0,
        2 => 0.3,
        3 | 4 => 0.6,
        _ => 1.0,
    }
}

/// `1 / (1 + e^-(likes/1000 + downloads/10000 - 3))`.
pub fn community_engagement(meta: &ArtifactMetadata) -> f64 {
    let usage = meta.usage.unwrap_or_default();
    let engagement = usage.likes as f64 / 1000.0 + usage.downloads as f64 / 10_000.0;
    (1.0 / (1.0 + (-engagement + 3.0).exp())).min(1.0)
}

fn publication_evidence(readme_text: &str) -> f64 {
    if readme::contains_any(&readme_text.to_lowercase(), &PUBLICATION_INDICATORS) {
        1.0
    } else {
        0.0
    }
}

pub fn score_reviewedness(meta: &ArtifactMetadata) -> f64 {
    let authors = author_diversity(meta);
    let engagement = community_engagement(meta);
    let publication = publication_evidence(meta.readme_text());

    let score = authors * W_AUTHORS + engagement * W_ENGAGEMENT + publication * W_PUBLICATION;
    tracing::debug!(
        "Reviewedness components for {}: authors={:.2}, engagement={:.2}, publication={:.2}",
        meta.source_id,
        authors,
        engagement,
        publication
    );
    round4(score.clamp(0.0, 1.0))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReviewednessMetric;

#[async_trait]
impl MetricPlugin for ReviewednessMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Reviewedness
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::scalar(score_reviewedness(&ctx.metadata))
    }
}
