// crates/arbiter-metrics/src/ramp_up.rs
//
// Ramp-up metric: how quickly a developer can get productive from the
// README alone.

use arbiter_core::{round4, ArtifactMetadata, MetricContext, MetricKind, MetricPlugin, MetricResult};
use async_trait::async_trait;

use crate::readme;

const INSTALL_KEYWORDS: [&str; 4] = ["install", "pip install", "setup", "requirements"];

const USAGE_KEYWORDS: [&str; 8] = [
    "quick start",
    "quickstart",
    "getting started",
    "get started",
    "usage",
    "how to use",
    "example",
    "basic usage",
];

/// READMEs shorter than this (trimmed) score zero.
const MIN_README_CHARS: usize = 50;

/// Additive README score, capped at 1.0:
/// - installation instructions: +0.3
/// - usage / quickstart section: +0.3
/// - code blocks: +0.25
/// - at least three section headers: +0.15 (at least one: +0.075)
/// - example scripts or notebooks in the repo: +0.1
pub fn score_ramp_up(meta: &ArtifactMetadata) -> f64 {
    let text = meta.readme_text();
    if text.trim().len() < MIN_README_CHARS {
        return 0.0;
    }
    let lower = text.to_lowercase();

    let mut score: f64 = 0.0;
    if readme::contains_any(&lower, &INSTALL_KEYWORDS) {
        score += 0.3;
    }
    if readme::contains_any(&lower, &USAGE_KEYWORDS) {
        score += 0.3;
    }
    if readme::has_code_blocks(text) {
        score += 0.25;
    }

    let headers = readme::header_count(text);
    if headers >= 3 {
        score += 0.15;
    } else if headers >= 1 {
        score += 0.075;
    }

    if readme::has_example_files(meta) {
        score += 0.1;
    }

    round4(score.min(1.0))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RampUpMetric;

#[async_trait]
impl MetricPlugin for RampUpMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::RampUp
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::scalar(score_ramp_up(&ctx.metadata))
    }
}
