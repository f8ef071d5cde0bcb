// crates/arbiter-metrics/src/perf_claims.rs
//
// Performance-claims metric: does the artifact back its quality with
// benchmark numbers?
//
// 1.0 for concrete results (a results table or several numbers next to a
// named metric, or structured evaluation data in the card), 0.5 for vague
// claims, 0.0 for none.

use std::sync::OnceLock;

use arbiter_core::{ArtifactMetadata, MetricContext, MetricKind, MetricPlugin, MetricResult};
use async_trait::async_trait;
use regex::Regex;

use crate::readme;

const METRIC_KEYWORDS: [&str; 24] = [
    "accuracy",
    "f1",
    "f1-score",
    "precision",
    "recall",
    "bleu",
    "rouge",
    "cer",
    "wer",
    "latency",
    "throughput",
    "ms",
    "fps",
    "samples/s",
    "glue",
    "squad",
    "mmlu",
    "hellaswag",
    "perplexity",
    "loss",
    "auc",
    "mae",
    "rmse",
    "map",
];

const CLAIM_KEYWORDS: [&str; 7] = [
    "benchmark",
    "evaluation",
    "results",
    "sota",
    "state-of-the-art",
    "compare",
    "comparison",
];

/// Card keys that carry structured evaluation results.
const CARD_RESULT_KEYS: [&str; 3] = ["metrics", "evaluation", "results"];

static NUMBER: OnceLock<Regex> = OnceLock::new();

fn number_pattern() -> &'static Regex {
    NUMBER.get_or_init(|| Regex::new(r"\b\d{1,3}(?:\.\d+)?%?\b").expect("valid number regex"))
}

fn has_markdown_table(text: &str) -> bool {
    text.contains('|') && text.contains("---")
}

pub fn score_perf_claims(meta: &ArtifactMetadata) -> f64 {
    let text = meta.readme_text().to_lowercase();

    let names_metric = readme::contains_any(&text, &METRIC_KEYWORDS);
    let numbers = number_pattern().find_iter(&text).count();
    let structured = has_markdown_table(&text) || (names_metric && numbers >= 2);
    let card_results = CARD_RESULT_KEYS.iter().any(|key| meta.card_has(key));

    if (structured && names_metric) || card_results {
        1.0
    } else if readme::contains_any(&text, &CLAIM_KEYWORDS) {
        0.5
    } else {
        0.0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PerformanceClaimsMetric;

#[async_trait]
impl MetricPlugin for PerformanceClaimsMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::PerformanceClaims
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::scalar(score_perf_claims(&ctx.metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_core::ArtifactCategory;
    use serde_json::json;

    fn meta() -> ArtifactMetadata {
        ArtifactMetadata::new("https://huggingface.co/org/m", ArtifactCategory::Model)
    }

    #[test]
    fn results_table_is_strong() {
        let m = meta().with_readme("| task | accuracy |\n|---|---|\n| sst2 | 91.2 |\n");
        assert!((score_perf_claims(&m) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn numbers_next_to_metric_are_strong() {
        let m = meta().with_readme("Reaches 88.1 accuracy and 0.91 recall on the test set.");
        assert!((score_perf_claims(&m) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn card_results_are_strong() {
        let m = meta().with_card(json!({ "metrics": ["accuracy"] }));
        assert!((score_perf_claims(&m) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn vague_claim_is_medium() {
        let m = meta().with_readme("Achieves state-of-the-art quality.");
        assert!((score_perf_claims(&m) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn nothing_scores_zero() {
        let m = meta().with_readme("A tokenizer.");
        assert_eq!(score_perf_claims(&m), 0.0);
    }
}
