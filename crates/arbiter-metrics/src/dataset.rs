// crates/arbiter-metrics/src/dataset.rs
//
// Dataset-oriented metrics: whether training data and example code are
// available, and how well the training data is documented.

use arbiter_core::{ArtifactMetadata, MetricContext, MetricKind, MetricPlugin, MetricResult};
use async_trait::async_trait;

use crate::readme;

const EXAMPLE_KEYWORDS: [&str; 5] = [
    "example",
    "inference",
    "fine-tuning",
    "how to use",
    "notebook",
];

const QUALITY_KEYWORDS: [&str; 6] = ["size", "samples", "split", "features", "diversity", "source"];

/// +0.5 when a training dataset is named, +0.5 when example code exists.
pub fn score_dataset_and_code(meta: &ArtifactMetadata) -> f64 {
    let lower = meta.readme_text().to_lowercase();

    let dataset = readme::mentions_dataset(meta, &lower) || lower.contains("corpus");
    let code = readme::has_example_files(meta) || readme::contains_any(&lower, &EXAMPLE_KEYWORDS);

    let mut score = 0.0;
    if dataset {
        score += 0.5;
    }
    if code {
        score += 0.5;
    }
    score
}

/// Quality of the training-data documentation.
///
/// 0.0 when no dataset is named anywhere. Without a README the dataset
/// can only come from the card, which scores 0.5. Otherwise graded by how
/// many dataset-property keywords the README uses: two or more give 1.0,
/// one gives 0.75, none gives 0.5.
pub fn score_dataset_quality(meta: &ArtifactMetadata) -> f64 {
    let text = meta.readme_text();
    let lower = text.to_lowercase();

    if !readme::mentions_dataset(meta, &lower) {
        return 0.0;
    }
    if text.trim().is_empty() {
        return 0.5;
    }

    match readme::count_matches(&lower, &QUALITY_KEYWORDS) {
        0 => 0.5,
        1 => 0.75,
        _ => 1.0,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetAndCodeMetric;

#[async_trait]
impl MetricPlugin for DatasetAndCodeMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::DatasetAndCode
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::scalar(score_dataset_and_code(&ctx.metadata))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DatasetQualityMetric;

#[async_trait]
impl MetricPlugin for DatasetQualityMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::DatasetQuality
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::scalar(score_dataset_quality(&ctx.metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_core::{ArtifactCategory, RepoFile};
    use serde_json::json;

    fn meta() -> ArtifactMetadata {
        ArtifactMetadata::new("https://huggingface.co/org/m", ArtifactCategory::Model)
    }

    #[test]
    fn availability_counts_both_halves() {
        let m = meta()
            .with_card(json!({ "datasets": ["squad"] }))
            .with_files(vec![RepoFile::new("infer.py", 1)]);
        assert!((score_dataset_and_code(&m) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn availability_from_readme_alone() {
        let m = meta().with_readme("Trained on a large web corpus.");
        assert!((score_dataset_and_code(&m) - 0.5).abs() < 1e-10);

        let m = meta().with_readme("See the notebook for inference.");
        assert!((score_dataset_and_code(&m) - 0.5).abs() < 1e-10);

        assert_eq!(score_dataset_and_code(&meta()), 0.0);
    }

    #[test]
    fn quality_zero_without_dataset() {
        let m = meta().with_readme("## Usage\nnothing about data");
        assert_eq!(score_dataset_quality(&m), 0.0);
    }

    #[test]
    fn quality_declared_without_readme() {
        let m = meta().with_card(json!({ "datasets": "wikitext" }));
        assert!((score_dataset_quality(&m) - 0.5).abs() < 1e-10);

        let blank = meta()
            .with_card(json!({ "datasets": "wikitext" }))
            .with_readme("   \n");
        assert!((score_dataset_quality(&blank) - 0.5).abs() < 1e-10);

        assert_eq!(score_dataset_quality(&meta().with_readme("")), 0.0);
    }

    #[test]
    fn quality_graded_by_keywords() {
        let card = json!({ "datasets": ["squad"] });
        let none = meta().with_card(card.clone()).with_readme("We fine-tuned it.");
        let one = meta().with_card(card.clone()).with_readme("The train split was used.");
        let two = meta()
            .with_card(card)
            .with_readme("The train split has 80k samples.");
        assert!((score_dataset_quality(&none) - 0.5).abs() < 1e-10);
        assert!((score_dataset_quality(&one) - 0.75).abs() < 1e-10);
        assert!((score_dataset_quality(&two) - 1.0).abs() < 1e-10);
    }
}
