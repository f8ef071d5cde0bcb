// crates/arbiter-metrics/src/code_quality.rs
//
// Code-quality metric: documentation and code structure signals taken from
// the README and the repository file listing.

use arbiter_core::{ArtifactMetadata, MetricContext, MetricKind, MetricPlugin, MetricResult};
use async_trait::async_trait;

use crate::readme;

const DOC_KEYWORDS: [&str; 6] = [
    "usage",
    "installation",
    "how to use",
    "getting started",
    "example",
    "documentation",
];

const STYLE_FILES: [&str; 6] = [
    "pyproject.toml",
    "setup.cfg",
    ".flake8",
    ".editorconfig",
    ".isort.cfg",
    "tox.ini",
];

/// Tiered score:
///
/// | documented | code files | score |
/// |---|---|---|
/// | yes | yes | 1.0 with style config or snake_case modules, else 0.9 |
/// | yes | no | 0.75 |
/// | no | yes | 0.6 |
/// | no | no | 0.4 with any README, else 0.0 |
pub fn score_code_quality(meta: &ArtifactMetadata) -> f64 {
    let text = meta.readme_text();
    let documented = readme::contains_any(&text.to_lowercase(), &DOC_KEYWORDS);

    let has_code_files = readme::has_example_files(meta);
    let snake_case = meta
        .file_names()
        .any(|name| name.ends_with(".py") && name.contains('_'));
    let has_style_config = meta.file_names().any(|name| STYLE_FILES.contains(&name));

    match (documented, has_code_files) {
        (true, true) if has_style_config || snake_case => 1.0,
        (true, true) => 0.9,
        (true, false) => 0.75,
        (false, true) => 0.6,
        (false, false) if !text.is_empty() => 0.4,
        (false, false) => 0.0,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CodeQualityMetric;

#[async_trait]
impl MetricPlugin for CodeQualityMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::CodeQuality
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::scalar(score_code_quality(&ctx.metadata))
    }
}
