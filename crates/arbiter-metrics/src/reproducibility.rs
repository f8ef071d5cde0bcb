// crates/arbiter-metrics/src/reproducibility.rs
//
// Reproducibility metric: can someone retrain this artifact from what the
// repository ships?
//
// Weighted sum of five components:
//   training code        0.25
//   config files         0.25
//   dataset docs         0.20
//   environment files    0.15
//   README instructions  0.15

use arbiter_core::{round4, ArtifactMetadata, MetricContext, MetricKind, MetricPlugin, MetricResult};
use async_trait::async_trait;

use crate::readme;

const W_TRAINING_CODE: f64 = 0.25;
const W_CONFIG: f64 = 0.25;
const W_DATASET: f64 = 0.20;
const W_ENVIRONMENT: f64 = 0.15;
const W_README: f64 = 0.15;

const TRAINING_INDICATORS: [&str; 4] = ["train", "training", "fine_tune", "finetune"];

const JSON_CONFIGS: [&str; 4] = [
    "config.json",
    "training_args.json",
    "trainer_config.json",
    "hyperparameters.json",
];

const ENVIRONMENT_FILES: [&str; 7] = [
    "requirements.txt",
    "environment.yml",
    "environment.yaml",
    "Pipfile",
    "pyproject.toml",
    "setup.py",
    "Dockerfile",
];

// Prefixes like "reproduc" and "fine-tun" cover their inflections.
const REPRODUCTION_KEYWORDS: [&str; 9] = [
    "reproduc",
    "training",
    "fine-tun",
    "hyperparameter",
    "random seed",
    "seed",
    "how to train",
    "training procedure",
    "training details",
];

fn training_code(meta: &ArtifactMetadata) -> f64 {
    let found = meta
        .file_names()
        .filter(|name| name.ends_with(".py"))
        .any(|name| readme::contains_any(&name.to_lowercase(), &TRAINING_INDICATORS));
    if found {
        1.0
    } else {
        0.0
    }
}

fn config_files(meta: &ArtifactMetadata) -> f64 {
    let json = meta.file_names().any(|name| JSON_CONFIGS.contains(&name));
    let yaml = meta
        .file_names()
        .any(|name| name.ends_with(".yaml") || name.ends_with(".yml"));
    match (json, yaml) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.7,
        (false, false) => 0.0,
    }
}

fn dataset_docs(meta: &ArtifactMetadata) -> f64 {
    if meta.declared_datasets().iter().any(|d| !d.is_empty()) {
        1.0
    } else {
        0.0
    }
}

fn environment_files(meta: &ArtifactMetadata) -> f64 {
    if meta.file_names().any(|name| ENVIRONMENT_FILES.contains(&name)) {
        1.0
    } else {
        0.0
    }
}

fn readme_instructions(text: &str) -> f64 {
    match readme::count_matches(&text.to_lowercase(), &REPRODUCTION_KEYWORDS) {
        0 => 0.0,
        1 | 2 => 0.4,
        3 | 4 => 0.7,
        _ => 1.0,
    }
}

pub fn score_reproducibility(meta: &ArtifactMetadata) -> f64 {
    let code = training_code(meta);
    let config = config_files(meta);
    let dataset = dataset_docs(meta);
    let env = environment_files(meta);
    let docs = readme_instructions(meta.readme_text());

    let score = code * W_TRAINING_CODE
        + config * W_CONFIG
        + dataset * W_DATASET
        + env * W_ENVIRONMENT
        + docs * W_README;

    tracing::debug!(
        "Reproducibility components for {}: code={:.2}, config={:.2}, dataset={:.2}, env={:.2}, readme={:.2}",
        meta.source_id,
        code,
        config,
        dataset,
        env,
        docs
    );
    round4(score.clamp(0.0, 1.0))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReproducibilityMetric;

#[async_trait]
impl MetricPlugin for ReproducibilityMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Reproducibility
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::scalar(score_reproducibility(&ctx.metadata))
    }
}
