// crates/arbiter-metrics/src/size.rs
//
// Size metric: how well the artifact fits on each target device class.
//
// The byte footprint of the artifact's essential files is compared against
// each device's capacity through a logistic curve that stays near 1.0 for
// small ratios and falls off sharply past the midpoint. An unknown or zero
// footprint scores 0.0 on every device.

use arbiter_core::{
    round4, ArtifactCategory, ArtifactMetadata, DeviceClass, DeviceScores, MetricContext,
    MetricKind, MetricPlugin, MetricResult, RepoFile,
};
use async_trait::async_trait;

/// Steepness of the logistic curve.
pub const CURVE_K: f64 = 12.0;
/// Capacity ratio at which the score crosses 0.5.
pub const CURVE_MIDPOINT: f64 = 0.35;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

const WEIGHT_EXTENSIONS: [&str; 9] = [
    ".safetensors",
    ".bin",
    ".onnx",
    ".h5",
    ".msgpack",
    ".ot",
    ".gguf",
    ".pt",
    ".pth",
];

const DATA_EXTENSIONS: [&str; 8] = [
    ".parquet", ".csv", ".jsonl", ".json", ".tsv", ".gz", ".zip", ".arrow",
];

/// Repository bookkeeping files that never count toward a dataset.
const DATASET_SKIP: [&str; 3] = ["README.md", "LICENSE", ".gitattributes"];

/// Documentation and image files excluded from a code bundle.
const NON_ESSENTIAL_EXTENSIONS: [&str; 10] = [
    ".md", ".rst", ".txt", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".ico",
];

/// Bytes per parameter for a safetensors dtype tag; unknown dtypes count 0.
fn dtype_width(dtype: &str) -> u64 {
    match dtype.to_ascii_uppercase().as_str() {
        "F32" => 4,
        "F16" | "BF16" => 2,
        "I8" | "U8" => 1,
        _ => 0,
    }
}

fn has_extension(file: &RepoFile, extensions: &[&str]) -> bool {
    file.extension()
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Sum of known file sizes; `None` when the sum is zero.
fn sum_sizes<'a>(files: impl Iterator<Item = &'a RepoFile>) -> Option<u64> {
    let total = files
        .filter_map(RepoFile::effective_size)
        .fold(0u64, u64::saturating_add);
    (total > 0).then_some(total)
}

fn bytes_from_parameters(meta: &ArtifactMetadata) -> Option<u64> {
    let counts = meta.parameter_counts.as_ref()?;
    let total = counts
        .iter()
        .map(|(dtype, count)| count.saturating_mul(dtype_width(dtype)))
        .fold(0u64, u64::saturating_add);
    (total > 0).then_some(total)
}

fn bytes_from_weight_files(meta: &ArtifactMetadata) -> Option<u64> {
    sum_sizes(meta.files.iter().filter(|f| has_extension(f, &WEIGHT_EXTENSIONS)))
}

fn bytes_from_data_files(meta: &ArtifactMetadata) -> Option<u64> {
    sum_sizes(
        meta.files
            .iter()
            .filter(|f| !DATASET_SKIP.contains(&f.name.as_str()))
            .filter(|f| has_extension(f, &DATA_EXTENSIONS)),
    )
}

fn bytes_from_bundle(meta: &ArtifactMetadata) -> Option<u64> {
    sum_sizes(
        meta.files
            .iter()
            .filter(|f| !DATASET_SKIP.contains(&f.name.as_str()))
            .filter(|f| !f.name.starts_with("docs/"))
            .filter(|f| !has_extension(f, &NON_ESSENTIAL_EXTENSIONS)),
    )
}

/// Estimated byte footprint of the artifact's essential files.
///
/// Models try parameter counts, then weight files, then data files.
/// Datasets use data files. Code uses every file except documentation and
/// images.
pub fn estimate_footprint(meta: &ArtifactMetadata) -> Option<u64> {
    match meta.category {
        ArtifactCategory::Model => bytes_from_parameters(meta)
            .or_else(|| bytes_from_weight_files(meta))
            .or_else(|| bytes_from_data_files(meta)),
        ArtifactCategory::Dataset => bytes_from_data_files(meta),
        ArtifactCategory::Code => bytes_from_bundle(meta),
    }
}

/// `1 - 1 / (1 + e^(-k (ratio - n)))`, floored at 0.
pub fn device_score(footprint_gb: f64, capacity_gb: f64) -> f64 {
    let ratio = footprint_gb / capacity_gb;
    let score = 1.0 - 1.0 / (1.0 + (-CURVE_K * (ratio - CURVE_MIDPOINT)).exp());
    score.max(0.0)
}

/// Per-device scores for a footprint in bytes.
pub fn score_footprint(bytes: Option<u64>) -> DeviceScores {
    match bytes {
        Some(bytes) if bytes > 0 => {
            let gb = bytes as f64 / BYTES_PER_GB;
            DeviceScores::from_fn(|device: DeviceClass| {
                round4(device_score(gb, device.capacity_gb()))
            })
        }
        _ => DeviceScores::zeroed(),
    }
}

pub fn score_size(meta: &ArtifactMetadata) -> DeviceScores {
    let footprint = estimate_footprint(meta);
    match footprint {
        Some(bytes) => tracing::debug!(
            "Size footprint for {}: {} bytes ({:.4} GB)",
            meta.source_id,
            bytes,
            bytes as f64 / BYTES_PER_GB
        ),
        None => tracing::warn!(
            "Could not determine size for {}, scoring zero on every device",
            meta.source_id
        ),
    }
    score_footprint(footprint)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SizeMetric;

#[async_trait]
impl MetricPlugin for SizeMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Size
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::PerDevice(score_size(&ctx.metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn model() -> ArtifactMetadata {
        ArtifactMetadata::new("https://huggingface.co/org/m", ArtifactCategory::Model)
    }

    #[test]
    fn unknown_footprint_scores_zero_everywhere() {
        let scores = score_size(&model());
        assert_eq!(scores.len(), 4);
        assert!(scores.iter().all(|(_, s)| s == 0.0));
        assert_eq!(score_footprint(Some(0)), DeviceScores::zeroed());
    }

    #[test]
    fn tiny_footprint_scores_near_one() {
        let m = model().with_files(vec![RepoFile::new("model.safetensors", 10 * 1024 * 1024)]);
        let scores = score_size(&m);
        assert!(scores.iter().all(|(_, s)| s > 0.98));
    }

    #[test]
    fn midpoint_ratio_scores_half() {
        assert!((device_score(0.35 * 8.0, 8.0) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn larger_devices_score_higher() {
        let m = model().with_files(vec![RepoFile::new("model.gguf", 8 * 1024 * 1024 * 1024)]);
        let scores = score_size(&m);
        let pi = scores.get(DeviceClass::RaspberryPi).unwrap_or_default();
        let server = scores.get(DeviceClass::AwsServer).unwrap_or_default();
        assert!(pi < 0.1);
        assert!(server > 0.95);
    }

    #[test]
    fn parameter_counts_take_precedence() {
        let mut counts = BTreeMap::new();
        counts.insert("BF16".to_string(), 1_000);
        counts.insert("F32".to_string(), 10);
        let m = model()
            .with_parameter_counts(counts)
            .with_files(vec![RepoFile::new("model.bin", 999_999)]);
        assert_eq!(estimate_footprint(&m), Some(2_040));
    }

    #[test]
    fn lfs_size_is_used_when_size_missing() {
        let file = RepoFile {
            name: "data/train.parquet".to_string(),
            size: None,
            lfs_size: Some(512),
        };
        let m = ArtifactMetadata::new("org/d", ArtifactCategory::Dataset)
            .with_files(vec![file, RepoFile::new("README.md", 100)]);
        assert_eq!(estimate_footprint(&m), Some(512));
    }

    #[test]
    fn code_bundle_skips_docs_and_images() {
        let m = ArtifactMetadata::new("https://github.com/org/repo", ArtifactCategory::Code)
            .with_files(vec![
                RepoFile::new("src/main.py", 300),
                RepoFile::new("README.md", 5_000),
                RepoFile::new("assets/logo.png", 90_000),
                RepoFile::new("docs/guide.html", 700),
            ]);
        assert_eq!(estimate_footprint(&m), Some(300));
    }

    #[test]
    fn huge_parameter_counts_saturate_instead_of_overflowing() {
        let mut counts = BTreeMap::new();
        counts.insert("F32".to_string(), u64::MAX / 2);
        counts.insert("BF16".to_string(), u64::MAX / 2);
        let m = model().with_parameter_counts(counts);

        assert_eq!(estimate_footprint(&m), Some(u64::MAX));
        let scores = score_size(&m);
        assert!(scores.iter().all(|(_, s)| s == 0.0));
    }

    #[test]
    fn huge_file_sizes_saturate_instead_of_overflowing() {
        let m = model().with_files(vec![
            RepoFile::new("a.bin", u64::MAX),
            RepoFile::new("b.bin", 1),
        ]);
        assert_eq!(estimate_footprint(&m), Some(u64::MAX));
    }

    #[test]
    fn files_without_size_are_ignored() {
        let m = model().with_files(vec![
            RepoFile::without_size("model.safetensors"),
            RepoFile::new("model.bin", 2_048),
        ]);
        assert_eq!(estimate_footprint(&m), Some(2_048));

        let only_unsized = model().with_files(vec![RepoFile::without_size("model.safetensors")]);
        assert_eq!(estimate_footprint(&only_unsized), None);
    }
}
