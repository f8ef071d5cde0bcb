// crates/arbiter-metrics/src/license.rs
//
// License metric: compatibility of the artifact's license with LGPL-2.1.
//
// 1.0 clearly compatible, 0.0 clearly incompatible, 0.5 unclear. The net
// score multiplies by this value, so "unclear" halves the final score and
// "incompatible" vetoes it.

use arbiter_core::{ArtifactMetadata, MetricContext, MetricKind, MetricPlugin, MetricResult};
use async_trait::async_trait;

use crate::readme;

/// Score for a license that cannot be classified.
pub const UNCLEAR: f64 = 0.5;

const COMPATIBLE: [&str; 7] = [
    "mit",
    "apache-2.0",
    "bsd-3-clause",
    "bsd-2-clause",
    "lgpl-2.1",
    "epl-2.0",
    "mpl-2.0",
];

const INCOMPATIBLE: [&str; 3] = ["gpl-3.0", "agpl-3.0", "cc-by-nc"];

/// Find the license text: the card field first, else the README section.
fn license_text(meta: &ArtifactMetadata) -> Option<String> {
    if let Some(declared) = meta.declared_license() {
        return Some(declared.to_lowercase());
    }
    readme::license_section(meta.readme_text())
}

/// Classify a lower-cased license string.
///
/// Incompatible ids win when a text names both kinds.
pub fn classify_license(license: &str) -> f64 {
    if readme::contains_any(license, &INCOMPATIBLE) {
        return 0.0;
    }
    if readme::contains_any(license, &COMPATIBLE) {
        return 1.0;
    }
    UNCLEAR
}

/// Score the artifact's license.
pub fn score_license(meta: &ArtifactMetadata) -> f64 {
    match license_text(meta) {
        Some(text) if !text.trim().is_empty() => classify_license(&text),
        _ => UNCLEAR,
    }
}

/// Plugin wrapper for [`score_license`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LicenseMetric;

#[async_trait]
impl MetricPlugin for LicenseMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::License
    }

    async fn compute(&self, ctx: &MetricContext) -> MetricResult {
        MetricResult::scalar(score_license(&ctx.metadata))
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
    fn card_license_mit_is_compatible() {
        let m = meta().with_card(json!({ "license": "MIT" }));
        assert!((score_license(&m) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn gpl3_is_incompatible() {
        let m = meta().with_card(json!({ "license": "gpl-3.0" }));
        assert_eq!(score_license(&m), 0.0);
    }

    #[test]
    fn lgpl3_matches_gpl3_substring() {
        let m = meta().with_card(json!({ "license": "lgpl-3.0" }));
        assert_eq!(score_license(&m), 0.0);
    }

    #[test]
    fn readme_section_is_used_without_card_license() {
        let m = meta().with_readme("# M\n\n## License\nReleased under Apache-2.0.\n");
        assert!((score_license(&m) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn no_license_anywhere_is_unclear() {
        let m = meta().with_readme("## Usage\nCall it.");
        assert!((score_license(&m) - UNCLEAR).abs() < 1e-10);
        assert!((score_license(&meta()) - UNCLEAR).abs() < 1e-10);
    }

    #[test]
    fn unknown_license_is_unclear() {
        let m = meta().with_card(json!({ "license": "openrail" }));
        assert!((score_license(&m) - UNCLEAR).abs() < 1e-10);
    }

    #[tokio::test]
    async fn plugin_reports_license_kind() {
        let ctx = MetricContext::new(meta().with_card(json!({ "license": "apache-2.0" })));
        let result = LicenseMetric.compute(&ctx).await;
        assert_eq!(LicenseMetric.kind(), MetricKind::License);
        assert_eq!(result, MetricResult::Scalar(1.0));
    }
}
