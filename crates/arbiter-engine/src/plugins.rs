// crates/arbiter-engine/src/plugins.rs
//
// The standard plugin set: one plugin per registered metric.

use std::sync::Arc;

use arbiter_core::MetricPlugin;
use arbiter_lineage::TreeScoreMetric;
use arbiter_metrics::{
    BusFactorMetric, CodeQualityMetric, DatasetAndCodeMetric, DatasetQualityMetric, LicenseMetric,
    PerformanceClaimsMetric, RampUpMetric, ReproducibilityMetric, ReviewednessMetric, SizeMetric,
};

/// All eleven standard metric plugins.
pub fn standard_plugins() -> Vec<Arc<dyn MetricPlugin>> {
    vec![
        Arc::new(RampUpMetric),
        Arc::new(BusFactorMetric),
        Arc::new(LicenseMetric),
        Arc::new(SizeMetric),
        Arc::new(DatasetAndCodeMetric),
        Arc::new(DatasetQualityMetric),
        Arc::new(CodeQualityMetric),
        Arc::new(PerformanceClaimsMetric),
        Arc::new(ReproducibilityMetric),
        Arc::new(ReviewednessMetric),
        Arc::new(TreeScoreMetric),
    ]
}
