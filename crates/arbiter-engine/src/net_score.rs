// crates/arbiter-engine/src/net_score.rs
//
// Net Score aggregation.
//
// Weighted mean over ten metrics, gated multiplicatively by the license
// score. The size metric's per-device map is reduced to its mean first.
// License is not part of the weighted mean: an incompatible license (0.0)
// vetoes the whole score and an unclear one (0.5) halves it.

use std::time::Instant;

use arbiter_core::{clamp_unit, round4, MetricKind, MetricResult, NetScore, ScoreReport};

/// Fixed weight table. The literals add up to 1.10, so they are treated as
/// relative weights: the weighted sum is divided by [`total_weight`], which
/// keeps a report of perfect metrics at exactly 1.0 and puts the reference
/// 0.8/0.5 report at 0.7782 rather than the unnormalised 0.776.
pub const WEIGHTS: [(MetricKind, f64); 10] = [
    (MetricKind::Size, 0.08),
    (MetricKind::RampUp, 0.12),
    (MetricKind::BusFactor, 0.12),
    (MetricKind::DatasetAndCode, 0.12),
    (MetricKind::DatasetQuality, 0.12),
    (MetricKind::CodeQuality, 0.12),
    (MetricKind::PerformanceClaims, 0.12),
    (MetricKind::Reproducibility, 0.10),
    (MetricKind::Reviewedness, 0.10),
    (MetricKind::TreeScore, 0.10),
];

/// Sum of all weights in [`WEIGHTS`].
pub fn total_weight() -> f64 {
    WEIGHTS.iter().map(|(_, w)| w).sum()
}

/// Value of one metric as a clamped scalar.
///
/// Per-device maps reduce to their unweighted mean; missing metrics are 0.0.
pub fn metric_value(report: &ScoreReport, kind: MetricKind) -> f64 {
    match report.get(kind) {
        Some(MetricResult::Scalar(v)) => clamp_unit(*v),
        Some(MetricResult::PerDevice(devices)) => devices.mean(),
        None => 0.0,
    }
}

/// Weighted quality score before the license gate, in [0, 1].
pub fn weighted_quality(report: &ScoreReport) -> f64 {
    let sum: f64 = WEIGHTS
        .iter()
        .map(|&(kind, weight)| weight * metric_value(report, kind))
        .sum();
    clamp_unit(sum / total_weight())
}

/// Final net score: `license x weighted quality`, clamped and rounded to
/// four decimals, with the time taken to compute it.
pub fn aggregate(report: &ScoreReport) -> NetScore {
    let start = Instant::now();

    let license = metric_value(report, MetricKind::License);
    let value = round4(clamp_unit(license * weighted_quality(report)));

    NetScore {
        value,
        latency_ms: start.elapsed().as_millis() as u64,
    }
}
