// crates/arbiter-core/src/metric.rs
//
// Metric result types: per-plugin results, the orchestrator's score report,
// and the final net score.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::artifact::ArtifactCategory;

/// Clamp a value into [0.0, 1.0]. NaN maps to 0.0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Round to four decimal places.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// The registered metrics, named as they appear in persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    #[serde(rename = "ramp_up_time")]
    RampUp,
    BusFactor,
    License,
    #[serde(rename = "size_score")]
    Size,
    #[serde(rename = "dataset_and_code_score")]
    DatasetAndCode,
    DatasetQuality,
    CodeQuality,
    PerformanceClaims,
    Reproducibility,
    Reviewedness,
    TreeScore,
}

impl MetricKind {
    pub const ALL: [MetricKind; 11] = [
        MetricKind::RampUp,
        MetricKind::BusFactor,
        MetricKind::License,
        MetricKind::Size,
        MetricKind::DatasetAndCode,
        MetricKind::DatasetQuality,
        MetricKind::CodeQuality,
        MetricKind::PerformanceClaims,
        MetricKind::Reproducibility,
        MetricKind::Reviewedness,
        MetricKind::TreeScore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::RampUp => "ramp_up_time",
            MetricKind::BusFactor => "bus_factor",
            MetricKind::License => "license",
            MetricKind::Size => "size_score",
            MetricKind::DatasetAndCode => "dataset_and_code_score",
            MetricKind::DatasetQuality => "dataset_quality",
            MetricKind::CodeQuality => "code_quality",
            MetricKind::PerformanceClaims => "performance_claims",
            MetricKind::Reproducibility => "reproducibility",
            MetricKind::Reviewedness => "reviewedness",
            MetricKind::TreeScore => "tree_score",
        }
    }

    /// The worst-case result substituted when a plugin cannot produce one.
    ///
    /// License defaults to "unclear" (0.5), size to an all-zero device map,
    /// everything else to 0.0.
    pub fn default_result(&self) -> MetricResult {
        match self {
            MetricKind::License => MetricResult::Scalar(0.5),
            MetricKind::Size => MetricResult::PerDevice(DeviceScores::zeroed()),
            _ => MetricResult::Scalar(0.0),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target device classes for the size metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    RaspberryPi,
    JetsonNano,
    DesktopPc,
    AwsServer,
}

impl DeviceClass {
    pub const ALL: [DeviceClass; 4] = [
        DeviceClass::RaspberryPi,
        DeviceClass::JetsonNano,
        DeviceClass::DesktopPc,
        DeviceClass::AwsServer,
    ];

    /// Usable capacity of the device class in GB.
    pub fn capacity_gb(&self) -> f64 {
        match self {
            DeviceClass::RaspberryPi => 8.0,
            DeviceClass::JetsonNano => 12.0,
            DeviceClass::DesktopPc => 50.0,
            DeviceClass::AwsServer => 100.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::RaspberryPi => "raspberry_pi",
            DeviceClass::JetsonNano => "jetson_nano",
            DeviceClass::DesktopPc => "desktop_pc",
            DeviceClass::AwsServer => "aws_server",
        }
    }
}

/// Per-device compatibility scores, each in [0, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceScores(BTreeMap<DeviceClass, f64>);

impl DeviceScores {
    /// Every device class scored 0.0.
    pub fn zeroed() -> Self {
        Self::uniform(0.0)
    }

    /// Every device class given the same score.
    pub fn uniform(score: f64) -> Self {
        Self::from_fn(|_| score)
    }

    /// Score every device class with `f`; results are clamped.
    pub fn from_fn(mut f: impl FnMut(DeviceClass) -> f64) -> Self {
        Self(
            DeviceClass::ALL
                .iter()
                .map(|&device| (device, clamp_unit(f(device))))
                .collect(),
        )
    }

    pub fn get(&self, device: DeviceClass) -> Option<f64> {
        self.0.get(&device).copied()
    }

    pub fn insert(&mut self, device: DeviceClass, score: f64) {
        self.0.insert(device, clamp_unit(score));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeviceClass, f64)> + '_ {
        self.0.iter().map(|(&d, &s)| (d, s))
    }

    /// Unweighted mean across device classes; 0.0 for an empty map.
    pub fn mean(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.values().map(|&s| clamp_unit(s)).sum::<f64>() / self.0.len() as f64
    }
}

/// Output of one metric plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricResult {
    /// A single score in [0, 1].
    Scalar(f64),
    /// Per-device scores (size metric only).
    PerDevice(DeviceScores),
}

impl MetricResult {
    /// A clamped scalar result.
    pub fn scalar(value: f64) -> Self {
        MetricResult::Scalar(clamp_unit(value))
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MetricResult::Scalar(v) => Some(*v),
            MetricResult::PerDevice(_) => None,
        }
    }

    pub fn as_devices(&self) -> Option<&DeviceScores> {
        match self {
            MetricResult::Scalar(_) => None,
            MetricResult::PerDevice(scores) => Some(scores),
        }
    }
}

/// Aggregate orchestrator output: one result and one latency per metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub results: BTreeMap<MetricKind, MetricResult>,
    pub latencies_ms: BTreeMap<MetricKind, u64>,
}

impl ScoreReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a metric's result and latency, replacing any earlier entry.
    pub fn insert(&mut self, kind: MetricKind, result: MetricResult, latency_ms: u64) {
        self.results.insert(kind, result);
        self.latencies_ms.insert(kind, latency_ms);
    }

    pub fn get(&self, kind: MetricKind) -> Option<&MetricResult> {
        self.results.get(&kind)
    }

    pub fn latency(&self, kind: MetricKind) -> Option<u64> {
        self.latencies_ms.get(&kind).copied()
    }

    /// Scalar value of a metric, clamped; 0.0 when missing or not a scalar.
    pub fn scalar_or_zero(&self, kind: MetricKind) -> f64 {
        self.get(kind)
            .and_then(MetricResult::as_scalar)
            .map(clamp_unit)
            .unwrap_or(0.0)
    }

    /// Whether every metric in `kinds` has both a result and a latency.
    pub fn covers(&self, kinds: &[MetricKind]) -> bool {
        kinds
            .iter()
            .all(|k| self.results.contains_key(k) && self.latencies_ms.contains_key(k))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// The final aggregated score and the time taken to compute it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetScore {
    pub value: f64,
    pub latency_ms: u64,
}

/// Complete result of evaluating one artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub source_id: String,
    pub category: ArtifactCategory,
    pub net_score: NetScore,
    pub report: ScoreReport,
    pub evaluated_at: DateTime<Utc>,
}

impl Evaluation {
    /// Flatten into the record shape the catalog persists:
    /// `name`, `category`, `net_score`, `net_score_latency`, and for every
    /// metric `<metric>` plus `<metric>_latency`.
    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        record.insert("name".to_string(), Value::from(self.source_id.clone()));
        record.insert("category".to_string(), Value::from(self.category.to_string()));
        record.insert("net_score".to_string(), Value::from(self.net_score.value));
        record.insert(
            "net_score_latency".to_string(),
            Value::from(self.net_score.latency_ms),
        );

        for (kind, result) in &self.report.results {
            let value = serde_json::to_value(result).unwrap_or(Value::Null);
            record.insert(kind.as_str().to_string(), value);
            let latency = self.report.latency(*kind).unwrap_or(0);
            record.insert(format!("{}_latency", kind.as_str()), Value::from(latency));
        }

        record.insert(
            "evaluated_at".to_string(),
            Value::from(self.evaluated_at.to_rfc3339()),
        );
        Value::Object(record)
    }
}
