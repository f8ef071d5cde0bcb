// crates/arbiter-metrics/src/lib.rs
//
// arbiter-metrics: concrete metric plugins for the Arbiter engine.
//
// Every plugin is a pure function of the artifact metadata wrapped in a
// `MetricPlugin` impl. Plugins never fetch anything themselves: README text,
// commit history and file listings arrive pre-resolved in the metadata.
// Lineage (tree score) lives in arbiter-lineage because it needs the registry.

pub mod bus_factor;
pub mod code_quality;
pub mod compatibility;
pub mod dataset;
pub mod license;
pub mod perf_claims;
pub mod ramp_up;
pub mod readme;
pub mod reproducibility;
pub mod reviewedness;
pub mod size;

pub use bus_factor::BusFactorMetric;
pub use code_quality::CodeQualityMetric;
pub use compatibility::{is_compatible, normalize_license};
pub use dataset::{DatasetAndCodeMetric, DatasetQualityMetric};
pub use license::LicenseMetric;
pub use perf_claims::PerformanceClaimsMetric;
pub use ramp_up::RampUpMetric;
pub use reproducibility::ReproducibilityMetric;
pub use reviewedness::ReviewednessMetric;
pub use size::SizeMetric;
