// crates/arbiter-core/src/lib.rs
//
// arbiter-core: Core types, traits, and identifiers for the Arbiter
// artifact trust engine.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the artifact metadata consumed by the engine, the tagged metric
// result types it produces, registry identifiers, the error type, and the
// trait seams (metric plugins, registry readers) between crates.

pub mod artifact;
pub mod error;
pub mod identity;
pub mod metric;
pub mod registry;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use arbiter_core::ArtifactMetadata;`

// Artifact types
pub use artifact::{ArtifactCategory, ArtifactMetadata, CommitInfo, RepoFile, UsageCounters};

// Metric types
pub use metric::{
    clamp_unit, round4, DeviceClass, DeviceScores, Evaluation, MetricKind, MetricResult,
    NetScore, ScoreReport,
};

// Identity types
pub use identity::{canonicalize_url, ArtifactId};

// Registry types
pub use registry::RegistryEntry;

// Error type
pub use error::ArbiterError;

// Traits
pub use traits::{MetricContext, MetricPlugin, RegistryReader};
