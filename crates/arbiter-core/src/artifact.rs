// crates/arbiter-core/src/artifact.rs
//
// Artifact metadata: the immutable input to one evaluation.
//
// Metadata is assembled by the ingestion layer (model-hub and code-host
// clients live outside this workspace), handed to the engine once, shared
// read-only between all metric plugins, and dropped after scoring.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ArbiterError;

/// Declared category of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ArtifactCategory {
    Model,
    Dataset,
    Code,
}

impl ArtifactCategory {
    /// Lower-case tag used when deriving registry identifiers.
    pub fn as_tag(&self) -> &'static str {
        match self {
            ArtifactCategory::Model => "model",
            ArtifactCategory::Dataset => "dataset",
            ArtifactCategory::Code => "code",
        }
    }
}

impl fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactCategory::Model => write!(f, "MODEL"),
            ArtifactCategory::Dataset => write!(f, "DATASET"),
            ArtifactCategory::Code => write!(f, "CODE"),
        }
    }
}

/// One file in the artifact's repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoFile {
    /// Path of the file relative to the repository root.
    pub name: String,
    /// Size in bytes, when the hub reports it directly.
    #[serde(default)]
    pub size: Option<u64>,
    /// Size of the LFS object behind a pointer file, if any.
    #[serde(default)]
    pub lfs_size: Option<u64>,
}

impl RepoFile {
    /// A file with a known size.
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size: Some(size),
            lfs_size: None,
        }
    }

    /// A file whose size is not known.
    pub fn without_size(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            lfs_size: None,
        }
    }

    /// Byte size of the file: the direct size, else the LFS object size.
    pub fn effective_size(&self) -> Option<u64> {
        self.size.or(self.lfs_size)
    }

    /// Lower-cased file extension including the dot, e.g. `.safetensors`.
    pub fn extension(&self) -> Option<String> {
        let base = self.name.rsplit('/').next().unwrap_or(&self.name);
        base.rfind('.').map(|i| base[i..].to_lowercase())
    }
}

/// A single commit in the artifact's source repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Usernames credited on the commit.
    #[serde(default)]
    pub authors: Vec<String>,
}

impl CommitInfo {
    pub fn by(authors: &[&str]) -> Self {
        Self {
            authors: authors.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Community usage counters reported by the hub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageCounters {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub downloads: u64,
}

/// Immutable metadata describing one artifact under evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Canonical source identifier (usually the source URL).
    pub source_id: String,
    /// Declared artifact category.
    pub category: ArtifactCategory,
    /// Free-form model/dataset card data (license, base_model, datasets, ...).
    #[serde(default)]
    pub card_data: Option<Map<String, Value>>,
    /// Repository file listing.
    #[serde(default)]
    pub files: Vec<RepoFile>,
    /// Likes/downloads, when the hub exposes them.
    #[serde(default)]
    pub usage: Option<UsageCounters>,
    /// README text as fetched by the ingestion layer.
    #[serde(default)]
    pub readme: Option<String>,
    /// Commit history; `None` when the upstream fetch failed.
    #[serde(default)]
    pub commits: Option<Vec<CommitInfo>>,
    /// Parameter counts per dtype (e.g. `"BF16" -> 270_000_000`).
    #[serde(default)]
    pub parameter_counts: Option<BTreeMap<String, u64>>,
}

impl ArtifactMetadata {
    /// Create metadata with only an identifier and a category.
    pub fn new(source_id: impl Into<String>, category: ArtifactCategory) -> Self {
        Self {
            source_id: source_id.into(),
            category,
            card_data: None,
            files: Vec::new(),
            usage: None,
            readme: None,
            commits: None,
            parameter_counts: None,
        }
    }

    /// Attach card data. Non-object values are ignored.
    pub fn with_card(mut self, card: Value) -> Self {
        if let Value::Object(map) = card {
            self.card_data = Some(map);
        }
        self
    }

    pub fn with_files(mut self, files: Vec<RepoFile>) -> Self {
        self.files = files;
        self
    }

    pub fn with_readme(mut self, readme: impl Into<String>) -> Self {
        self.readme = Some(readme.into());
        self
    }

    pub fn with_commits(mut self, commits: Vec<CommitInfo>) -> Self {
        self.commits = Some(commits);
        self
    }

    pub fn with_usage(mut self, likes: u64, downloads: u64) -> Self {
        self.usage = Some(UsageCounters { likes, downloads });
        self
    }

    pub fn with_parameter_counts(mut self, counts: BTreeMap<String, u64>) -> Self {
        self.parameter_counts = Some(counts);
        self
    }

    /// Reject metadata no meaningful score can be produced for.
    pub fn validate(&self) -> Result<(), ArbiterError> {
        if self.source_id.trim().is_empty() {
            return Err(ArbiterError::InvalidMetadata(
                "artifact has no source identifier".to_string(),
            ));
        }
        Ok(())
    }

    /// Short display name: the last path segment of the source identifier.
    pub fn display_name(&self) -> &str {
        self.source_id
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.source_id)
    }

    /// Look up a card field.
    pub fn card_field(&self, key: &str) -> Option<&Value> {
        self.card_data.as_ref().and_then(|card| card.get(key))
    }

    /// Whether the card declares `key` at all.
    pub fn card_has(&self, key: &str) -> bool {
        self.card_field(key).is_some()
    }

    /// Declared parent references from the card's `base_model` field.
    ///
    /// A string yields one parent, a list yields a merged artifact's parents,
    /// anything else yields none.
    pub fn declared_parents(&self) -> Vec<String> {
        string_list(self.card_field("base_model"))
    }

    /// Declared license string, if the card has one.
    pub fn declared_license(&self) -> Option<String> {
        let licenses = string_list(self.card_field("license"));
        if licenses.is_empty() {
            None
        } else {
            Some(licenses.join(", "))
        }
    }

    /// Declared training datasets.
    pub fn declared_datasets(&self) -> Vec<String> {
        string_list(self.card_field("datasets"))
    }

    /// README text, or the empty string.
    pub fn readme_text(&self) -> &str {
        self.readme.as_deref().unwrap_or("")
    }

    /// Iterator over repository file names.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }
}

/// Normalize a card value that may be a string or a list of strings.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
