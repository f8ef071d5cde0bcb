// crates/arbiter-core/src/identity.rs
//
// Deterministic artifact identifiers.
//
// The registry keys every artifact by a UUIDv5 over its category and
// canonical source URL, so the same (category, URL) pair always maps to the
// same id. Lineage resolution relies on this to turn a declared `base_model`
// reference into the id its registration produced.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::ArtifactCategory;

/// Base URL of the model hub. Bare `org/name` references are resolved
/// against it.
pub const HUB_BASE_URL: &str = "https://huggingface.co/";

/// Path markers after which a hub URL points inside a repository.
const HUB_REVISION_MARKERS: [&str; 3] = ["/tree/", "/blob/", "/resolve/"];

/// Registry identifier of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Derive the id for a (category, source reference) pair.
    pub fn derive(category: ArtifactCategory, reference: &str) -> Self {
        let name = format!("{}:{}", category.as_tag(), canonicalize_url(reference));
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes()).to_string())
    }

    /// Wrap an id string that is already known (e.g. loaded from storage).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical form of a source reference.
///
/// Trims whitespace and trailing slashes, strips revision/file suffixes from
/// hub URLs, and expands bare `org/name` references to full hub URLs. Other
/// absolute URLs are returned trimmed but otherwise untouched.
pub fn canonicalize_url(reference: &str) -> String {
    let trimmed = reference.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some(rest) = trimmed.strip_prefix(HUB_BASE_URL) {
        let cut = HUB_REVISION_MARKERS
            .iter()
            .filter_map(|marker| rest.find(marker))
            .min();
        let repo = match cut {
            Some(idx) => &rest[..idx],
            None => rest,
        };
        return format!("{}{}", HUB_BASE_URL, repo);
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return trimmed.to_string();
    }

    format!("{}{}", HUB_BASE_URL, trimmed.trim_start_matches('/'))
}
