// crates/arbiter-metrics/src/readme.rs
//
// README and file-listing signals shared by the documentation-oriented
// metrics.

use std::sync::OnceLock;

use arbiter_core::ArtifactMetadata;
use regex::Regex;

static LICENSE_SECTION: OnceLock<Regex> = OnceLock::new();

fn license_section_pattern() -> &'static Regex {
    LICENSE_SECTION.get_or_init(|| {
        Regex::new(r"(?is)#{1,2}\s*license\s*\n(.+?)(?:\n##|\z)").expect("valid license regex")
    })
}

/// Keywords that indicate a training dataset is referenced in prose.
pub const DATASET_KEYWORDS: [&str; 6] = [
    "trained on",
    "training data",
    "dataset:",
    "datasets:",
    "training set",
    "data source",
];

/// Whether `haystack` (already lower-cased) contains any of `needles`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Number of `needles` found in `haystack` (already lower-cased).
pub fn count_matches(haystack: &str, needles: &[&str]) -> usize {
    needles.iter().filter(|n| haystack.contains(*n)).count()
}

/// Body of the README's `License` section, lower-cased and trimmed.
pub fn license_section(readme: &str) -> Option<String> {
    license_section_pattern()
        .captures(readme)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

/// Fenced blocks, at least three indented lines, or inline imports.
pub fn has_code_blocks(readme: &str) -> bool {
    readme.contains("```") || readme.matches("    ").count() >= 3 || readme.contains("`import ")
}

/// Count of `##` markers, a proxy for section structure.
pub fn header_count(readme: &str) -> usize {
    readme.matches("##").count()
}

/// Whether the repository ships Python scripts or notebooks.
pub fn has_example_files(meta: &ArtifactMetadata) -> bool {
    meta.file_names()
        .any(|name| name.ends_with(".py") || name.ends_with(".ipynb"))
}

/// Whether a training dataset is declared in the card or mentioned in prose.
pub fn mentions_dataset(meta: &ArtifactMetadata, readme_lower: &str) -> bool {
    !meta.declared_datasets().is_empty() || contains_any(readme_lower, &DATASET_KEYWORDS)
}
