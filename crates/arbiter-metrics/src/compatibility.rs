// crates/arbiter-metrics/src/compatibility.rs
//
// License normalization and pairwise compatibility.
//
// Answers "may code/data under `repo` license be used by an artifact under
// `artifact` license?" using a fixed compatibility matrix of common
// open-source licenses. Unknown artifact licenses are never compatible.

/// Map common spellings to lower-case SPDX-style ids.
///
/// Returns `None` for an empty string; unrecognized licenses are returned
/// lower-cased and trimmed.
pub fn normalize_license(license: &str) -> Option<String> {
    let lower = license.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    let normalized = match lower.as_str() {
        "apache 2.0" | "apache license 2.0" | "apache-2" | "apache 2" => "apache-2.0",
        "cc-by-nc" => "cc-by-nc-4.0",
        "bsd" | "bsd-3" => "bsd-3-clause",
        "bsd-2" => "bsd-2-clause",
        "the unlicense" => "unlicense",
        other => other,
    };
    tracing::debug!("Normalized license '{}' to '{}'", license, normalized);
    Some(normalized.to_string())
}

const PERMISSIVE_TARGETS: &[&str] = &[
    "mit",
    "apache-2.0",
    "bsd-3-clause",
    "bsd-2-clause",
    "lgpl-2.1",
    "lgpl-3.0",
    "gpl-2.0",
    "gpl-3.0",
    "mpl-2.0",
    "epl-2.0",
    "isc",
    "unlicense",
];

/// Licenses whose code may be used by an artifact under `artifact`.
fn compatible_with(artifact: &str) -> &'static [&'static str] {
    match artifact {
        "mit" | "bsd-3-clause" | "bsd-2-clause" => PERMISSIVE_TARGETS,
        // Apache-2.0 cannot absorb GPLv2 code.
        "apache-2.0" => &[
            "mit",
            "apache-2.0",
            "bsd-3-clause",
            "bsd-2-clause",
            "lgpl-2.1",
            "lgpl-3.0",
            "gpl-3.0",
            "mpl-2.0",
            "epl-2.0",
            "isc",
            "unlicense",
        ],
        "lgpl-2.1" => &["lgpl-2.1", "lgpl-3.0", "gpl-2.0", "gpl-3.0"],
        "lgpl-3.0" => &["lgpl-3.0", "gpl-3.0"],
        "gpl-2.0" => &["gpl-2.0", "gpl-3.0"],
        "gpl-3.0" => &["gpl-3.0"],
        "agpl-3.0" => &["agpl-3.0"],
        "mpl-2.0" => &[
            "mit",
            "apache-2.0",
            "bsd-3-clause",
            "bsd-2-clause",
            "mpl-2.0",
            "lgpl-2.1",
            "lgpl-3.0",
            "gpl-2.0",
            "gpl-3.0",
        ],
        "epl-2.0" => &[
            "mit",
            "apache-2.0",
            "bsd-3-clause",
            "bsd-2-clause",
            "epl-2.0",
            "gpl-2.0",
            "gpl-3.0",
        ],
        "cc-by-nc-4.0" => &["cc-by-nc-4.0", "cc-by-nc-sa-4.0"],
        "cc-by-nc-sa-4.0" => &["cc-by-nc-sa-4.0"],
        "cc-by-4.0" => &[
            "mit",
            "apache-2.0",
            "bsd-3-clause",
            "bsd-2-clause",
            "cc-by-4.0",
            "cc-by-sa-4.0",
            "lgpl-2.1",
            "lgpl-3.0",
            "gpl-2.0",
            "gpl-3.0",
            "mpl-2.0",
            "epl-2.0",
        ],
        "cc-by-sa-4.0" => &["cc-by-sa-4.0", "gpl-3.0"],
        "isc" | "unlicense" => &[
            "mit",
            "apache-2.0",
            "bsd-3-clause",
            "bsd-2-clause",
            "isc",
            "unlicense",
            "lgpl-2.1",
            "lgpl-3.0",
            "gpl-2.0",
            "gpl-3.0",
            "mpl-2.0",
            "epl-2.0",
        ],
        _ => &[],
    }
}

/// Whether code under `repo` may be used by an artifact under `artifact`.
///
/// Both arguments are normalized first. An exact match is always compatible.
pub fn is_compatible(artifact: &str, repo: &str) -> bool {
    let (artifact, repo) = match (normalize_license(artifact), normalize_license(repo)) {
        (Some(a), Some(r)) => (a, r),
        (a, r) => {
            tracing::warn!(
                "Missing license for compatibility check: artifact={:?}, repo={:?}",
                a,
                r
            );
            return false;
        }
    };

    if artifact == repo {
        return true;
    }

    let compatible = compatible_with(&artifact).contains(&repo.as_str());
    tracing::debug!(
        "License compatibility: artifact={}, repo={}, compatible={}",
        artifact,
        repo,
        compatible
    );
    compatible
}
