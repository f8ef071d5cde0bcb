// crates/arbiter-cli/src/commands/license.rs
//
// `arbiter license-check <artifact-license> <repo-license>`: can code under
// the repo license be used by an artifact under the artifact license?

use clap::Args;
use serde::Serialize;

use arbiter_metrics::{is_compatible, normalize_license};

use crate::output::{format_json, OutputFormat};

/// License compatibility check command.
#[derive(Debug, Args)]
pub struct LicenseCheckCmd {
    /// License of the artifact that would use the code (e.g. "apache-2.0").
    #[arg()]
    pub artifact_license: String,

    /// License of the code repository being used (e.g. "MIT").
    #[arg()]
    pub repo_license: String,
}

#[derive(Debug, Serialize)]
struct LicenseCheck {
    artifact_license: Option<String>,
    repo_license: Option<String>,
    compatible: bool,
}

/// Run the license-check command.
pub async fn run(cmd: &LicenseCheckCmd, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let check = LicenseCheck {
        artifact_license: normalize_license(&cmd.artifact_license),
        repo_license: normalize_license(&cmd.repo_license),
        compatible: is_compatible(&cmd.artifact_license, &cmd.repo_license),
    };

    match format {
        OutputFormat::Json => println!("{}", format_json(&check)),
        OutputFormat::Table => {
            println!(
                "  Artifact license: {}",
                check.artifact_license.as_deref().unwrap_or("(none)")
            );
            println!(
                "  Repo license:     {}",
                check.repo_license.as_deref().unwrap_or("(none)")
            );
            println!(
                "  Compatible:       {}",
                if check.compatible { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}
