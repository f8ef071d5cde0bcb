// crates/arbiter-cli/src/commands/score.rs
//
// `arbiter score <metadata.json>`: evaluate one artifact and print its
// metric breakdown and net score.

use std::fs;

use clap::Args;
use tabled::Tabled;

use arbiter_core::{ArtifactMetadata, MetricKind};

use super::Settings;
use crate::output::{format_json, format_result, format_table, OutputFormat};

/// Artifact scoring command.
#[derive(Debug, Args)]
pub struct ScoreCmd {
    /// Path to a JSON file holding the artifact metadata.
    #[arg()]
    pub metadata: String,
}

/// Table row for a single metric.
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Latency (ms)")]
    latency_ms: u64,
}

/// Read artifact metadata from a JSON file.
fn read_metadata(path: &str) -> Result<ArtifactMetadata, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read metadata from {}: {}", path, e))?;
    let metadata: ArtifactMetadata = serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid metadata in {}: {}", path, e))?;
    Ok(metadata)
}

/// Run the score command.
pub async fn run(cmd: &ScoreCmd, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = read_metadata(&cmd.metadata)?;
    let registry = settings.load_registry()?;

    let evaluation = arbiter_engine::evaluate(metadata, registry).await?;

    match settings.format {
        OutputFormat::Json => println!("{}", format_json(&evaluation.to_record())),
        OutputFormat::Table => {
            let rows: Vec<MetricRow> = MetricKind::ALL
                .iter()
                .filter_map(|&kind| {
                    let result = evaluation.report.get(kind)?;
                    Some(MetricRow {
                        metric: kind.as_str().to_string(),
                        score: format_result(result),
                        latency_ms: evaluation.report.latency(kind).unwrap_or(0),
                    })
                })
                .collect();

            println!("{} ({})", evaluation.source_id, evaluation.category);
            println!();
            println!("{}", format_table(&rows));
            println!();
            println!(
                "Net score: {:.4} ({} ms)",
                evaluation.net_score.value, evaluation.net_score.latency_ms
            );
        }
    }

    Ok(())
}
