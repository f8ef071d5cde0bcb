// crates/arbiter-cli/src/commands/lineage.rs
//
// `arbiter lineage <url>`: print the base-model ancestry of a registered
// model as node and edge tables.

use clap::Args;
use tabled::Tabled;

use arbiter_core::{ArtifactCategory, ArtifactId};
use arbiter_lineage::{build_lineage_graph, NodeSource};

use super::Settings;
use crate::output::{format_json, format_table, OutputFormat};

/// Lineage graph command.
#[derive(Debug, Args)]
pub struct LineageCmd {
    /// Model URL or `org/name` reference.
    #[arg()]
    pub url: String,

    /// Maximum traversal depth (overrides the configured value).
    #[arg(long)]
    pub depth: Option<usize>,
}

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "ID")]
    artifact_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Source")]
    source: String,
}

#[derive(Tabled)]
struct EdgeRow {
    #[tabled(rename = "Parent")]
    from: String,
    #[tabled(rename = "Child")]
    to: String,
}

/// Run the lineage command.
pub async fn run(cmd: &LineageCmd, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let registry = settings
        .load_registry()?
        .ok_or("No registry configured; set registry_path or pass --registry")?;

    let root = ArtifactId::derive(ArtifactCategory::Model, &cmd.url);
    let depth = cmd.depth.unwrap_or(settings.lineage_max_depth);
    let graph = build_lineage_graph(&root, registry.as_ref(), depth).await?;

    match settings.format {
        OutputFormat::Json => println!("{}", format_json(&graph)),
        OutputFormat::Table => {
            let nodes: Vec<NodeRow> = graph
                .nodes
                .iter()
                .map(|n| NodeRow {
                    artifact_id: n.artifact_id.clone(),
                    name: n.name.clone(),
                    source: match n.source {
                        NodeSource::Registry => "registry".to_string(),
                        NodeSource::External => "external".to_string(),
                    },
                })
                .collect();
            let edges: Vec<EdgeRow> = graph
                .edges
                .iter()
                .map(|e| EdgeRow {
                    from: e.from.clone(),
                    to: e.to.clone(),
                })
                .collect();

            println!("Lineage of {} (depth {})", cmd.url, depth);
            println!();
            println!("{}", format_table(&nodes));
            if edges.is_empty() {
                println!("No base-model edges.");
            } else {
                println!("{}", format_table(&edges));
            }
        }
    }

    Ok(())
}
