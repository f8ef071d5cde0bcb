// crates/arbiter-lineage/src/graph.rs
//
// Lineage graph of a registered artifact.
//
// Walks declared `base_model` references depth-first from the root. Parents
// found in the registry become `Registry` nodes and are walked in turn;
// parents that do not resolve become `External` nodes keyed by their raw
// reference. Edges point from parent to child.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use arbiter_core::{ArbiterError, ArtifactCategory, ArtifactId, RegistryReader};

/// Default traversal depth for lineage graphs.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Where a lineage node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSource {
    /// Registered in the artifact registry.
    Registry,
    /// Declared as a parent but not registered.
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    BaseModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageNode {
    pub artifact_id: String,
    pub name: String,
    pub source: NodeSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageEdge {
    /// Parent node id.
    pub from: String,
    /// Child node id.
    pub to: String,
    pub relationship: Relationship,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineageGraph {
    pub nodes: Vec<LineageNode>,
    pub edges: Vec<LineageEdge>,
}

impl LineageGraph {
    pub fn node(&self, artifact_id: &str) -> Option<&LineageNode> {
        self.nodes.iter().find(|n| n.artifact_id == artifact_id)
    }

    /// Adds a node unless one with the same id is already present.
    fn push_node(&mut self, node: LineageNode) {
        if self.node(&node.artifact_id).is_none() {
            self.nodes.push(node);
        }
    }

    fn push_edge(&mut self, from: &str, to: &str) {
        self.edges.push(LineageEdge {
            from: from.to_string(),
            to: to.to_string(),
            relationship: Relationship::BaseModel,
        });
    }
}

/// Build the lineage graph rooted at `root`.
///
/// Registry errors abort the walk; a missing entry does not.
pub async fn build_lineage_graph(
    root: &ArtifactId,
    registry: &dyn RegistryReader,
    max_depth: usize,
) -> Result<LineageGraph, ArbiterError> {
    let mut graph = LineageGraph::default();
    let mut visited: HashSet<ArtifactId> = HashSet::new();
    // (node id, depth), walked depth-first
    let mut stack: Vec<(ArtifactId, usize)> = vec![(root.clone(), 0)];

    while let Some((current, depth)) = stack.pop() {
        if depth >= max_depth || !visited.insert(current.clone()) {
            continue;
        }

        let Some(entry) = registry.lookup(&current).await? else {
            tracing::debug!("Lineage node {} is not registered", current);
            graph.push_node(LineageNode {
                artifact_id: current.to_string(),
                name: current.to_string(),
                source: NodeSource::External,
            });
            continue;
        };

        graph.push_node(LineageNode {
            artifact_id: current.to_string(),
            name: entry.name.clone(),
            source: NodeSource::Registry,
        });

        let mut parents = Vec::new();
        for reference in &entry.base_models {
            let parent_id = ArtifactId::derive(ArtifactCategory::Model, reference);
            if registry.lookup(&parent_id).await?.is_some() {
                graph.push_edge(parent_id.as_str(), current.as_str());
                parents.push((parent_id, depth + 1));
            } else {
                graph.push_node(LineageNode {
                    artifact_id: reference.clone(),
                    name: reference.clone(),
                    source: NodeSource::External,
                });
                graph.push_edge(reference, current.as_str());
            }
        }
        // Reverse so the first declared parent is walked first.
        stack.extend(parents.into_iter().rev());
    }

    tracing::debug!(
        "Lineage graph for {}: {} nodes, {} edges",
        root,
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRegistry;

    #[tokio::test]
    async fn unregistered_root_is_a_lone_external_node() {
        let registry = InMemoryRegistry::new();
        let root = ArtifactId::derive(ArtifactCategory::Model, "org/nothing");

        let graph = build_lineage_graph(&root, &registry, DEFAULT_MAX_DEPTH)
            .await
            .unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].source, NodeSource::External);
        assert!(graph.edges.is_empty());
    }

    #[tokio::test]
    async fn chain_with_external_leaf() {
        let registry = InMemoryRegistry::new();
        let base = registry
            .register("https://huggingface.co/org/base", 0.7, &["meta/llama-unlisted"])
            .await;
        let tuned = registry
            .register("https://huggingface.co/org/tuned", 0.9, &["org/base"])
            .await;

        let graph = build_lineage_graph(&tuned, &registry, DEFAULT_MAX_DEPTH)
            .await
            .unwrap();

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.node(tuned.as_str()).unwrap().name, "tuned");
        assert_eq!(graph.node(base.as_str()).unwrap().source, NodeSource::Registry);
        assert_eq!(
            graph.node("meta/llama-unlisted").unwrap().source,
            NodeSource::External
        );

        assert_eq!(graph.edges.len(), 2);
        assert!(graph
            .edges
            .iter()
            .any(|e| e.from == base.as_str() && e.to == tuned.as_str()));
        assert!(graph
            .edges
            .iter()
            .any(|e| e.from == "meta/llama-unlisted" && e.to == base.as_str()));
    }

    #[tokio::test]
    async fn cycles_do_not_duplicate_nodes() {
        let registry = InMemoryRegistry::new();
        let a = registry
            .register("https://huggingface.co/org/a", 0.5, &["org/b"])
            .await;
        registry
            .register("https://huggingface.co/org/b", 0.5, &["org/a"])
            .await;

        let graph = build_lineage_graph(&a, &registry, DEFAULT_MAX_DEPTH)
            .await
            .unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 2);
    }

    #[tokio::test]
    async fn depth_limit_stops_the_walk() {
        let registry = InMemoryRegistry::new();
        registry.register("https://huggingface.co/org/g", 0.5, &[]).await;
        registry
            .register("https://huggingface.co/org/p", 0.5, &["org/g"])
            .await;
        let c = registry
            .register("https://huggingface.co/org/c", 0.5, &["org/p"])
            .await;

        let graph = build_lineage_graph(&c, &registry, 2).await.unwrap();
        // c and p are walked; g is beyond the limit.
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn graph_serializes_with_snake_case_tags() {
        let mut graph = LineageGraph::default();
        graph.push_node(LineageNode {
            artifact_id: "x".to_string(),
            name: "x".to_string(),
            source: NodeSource::External,
        });
        graph.push_edge("x", "y");
        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(value["nodes"][0]["source"], "external");
        assert_eq!(value["edges"][0]["relationship"], "base_model");
    }
}
