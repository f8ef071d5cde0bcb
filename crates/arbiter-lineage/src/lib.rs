// crates/arbiter-lineage/src/lib.rs
//
// arbiter-lineage: ancestry of registered artifacts.
//
// - `tree_score`: the Tree-Score metric, a recursive average over the net
//   scores of an artifact's registered ancestors.
// - `graph`: the lineage graph (nodes and base-model edges) of a registered
//   artifact.
// - `memory`: an in-memory `RegistryReader` that can be seeded from a JSON
//   snapshot.

pub mod graph;
pub mod memory;
pub mod tree_score;

pub use graph::{build_lineage_graph, LineageEdge, LineageGraph, LineageNode, NodeSource, Relationship};
pub use memory::InMemoryRegistry;
pub use tree_score::{tree_score, TreeScoreMetric, TreeScoreResolver};
