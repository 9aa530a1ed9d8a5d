//! Serializable view of a built topology, used for inspection and the CLI.

use serde::{Deserialize, Serialize};

use super::NodeKind;

/// One node as seen from outside the topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
  pub name: String,
  pub kind: NodeKind,
  pub parents: Vec<String>,
  pub children: Vec<String>,
  /// Store names attached to this node, sorted.
  pub stores: Vec<String>,
}

/// Serializable view of a built topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySummary {
  /// Subscribed topics in registration order.
  pub topics: Vec<String>,
  /// Nodes in resolution order.
  pub nodes: Vec<NodeSummary>,
  /// Store names, sorted.
  pub stores: Vec<String>,
}

impl TopologySummary {
  pub fn node(&self, name: &str) -> Option<&NodeSummary> {
    self.nodes.iter().find(|n| n.name == name)
  }

  pub fn count(&self, kind: NodeKind) -> usize {
    self.nodes.iter().filter(|n| n.kind == kind).count()
  }
}
