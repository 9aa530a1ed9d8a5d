//! The resolved, immutable processor graph handed to the runtime.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::context::ProcessorContext;
use crate::error::ProcessorError;
use crate::node::ProcessorNode;
use crate::store::StateStore;
use crate::types::{NodeId, NodeSummary, TopologySummary};

/// The resolved processor graph.
///
/// Nodes are stored in resolution order (sources, processors, sinks) and
/// addressed by [`NodeId`]. Nothing can be mutated after
/// [`TopologyBuilder::build`](crate::TopologyBuilder::build) returns, so a
/// topology can be shared (for example behind an `Arc`) by every runtime thread.
pub struct Topology {
  pub(crate) nodes: Vec<ProcessorNode>,
  pub(crate) index: HashMap<String, NodeId>,
  pub(crate) sources: Vec<NodeId>,
  pub(crate) processors: Vec<NodeId>,
  pub(crate) sinks: Vec<NodeId>,
  pub(crate) state_stores: HashMap<String, Arc<dyn StateStore>>,
  pub(crate) topics: Vec<String>,
}

impl Topology {
  pub fn node(&self, name: &str) -> Option<&ProcessorNode> {
    self.index.get(name).and_then(|id| self.node_by_id(*id))
  }

  pub fn node_by_id(&self, id: NodeId) -> Option<&ProcessorNode> {
    self.nodes.get(id.index())
  }

  /// Every node, in resolution order.
  pub fn nodes(&self) -> impl Iterator<Item = &ProcessorNode> {
    self.nodes.iter()
  }

  pub fn sources(&self) -> impl Iterator<Item = &ProcessorNode> {
    self.resolve(&self.sources)
  }

  /// Nodes that are neither sources nor sinks.
  pub fn processors(&self) -> impl Iterator<Item = &ProcessorNode> {
    self.resolve(&self.processors)
  }

  pub fn sinks(&self) -> impl Iterator<Item = &ProcessorNode> {
    self.resolve(&self.sinks)
  }

  pub fn children_of<'a>(
    &'a self,
    node: &'a ProcessorNode,
  ) -> impl Iterator<Item = &'a ProcessorNode> + 'a {
    self.resolve(node.children())
  }

  pub fn parents_of<'a>(
    &'a self,
    node: &'a ProcessorNode,
  ) -> impl Iterator<Item = &'a ProcessorNode> + 'a {
    self.resolve(node.parents())
  }

  fn resolve<'a>(&'a self, ids: &'a [NodeId]) -> impl Iterator<Item = &'a ProcessorNode> + 'a {
    ids.iter().filter_map(|id| self.node_by_id(*id))
  }

  /// Every store created by the build, by store name.
  pub fn state_stores(&self) -> &HashMap<String, Arc<dyn StateStore>> {
    &self.state_stores
  }

  pub fn state_store(&self, name: &str) -> Option<&Arc<dyn StateStore>> {
    self.state_stores.get(name)
  }

  /// Topics subscribed by all sources, in registration order.
  pub fn topics(&self) -> &[String] {
    &self.topics
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Initialises every node in resolution order, stopping at the first error.
  #[instrument(level = "trace", skip(self, ctx))]
  pub fn initialise(&self, ctx: &ProcessorContext<'_>) -> Result<(), ProcessorError> {
    for node in &self.nodes {
      node.initialise(ctx)?;
    }
    info!(nodes = self.nodes.len(), "topology initialised");
    Ok(())
  }

  /// Serializable view of nodes, edges, stores and topics.
  pub fn summary(&self) -> TopologySummary {
    let names = |ids: &[NodeId]| -> Vec<String> {
      self
        .resolve(ids)
        .map(|n| n.name().to_string())
        .collect()
    };
    let nodes = self
      .nodes
      .iter()
      .map(|n| {
        let mut stores: Vec<String> = n.stores().keys().cloned().collect();
        stores.sort();
        NodeSummary {
          name: n.name().to_string(),
          kind: n.kind(),
          parents: names(n.parents()),
          children: names(n.children()),
          stores,
        }
      })
      .collect();
    let mut stores: Vec<String> = self.state_stores.keys().cloned().collect();
    stores.sort();
    TopologySummary {
      topics: self.topics.clone(),
      nodes,
      stores,
    }
  }
}

impl fmt::Debug for Topology {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut stores: Vec<&str> = self.state_stores.keys().map(String::as_str).collect();
    stores.sort_unstable();
    f.debug_struct("Topology")
      .field("nodes", &self.nodes)
      .field("topics", &self.topics)
      .field("stores", &stores)
      .finish()
  }
}
