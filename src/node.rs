//! A resolved topology node wrapping one processor instance.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::context::ProcessorContext;
use crate::error::ProcessorError;
use crate::processor::Processor;
use crate::store::StateStore;
use crate::types::{NodeId, NodeKind};

/// A resolved topology node.
///
/// Created by [`TopologyBuilder::build`](crate::TopologyBuilder::build) and
/// owned by the resulting [`Topology`](crate::Topology). Parents, children and
/// stores are fixed once the build returns.
pub struct ProcessorNode {
  id: NodeId,
  name: String,
  kind: NodeKind,
  processor: Box<dyn Processor>,
  parents: Vec<NodeId>,
  children: Vec<NodeId>,
  stores: HashMap<String, Arc<dyn StateStore>>,
}

impl ProcessorNode {
  pub(crate) fn new(
    id: NodeId,
    name: impl Into<String>,
    kind: NodeKind,
    processor: Box<dyn Processor>,
  ) -> Self {
    Self {
      id,
      name: name.into(),
      kind,
      processor,
      parents: Vec::new(),
      children: Vec::new(),
      stores: HashMap::new(),
    }
  }

  pub fn id(&self) -> NodeId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> NodeKind {
    self.kind
  }

  /// Nodes this node reads from, in declaration order.
  pub fn parents(&self) -> &[NodeId] {
    &self.parents
  }

  /// Nodes that declared this node as an input, in resolution order.
  pub fn children(&self) -> &[NodeId] {
    &self.children
  }

  /// Stores attached to this node, by store name.
  pub fn stores(&self) -> &HashMap<String, Arc<dyn StateStore>> {
    &self.stores
  }

  pub fn store(&self, name: &str) -> Option<&Arc<dyn StateStore>> {
    self.stores.get(name)
  }

  pub(crate) fn add_parent(&mut self, parent: NodeId) {
    self.parents.push(parent);
  }

  pub(crate) fn add_child(&mut self, child: NodeId) {
    if !self.children.contains(&child) {
      self.children.push(child);
    }
  }

  pub(crate) fn attach_store(&mut self, name: impl Into<String>, store: Arc<dyn StateStore>) {
    self.stores.insert(name.into(), store);
  }

  /// Binds `ctx` to this node and runs the processor's setup.
  #[instrument(level = "trace", skip(self, ctx), fields(node = %self.name))]
  pub fn initialise(&self, ctx: &ProcessorContext<'_>) -> Result<(), ProcessorError> {
    let bound = ctx.bind(self);
    self.processor.initialise(&self.name, &bound)
  }

  /// Binds `ctx` to this node and hands it one record.
  #[instrument(level = "trace", skip(self, ctx, key, value), fields(node = %self.name))]
  pub fn process(
    &self,
    ctx: &ProcessorContext<'_>,
    key: Bytes,
    value: Bytes,
  ) -> Result<(), ProcessorError> {
    let bound = ctx.bind(self);
    self.processor.process(&bound, key, value)
  }

  /// Binds `ctx` to this node and runs time-driven work.
  #[instrument(level = "trace", skip(self, ctx), fields(node = %self.name))]
  pub fn punctuate(
    &self,
    ctx: &ProcessorContext<'_>,
    timestamp: DateTime<Utc>,
  ) -> Result<(), ProcessorError> {
    let bound = ctx.bind(self);
    self.processor.punctuate(&bound, timestamp)
  }
}

impl fmt::Debug for ProcessorNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut stores: Vec<&str> = self.stores.keys().map(String::as_str).collect();
    stores.sort_unstable();
    f.debug_struct("ProcessorNode")
      .field("id", &self.id)
      .field("name", &self.name)
      .field("kind", &self.kind)
      .field("parents", &self.parents)
      .field("children", &self.children)
      .field("stores", &stores)
      .finish_non_exhaustive()
  }
}
