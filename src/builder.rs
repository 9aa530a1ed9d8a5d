//! # TopologyBuilder
//!
//! Fluent, two-phase construction of a [`Topology`].
//!
//! Registration methods only record what to build. Checks that need nothing
//! but the call's own arguments (empty topic or input lists, store factory and
//! store name) fail immediately. Everything that depends on other nodes is
//! checked by [`TopologyBuilder::build`], which resolves sources, then
//! processors, then sinks, each against the nodes resolved before it. A node
//! can therefore only name already-resolved nodes as inputs, which keeps every
//! buildable topology acyclic.
//!
//! ## Example
//!
//! ```rust
//! use streamweave_topology::{PassThroughProcessor, StoreFactory, TopologyBuilder};
//!
//! # fn main() -> Result<(), streamweave_topology::TopologyError> {
//! let topology = TopologyBuilder::new()
//!   .source("src", ["topic-in"])?
//!   .processor("proc", || PassThroughProcessor, &["src"])?
//!   .sink("snk", "topic-out", &["proc"])?
//!   .state_store("counts", StoreFactory::in_memory(), &["proc"])?
//!   .build()?;
//!
//! assert_eq!(topology.len(), 3);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::error::TopologyError;
use crate::node::ProcessorNode;
use crate::processor::Processor;
use crate::processors::{SinkProcessor, SourceProcessor};
use crate::store::StoreFactory;
use crate::topology::Topology;
use crate::types::{NodeId, NodeKind};

type ProcessorSupplier = Box<dyn Fn() -> Box<dyn Processor>>;

/// Deferred node registration, resolved by `build`.
enum NodeSpec {
  Source {
    name: String,
    topics: Vec<String>,
  },
  Processor {
    name: String,
    supplier: ProcessorSupplier,
    parents: Vec<String>,
  },
  Sink {
    name: String,
    topic: String,
    parents: Vec<String>,
  },
}

impl NodeSpec {
  fn name(&self) -> &str {
    match self {
      NodeSpec::Source { name, .. }
      | NodeSpec::Processor { name, .. }
      | NodeSpec::Sink { name, .. } => name,
    }
  }

  fn kind(&self) -> NodeKind {
    match self {
      NodeSpec::Source { .. } => NodeKind::Source,
      NodeSpec::Processor { .. } => NodeKind::Processor,
      NodeSpec::Sink { .. } => NodeKind::Sink,
    }
  }

  fn parents(&self) -> &[String] {
    match self {
      NodeSpec::Source { .. } => &[],
      NodeSpec::Processor { parents, .. } | NodeSpec::Sink { parents, .. } => parents,
    }
  }

  fn instantiate(&self) -> Box<dyn Processor> {
    match self {
      NodeSpec::Source { topics, .. } => Box::new(SourceProcessor::new(topics.clone())),
      NodeSpec::Processor { supplier, .. } => supplier(),
      NodeSpec::Sink { topic, .. } => Box::new(SinkProcessor::new(topic.clone())),
    }
  }
}

/// Deferred store registration, resolved after all nodes.
struct StoreSpec {
  name: String,
  factory: StoreFactory,
  attach_to: Vec<String>,
}

/// Partial name table filled while `build` resolves node registrations.
#[derive(Default)]
struct NodeTable {
  nodes: Vec<ProcessorNode>,
  index: HashMap<String, NodeId>,
}

impl NodeTable {
  fn resolve(&mut self, spec: &NodeSpec) -> Result<NodeId, TopologyError> {
    let name = spec.name();
    let processor = spec.instantiate();

    if self.index.contains_key(name) {
      return Err(TopologyError::DuplicateNode {
        name: name.to_string(),
      });
    }
    if spec.parents().iter().any(|p| p == name) {
      return Err(TopologyError::SelfInput {
        name: name.to_string(),
      });
    }

    let mut parents: Vec<NodeId> = Vec::new();
    let mut missing: Vec<String> = Vec::new();
    for parent in spec.parents() {
      match self.index.get(parent) {
        Some(id) if !parents.contains(id) => parents.push(*id),
        Some(_) => {}
        None if !missing.contains(parent) => missing.push(parent.clone()),
        None => {}
      }
    }
    if !missing.is_empty() {
      return Err(TopologyError::MissingInputs {
        name: name.to_string(),
        missing,
      });
    }

    let id = NodeId(self.nodes.len());
    let mut node = ProcessorNode::new(id, name, spec.kind(), processor);
    for parent in &parents {
      node.add_parent(*parent);
      self.nodes[parent.index()].add_child(id);
    }
    self.nodes.push(node);
    self.index.insert(name.to_string(), id);
    debug!(node = name, kind = %spec.kind(), parents = ?spec.parents(), "resolved node");
    Ok(id)
  }
}

fn owned(names: &[&str]) -> Vec<String> {
  names.iter().map(|n| n.to_string()).collect()
}

/// Builder for [`Topology`] with a fluent API.
#[derive(Default)]
pub struct TopologyBuilder {
  topics: Vec<String>,
  sources: Vec<NodeSpec>,
  processors: Vec<NodeSpec>,
  sinks: Vec<NodeSpec>,
  stores: Vec<StoreSpec>,
}

impl TopologyBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a source node reading from `topics`.
  ///
  /// The topics join the topology-wide subscription list. Fails immediately if
  /// `topics` is empty; a name clash is reported by [`build`](Self::build).
  pub fn source<I, T>(mut self, name: impl Into<String>, topics: I) -> Result<Self, TopologyError>
  where
    I: IntoIterator<Item = T>,
    T: Into<String>,
  {
    let name = name.into();
    let topics: Vec<String> = topics.into_iter().map(Into::into).collect();
    if topics.is_empty() {
      return Err(TopologyError::EmptyTopics { name });
    }
    self.topics.extend(topics.iter().cloned());
    self.sources.push(NodeSpec::Source { name, topics });
    Ok(self)
  }

  /// Registers a processor node fed by `parents`.
  ///
  /// `supplier` is called once during [`build`](Self::build) to create the
  /// node's processor. Fails immediately if `parents` is empty.
  pub fn processor<F, P>(
    mut self,
    name: impl Into<String>,
    supplier: F,
    parents: &[&str],
  ) -> Result<Self, TopologyError>
  where
    F: Fn() -> P + 'static,
    P: Processor + 'static,
  {
    let name = name.into();
    if parents.is_empty() {
      return Err(TopologyError::NoInputs { name });
    }
    self.processors.push(NodeSpec::Processor {
      name,
      supplier: Box::new(move || Box::new(supplier()) as Box<dyn Processor>),
      parents: owned(parents),
    });
    Ok(self)
  }

  /// Registers a terminal sink node writing to `topic`, fed by `parents`.
  ///
  /// Fails immediately if `parents` is empty.
  pub fn sink(
    mut self,
    name: impl Into<String>,
    topic: impl Into<String>,
    parents: &[&str],
  ) -> Result<Self, TopologyError> {
    let name = name.into();
    if parents.is_empty() {
      return Err(TopologyError::NoInputs { name });
    }
    self.sinks.push(NodeSpec::Sink {
      name,
      topic: topic.into(),
      parents: owned(parents),
    });
    Ok(self)
  }

  /// Registers a state store and the nodes it is attached to.
  ///
  /// Fails immediately if `factory` is `None` or `name` is already registered.
  /// Unknown `attach_to` names are reported by [`build`](Self::build).
  pub fn state_store(
    mut self,
    name: impl Into<String>,
    factory: impl Into<Option<StoreFactory>>,
    attach_to: &[&str],
  ) -> Result<Self, TopologyError> {
    let name = name.into();
    let Some(factory) = factory.into() else {
      return Err(TopologyError::MissingStoreFactory { name });
    };
    if self.stores.iter().any(|s| s.name == name) {
      return Err(TopologyError::DuplicateStore { name });
    }
    self.stores.push(StoreSpec {
      name,
      factory,
      attach_to: owned(attach_to),
    });
    Ok(self)
  }

  /// Topics subscribed so far, in registration order.
  pub fn topics(&self) -> &[String] {
    &self.topics
  }

  /// Resolves every registration into a [`Topology`].
  ///
  /// Order: all sources, then all processors, then all sinks, then stores. The
  /// first failure aborts the build.
  #[instrument(level = "trace", skip(self))]
  pub fn build(self) -> Result<Topology, TopologyError> {
    info!(
      sources = self.sources.len(),
      processors = self.processors.len(),
      sinks = self.sinks.len(),
      stores = self.stores.len(),
      "building topology"
    );
    let mut table = NodeTable::default();
    let sources = resolve_all(&mut table, &self.sources)?;
    let processors = resolve_all(&mut table, &self.processors)?;
    let sinks = resolve_all(&mut table, &self.sinks)?;

    let mut state_stores = HashMap::new();
    for spec in &self.stores {
      let mut targets = Vec::with_capacity(spec.attach_to.len());
      for target in &spec.attach_to {
        let id = table
          .index
          .get(target)
          .copied()
          .ok_or_else(|| TopologyError::UnknownStoreTarget {
            store: spec.name.clone(),
            node: target.clone(),
          })?;
        targets.push(id);
      }
      let store = spec.factory.create(&spec.name);
      for id in targets {
        table.nodes[id.index()].attach_store(spec.name.clone(), Arc::clone(&store));
      }
      debug!(store = %spec.name, attach_to = ?spec.attach_to, "created store");
      state_stores.insert(spec.name.clone(), store);
    }

    let topology = Topology {
      nodes: table.nodes,
      index: table.index,
      sources,
      processors,
      sinks,
      state_stores,
      topics: self.topics,
    };
    info!(
      nodes = topology.len(),
      stores = topology.state_stores().len(),
      "topology built"
    );
    Ok(topology)
  }
}

fn resolve_all(table: &mut NodeTable, specs: &[NodeSpec]) -> Result<Vec<NodeId>, TopologyError> {
  specs.iter().map(|spec| table.resolve(spec)).collect()
}
