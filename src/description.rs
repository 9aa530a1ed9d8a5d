//! Declarative (JSON) form of a topology.
//!
//! ```json
//! {
//!   "sources": [{ "name": "src", "topics": ["topic-in"] }],
//!   "processors": [{ "name": "proc", "type": "pass_through", "parents": ["src"] }],
//!   "sinks": [{ "name": "snk", "topic": "topic-out", "parents": ["proc"] }],
//!   "stores": [{ "name": "counts", "type": "in_memory", "attach_to": ["proc"] }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::builder::TopologyBuilder;
use crate::error::TopologyError;
use crate::registry::ProcessorRegistry;
use crate::store::StoreFactory;

/// Store type backed by [`InMemoryKeyValueStore`](crate::InMemoryKeyValueStore).
pub const IN_MEMORY_STORE: &str = "in_memory";

fn default_store_type() -> String {
  IN_MEMORY_STORE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceDescription {
  pub name: String,
  pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorDescription {
  pub name: String,
  /// Key into the [`ProcessorRegistry`].
  #[serde(rename = "type")]
  pub kind: String,
  pub parents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkDescription {
  pub name: String,
  pub topic: String,
  pub parents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreDescription {
  pub name: String,
  #[serde(rename = "type", default = "default_store_type")]
  pub kind: String,
  #[serde(default)]
  pub attach_to: Vec<String>,
}

/// Declarative form of a topology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologyDescription {
  #[serde(default)]
  pub sources: Vec<SourceDescription>,
  #[serde(default)]
  pub processors: Vec<ProcessorDescription>,
  #[serde(default)]
  pub sinks: Vec<SinkDescription>,
  #[serde(default)]
  pub stores: Vec<StoreDescription>,
}

fn as_strs(names: &[String]) -> Vec<&str> {
  names.iter().map(String::as_str).collect()
}

impl TopologyDescription {
  /// Registers every described node and store on a new builder, in list order.
  ///
  /// Processor types are looked up in `registry`; unknown processor or store
  /// types fail here, graph-shape problems fail in
  /// [`TopologyBuilder::build`].
  #[instrument(level = "trace", skip(self, registry))]
  pub fn to_builder(&self, registry: &ProcessorRegistry) -> Result<TopologyBuilder, TopologyError> {
    let mut builder = TopologyBuilder::new();
    for source in &self.sources {
      builder = builder.source(&source.name, &source.topics)?;
    }
    for processor in &self.processors {
      let supplier =
        registry
          .supplier(&processor.kind)
          .ok_or_else(|| TopologyError::UnknownProcessorType {
            name: processor.name.clone(),
            kind: processor.kind.clone(),
          })?;
      builder = builder.processor(
        &processor.name,
        move || supplier(),
        &as_strs(&processor.parents),
      )?;
    }
    for sink in &self.sinks {
      builder = builder.sink(&sink.name, &sink.topic, &as_strs(&sink.parents))?;
    }
    for store in &self.stores {
      let factory = match store.kind.as_str() {
        IN_MEMORY_STORE => StoreFactory::in_memory(),
        _ => {
          return Err(TopologyError::UnknownStoreType {
            name: store.name.clone(),
            kind: store.kind.clone(),
          });
        }
      };
      builder = builder.state_store(&store.name, factory, &as_strs(&store.attach_to))?;
    }
    Ok(builder)
  }
}
