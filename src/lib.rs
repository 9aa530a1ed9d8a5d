//! # streamweave-topology
//!
//! Declarative processor topologies for stream processing.
//!
//! ## Architecture
//!
//! - [`TopologyBuilder`] collects source, processor, sink and state-store
//!   registrations and resolves them into a validated [`Topology`].
//! - [`Topology`] owns every [`ProcessorNode`] and [`StateStore`]; it is
//!   immutable once built and safe to share between runtime threads.
//! - [`ProcessorContext`] is what a [`Processor`] sees during a callback: it
//!   forwards and sends records, schedules punctuation, commits, and reaches
//!   only the stores wired to its own node.
//! - [`TopologyDescription`] is the JSON form of a topology, resolved against a
//!   [`ProcessorRegistry`].
//!
//! The runtime that feeds records through a topology lives elsewhere; it reads
//! [`RuntimeSignal`]s from the channel created by [`signal_channel`].

pub mod builder;
pub mod context;
#[cfg(test)]
mod context_test;
pub mod description;
pub mod description_io;
pub mod error;
pub mod node;
pub mod processor;
pub mod processors;
pub mod registry;
pub mod store;
pub mod topology;
pub mod types;

#[cfg(test)]
mod test_support;

pub use builder::TopologyBuilder;
pub use context::{ProcessorContext, SignalReceiver, SignalSender, signal_channel};
pub use description::TopologyDescription;
pub use error::{ContextError, ProcessorError, StoreError, TopologyError};
pub use node::ProcessorNode;
pub use processor::Processor;
pub use processors::{PassThroughProcessor, SinkProcessor, SourceProcessor};
pub use registry::ProcessorRegistry;
pub use store::{InMemoryKeyValueStore, StateStore, StoreFactory};
pub use topology::Topology;
pub use types::{NodeId, NodeKind, NodeSummary, RuntimeSignal, TopologySummary};
