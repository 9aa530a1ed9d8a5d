//! Error types for topology construction and processor context access.

use thiserror::Error;

/// Error raised while registering or building a topology.
///
/// Every variant is structural: the registration is invalid and retrying the
/// same call cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
  /// Two nodes (of any kind) were registered under the same name.
  #[error("a node with the name '{name}' was already added to this topology")]
  DuplicateNode { name: String },

  /// A processor or sink listed itself among its inputs.
  #[error("node '{name}' cannot have itself as an input")]
  SelfInput { name: String },

  /// Declared inputs were never registered, or are resolved after this node.
  #[error("input(s) {} to node '{name}' do not yet exist", .missing.join(", "))]
  MissingInputs { name: String, missing: Vec<String> },

  /// A processor or sink was registered without any input.
  #[error("node '{name}' must have a minimum of 1 input")]
  NoInputs { name: String },

  /// A source was registered without any topic to read from.
  #[error("source '{name}' must subscribe to at least one topic")]
  EmptyTopics { name: String },

  /// A store name was registered twice.
  #[error("store with name '{name}' already exists")]
  DuplicateStore { name: String },

  /// A store was registered without a factory.
  #[error("store '{name}' cannot be registered without a factory")]
  MissingStoreFactory { name: String },

  /// A store was attached to a node that is not part of the topology.
  #[error("store '{store}' is attached to unknown node '{node}'")]
  UnknownStoreTarget { store: String, node: String },

  /// A topology description named a processor type the registry does not know.
  #[error("processor '{name}' has unknown type '{kind}'")]
  UnknownProcessorType { name: String, kind: String },

  /// A topology description named a store type that cannot be created.
  #[error("store '{name}' has unknown type '{kind}'")]
  UnknownStoreType { name: String, kind: String },
}

/// Error raised by [`ProcessorContext`](crate::ProcessorContext) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
  /// The context is not bound to a node (used outside a processor callback).
  #[error("access of context from unknown node")]
  NoCurrentNode,

  /// The store is not attached to the node currently bound to the context.
  #[error("store '{store}' is not found in node '{node}'")]
  StoreNotFound { store: String, node: String },

  /// The store exists on the current node but has a different concrete type.
  #[error("store '{store}' is not a {expected}")]
  StoreTypeMismatch { store: String, expected: &'static str },

  /// `schedule` was asked for a zero-length interval.
  #[error("node '{node}' cannot schedule a zero punctuation interval")]
  InvalidInterval { node: String },

  /// The runtime dropped its end of the signal channel.
  #[error("runtime is no longer receiving signals from node '{node}'")]
  RuntimeClosed { node: String },
}

/// Error raised by a state store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
  /// A writer panicked while holding the store lock.
  #[error("store '{name}' lock is poisoned")]
  Poisoned { name: String },
}

/// Error returned from processor callbacks.
///
/// Context and store errors convert into it with `?`; node wrappers pass it
/// through untouched.
pub type ProcessorError = Box<dyn std::error::Error + Send + Sync>;
