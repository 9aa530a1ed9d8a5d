//! Messages a processor context hands to the runtime.

use std::time::Duration;

use bytes::Bytes;

/// Fire-and-forget request from a processor callback to the runtime.
///
/// Signals from one context travel on a single ordered channel; a `Commit`
/// covers every `Send` and `Forward` emitted before it on that channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeSignal {
  /// Write a record to an output topic.
  Send {
    node: String,
    topic: String,
    key: Bytes,
    value: Bytes,
  },
  /// Deliver a record to every child of `node`.
  Forward { node: String, key: Bytes, value: Bytes },
  /// Call `punctuate` on `node` every `interval`.
  Schedule { node: String, interval: Duration },
  /// Record consumed positions and produced output as one checkpoint.
  Commit { node: String },
}

impl RuntimeSignal {
  /// Name of the node whose callback emitted the signal.
  pub fn node(&self) -> &str {
    match self {
      RuntimeSignal::Send { node, .. }
      | RuntimeSignal::Forward { node, .. }
      | RuntimeSignal::Schedule { node, .. }
      | RuntimeSignal::Commit { node } => node,
    }
  }
}
