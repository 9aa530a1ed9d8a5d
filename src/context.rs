//! # Processor context
//!
//! The handle a processor uses while one of its callbacks runs. A context is
//! either unbound (freshly created by the runtime) or bound to exactly one
//! [`ProcessorNode`]. Binding produces a new value borrowing the node, so the
//! binding ends when that value is dropped at the end of the callback:
//!
//! ```text
//! Unbound --bind(node)--> Bound(node) --drop--> Unbound
//! ```
//!
//! `send`, `forward`, `schedule` and `commit` do not act directly. They push a
//! [`RuntimeSignal`] onto an unbounded channel read by the runtime, so none of
//! them block. Signals from one context arrive in emission order; the runtime
//! treats a `Commit` as covering every `Send`/`Forward` emitted before it.
//!
//! `get_store` only returns stores attached to the bound node at build time,
//! even when another node carries a store with the same name.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::error::ContextError;
use crate::node::ProcessorNode;
use crate::store::StateStore;
use crate::types::RuntimeSignal;

/// Sending half of the runtime signal channel.
pub type SignalSender = mpsc::UnboundedSender<RuntimeSignal>;

/// Receiving half of the runtime signal channel, owned by the runtime.
pub type SignalReceiver = mpsc::UnboundedReceiver<RuntimeSignal>;

/// Creates the channel a runtime hands to [`ProcessorContext::new`].
pub fn signal_channel() -> (SignalSender, SignalReceiver) {
  mpsc::unbounded_channel()
}

/// Per-callback capability handle binding a processor invocation to its node.
#[derive(Clone)]
pub struct ProcessorContext<'a> {
  signals: SignalSender,
  current: Option<&'a ProcessorNode>,
}

impl ProcessorContext<'static> {
  /// Creates an unbound context emitting to `signals`.
  pub fn new(signals: SignalSender) -> Self {
    Self {
      signals,
      current: None,
    }
  }
}

impl<'a> ProcessorContext<'a> {
  /// Returns a context bound to `node`, sharing this context's signal channel.
  pub fn bind<'b>(&self, node: &'b ProcessorNode) -> ProcessorContext<'b> {
    ProcessorContext {
      signals: self.signals.clone(),
      current: Some(node),
    }
  }

  /// The node this context is bound to, if any.
  pub fn current_node(&self) -> Option<&'a ProcessorNode> {
    self.current
  }

  pub fn is_bound(&self) -> bool {
    self.current.is_some()
  }

  fn node(&self) -> Result<&'a ProcessorNode, ContextError> {
    self.current.ok_or(ContextError::NoCurrentNode)
  }

  fn emit(&self, node: &ProcessorNode, signal: RuntimeSignal) -> Result<(), ContextError> {
    self
      .signals
      .send(signal)
      .map_err(|_| ContextError::RuntimeClosed {
        node: node.name().to_string(),
      })
  }

  /// Queues a record for delivery to `topic`.
  #[instrument(level = "trace", skip(self, key, value))]
  pub fn send(&self, topic: &str, key: Bytes, value: Bytes) -> Result<(), ContextError> {
    let node = self.node()?;
    self.emit(
      node,
      RuntimeSignal::Send {
        node: node.name().to_string(),
        topic: topic.to_string(),
        key,
        value,
      },
    )
  }

  /// Queues a record for delivery to every child of the current node.
  #[instrument(level = "trace", skip(self, key, value))]
  pub fn forward(&self, key: Bytes, value: Bytes) -> Result<(), ContextError> {
    let node = self.node()?;
    self.emit(
      node,
      RuntimeSignal::Forward {
        node: node.name().to_string(),
        key,
        value,
      },
    )
  }

  /// Asks the runtime to punctuate the current node every `interval`.
  ///
  /// Whether a second request replaces or adds to the first is up to the
  /// runtime.
  #[instrument(level = "trace", skip(self))]
  pub fn schedule(&self, interval: Duration) -> Result<(), ContextError> {
    let node = self.node()?;
    if interval.is_zero() {
      return Err(ContextError::InvalidInterval {
        node: node.name().to_string(),
      });
    }
    self.emit(
      node,
      RuntimeSignal::Schedule {
        node: node.name().to_string(),
        interval,
      },
    )
  }

  /// Asks the runtime to checkpoint consumed positions together with every
  /// record sent or forwarded since the previous commit.
  #[instrument(level = "trace", skip(self))]
  pub fn commit(&self) -> Result<(), ContextError> {
    let node = self.node()?;
    self.emit(
      node,
      RuntimeSignal::Commit {
        node: node.name().to_string(),
      },
    )
  }

  /// Returns the store `name` if it is attached to the current node.
  #[instrument(level = "trace", skip(self))]
  pub fn get_store(&self, name: &str) -> Result<Arc<dyn StateStore>, ContextError> {
    let node = self.node()?;
    debug!(store = name, node = node.name(), "searching for store");
    node
      .store(name)
      .cloned()
      .ok_or_else(|| ContextError::StoreNotFound {
        store: name.to_string(),
        node: node.name().to_string(),
      })
  }

  /// Like [`get_store`](Self::get_store), downcast to the concrete store type.
  pub fn get_store_as<S: StateStore>(&self, name: &str) -> Result<Arc<S>, ContextError> {
    self
      .get_store(name)?
      .into_any()
      .downcast::<S>()
      .map_err(|_| ContextError::StoreTypeMismatch {
        store: name.to_string(),
        expected: type_name::<S>(),
      })
  }
}

impl fmt::Debug for ProcessorContext<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ProcessorContext")
      .field("current", &self.current.map(ProcessorNode::name))
      .finish()
  }
}
