//! Tests for `ProcessorContext`.

use std::time::Duration;

use bytes::Bytes;

use crate::builder::TopologyBuilder;
use crate::context::{ProcessorContext, signal_channel};
use crate::error::ContextError;
use crate::processors::PassThroughProcessor;
use crate::store::{InMemoryKeyValueStore, StateStore, StoreFactory};
use crate::test_support::drain;
use crate::topology::Topology;
use crate::types::RuntimeSignal;

fn topology() -> Topology {
  TopologyBuilder::new()
    .source("src", ["in"])
    .unwrap()
    .processor("n", || PassThroughProcessor, &["src"])
    .unwrap()
    .processor("m", || PassThroughProcessor, &["src"])
    .unwrap()
    .state_store("A", StoreFactory::in_memory(), &["n"])
    .unwrap()
    .state_store("B", StoreFactory::in_memory(), &["m"])
    .unwrap()
    .build()
    .unwrap()
}

#[test]
fn unbound_get_store_fails_with_no_current_node() {
  let (tx, _rx) = signal_channel();
  let ctx = ProcessorContext::new(tx);
  assert!(!ctx.is_bound());
  assert_eq!(
    ctx.get_store("A").err(),
    Some(ContextError::NoCurrentNode)
  );
}

#[test]
fn bound_get_store_returns_attached_store() {
  let t = topology();
  let (tx, _rx) = signal_channel();
  let ctx = ProcessorContext::new(tx);
  let bound = ctx.bind(t.node("n").unwrap());
  let store = bound.get_store("A").unwrap();
  assert_eq!(store.name(), "A");
  assert!(std::sync::Arc::ptr_eq(&store, t.state_store("A").unwrap()));
}

#[test]
fn store_attached_elsewhere_is_not_found() {
  let t = topology();
  let (tx, _rx) = signal_channel();
  let bound = ProcessorContext::new(tx).bind(t.node("n").unwrap());
  assert_eq!(
    bound.get_store("B").err(),
    Some(ContextError::StoreNotFound {
      store: "B".to_string(),
      node: "n".to_string(),
    })
  );
}

#[test]
fn binding_does_not_change_the_original_context() {
  let t = topology();
  let (tx, _rx) = signal_channel();
  let ctx = ProcessorContext::new(tx);
  {
    let bound = ctx.bind(t.node("n").unwrap());
    assert_eq!(bound.current_node().unwrap().name(), "n");
  }
  assert!(ctx.current_node().is_none());
}

#[test]
fn get_store_as_downcasts() {
  let t = topology();
  let (tx, _rx) = signal_channel();
  let bound = ProcessorContext::new(tx).bind(t.node("n").unwrap());
  let store = bound.get_store_as::<InMemoryKeyValueStore>("A").unwrap();
  store
    .put(Bytes::from_static(b"k"), Bytes::from_static(b"v"))
    .unwrap();
  let again = bound.get_store_as::<InMemoryKeyValueStore>("A").unwrap();
  assert_eq!(again.get(b"k").unwrap(), Some(Bytes::from_static(b"v")));
}

struct OtherStore;

impl StateStore for OtherStore {
  fn name(&self) -> &str {
    "other"
  }

  fn into_any(self: std::sync::Arc<Self>) -> std::sync::Arc<dyn std::any::Any + Send + Sync> {
    self
  }
}

#[test]
fn get_store_as_wrong_type_fails() {
  let t = topology();
  let (tx, _rx) = signal_channel();
  let bound = ProcessorContext::new(tx).bind(t.node("n").unwrap());
  let r = bound.get_store_as::<OtherStore>("A");
  assert!(matches!(r, Err(ContextError::StoreTypeMismatch { store, .. }) if store == "A"));
}

#[test]
fn signals_are_queued_in_order() {
  let t = topology();
  let (tx, mut rx) = signal_channel();
  let bound = ProcessorContext::new(tx).bind(t.node("n").unwrap());
  bound
    .send("out", Bytes::from_static(b"k"), Bytes::from_static(b"v"))
    .unwrap();
  bound
    .forward(Bytes::from_static(b"k"), Bytes::from_static(b"w"))
    .unwrap();
  bound.schedule(Duration::from_secs(5)).unwrap();
  bound.commit().unwrap();

  let signals = drain(&mut rx);
  assert_eq!(
    signals,
    vec![
      RuntimeSignal::Send {
        node: "n".to_string(),
        topic: "out".to_string(),
        key: Bytes::from_static(b"k"),
        value: Bytes::from_static(b"v"),
      },
      RuntimeSignal::Forward {
        node: "n".to_string(),
        key: Bytes::from_static(b"k"),
        value: Bytes::from_static(b"w"),
      },
      RuntimeSignal::Schedule {
        node: "n".to_string(),
        interval: Duration::from_secs(5),
      },
      RuntimeSignal::Commit {
        node: "n".to_string()
      },
    ]
  );
  assert!(signals.iter().all(|s| s.node() == "n"));
}

#[test]
fn unbound_signalling_fails() {
  let (tx, mut rx) = signal_channel();
  let ctx = ProcessorContext::new(tx);
  assert_eq!(ctx.commit().err(), Some(ContextError::NoCurrentNode));
  assert_eq!(
    ctx
      .send("out", Bytes::new(), Bytes::new())
      .err(),
    Some(ContextError::NoCurrentNode)
  );
  assert!(drain(&mut rx).is_empty());
}

#[test]
fn zero_interval_is_rejected() {
  let t = topology();
  let (tx, mut rx) = signal_channel();
  let bound = ProcessorContext::new(tx).bind(t.node("m").unwrap());
  assert_eq!(
    bound.schedule(Duration::ZERO).err(),
    Some(ContextError::InvalidInterval {
      node: "m".to_string()
    })
  );
  assert!(drain(&mut rx).is_empty());
}

#[test]
fn closed_runtime_is_reported() {
  let t = topology();
  let (tx, rx) = signal_channel();
  drop(rx);
  let bound = ProcessorContext::new(tx).bind(t.node("n").unwrap());
  assert_eq!(
    bound.commit().err(),
    Some(ContextError::RuntimeClosed {
      node: "n".to_string()
    })
  );
}

#[tokio::test]
async fn runtime_receives_signals_asynchronously() {
  let t = topology();
  let (tx, mut rx) = signal_channel();
  let bound = ProcessorContext::new(tx).bind(t.node("n").unwrap());
  bound.commit().unwrap();
  drop(bound);
  let signal = rx.recv().await.unwrap();
  assert_eq!(signal.node(), "n");
}
