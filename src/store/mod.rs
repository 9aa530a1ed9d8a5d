//! State-store capability and factories.
//!
//! A store is created once per topology build and shared (`Arc`) between the
//! topology and every node it is attached to. Processors reach it only through
//! a bound [`ProcessorContext`](crate::ProcessorContext).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

mod in_memory;

pub use in_memory::InMemoryKeyValueStore;

/// A named, shareable state store.
///
/// The read/write API belongs to the concrete store; the topology only hands
/// out handles. Locking is the implementation's concern.
pub trait StateStore: Any + Send + Sync {
  /// Name the store was registered under.
  fn name(&self) -> &str;

  /// Upcast used for typed downcasts of a shared handle.
  fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Creates a store instance given the registered store name.
pub struct StoreFactory(Box<dyn Fn(&str) -> Arc<dyn StateStore>>);

impl StoreFactory {
  pub fn new<F, S>(create: F) -> Self
  where
    F: Fn(&str) -> S + 'static,
    S: StateStore,
  {
    Self(Box::new(move |name| Arc::new(create(name)) as Arc<dyn StateStore>))
  }

  /// Factory for [`InMemoryKeyValueStore`].
  pub fn in_memory() -> Self {
    Self::new(|name: &str| InMemoryKeyValueStore::new(name))
  }

  pub(crate) fn create(&self, name: &str) -> Arc<dyn StateStore> {
    (self.0)(name)
  }
}

impl fmt::Debug for StoreFactory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StoreFactory").finish_non_exhaustive()
  }
}
