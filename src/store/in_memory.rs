//! Key-value store held in process memory.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use bytes::Bytes;

use super::StateStore;
use crate::error::StoreError;

/// Key-value store held in process memory, ordered by key.
#[derive(Debug)]
pub struct InMemoryKeyValueStore {
  name: String,
  entries: RwLock<BTreeMap<Bytes, Bytes>>,
}

impl InMemoryKeyValueStore {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      entries: RwLock::new(BTreeMap::new()),
    }
  }

  fn poisoned(&self) -> StoreError {
    StoreError::Poisoned {
      name: self.name.clone(),
    }
  }

  pub fn get(&self, key: &[u8]) -> Result<Option<Bytes>, StoreError> {
    let entries = self.entries.read().map_err(|_| self.poisoned())?;
    Ok(entries.get(key).cloned())
  }

  /// Stores `value` under `key`, returning the previous value.
  pub fn put(&self, key: Bytes, value: Bytes) -> Result<Option<Bytes>, StoreError> {
    let mut entries = self.entries.write().map_err(|_| self.poisoned())?;
    Ok(entries.insert(key, value))
  }

  pub fn delete(&self, key: &[u8]) -> Result<Option<Bytes>, StoreError> {
    let mut entries = self.entries.write().map_err(|_| self.poisoned())?;
    Ok(entries.remove(key))
  }

  pub fn len(&self) -> Result<usize, StoreError> {
    let entries = self.entries.read().map_err(|_| self.poisoned())?;
    Ok(entries.len())
  }

  pub fn is_empty(&self) -> Result<bool, StoreError> {
    Ok(self.len()? == 0)
  }
}

impl StateStore for InMemoryKeyValueStore {
  fn name(&self) -> &str {
    &self.name
  }

  fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
    self
  }
}
