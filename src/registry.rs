//! Named processor suppliers used to resolve topology descriptions.

use std::collections::HashMap;
use std::rc::Rc;

use crate::processor::Processor;
use crate::processors::PassThroughProcessor;

type SharedSupplier = Rc<dyn Fn() -> Box<dyn Processor>>;

/// Maps processor type names (the `type` field of a description) to
/// suppliers.
#[derive(Default, Clone)]
pub struct ProcessorRegistry {
  suppliers: HashMap<String, SharedSupplier>,
}

impl ProcessorRegistry {
  /// An empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry knowing the built-in `pass_through` type.
  pub fn with_defaults() -> Self {
    let mut registry = Self::new();
    registry.register("pass_through", || PassThroughProcessor);
    registry
  }

  /// Registers (or replaces) the supplier for `kind`.
  pub fn register<F, P>(&mut self, kind: impl Into<String>, supplier: F) -> &mut Self
  where
    F: Fn() -> P + 'static,
    P: Processor + 'static,
  {
    self.suppliers.insert(
      kind.into(),
      Rc::new(move || Box::new(supplier()) as Box<dyn Processor>),
    );
    self
  }

  pub fn contains(&self, kind: &str) -> bool {
    self.suppliers.contains_key(kind)
  }

  pub(crate) fn supplier(&self, kind: &str) -> Option<SharedSupplier> {
    self.suppliers.get(kind).cloned()
  }

  /// Registered type names, sorted.
  pub fn kinds(&self) -> Vec<&str> {
    let mut kinds: Vec<&str> = self.suppliers.keys().map(String::as_str).collect();
    kinds.sort_unstable();
    kinds
  }
}
