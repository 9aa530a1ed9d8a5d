//! Dense index of a node inside its topology.

use std::fmt;

/// Dense index of a node inside its topology.
///
/// Ids follow resolution order: sources first, then processors, then sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
  pub fn index(self) -> usize {
    self.0
  }
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}
