//! Role of a node in a topology.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of a node in a topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
  /// Entry node reading from one or more topics.
  Source,
  /// Intermediate node with at least one parent.
  Processor,
  /// Terminal node writing to exactly one topic.
  Sink,
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeKind::Source => write!(f, "source"),
      NodeKind::Processor => write!(f, "processor"),
      NodeKind::Sink => write!(f, "sink"),
    }
  }
}
