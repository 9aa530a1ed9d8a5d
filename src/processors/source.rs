//! Entry processor: hands records read from its topics to the node's children.

use bytes::Bytes;
use tracing::trace;

use crate::context::ProcessorContext;
use crate::error::ProcessorError;
use crate::processor::Processor;

/// Processor behind every source node.
#[derive(Debug, Clone)]
pub struct SourceProcessor {
  topics: Vec<String>,
}

impl SourceProcessor {
  pub fn new(topics: Vec<String>) -> Self {
    Self { topics }
  }

  /// Topics this source subscribes to.
  pub fn topics(&self) -> &[String] {
    &self.topics
  }
}

impl Processor for SourceProcessor {
  fn process(
    &self,
    ctx: &ProcessorContext<'_>,
    key: Bytes,
    value: Bytes,
  ) -> Result<(), ProcessorError> {
    trace!(topics = ?self.topics, "source forwarding record");
    ctx.forward(key, value)?;
    Ok(())
  }
}
