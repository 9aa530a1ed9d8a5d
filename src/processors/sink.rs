//! Terminal processor: writes every record it receives to one topic.

use bytes::Bytes;
use tracing::trace;

use crate::context::ProcessorContext;
use crate::error::ProcessorError;
use crate::processor::Processor;

/// Processor behind every sink node.
#[derive(Debug, Clone)]
pub struct SinkProcessor {
  topic: String,
}

impl SinkProcessor {
  pub fn new(topic: impl Into<String>) -> Self {
    Self {
      topic: topic.into(),
    }
  }

  pub fn topic(&self) -> &str {
    &self.topic
  }
}

impl Processor for SinkProcessor {
  fn process(
    &self,
    ctx: &ProcessorContext<'_>,
    key: Bytes,
    value: Bytes,
  ) -> Result<(), ProcessorError> {
    trace!(topic = %self.topic, "sink sending record");
    ctx.send(&self.topic, key, value)?;
    Ok(())
  }
}
