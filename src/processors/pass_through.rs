//! Forwards every record unchanged. Registered as `pass_through` in
//! [`ProcessorRegistry::with_defaults`](crate::ProcessorRegistry::with_defaults).

use bytes::Bytes;

use crate::context::ProcessorContext;
use crate::error::ProcessorError;
use crate::processor::Processor;

#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughProcessor;

impl Processor for PassThroughProcessor {
  fn process(
    &self,
    ctx: &ProcessorContext<'_>,
    key: Bytes,
    value: Bytes,
  ) -> Result<(), ProcessorError> {
    ctx.forward(key, value)?;
    Ok(())
  }
}
