//! Processors and helpers shared by unit tests.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::context::{ProcessorContext, SignalReceiver};
use crate::error::ProcessorError;
use crate::processor::Processor;
use crate::types::RuntimeSignal;

/// Shared log of callbacks seen by [`Recorder`] instances.
pub(crate) type CallLog = Arc<Mutex<Vec<String>>>;

/// Records every callback, then forwards records unchanged.
pub(crate) struct Recorder {
  pub(crate) log: CallLog,
}

impl Processor for Recorder {
  fn initialise(&self, name: &str, ctx: &ProcessorContext<'_>) -> Result<(), ProcessorError> {
    let bound = ctx.current_node().map(|n| n.name().to_string());
    self
      .log
      .lock()
      .unwrap()
      .push(format!("init:{}:{}", name, bound.unwrap_or_default()));
    Ok(())
  }

  fn process(
    &self,
    ctx: &ProcessorContext<'_>,
    key: Bytes,
    value: Bytes,
  ) -> Result<(), ProcessorError> {
    self.log.lock().unwrap().push(format!(
      "process:{}:{}",
      String::from_utf8_lossy(&key),
      String::from_utf8_lossy(&value)
    ));
    ctx.forward(key, value)?;
    Ok(())
  }

  fn punctuate(
    &self,
    _ctx: &ProcessorContext<'_>,
    timestamp: DateTime<Utc>,
  ) -> Result<(), ProcessorError> {
    self
      .log
      .lock()
      .unwrap()
      .push(format!("punctuate:{}", timestamp.timestamp()));
    Ok(())
  }
}

/// Fails every record with a fixed message.
pub(crate) struct Failing;

impl Processor for Failing {
  fn process(
    &self,
    _ctx: &ProcessorContext<'_>,
    _key: Bytes,
    _value: Bytes,
  ) -> Result<(), ProcessorError> {
    Err("boom".into())
  }
}

/// Collects every signal currently queued on `rx`.
pub(crate) fn drain(rx: &mut SignalReceiver) -> Vec<RuntimeSignal> {
  let mut signals = Vec::new();
  while let Ok(signal) = rx.try_recv() {
    signals.push(signal);
  }
  signals
}
