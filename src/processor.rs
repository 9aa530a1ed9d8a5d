//! # Processor capability
//!
//! Every node in a topology wraps one [`Processor`]. Sources, sinks and user
//! processors all implement the same three callbacks:
//!
//! - `initialise` runs once per node before any record flows,
//! - `process` runs once per incoming record,
//! - `punctuate` runs on the cadence requested through
//!   [`ProcessorContext::schedule`], independent of record arrival.
//!
//! Each callback receives a [`ProcessorContext`] already bound to the node
//! being invoked. Through it the processor forwards records to its children,
//! sends records to topics, schedules punctuation, commits progress and reads
//! the state stores wired to its node.
//!
//! ## Example
//!
//! ```rust
//! use bytes::Bytes;
//! use streamweave_topology::{Processor, ProcessorContext, ProcessorError};
//!
//! struct Uppercase;
//!
//! impl Processor for Uppercase {
//!   fn process(
//!     &self,
//!     ctx: &ProcessorContext<'_>,
//!     key: Bytes,
//!     value: Bytes,
//!   ) -> Result<(), ProcessorError> {
//!     ctx.forward(key, Bytes::from(value.to_ascii_uppercase()))?;
//!     Ok(())
//!   }
//! }
//! ```

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::context::ProcessorContext;
use crate::error::ProcessorError;

/// A unit of record processing owned by one topology node.
///
/// Callbacks take `&self` so a built topology can be shared across runtime
/// threads; processors that keep state use interior mutability or a state
/// store.
pub trait Processor: Send + Sync {
  /// Called once before records flow. `name` is the owning node's name.
  fn initialise(&self, name: &str, ctx: &ProcessorContext<'_>) -> Result<(), ProcessorError> {
    let _ = (name, ctx);
    Ok(())
  }

  /// Called once per incoming record.
  fn process(
    &self,
    ctx: &ProcessorContext<'_>,
    key: Bytes,
    value: Bytes,
  ) -> Result<(), ProcessorError>;

  /// Called by the runtime's time-driven scheduler.
  fn punctuate(
    &self,
    ctx: &ProcessorContext<'_>,
    timestamp: DateTime<Utc>,
  ) -> Result<(), ProcessorError> {
    let _ = (ctx, timestamp);
    Ok(())
  }
}

impl<P: Processor + ?Sized> Processor for Box<P> {
  fn initialise(&self, name: &str, ctx: &ProcessorContext<'_>) -> Result<(), ProcessorError> {
    (**self).initialise(name, ctx)
  }

  fn process(
    &self,
    ctx: &ProcessorContext<'_>,
    key: Bytes,
    value: Bytes,
  ) -> Result<(), ProcessorError> {
    (**self).process(ctx, key, value)
  }

  fn punctuate(
    &self,
    ctx: &ProcessorContext<'_>,
    timestamp: DateTime<Utc>,
  ) -> Result<(), ProcessorError> {
    (**self).punctuate(ctx, timestamp)
  }
}
