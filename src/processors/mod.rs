//! Built-in processors for topology entry, exit and pass-through nodes.

mod pass_through;
mod sink;
mod source;

pub use pass_through::PassThroughProcessor;
pub use sink::SinkProcessor;
pub use source::SourceProcessor;
