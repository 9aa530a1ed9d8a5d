//! Plain data types shared by the builder, the topology and the context.

mod node_id;
mod node_kind;
mod runtime_signal;
mod topology_summary;

pub use node_id::NodeId;
pub use node_kind::NodeKind;
pub use runtime_signal::RuntimeSignal;
pub use topology_summary::{NodeSummary, TopologySummary};
