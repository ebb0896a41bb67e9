//! Domain types shared across the workspace

pub mod invocation;
pub mod resource;

pub use invocation::{PipelineInvocation, Readiness, TriggerReceipt};
pub use resource::{ResourceKey, ResourceKind};
