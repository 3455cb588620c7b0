//! Probe driver: one client per connection, batched by the orchestrator.
pub mod client;
pub mod orchestrator;

pub use client::{probe, ProbeError, ProbeStage};
pub use orchestrator::{run, ProbeReport, ProbeTarget};
