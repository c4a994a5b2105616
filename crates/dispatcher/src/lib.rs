//! # Dispatcher
//!
//! The trigger-to-template dispatch engine.
//!
//! Responsibilities:
//! - Build the template registry from screened configuration and bind its
//!   trigger variables against the state provider
//! - Match change notifications against every template's trigger set
//! - Drive each matched template's sink, strictly sequentially
//! - Own the stream/queue sink lifecycle and the shared scratch buffer

pub mod binder;
pub mod dispatch;
pub mod metrics;
pub mod registry;
pub mod scratch;
pub mod sinks;

pub use contracts::{OutputSink, SharedRenderer};
pub use dispatch::{DispatchStats, Dispatcher};
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use registry::{Registry, Template, TriggerVar};
pub use scratch::{shared_scratch, ScratchBuffer, SharedScratch, DEFAULT_SCRATCH_CAPACITY};
pub use sinks::{QueueSink, Sink, StreamSink};
