//! OutputSink trait - per-template output lifecycle interface
//!
//! Defines the abstract interface for sinks.

use crate::{ContractError, SharedRenderer};

/// Output lifecycle trait
///
/// A sink owns its target handle and decides when to open and close it:
/// lazy open on first render, optional keep-open across renders, close on
/// failure. All sink implementations must implement this trait.
#[trait_variant::make(OutputSink: Send)]
pub trait LocalOutputSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Whether the target handle is currently open
    fn is_open(&self) -> bool;

    /// Render the template once and deliver the output to the target
    ///
    /// # Errors
    /// Returns open, render, or send errors (should include the target)
    async fn render(&mut self, renderer: &SharedRenderer) -> Result<(), ContractError>;

    /// Close the target handle (best effort)
    async fn close(&mut self);
}
