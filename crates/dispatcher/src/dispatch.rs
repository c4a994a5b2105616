//! Dispatcher - notification matching and the dispatch loop
//!
//! One task does all the waiting and rendering: block on the provider's
//! next-change call, run one dispatch pass for the changed handle, repeat.
//! No two renders ever execute concurrently.

use std::future::Future;

use contracts::{ContractError, SharedRenderer, StateProvider, VarHandle};
use metrics::counter;
use tracing::{debug, error, info, instrument, warn};

use crate::registry::Registry;

/// Counters for one dispatch-loop run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Change notifications received
    pub notifications: u64,
    /// Successful renders
    pub renders: u64,
    /// Failed render attempts
    pub failures: u64,
}

/// Matches changed handles against the registry and drives each matched
/// template's sink
pub struct Dispatcher {
    registry: Registry,
    renderer: SharedRenderer,
    stats: DispatchStats,
}

impl Dispatcher {
    /// Create a dispatcher over a built registry
    pub fn new(registry: Registry, renderer: SharedRenderer) -> Self {
        Self {
            registry,
            renderer,
            stats: DispatchStats::default(),
        }
    }

    /// The registry being dispatched
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Counters so far
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// One dispatch pass for a changed handle
    ///
    /// A template matches when any of its triggers holds the handle and is
    /// rendered exactly once per pass, even if several of its triggers hold
    /// it. Every template is attempted regardless of earlier failures; the
    /// last failure becomes the aggregate result.
    #[instrument(name = "dispatch_pass", skip(self), fields(%changed))]
    pub async fn dispatch(&mut self, changed: VarHandle) -> Result<(), ContractError> {
        self.stats.notifications += 1;
        counter!("tmpld_notifications_total").increment(1);
        let mut outcome = Ok(());

        let renderer = &self.renderer;
        let stats = &mut self.stats;

        for template in self.registry.templates_mut() {
            if !template.is_triggered_by(changed) {
                continue;
            }

            match template.render(renderer).await {
                Ok(()) => {
                    stats.renders += 1;
                    counter!("tmpld_renders_total", "target" => template.sink_name().to_string())
                        .increment(1);
                }
                Err(e) => {
                    stats.failures += 1;
                    counter!(
                        "tmpld_render_failures_total",
                        "target" => template.sink_name().to_string()
                    )
                    .increment(1);
                    error!(
                        template = %template.template_path().display(),
                        target = template.sink_name(),
                        error = %e,
                        "Template render failed"
                    );
                    outcome = Err(e);
                }
            }
        }

        outcome
    }

    /// Run the dispatch loop until the notification stream ends or the
    /// shutdown future resolves
    ///
    /// A shutdown request interrupts immediately: an in-flight dispatch pass
    /// is abandoned, not finished. Sinks are closed best effort before
    /// returning; disconnecting the provider is the caller's job.
    pub async fn run<P, F>(mut self, provider: &mut P, shutdown: F) -> DispatchStats
    where
        P: StateProvider,
        F: Future<Output = ()>,
    {
        info!(templates = self.registry.len(), "Dispatch loop started");
        tokio::pin!(shutdown);

        loop {
            let changed = tokio::select! {
                _ = &mut shutdown => {
                    warn!("Shutdown requested, stopping dispatch loop");
                    break;
                }
                next = provider.wait_for_next_change() => match next {
                    Ok(handle) => handle,
                    Err(e) => {
                        error!(error = %e, "Notification stream ended");
                        break;
                    }
                },
            };

            debug!(%changed, "Variable changed");

            tokio::select! {
                _ = &mut shutdown => {
                    warn!("Shutdown requested, abandoning in-flight dispatch pass");
                    break;
                }
                result = self.dispatch(changed) => {
                    if let Err(e) = result {
                        warn!(error = %e, "Dispatch pass completed with failures");
                    }
                }
            }
        }

        self.registry.close_all().await;

        info!(
            notifications = self.stats.notifications,
            renders = self.stats.renders,
            failures = self.stats.failures,
            "Dispatch loop stopped"
        );
        self.stats
    }
}
