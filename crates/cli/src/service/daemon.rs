//! Daemon orchestration - coordinates all components.
//!
//! Wiring order: scratch buffer, provider connection, registry (binding
//! triggers as it is built), stdin update feed, then the dispatch loop until
//! a shutdown signal. Teardown runs synchronously after the loop exits, never
//! inside a signal handler.

use std::future::Future;
use std::time::Instant;

use anyhow::Result;
use contracts::{StateProvider, TemplateSpec};
use dispatcher::{shared_scratch, Dispatcher, Registry};
use provider::{MemoryProvider, SubstRenderer};
use tokio::io::BufReader;
use tracing::{debug, info};

use super::RunSummary;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Screened template specs
    pub specs: Vec<TemplateSpec>,

    /// Scratch buffer capacity for queue targets
    pub scratch_capacity: usize,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main daemon orchestrator
pub struct Daemon {
    config: DaemonConfig,
}

impl Daemon {
    /// Create a new daemon with the given configuration
    pub fn new(config: DaemonConfig) -> Self {
        Self { config }
    }

    /// Run the daemon until the shutdown future resolves
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<RunSummary> {
        let start_time = Instant::now();

        // Initialize Metrics (optional)
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }

        // The variable store and its renderer. Trigger names are defined up
        // front so resolution succeeds before the first update arrives.
        let store = MemoryProvider::new();
        for spec in &self.config.specs {
            for name in &spec.trigger {
                store.define(name, "");
            }
        }

        let mut conn = store.connect();

        // Build the registry, binding triggers as templates are added.
        let scratch = shared_scratch(self.config.scratch_capacity);
        let registry = Registry::from_plan(&self.config.specs, &mut conn, &scratch);

        info!(
            templates = registry.len(),
            scratch_capacity = self.config.scratch_capacity,
            "Registry ready"
        );

        let dispatcher = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

        // Variable updates arrive as NAME=VALUE lines on stdin.
        let feed_store = store.clone();
        let feed = tokio::spawn(async move {
            let stdin = BufReader::new(tokio::io::stdin());
            let applied = provider::drive_updates(stdin, &feed_store).await;
            debug!(applied, "Stdin feed ended");
        });

        let stats = dispatcher.run(&mut conn, shutdown).await;

        // Synchronous teardown after the loop: the provider connection is
        // released here, and the scratch buffer goes with the last sink.
        conn.disconnect();
        feed.abort();

        Ok(RunSummary {
            stats,
            duration: start_time.elapsed(),
        })
    }
}
