//! `run` command implementation.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::service::{Daemon, DaemonConfig};

/// Execute the `run` command
pub async fn run_daemon(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and screen the watch plan; a malformed document is fatal here,
    // before anything else starts.
    let specs = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    info!(
        templates = specs.len(),
        scratch_size = args.scratch_size,
        "Configuration loaded"
    );

    if specs.is_empty() {
        warn!("No usable template entries - the daemon will only wait for shutdown");
    }

    let config = DaemonConfig {
        specs,
        scratch_capacity: args.scratch_size,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    };

    let daemon = Daemon::new(config);

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!("Starting daemon...");

    let summary = daemon.run(shutdown_signal).await?;
    summary.print_summary();

    info!("tmpld finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
