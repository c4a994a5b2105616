//! Complete watch pipeline demo.
//!
//! Builds a template on disk, wires the memory provider through the registry
//! and dispatcher, fires a few variable updates, and prints the rendered
//! target after each pass.
//!
//! Run with: cargo run --bin watch_pipeline

use config_loader::{ConfigFormat, ConfigLoader};
use contracts::StateProvider;
use dispatcher::{shared_scratch, Dispatcher, Registry};
use provider::{MemoryProvider, SubstRenderer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let dir = std::env::temp_dir().join("tmpld-demo");
    std::fs::create_dir_all(&dir)?;

    let template_path = dir.join("status.tmpl");
    std::fs::write(
        &template_path,
        "host: {{/demo/hostname}}\naddr: {{/demo/addr}}\n",
    )?;
    let target_path = dir.join("status.txt");

    let config = format!(
        r#"
[[templates]]
trigger = ["/demo/hostname", "/demo/addr"]
template = "{}"
target = "{}"
"#,
        template_path.display(),
        target_path.display()
    );

    let (specs, _faults) = ConfigLoader::load_from_str(&config, ConfigFormat::Toml)?;

    let store = MemoryProvider::new();
    store.define("/demo/hostname", "demo-host");
    store.define("/demo/addr", "0.0.0.0");

    let mut conn = store.connect();
    let scratch = shared_scratch(dispatcher::DEFAULT_SCRATCH_CAPACITY);
    let registry = Registry::from_plan(&specs, &mut conn, &scratch);
    let mut engine = Dispatcher::new(registry, SubstRenderer::shared(store.clone()));

    info!(templates = engine.registry().len(), "Demo pipeline ready");

    for (name, value) in [
        ("/demo/addr", "10.0.0.7"),
        ("/demo/hostname", "edge-router"),
        ("/demo/addr", "10.0.0.8"),
    ] {
        store.set(name, value);
        let changed = conn.wait_for_next_change().await?;
        engine.dispatch(changed).await?;

        println!(
            "--- after {name} = {value} ---\n{}",
            std::fs::read_to_string(&target_path)?
        );
    }

    conn.disconnect();
    info!("Demo finished");
    Ok(())
}
