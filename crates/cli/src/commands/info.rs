//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::TargetKind;

use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let (specs, faults) = config_loader::ConfigLoader::load_with_faults(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&specs)?);
        return Ok(());
    }

    println!("\n=== Configuration Summary ===\n");
    println!("Templates ({}):", specs.len());
    for spec in &specs {
        let kind = match spec.kind {
            TargetKind::Fd => "fd",
            TargetKind::Mq => "mq",
        };
        println!(
            "  - {} -> {} ({})",
            spec.template.display(),
            spec.target.display(),
            kind
        );
        println!("      triggers: {}", spec.trigger.join(", "));
        if spec.keep_open || spec.append {
            println!(
                "      flags: {}{}",
                if spec.keep_open { "keep_open " } else { "" },
                if spec.append { "append" } else { "" }
            );
        }
    }

    if !faults.is_empty() {
        println!("\nSkipped entries ({}):", faults.len());
        for fault in &faults {
            println!("  - entry {}: {}", fault.index, fault.reason);
        }
    }

    println!();
    Ok(())
}
