//! `validate` command implementation.

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::ValidateArgs;

/// Execute the `validate` command
///
/// Skipped entries are reported but are not an error: the daemon would run
/// with the remaining entries, which is exactly what this command predicts.
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let result = config_loader::ConfigLoader::load_with_faults(&args.config);

    match result {
        Ok((specs, faults)) => {
            if args.json {
                let output = json!({
                    "valid": true,
                    "templates": specs.len(),
                    "skipped": faults,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!(
                    "Configuration OK: {} template(s), {} skipped",
                    specs.len(),
                    faults.len()
                );
                for fault in &faults {
                    println!("  - entry {}: {}", fault.index, fault.reason);
                }
            }
            Ok(())
        }
        Err(e) => {
            if args.json {
                let output = json!({
                    "valid": false,
                    "error": e.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            Err(e).with_context(|| {
                format!("Configuration invalid: {}", args.config.display())
            })
        }
    }
}
