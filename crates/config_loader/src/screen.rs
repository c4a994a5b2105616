//! Entry screening
//!
//! Screening rules:
//! - `trigger` must be present and non-empty
//! - `template` must be present
//! - `target` must be present
//!
//! A failing entry is logged and skipped; the remaining entries keep
//! processing. A document where every entry fails screening yields an empty
//! spec list, not an error.

use contracts::{TemplateEntry, TemplateSpec, WatchPlan};
use serde::Serialize;
use tracing::warn;

/// A screened-out entry and the reason it was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFault {
    /// Index of the entry in the document
    pub index: usize,
    /// Why the entry was skipped
    pub reason: String,
}

/// Screen a parsed watch plan into usable specs and skipped entries
pub fn screen(plan: WatchPlan) -> (Vec<TemplateSpec>, Vec<EntryFault>) {
    let mut specs = Vec::with_capacity(plan.templates.len());
    let mut faults = Vec::new();

    for (index, entry) in plan.templates.into_iter().enumerate() {
        match screen_entry(entry) {
            Ok(spec) => specs.push(spec),
            Err(reason) => {
                warn!(entry = index, reason = %reason, "Skipping template entry");
                faults.push(EntryFault { index, reason });
            }
        }
    }

    (specs, faults)
}

fn screen_entry(entry: TemplateEntry) -> Result<TemplateSpec, String> {
    if entry.trigger.is_empty() {
        return Err("no trigger variables declared".to_string());
    }

    let Some(template) = entry.template else {
        return Err("missing 'template'".to_string());
    };

    let Some(target) = entry.target else {
        return Err("missing 'target'".to_string());
    };

    Ok(TemplateSpec {
        trigger: entry.trigger,
        template,
        target,
        kind: entry.kind,
        keep_open: entry.keep_open,
        append: entry.append,
    })
}
