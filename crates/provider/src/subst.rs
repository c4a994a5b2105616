//! Substitution renderer
//!
//! Replaces `{{name}}` markers with the variable's current value from the
//! store. Unknown names render as the empty string so a template never fails
//! on a variable the provider has not seen yet.

use std::io::{Read, Write};
use std::sync::Arc;

use contracts::{ContractError, Renderer, SharedRenderer};
use regex::{Captures, Regex};
use tracing::trace;

use crate::MemoryProvider;

/// Renderer bound to a [`MemoryProvider`] store
pub struct SubstRenderer {
    provider: MemoryProvider,
    pattern: Regex,
}

impl SubstRenderer {
    /// Create a renderer over the given store
    pub fn new(provider: MemoryProvider) -> Self {
        Self {
            provider,
            pattern: Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}").expect("substitution pattern"),
        }
    }

    /// Shared handle for the dispatch path
    pub fn shared(provider: MemoryProvider) -> SharedRenderer {
        Arc::new(Self::new(provider))
    }
}

impl Renderer for SubstRenderer {
    fn render(
        &self,
        source: &mut dyn Read,
        dest: &mut dyn Write,
    ) -> Result<(), ContractError> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;

        let rendered = self.pattern.replace_all(&text, |caps: &Captures| {
            let name = &caps[1];
            match self.provider.get(name) {
                Some(value) => value,
                None => {
                    trace!(variable = name, "Unknown variable rendered as empty");
                    String::new()
                }
            }
        });

        dest.write_all(rendered.as_bytes())?;
        Ok(())
    }
}
