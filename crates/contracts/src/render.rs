//! Renderer trait - template rendering engine seam

use std::io::{Read, Write};
use std::sync::Arc;

use crate::ContractError;

/// Template rendering engine
///
/// Substitutes variable values into template text: reads the whole source,
/// writes the rendered output to the destination. The substitution syntax is
/// owned by the implementation, not by this contract.
pub trait Renderer: Send + Sync {
    /// Render one template source into one destination
    ///
    /// # Errors
    /// Returns a render error (should name the failing input)
    fn render(
        &self,
        source: &mut dyn Read,
        dest: &mut dyn Write,
    ) -> Result<(), ContractError>;
}

/// Shared renderer handle passed through the dispatch path
pub type SharedRenderer = Arc<dyn Renderer>;
