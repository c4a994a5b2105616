//! Opaque variable handle

use std::fmt;

/// Identifier for a resolved trigger variable.
///
/// Only meaningful to the provider connection that issued it. Configuration
/// carries names; a handle exists only after successful resolution, which is
/// why unresolved triggers hold `Option<VarHandle>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarHandle(u32);

impl VarHandle {
    /// Wrap a raw provider id
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw provider id
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var#{}", self.0)
    }
}
