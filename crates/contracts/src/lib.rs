//! # Contracts
//!
//! Frozen interface contracts, defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Handle Model
//! - A trigger variable is addressed by name in configuration and by an opaque
//!   `VarHandle` after resolution against the state provider
//! - Handles are connection-scoped and never recycled within a process

mod error;
mod handle;
mod plan;
mod provider;
mod render;
mod sink;

pub use error::*;
pub use handle::VarHandle;
pub use plan::*;
pub use provider::*;
pub use render::{Renderer, SharedRenderer};
pub use sink::*;
