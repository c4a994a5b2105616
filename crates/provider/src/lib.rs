//! # Provider
//!
//! In-process implementation of the state-provider and renderer seams.
//!
//! Responsibilities:
//! - `MemoryProvider`: variable store with per-connection change-notification
//!   fan-out, behind the `StateProvider` contract
//! - `SubstRenderer`: `{{name}}` substitution against the live store
//! - update feed: drives `NAME=VALUE` lines from any buffered reader into the
//!   store (the daemon wires stdin to it)

mod feed;
mod memory;
mod subst;

pub use feed::drive_updates;
pub use memory::{MemoryConnection, MemoryProvider};
pub use subst::SubstRenderer;
