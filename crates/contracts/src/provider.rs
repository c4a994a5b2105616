//! StateProvider trait - variable server connection interface
//!
//! Abstracts the external state provider that stores variable values,
//! resolves names to handles, and delivers change notifications.

use crate::{ContractError, VarHandle};

/// State provider connection trait
///
/// One value of this trait represents one live connection. The wait call is
/// the sole suspension point of the dispatch loop; everything else is a
/// request/response exchange with the provider.
#[trait_variant::make(StateProvider: Send)]
pub trait LocalStateProvider {
    /// Resolve a variable name to a handle
    ///
    /// Returns `None` when the provider has no variable under that name.
    fn resolve_by_name(&self, name: &str) -> Option<VarHandle>;

    /// Request change notifications for a resolved handle
    ///
    /// # Errors
    /// Returns a notification error when the provider rejects the request.
    fn register_change_notification(&mut self, handle: VarHandle) -> Result<(), ContractError>;

    /// Wait until the next subscribed variable changes
    ///
    /// # Errors
    /// Returns `ProviderConnection` when the notification stream is gone;
    /// the dispatch loop treats that as terminal.
    async fn wait_for_next_change(&mut self) -> Result<VarHandle, ContractError>;

    /// Release the connection (best effort, idempotent)
    fn disconnect(&mut self);
}
