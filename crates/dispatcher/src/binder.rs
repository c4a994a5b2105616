//! Trigger notification binder
//!
//! Resolves each trigger name against the state provider and registers a
//! change notification for the handle. A trigger that cannot be resolved
//! stays unbound and can never fire; its template keeps its other triggers.

use contracts::{ContractError, StateProvider};
use tracing::{debug, error};

use crate::registry::TriggerVar;

/// Bind every trigger of a template, aggregating the status
///
/// Always attempts all triggers. Returns Ok only when every trigger bound;
/// otherwise the last failure.
pub fn bind_all<P: StateProvider>(
    provider: &mut P,
    triggers: &mut [TriggerVar],
) -> Result<(), ContractError> {
    let mut outcome = Ok(());

    for trigger in triggers.iter_mut() {
        if let Err(e) = bind(provider, trigger) {
            error!(trigger = trigger.name(), error = %e, "Cannot bind trigger variable");
            outcome = Err(e);
        }
    }

    outcome
}

/// Bind one trigger: resolve the name, then request change notifications
pub fn bind<P: StateProvider>(
    provider: &mut P,
    trigger: &mut TriggerVar,
) -> Result<(), ContractError> {
    let Some(handle) = provider.resolve_by_name(trigger.name()) else {
        return Err(ContractError::trigger_not_found(trigger.name()));
    };

    // The handle is cached on resolution; a failed registration leaves the
    // trigger resolved but without notifications.
    trigger.bind(handle);

    provider
        .register_change_notification(handle)
        .map_err(|e| ContractError::notification(trigger.name(), e.to_string()))?;

    debug!(trigger = trigger.name(), %handle, "Trigger bound");
    Ok(())
}
