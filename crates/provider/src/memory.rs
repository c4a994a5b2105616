//! In-memory state provider
//!
//! Variable store plus change-notification fan-out. Each connection carries
//! its own subscription set and notification channel; `set` delivers the
//! changed handle to every connection subscribed to it.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use contracts::{ContractError, StateProvider, VarHandle};
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Default)]
struct Store {
    by_name: HashMap<String, VarHandle>,
    values: HashMap<VarHandle, String>,
    next_handle: u32,
    next_watcher: u64,
    watchers: Vec<Watcher>,
}

struct Watcher {
    id: u64,
    subscriptions: HashSet<VarHandle>,
    tx: mpsc::UnboundedSender<VarHandle>,
}

impl Store {
    fn handle_for(&mut self, name: &str) -> VarHandle {
        if let Some(handle) = self.by_name.get(name) {
            return *handle;
        }
        let handle = VarHandle::new(self.next_handle);
        self.next_handle += 1;
        self.by_name.insert(name.to_string(), handle);
        handle
    }
}

/// Shared in-memory variable store
#[derive(Clone, Default)]
pub struct MemoryProvider {
    store: Arc<Mutex<Store>>,
}

impl MemoryProvider {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a variable without notifying anyone
    ///
    /// Returns the handle; defining an existing name keeps its handle and
    /// current value.
    pub fn define(&self, name: &str, value: &str) -> VarHandle {
        let mut store = self.store.lock().unwrap();
        let handle = store.handle_for(name);
        store.values.entry(handle).or_insert_with(|| value.to_string());
        handle
    }

    /// Update a variable's value and notify subscribed connections
    ///
    /// An unknown name is defined implicitly.
    pub fn set(&self, name: &str, value: &str) -> VarHandle {
        let mut store = self.store.lock().unwrap();
        let handle = store.handle_for(name);
        store.values.insert(handle, value.to_string());

        // Dead connections (receiver dropped without disconnect) are pruned
        // on the way through.
        store.watchers.retain(|watcher| {
            if !watcher.subscriptions.contains(&handle) {
                return true;
            }
            watcher.tx.send(handle).is_ok()
        });

        handle
    }

    /// Current value of a variable
    pub fn get(&self, name: &str) -> Option<String> {
        let store = self.store.lock().unwrap();
        let handle = store.by_name.get(name)?;
        store.values.get(handle).cloned()
    }

    /// Open a connection to the store
    pub fn connect(&self) -> MemoryConnection {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut store = self.store.lock().unwrap();
        let id = store.next_watcher;
        store.next_watcher += 1;
        store.watchers.push(Watcher {
            id,
            subscriptions: HashSet::new(),
            tx,
        });
        debug!(connection = id, "Provider connection opened");

        MemoryConnection {
            store: Arc::clone(&self.store),
            watcher: id,
            rx,
        }
    }
}

/// One live connection to a [`MemoryProvider`]
pub struct MemoryConnection {
    store: Arc<Mutex<Store>>,
    watcher: u64,
    rx: mpsc::UnboundedReceiver<VarHandle>,
}

impl StateProvider for MemoryConnection {
    fn resolve_by_name(&self, name: &str) -> Option<VarHandle> {
        self.store.lock().unwrap().by_name.get(name).copied()
    }

    fn register_change_notification(&mut self, handle: VarHandle) -> Result<(), ContractError> {
        let mut store = self.store.lock().unwrap();
        if !store.values.contains_key(&handle) {
            return Err(ContractError::notification(
                handle.to_string(),
                "unknown handle",
            ));
        }

        let watcher_id = self.watcher;
        let watcher = store
            .watchers
            .iter_mut()
            .find(|w| w.id == watcher_id)
            .ok_or_else(|| ContractError::provider_connection("connection is closed"))?;
        watcher.subscriptions.insert(handle);
        Ok(())
    }

    async fn wait_for_next_change(&mut self) -> Result<VarHandle, ContractError> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| ContractError::provider_connection("notification stream closed"))
    }

    fn disconnect(&mut self) {
        let mut store = self.store.lock().unwrap();
        store.watchers.retain(|w| w.id != self.watcher);
        debug!(connection = self.watcher, "Provider connection closed");
    }
}
