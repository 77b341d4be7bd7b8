// State management module
//
// This module provides the StateManager which wraps AppState with thread-safe access
// using Arc<RwLock<T>>, persists every write and emits change events for GUI updates.

use crate::metrics::Metrics;
use crate::models::AppState;
use crate::persistence::{self, KeyValueStore, MemoryStore};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when state is written
///
/// These events notify interested parties (primarily the GUI) about writes
/// without requiring them to poll the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateChange {
    /// The counter was assigned. Emitted on every write, including writes
    /// that store the value already held.
    CountChanged { old: i64, new: i64 },
}

/// Observable, self-persisting state holder
///
/// This is the central state management component that:
/// - Hydrates [`AppState`] from a [`KeyValueStore`] on construction
/// - Provides thread-safe access via `Arc<RwLock<T>>`
/// - Writes the new state back to the store on every mutation
/// - Emits [`StateChange`] events through a tokio broadcast channel
///
/// Persistence is best-effort: store failures are logged and counted in
/// [`Metrics`], never returned.
///
/// # Usage
///
/// - [`read()`](Self::read) / [`count()`](Self::count) for reading state
/// - [`increment()`](Self::increment), [`decrement()`](Self::decrement),
///   [`set_count()`](Self::set_count) or [`update()`](Self::update) for writes
/// - [`subscribe()`](Self::subscribe) for listening to writes
///
/// # Related Types
///
/// - [`crate::persistence`]: Encoding and store access
/// - [`crate::ui::controller::GuiController`]: Primary consumer of state events
pub struct StateManager {
    /// The application state protected by RwLock for thread-safe access
    state: Arc<RwLock<AppState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,

    /// Where every write is persisted
    store: Arc<dyn KeyValueStore>,

    metrics: Arc<Metrics>,
}

impl StateManager {
    /// Create a StateManager hydrated from `store`
    ///
    /// Falls back to the default state if the store holds nothing usable.
    /// The broadcast channel buffers 100 events per subscriber.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let initial = persistence::load_state(store.as_ref());
        let (state_tx, _) = broadcast::channel(100);

        tracing::debug!("State manager hydrated with count={}", initial.count);

        Self {
            state: Arc::new(RwLock::new(initial)),
            state_tx,
            store,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Create a StateManager backed by a fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Get a copy of the current state
    pub fn snapshot(&self) -> AppState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let is_positive = state_manager.read(|state| state.count > 0);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Current counter value
    pub fn count(&self) -> i64 {
        self.read(|state| state.count)
    }

    /// Write the state, persist it and notify observers
    ///
    /// This is the only write path. It:
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Persists the new state (while still holding the write lock, so the
    ///    store always sees writes in order)
    /// 4. Emits a [`StateChange`] to every current subscriber
    ///
    /// # Returns
    /// The events that were emitted
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut AppState),
    {
        let changes = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let old_state = state.clone();

            update_fn(&mut state);

            let written = persistence::save_state(self.store.as_ref(), &state);
            self.metrics.record_persist(written);

            self.detect_changes(&old_state, &state)
        };

        self.metrics.record_state_update();

        for change in &changes {
            // No receivers is fine; the window may not be up yet
            match self.state_tx.send(change.clone()) {
                Ok(_) => self.metrics.record_state_broadcast(),
                Err(_) => self.metrics.record_state_broadcast_error(),
            }
        }

        changes
    }

    /// Subscribe to state change events
    ///
    /// Returns a receiver that will get notified of all future writes.
    /// Multiple subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    fn detect_changes(&self, old: &AppState, new: &AppState) -> Vec<StateChange> {
        vec![StateChange::CountChanged {
            old: old.count,
            new: new.count,
        }]
    }

    /// Assign the counter
    pub fn set_count(&self, count: i64) -> Vec<StateChange> {
        self.update(|state| state.count = count)
    }

    /// Add one to the counter
    pub fn increment(&self) -> Vec<StateChange> {
        self.update(AppState::increment)
    }

    /// Subtract one from the counter
    pub fn decrement(&self) -> Vec<StateChange> {
        self.update(AppState::decrement)
    }

    /// Shared metrics, also used by the UI bridge
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::in_memory()
    }
}

// Clones share the same state, channel, store and metrics
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
            store: Arc::clone(&self.store),
            metrics: Arc::clone(&self.metrics),
        }
    }
}
