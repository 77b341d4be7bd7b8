use serde::{Deserialize, Serialize};

/// Key under which [`AppState`] is stored in the key-value store.
pub const PERSISTENCE_KEY: &str = "AppState";

/// Single source of truth for the counter.
///
/// # Thread Safety
///
/// `AppState` is wrapped in `Arc<RwLock<AppState>>` by [`crate::state::StateManager`].
/// Never mutate it directly - go through [`StateManager`](crate::state::StateManager)
/// so that observers are notified and the new value is persisted:
/// - [`read()`](crate::state::StateManager::read) for read-only access
/// - [`update()`](crate::state::StateManager::update) for mutations with change events
///
/// # Related Types
///
/// - [`crate::state::StateChange`]: Event types for state mutations
/// - [`crate::persistence`]: Encodes this struct under [`PERSISTENCE_KEY`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub count: i64,
}

impl AppState {
    pub fn new(count: i64) -> Self {
        Self { count }
    }

    /// Add one to the counter, wrapping at `i64::MAX`.
    pub fn increment(&mut self) {
        self.count = self.count.wrapping_add(1);
    }

    /// Subtract one from the counter, wrapping at `i64::MIN`.
    pub fn decrement(&mut self) {
        self.count = self.count.wrapping_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_count_is_zero() {
        assert_eq!(AppState::default().count, 0);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut state = AppState::new(41);
        state.increment();
        assert_eq!(state.count, 42);

        state.decrement();
        state.decrement();
        assert_eq!(state.count, 40);
    }

    #[test]
    fn test_counter_wraps_at_bounds() {
        let mut state = AppState::new(i64::MAX);
        state.increment();
        assert_eq!(state.count, i64::MIN);

        state.decrement();
        assert_eq!(state.count, i64::MAX);
    }
}
