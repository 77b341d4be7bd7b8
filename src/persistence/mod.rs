//! Persistence adapter between [`AppState`] and a [`KeyValueStore`].
//!
//! The state is encoded as JSON (`{"count": 3}`) and stored under
//! [`PERSISTENCE_KEY`]. Persistence is best-effort in both directions:
//! - [`load_state`] falls back to [`AppState::default()`] on any read or decode failure
//! - [`save_state`] logs and swallows write failures
//!
//! Neither function ever surfaces an error to the caller.

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

use crate::models::{AppState, PERSISTENCE_KEY};

/// Encode the state into its persisted form.
pub fn encode_state(state: &AppState) -> serde_json::Result<String> {
    serde_json::to_string(state)
}

/// Decode a persisted value. The `count` field is required.
pub fn decode_state(encoded: &str) -> serde_json::Result<AppState> {
    serde_json::from_str(encoded)
}

/// Hydrate the state from the store.
///
/// A missing key, a store read error and an undecodable value all mean
/// "no prior state" and yield the default.
pub fn load_state(store: &dyn KeyValueStore) -> AppState {
    let encoded = match store.get(PERSISTENCE_KEY) {
        Ok(Some(encoded)) => encoded,
        Ok(None) => {
            tracing::info!("No persisted state found, starting from default");
            return AppState::default();
        }
        Err(e) => {
            tracing::warn!("Failed to read persisted state, starting from default: {}", e);
            return AppState::default();
        }
    };

    match decode_state(&encoded) {
        Ok(state) => {
            tracing::info!("Restored persisted state: count={}", state.count);
            state
        }
        Err(e) => {
            tracing::warn!("Discarding corrupted persisted state ({}): {:?}", e, encoded);
            AppState::default()
        }
    }
}

/// Write the state to the store.
///
/// Returns `true` if the value reached the store. Failures are logged only.
pub fn save_state(store: &dyn KeyValueStore, state: &AppState) -> bool {
    let encoded = match encode_state(state) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::warn!("Failed to encode state: {}", e);
            return false;
        }
    };

    match store.set(PERSISTENCE_KEY, &encoded) {
        Ok(()) => {
            tracing::trace!("Persisted state: {}", encoded);
            true
        }
        Err(e) => {
            tracing::warn!("Failed to persist state: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::store::MockKeyValueStore;
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_encoding_format() {
        let encoded = encode_state(&AppState::new(7)).unwrap();
        assert_eq!(encoded, r#"{"count":7}"#);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let state = decode_state(r#"{"count": -4, "theme": "dark"}"#).unwrap();
        assert_eq!(state.count, -4);
    }

    #[test]
    fn test_decode_requires_count() {
        assert!(decode_state("{}").is_err());
        assert!(decode_state(r#"{"count": "seven"}"#).is_err());
        assert!(decode_state(r#"{"count": 1.5}"#).is_err());
    }

    #[test]
    fn test_load_missing_key_is_default() {
        let store = MemoryStore::new();
        assert_eq!(load_state(&store), AppState::default());
    }

    #[test]
    fn test_load_corrupted_value_is_default() {
        let store = MemoryStore::with_entry(PERSISTENCE_KEY, "{not json");
        assert_eq!(load_state(&store).count, 0);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        assert!(save_state(&store, &AppState::new(12)));
        assert_eq!(load_state(&store).count, 12);
    }

    #[test]
    fn test_load_read_error_is_default() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().times(1).returning(|_| {
            Err(StoreError::Io {
                path: Utf8PathBuf::from("defaults.yaml"),
                source: std::io::Error::other("disk unplugged"),
            })
        });

        assert_eq!(load_state(&store).count, 0);
    }

    #[test]
    fn test_save_write_error_is_swallowed() {
        let mut store = MockKeyValueStore::new();
        store.expect_set().times(1).returning(|_, _| {
            Err(StoreError::Io {
                path: Utf8PathBuf::from("defaults.yaml"),
                source: std::io::Error::other("read-only filesystem"),
            })
        });

        assert!(!save_state(&store, &AppState::new(1)));
    }
}
