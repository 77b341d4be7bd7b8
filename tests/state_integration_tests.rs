//! Integration tests for StateManager with state change events
//!
//! These tests verify that the StateManager correctly:
//! - Emits a change event on every write
//! - Supports multiple subscribers
//! - Persists every write and survives a restart
//! - Returns to the starting value after balanced increments and decrements

use camino::Utf8PathBuf;
use primetime::{
    FileStore, KeyValueStore, MemoryStore, PERSISTENCE_KEY, StateChange, StateManager,
};
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tempfile::TempDir;
use tokio::time::{Duration, timeout};

fn temp_store_path() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, dir.join("defaults.yaml"))
}

#[tokio::test]
async fn test_state_change_events_emitted() {
    let state = Arc::new(StateManager::in_memory());
    let mut rx = state.subscribe();

    state.increment();

    let event = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("Timeout waiting for event")
        .expect("Channel closed");

    assert_eq!(event, StateChange::CountChanged { old: 0, new: 1 });
}

#[tokio::test]
async fn test_multiple_subscribers_receive_events() {
    let state = Arc::new(StateManager::in_memory());
    let mut rx1 = state.subscribe();
    let mut rx2 = state.subscribe();
    let mut rx3 = state.subscribe();

    state.set_count(5);

    for rx in [&mut rx1, &mut rx2, &mut rx3] {
        let event = timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("Timeout")
            .expect("Channel closed");
        assert_eq!(event, StateChange::CountChanged { old: 0, new: 5 });
    }
}

#[tokio::test]
async fn test_events_arrive_in_write_order() {
    let state = Arc::new(StateManager::in_memory());
    let mut rx = state.subscribe();

    state.increment();
    state.increment();
    state.decrement();

    let mut seen = Vec::new();
    for _ in 0..3 {
        let event = timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("Timeout")
            .expect("Channel closed");
        seen.push(event);
    }

    assert_eq!(
        seen,
        vec![
            StateChange::CountChanged { old: 0, new: 1 },
            StateChange::CountChanged { old: 1, new: 2 },
            StateChange::CountChanged { old: 2, new: 1 },
        ]
    );
}

#[tokio::test]
async fn test_late_subscriber_sees_only_future_writes() {
    let state = Arc::new(StateManager::in_memory());
    state.set_count(10);

    let mut rx = state.subscribe();
    assert!(rx.try_recv().is_err());

    state.increment();
    let event = rx.recv().await.unwrap();
    assert_eq!(event, StateChange::CountChanged { old: 10, new: 11 });
}

#[tokio::test]
async fn test_subscriber_on_other_thread() {
    let state = Arc::new(StateManager::in_memory());
    let mut rx = state.subscribe();

    let listener = std::thread::spawn(move || rx.blocking_recv().unwrap());

    state.decrement();

    let event = listener.join().unwrap();
    assert_eq!(event, StateChange::CountChanged { old: 0, new: -1 });
}

#[test]
fn test_startup_without_persisted_value() {
    let (_temp_dir, path) = temp_store_path();
    let state = StateManager::new(Arc::new(FileStore::open(&path)));

    assert_eq!(state.count(), 0);
}

#[test]
fn test_count_survives_restart() {
    let (_temp_dir, path) = temp_store_path();

    {
        let state = StateManager::new(Arc::new(FileStore::open(&path)));
        state.increment();
        state.increment();
        state.increment();
    }

    let restarted = StateManager::new(Arc::new(FileStore::open(&path)));
    assert_eq!(restarted.count(), 3);
}

#[test]
fn test_startup_with_corrupted_value() {
    let (_temp_dir, path) = temp_store_path();
    let store = FileStore::open(&path);
    store.set(PERSISTENCE_KEY, "not json at all").unwrap();

    let state = StateManager::new(Arc::new(FileStore::open(&path)));

    assert_eq!(state.count(), 0);
}

#[test]
fn test_write_after_corruption_repairs_store() {
    let store = Arc::new(MemoryStore::with_entry(PERSISTENCE_KEY, "[1, 2"));
    let state = StateManager::new(store.clone());

    state.increment();

    assert_eq!(
        store.get(PERSISTENCE_KEY).unwrap().as_deref(),
        Some(r#"{"count":1}"#)
    );
}

#[tokio::test]
async fn test_unwritable_store_still_notifies() {
    let (_temp_dir, path) = temp_store_path();
    // A directory where the file should be makes every write fail
    std::fs::create_dir(&path).unwrap();

    let state = Arc::new(StateManager::new(Arc::new(FileStore::open(&path))));
    let mut rx = state.subscribe();

    let changes = state.increment();
    assert_eq!(changes, vec![StateChange::CountChanged { old: 0, new: 1 }]);

    let event = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("Timeout")
        .expect("Channel closed");
    assert_eq!(event, StateChange::CountChanged { old: 0, new: 1 });
    assert_eq!(state.count(), 1);

    let metrics = state.metrics();
    assert_eq!(metrics.persist_failures.load(Ordering::Relaxed), 1);
    assert_eq!(metrics.persist_writes.load(Ordering::Relaxed), 0);
}

proptest! {
    #[test]
    fn prop_balanced_taps_restore_count(start in any::<i64>(), taps in 0usize..64) {
        let state = StateManager::in_memory();
        state.set_count(start);

        for _ in 0..taps {
            state.increment();
        }
        for _ in 0..taps {
            state.decrement();
        }

        prop_assert_eq!(state.count(), start);
    }

    #[test]
    fn prop_store_tracks_every_write(start in -1_000i64..1_000, taps in 1usize..16) {
        let store = Arc::new(MemoryStore::new());
        let state = StateManager::new(store.clone());
        state.set_count(start);

        for _ in 0..taps {
            state.increment();
            let restarted = StateManager::new(store.clone());
            prop_assert_eq!(restarted.count(), state.count());
        }
    }
}
