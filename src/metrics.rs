// Runtime metrics module
//
// Provides lightweight counters for state writes, persistence and UI traffic

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Application metrics
///
/// Uses atomic operations so the UI thread and the state subscription thread
/// can both record without locking. Logged once on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Number of writes to the counter
    pub state_updates: AtomicU64,

    /// Number of change events delivered to at least one subscriber
    pub state_broadcasts: AtomicU64,

    /// Number of change events sent while nobody was listening
    pub state_broadcast_errors: AtomicU64,

    /// Number of successful writes to the key-value store
    pub persist_writes: AtomicU64,

    /// Number of failed writes to the key-value store
    pub persist_failures: AtomicU64,

    /// Number of UI updates sent
    pub ui_updates: AtomicU64,

    /// Number of UI update channel full errors
    pub ui_update_channel_full: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            state_updates: AtomicU64::new(0),
            state_broadcasts: AtomicU64::new(0),
            state_broadcast_errors: AtomicU64::new(0),
            persist_writes: AtomicU64::new(0),
            persist_failures: AtomicU64::new(0),
            ui_updates: AtomicU64::new(0),
            ui_update_channel_full: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_state_update(&self) {
        self.state_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_broadcast(&self) {
        self.state_broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_broadcast_error(&self) {
        self.state_broadcast_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of one persistence write
    pub fn record_persist(&self, written: bool) {
        if written {
            self.persist_writes.fetch_add(1, Ordering::Relaxed);
        } else {
            self.persist_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_ui_update(&self) {
        self.ui_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ui_channel_full(&self) {
        self.ui_update_channel_full.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "State updates: {}, broadcasts: {}, unobserved: {}",
            self.state_updates.load(Ordering::Relaxed),
            self.state_broadcasts.load(Ordering::Relaxed),
            self.state_broadcast_errors.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Persistence: {} writes, {} failures",
            self.persist_writes.load(Ordering::Relaxed),
            self.persist_failures.load(Ordering::Relaxed)
        );
        tracing::info!(
            "UI updates: {}, channel full errors: {}",
            self.ui_updates.load(Ordering::Relaxed),
            self.ui_update_channel_full.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
