// PrimeTime - Observable, persisted counter with a two-screen Slint UI
//
// This is the library crate containing the state, persistence and view models.
// The binary crate (main.rs) provides the GUI entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod persistence;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use crate::config::ConfigManager;
pub use models::{AppState, PERSISTENCE_KEY, UserConfig};
pub use persistence::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use state::{StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Default data directory, relative to the working directory
pub const DATA_DIR: &str = "PrimeTime Data";
