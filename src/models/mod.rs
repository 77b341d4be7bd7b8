//! Data models for the PrimeTime application.
//!
//! - [`AppState`]: The observable counter, persisted under [`PERSISTENCE_KEY`]
//! - [`UserConfig`]: User preferences loaded from `PrimeTime Settings.yaml`
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Serializable**: Both structs derive `Serialize`/`Deserialize`
//! - **Cloneable**: AppState is wrapped in `Arc<RwLock<>>` by [`StateManager`](crate::state::StateManager) for thread-safe access
//! - **Immutable from outside**: State updates go through StateManager's `update()` method so observers and the store stay in sync

pub mod app_state;
pub mod config;

pub use self::app_state::{AppState, PERSISTENCE_KEY};
pub use self::config::UserConfig;
