//! PrimeTime - counter demo with observable, persisted state
//!
//! Main entry point for the GUI application.
//!
//! # Execution Flow
//!
//! 1. Load `PrimeTime Data/PrimeTime Settings.yaml` (defaults if missing)
//! 2. Initialize logging → `<log_dir>/primetime.<date>`
//! 3. Open the key-value store and hydrate the [`StateManager`] from it
//! 4. Create the [`GuiController`] (binds the Slint window to the state)
//! 5. Run the Slint event loop (blocks until the window is closed)
//! 6. Log the metrics summary
//!
//! Every tap is persisted immediately, so there is nothing to flush on exit.

use anyhow::Result;
use primetime::ui::GuiController;
use primetime::{APP_NAME, ConfigManager, DATA_DIR, FileStore, StateManager, VERSION};
use std::sync::Arc;

fn main() -> Result<()> {
    // Settings decide where logs go, so they are read before logging starts
    let config_manager = ConfigManager::new(DATA_DIR)?;
    let user_config = config_manager.load_user_config()?;

    let _log_guard = primetime::logging::setup_logging(
        &user_config.log_dir,
        APP_NAME,
        user_config.debug_mode,
        user_config.console_logging,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let store = Arc::new(FileStore::open(config_manager.store_path(&user_config)));
    tracing::info!("Using key-value store at {}", store.path());

    let state_manager = Arc::new(StateManager::new(store));
    tracing::info!(
        "State manager initialized with count={}",
        state_manager.count()
    );

    let gui_controller = GuiController::new(Arc::clone(&state_manager))?;

    tracing::info!("GUI controller initialized, launching window");

    let result = gui_controller.run();

    tracing::info!("GUI closed, shutting down");
    state_manager.metrics().log_summary();

    result.map_err(|e| {
        tracing::error!("GUI error: {}", e);
        anyhow::anyhow!("GUI error: {}", e)
    })
}
