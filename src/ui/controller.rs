// GUI Controller - Binds the Slint window to the state manager
//
// This module contains the GuiController which coordinates between:
// - Slint UI (MainWindow)
// - Navigator (which screen is showing)
// - CounterViewModel (counter screen actions and labels)
// - StateManager (observable, persisted count)
//
// Taps write to the StateManager; the rendered count is refreshed from the
// StateChange stream, never directly from the tap handler.

use crate::state::{StateChange, StateManager};
use crate::ui::bridge::EventLoopBridge;
use crate::ui::counter::{CounterViewModel, IS_PRIME_LABEL};
use crate::ui::navigation::{DESTINATIONS, Navigator};
use anyhow::{Context, Result};
use slint::{ComponentHandle, ModelRc, VecModel};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

// Include the generated Slint code
slint::include_modules!();

/// GUI Controller that wires up the Slint UI with application state
///
/// # Example
/// ```ignore
/// let store = Arc::new(FileStore::open("PrimeTime Data/defaults.yaml"));
/// let state_manager = Arc::new(StateManager::new(store));
///
/// let controller = GuiController::new(state_manager)?;
/// controller.run()?;  // Blocks until window is closed
/// ```
pub struct GuiController {
    /// The Slint UI window
    ui: MainWindow,

    /// Kept alive so the handler thread outlives construction
    _bridge: EventLoopBridge<MainWindow>,

    /// Only touched from the event loop thread
    _navigator: Rc<RefCell<Navigator>>,
}

impl GuiController {
    /// Create a new GUI controller
    ///
    /// Builds the window, renders the current state, installs the Slint
    /// callbacks and starts listening for state changes.
    pub fn new(state_manager: Arc<StateManager>) -> Result<Self> {
        let ui = MainWindow::new().context("Failed to create Slint UI")?;

        let bridge = EventLoopBridge::new(&ui, Arc::clone(state_manager.metrics()));
        let navigator = Rc::new(RefCell::new(Navigator::new()));
        let counter = CounterViewModel::new(Arc::clone(&state_manager));

        // Initialize UI with current state
        Self::sync_ui_with_state(&ui, &counter, &navigator.borrow());

        Self::setup_callbacks(&ui, &counter, &navigator);

        // Subscribe to state changes and update UI
        Self::setup_state_subscription(&bridge, &state_manager);

        tracing::info!("GUI controller initialized");

        Ok(Self {
            ui,
            _bridge: bridge,
            _navigator: navigator,
        })
    }

    /// Run the GUI (blocks until window is closed)
    pub fn run(self) -> Result<(), slint::PlatformError> {
        tracing::info!("Starting GUI event loop");
        self.ui.run()
    }

    /// Called once at startup to initialize the UI with the current state.
    fn sync_ui_with_state(ui: &MainWindow, counter: &CounterViewModel, navigator: &Navigator) {
        let destinations: Vec<DestinationItem> = DESTINATIONS
            .iter()
            .map(|d| DestinationItem {
                label: d.label.into(),
                placeholder: d.is_placeholder,
            })
            .collect();
        ui.set_destinations(ModelRc::new(VecModel::from(destinations)));

        ui.set_is_prime_label(IS_PRIME_LABEL.into());
        Self::render_count(ui, counter.count());

        Self::render_navigation(ui, navigator);

        tracing::debug!("UI synchronized with initial state");
    }

    fn render_navigation(ui: &MainWindow, navigator: &Navigator) {
        ui.set_current_screen(navigator.current().index());
        ui.set_screen_title(navigator.title().into());
        ui.set_back_label(navigator.back_label().into());
        ui.set_can_go_back(navigator.can_go_back());
    }

    fn render_count(ui: &MainWindow, count: i64) {
        ui.set_count_label(CounterViewModel::count_label_for(count).into());
        ui.set_nth_prime_label(CounterViewModel::nth_prime_label_for(count).into());
    }

    /// Set up Slint UI callbacks
    ///
    /// This connects Slint UI events (button clicks) to the navigator and the
    /// counter view model.
    fn setup_callbacks(
        ui: &MainWindow,
        counter: &CounterViewModel,
        navigator: &Rc<RefCell<Navigator>>,
    ) {
        let nav = Rc::clone(navigator);
        let ui_weak = ui.as_weak();
        ui.on_open_destination(move |index| {
            let Ok(index) = usize::try_from(index) else {
                tracing::warn!("Ignoring negative destination index {}", index);
                return;
            };

            let mut nav = nav.borrow_mut();
            match nav.open(index) {
                Some(screen) => {
                    tracing::info!("Opened destination {:?}", screen);
                    if let Some(ui) = ui_weak.upgrade() {
                        Self::render_navigation(&ui, &nav);
                    }
                }
                None => tracing::warn!("No destination at index {}", index),
            }
        });

        let nav = Rc::clone(navigator);
        let ui_weak = ui.as_weak();
        ui.on_back(move || {
            let mut nav = nav.borrow_mut();
            if nav.pop().is_none() {
                return;
            }
            if let Some(ui) = ui_weak.upgrade() {
                Self::render_navigation(&ui, &nav);
            }
        });

        let vm = counter.clone();
        ui.on_increment(move || {
            let count = vm.increment();
            tracing::debug!("Increment tapped, count={}", count);
        });

        let vm = counter.clone();
        ui.on_decrement(move || {
            let count = vm.decrement();
            tracing::debug!("Decrement tapped, count={}", count);
        });

        let vm = counter.clone();
        ui.on_is_prime_tapped(move || vm.is_prime_tapped());

        let vm = counter.clone();
        ui.on_nth_prime_tapped(move || vm.nth_prime_tapped());

        tracing::debug!("UI callbacks configured");
    }

    /// Subscribe to state changes and update UI accordingly
    ///
    /// This spawns a background thread that listens for state change events
    /// and forwards re-renders through the EventLoopBridge. Each render reads
    /// the state when it runs, so a render dropped on a full queue is covered
    /// by any still queued. The thread ends when the state manager is dropped.
    fn setup_state_subscription(
        bridge: &EventLoopBridge<MainWindow>,
        state_manager: &Arc<StateManager>,
    ) {
        let bridge = bridge.clone();
        // Weak, so this thread does not keep the channel open
        let state = Arc::downgrade(state_manager);
        let mut rx = state_manager.subscribe();

        std::thread::spawn(move || {
            tracing::debug!("State subscription thread started");

            loop {
                match rx.blocking_recv() {
                    Ok(StateChange::CountChanged { old, new }) => {
                        tracing::trace!("Count changed: {} -> {}", old, new);
                        let state = state.clone();
                        bridge.update_ui(move |ui| {
                            if let Some(state) = state.upgrade() {
                                Self::render_count(ui, state.count());
                            }
                        });
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // The next render reads the latest count anyway
                        tracing::warn!("State subscription lagged, skipped {} event(s)", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            tracing::debug!("State subscription thread terminated");
        });
    }
}
