// EventLoopBridge - Marshals UI updates onto the Slint event loop
//
// State changes are observed on a background thread, but Slint components may
// only be touched from the thread that runs the event loop. The bridge queues
// update closures and hands them to `upgrade_in_event_loop`.

use crate::metrics::Metrics;
use slint::ComponentHandle;
use std::sync::Arc;
use tokio::sync::mpsc;

type UiUpdate<T> = Box<dyn FnOnce(&T) + Send>;

/// Coordinates between background threads and the Slint event loop
///
/// # Example
/// ```ignore
/// let ui = MainWindow::new()?;
/// let bridge = EventLoopBridge::new(&ui, metrics);
///
/// // From any thread
/// bridge.update_ui(|ui| ui.set_count_label("3".into()));
/// ```
pub struct EventLoopBridge<T: ComponentHandle> {
    /// Bounded to 100 updates to prevent unbounded memory growth if the UI lags
    ui_update_tx: mpsc::Sender<UiUpdate<T>>,

    metrics: Arc<Metrics>,
}

impl<T: ComponentHandle + 'static> EventLoopBridge<T> {
    /// Create a new EventLoopBridge
    ///
    /// This sets up a background handler thread that forwards queued updates
    /// to the Slint event loop. The thread exits once every bridge clone is
    /// dropped or the event loop has stopped.
    pub fn new(ui: &T, metrics: Arc<Metrics>) -> Self {
        // Weak, so the handler thread never keeps the window alive
        let ui_weak = ui.as_weak();
        let (ui_update_tx, mut ui_update_rx) = mpsc::channel::<UiUpdate<T>>(100);

        std::thread::spawn(move || {
            tracing::debug!("EventLoopBridge handler thread started");

            while let Some(update_fn) = ui_update_rx.blocking_recv() {
                // Queues the closure to run on the event loop thread with the upgraded component
                let result = ui_weak.upgrade_in_event_loop(move |ui| {
                    update_fn(&ui);
                });

                if let Err(e) = result {
                    tracing::warn!("Failed to queue UI update to event loop: {:?}", e);
                    break;
                }
            }

            tracing::debug!("EventLoopBridge handler thread terminated");
        });

        Self {
            ui_update_tx,
            metrics,
        }
    }

    /// Schedule a UI update from any thread
    ///
    /// The update runs on the next event loop iteration. If the queue is full
    /// the update is dropped and counted.
    pub fn update_ui<F>(&self, update: F)
    where
        F: FnOnce(&T) + Send + 'static,
    {
        match self.ui_update_tx.try_send(Box::new(update)) {
            Ok(_) => self.metrics.record_ui_update(),
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.metrics.record_ui_channel_full();
                tracing::warn!("UI update channel full - skipping update to prevent backpressure");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!("Failed to send UI update - handler thread has stopped");
            }
        }
    }
}

// Manual Clone implementation to avoid requiring T: Clone
impl<T: ComponentHandle> Clone for EventLoopBridge<T> {
    fn clone(&self) -> Self {
        Self {
            ui_update_tx: self.ui_update_tx.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}
