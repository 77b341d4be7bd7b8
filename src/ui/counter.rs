// Counter screen view model
//
// Display strings and actions for the counter screen, kept free of Slint types
// so they can be tested without a window.

use crate::state::StateManager;
use std::sync::Arc;

/// Label of the first inert button
pub const IS_PRIME_LABEL: &str = "Is this prime?";

/// English ordinal form of `n`: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`, `-2nd`
pub fn ordinal(n: i64) -> String {
    let magnitude = n.unsigned_abs();
    let suffix = if (11..=13).contains(&(magnitude % 100)) {
        "th"
    } else {
        match magnitude % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", n, suffix)
}

/// View model bound to the shared [`StateManager`]
///
/// Taps go straight to the state manager; the rendered labels are refreshed
/// by the controller when the resulting `StateChange` arrives.
#[derive(Clone)]
pub struct CounterViewModel {
    state: Arc<StateManager>,
}

impl CounterViewModel {
    pub fn new(state: Arc<StateManager>) -> Self {
        Self { state }
    }

    pub fn count_label(&self) -> String {
        Self::count_label_for(self.state.count())
    }

    pub fn nth_prime_label(&self) -> String {
        Self::nth_prime_label_for(self.state.count())
    }

    /// Current count. Renders read this when they run rather than using an
    /// event's value, so whichever render runs last shows the newest count.
    pub fn count(&self) -> i64 {
        self.state.count()
    }

    pub fn count_label_for(count: i64) -> String {
        count.to_string()
    }

    pub fn nth_prime_label_for(count: i64) -> String {
        format!("What is the {} prime?", ordinal(count))
    }

    /// Handle a tap on `+`. Returns the new count.
    pub fn increment(&self) -> i64 {
        self.state.increment();
        self.state.count()
    }

    /// Handle a tap on `-`. Returns the new count.
    pub fn decrement(&self) -> i64 {
        self.state.decrement();
        self.state.count()
    }

    /// "Is this prime?" has no action yet
    pub fn is_prime_tapped(&self) {
        tracing::debug!("'{}' tapped at count={}", IS_PRIME_LABEL, self.state.count());
    }

    /// "What is the nth prime?" has no action yet
    pub fn nth_prime_tapped(&self) {
        tracing::debug!("'{}' tapped", self.nth_prime_label());
    }
}
