// UI module - Slint window, view models and event loop bridge
//
// This module contains:
// - navigation / counter: display-free view models for the two screens
// - EventLoopBridge: Marshals state-change re-renders onto the Slint event loop
// - GuiController: Wires the window to the view models and state manager

pub mod bridge;
pub mod controller;
pub mod counter;
pub mod navigation;

pub use bridge::EventLoopBridge;
pub use controller::GuiController;
pub use counter::{CounterViewModel, ordinal};
pub use navigation::{DESTINATIONS, Destination, Navigator, Screen};
