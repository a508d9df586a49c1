//! Event handling module.
//!
//! Terminal events (key presses) are polled on a dedicated thread and
//! translated into state container actions on the main thread; network
//! events run on the networking thread and apply their results to shared
//! state.

pub mod network;
pub mod terminal;
