//! Configuration change notification.
//!
//! Listeners are invoked synchronously, in registration order, each time a
//! monitor detects that its resource changed.

pub mod listener;

pub use listener::{ConfigurationListener, Listeners, listeners, no_listeners};
