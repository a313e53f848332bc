//! Discord interaction handlers
//!
//! This module provides the framework error listener, gateway event handling
//! and the component transport that drives interactive views.

/// Command error listener
pub mod error;
/// Ready and guild-join events
pub mod events;
/// Component interactions for interactive views
pub mod views;

pub use error::on_error;
pub use events::event_handler;
