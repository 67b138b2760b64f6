//! Widget-visibility toggle subsystem
//!
//! This module holds the toggle state machine, root location and the
//! visibility applier. NO imports from frontend/ or rendering code. Widgets
//! are only touched through the traits in `host`.

pub mod applier;
pub mod controller;
pub mod events;
pub mod host;
pub mod input_router;
pub mod locator;

#[cfg(test)]
pub mod test_support;

pub use controller::ToggleController;
pub use events::HostEvent;
