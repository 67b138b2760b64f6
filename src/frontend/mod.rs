//! Frontend abstraction layer
//!
//! Defines the `Frontend` trait the terminal frontend implements: event
//! polling, rendering and cleanup.

pub mod events;
pub mod tui;

use crate::app::App;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events converted to `FrontendEvent` (empty if none).
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state, once per frame
    fn render(&mut self, app: &App) -> Result<()>;

    /// Restore the terminal before the application exits
    fn cleanup(&mut self) -> Result<()>;

    /// Current rendering area as `(width, height)`
    fn size(&self) -> (u16, u16);
}
