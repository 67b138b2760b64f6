//! Host-pushed events the subsystem subscribes to.
//!
//! Whatever drives the subsystem (the simulated client, a test harness)
//! translates its own notifications into this enum so the controller only
//! handles one event shape.

use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::BTreeSet;

/// Host script identifier
pub type ScriptId = i32;

/// Generic top-level interface redraw
pub const TOPLEVEL_REDRAW: ScriptId = 907;

/// Fires when a panel opens over the inventory (bank, shops)
pub const INVENTORY_PANEL_REDRAW: ScriptId = 903;

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A host script finished running
    ScriptPostFired { script_id: ScriptId },
    /// The game canvas changed size (including fixed <-> resizable switches)
    CanvasSizeChanged,
    /// Key press delivered by the host's key manager
    KeyPressed {
        code: KeyCode,
        modifiers: KeyModifiers,
    },
}

impl HostEvent {
    pub fn script(script_id: ScriptId) -> Self {
        Self::ScriptPostFired { script_id }
    }

    pub fn key(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::KeyPressed { code, modifiers }
    }
}

/// Script ids whose completion may re-show widgets and therefore trigger
/// re-assertion while hidden. Treated as opaque values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerScripts(BTreeSet<ScriptId>);

impl Default for TriggerScripts {
    fn default() -> Self {
        Self::new([TOPLEVEL_REDRAW, INVENTORY_PANEL_REDRAW])
    }
}

impl TriggerScripts {
    pub fn new(ids: impl IntoIterator<Item = ScriptId>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn contains(&self, script_id: ScriptId) -> bool {
        self.0.contains(&script_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
