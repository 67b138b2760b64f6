//! Input routing for the simulated client
//!
//! Routes keyboard input either to the host (its own controls) or to the
//! widget subsystem, based on:
//! - The configured toggle hotkey (always wins)
//! - The fixed host key map

use crate::config::parse_key_string;
use crate::host::HostAction;
use crossterm::event::{KeyCode, KeyModifiers};
use std::fmt;

/// A single bound key, no chords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Parse "ctrl+h", "f12", "shift+space", ...
    pub fn parse(key_str: &str) -> Option<Self> {
        parse_key_string(key_str).map(|(code, modifiers)| Self::new(code, modifiers))
    }

    /// Terminals disagree on how a shifted character arrives (`Char('H')` with
    /// or without SHIFT), so character keys are compared in normalized form.
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        normalize(self.code, self.modifiers) == normalize(code, modifiers)
    }
}

/// Lowercase letters carry SHIFT exactly when they were uppercase or shifted.
/// Other characters already encode shift in the character itself.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match code {
        KeyCode::Char(c) if c.is_alphabetic() => {
            let shifted = c.is_uppercase() || modifiers.contains(KeyModifiers::SHIFT);
            let mut modifiers = modifiers - KeyModifiers::SHIFT;
            if shifted {
                modifiers |= KeyModifiers::SHIFT;
            }
            let lower = c.to_lowercase().next().unwrap_or(c);
            (KeyCode::Char(lower), modifiers)
        }
        KeyCode::Char(c) => (KeyCode::Char(c), modifiers - KeyModifiers::SHIFT),
        other => (other, modifiers),
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::F(n) => write!(f, "f{}", n),
            other => write!(f, "{}", format!("{:?}", other).to_lowercase()),
        }
    }
}

/// Where a key press should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRoute {
    /// Handled by the host itself
    Host(HostAction),
    /// Delivered to the widget subsystem as a key event
    Subsystem,
}

/// Route a key press. The toggle hotkey shadows any host control on the same key.
pub fn route_input(code: KeyCode, modifiers: KeyModifiers, hotkey: &KeyBinding) -> InputRoute {
    if hotkey.matches(code, modifiers) {
        return InputRoute::Subsystem;
    }

    match host_action(code, modifiers) {
        Some(action) => InputRoute::Host(action),
        None => InputRoute::Subsystem,
    }
}

fn host_action(code: KeyCode, modifiers: KeyModifiers) -> Option<HostAction> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(HostAction::Quit),
            _ => None,
        };
    }

    match code {
        KeyCode::Esc | KeyCode::Char('q') => Some(HostAction::Quit),
        KeyCode::Char('l') => Some(HostAction::SwitchLayout),
        KeyCode::Char('b') => Some(HostAction::OpenBank),
        KeyCode::Char('f') => Some(HostAction::ToggleDisplayMode),
        KeyCode::Char('r') => Some(HostAction::Redraw),
        _ => None,
    }
}
