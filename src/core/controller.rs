//! Toggle controller - owns the hidden/shown mode and wires host events to it.
//!
//! The controller is the single writer of `ModeState`. Every path that changes
//! what is on screen (hotkey, lifecycle, re-assertion after host redraws)
//! goes through `VisibilityApplier::apply`.

use crate::config::Config;
use crate::core::applier::VisibilityApplier;
use crate::core::events::{HostEvent, ScriptId, TriggerScripts};
use crate::core::host::{DisplayModeQuery, Scheduler};
use crate::core::input_router::KeyBinding;
use crate::core::locator::WidgetLocator;
use crossterm::event::{KeyCode, KeyModifiers};

/// Desired visibility plus whether the subsystem is running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeState {
    hidden: bool,
    active: bool,
}

impl ModeState {
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

pub struct ToggleController<D, S> {
    state: ModeState,
    applier: VisibilityApplier<D, S>,
    triggers: TriggerScripts,
    hotkey: KeyBinding,
}

impl<D: DisplayModeQuery, S: Scheduler> ToggleController<D, S> {
    pub fn new(
        applier: VisibilityApplier<D, S>,
        triggers: TriggerScripts,
        hotkey: KeyBinding,
    ) -> Self {
        Self {
            state: ModeState::default(),
            applier,
            triggers,
            hotkey,
        }
    }

    /// Build from loaded configuration
    pub fn from_config(config: &Config, display: D, scheduler: S) -> Self {
        let locator = WidgetLocator::new(
            config.anchors.modern_minimap,
            config.anchors.classic_minimap,
        );
        let applier = VisibilityApplier::new(display, scheduler, locator)
            .with_excluded_content_type(config.safety.excluded_content_type);
        Self::new(
            applier,
            TriggerScripts::new(config.triggers.scripts.iter().copied()),
            config.toggle_binding(),
        )
    }

    pub fn state(&self) -> ModeState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.state.hidden()
    }

    pub fn hotkey(&self) -> KeyBinding {
        self.hotkey
    }

    /// Start listening for the hotkey and host events, with everything shown.
    pub fn activate(&mut self) {
        tracing::info!("Widget hiding active (toggle with {})", self.hotkey);
        self.state.active = true;
        self.state.hidden = false;
        self.applier.apply(false);
    }

    /// Stop listening and make sure nothing is left hidden.
    pub fn deactivate(&mut self) {
        tracing::info!("Widget hiding stopped");
        self.state.active = false;
        self.state.hidden = false;
        self.applier.apply(false);
    }

    /// Flip the mode and apply it
    pub fn toggle(&mut self) {
        self.state.hidden = !self.state.hidden;
        tracing::debug!("Toggled hiding widgets (hidden={})", self.state.hidden);
        self.applier.apply(self.state.hidden);
    }

    /// Dispatch a host event. Ignored while inactive.
    pub fn handle_event(&mut self, event: &HostEvent) {
        if !self.state.active {
            return;
        }

        match event {
            HostEvent::ScriptPostFired { script_id } => self.on_script_post_fired(*script_id),
            HostEvent::CanvasSizeChanged => self.on_canvas_size_changed(),
            HostEvent::KeyPressed { code, modifiers } => {
                self.on_key_pressed(*code, *modifiers);
            }
        }
    }

    /// Host redraw scripts can silently re-show widgets; hide them again.
    pub fn on_script_post_fired(&self, script_id: ScriptId) {
        if self.state.hidden && self.triggers.contains(script_id) {
            tracing::trace!("Re-asserting hidden widgets after script {}", script_id);
            self.applier.apply(true);
        }
    }

    /// Leaving resizable mode restores widgets. The mode flag is kept, so the
    /// next redraw after returning to resizable hides them again.
    pub fn on_canvas_size_changed(&self) {
        if !self.applier.display().is_resized() {
            tracing::debug!("Fixed display mode entered, showing widgets");
            self.applier.apply(false);
        }
    }

    /// Returns true when the key was the toggle hotkey
    pub fn on_key_pressed(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if !self.hotkey.matches(code, modifiers) {
            return false;
        }
        self.toggle();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::{INVENTORY_PANEL_REDRAW, TOPLEVEL_REDRAW};
    use crate::core::host::WidgetTree;
    use crate::core::test_support::{
        hidden_flags, viewport_tree, FakeDisplay, InlineScheduler, Viewport,
    };
    use crate::host::arena::WidgetArena;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        tree: Rc<RefCell<WidgetArena>>,
        display: FakeDisplay,
        viewport: Viewport,
        controller: ToggleController<FakeDisplay, InlineScheduler>,
    }

    impl Harness {
        fn new() -> Self {
            let tree = Rc::new(RefCell::new(WidgetArena::new()));
            let viewport = viewport_tree(&mut tree.borrow_mut());
            let display = FakeDisplay::resizable();
            let controller = ToggleController::from_config(
                &Config::default(),
                display.clone(),
                InlineScheduler::new(tree.clone()),
            );
            Self {
                tree,
                display,
                viewport,
                controller,
            }
        }

        fn active() -> Self {
            let mut harness = Self::new();
            harness.controller.activate();
            harness
        }

        fn eligible_hidden(&self) -> Vec<bool> {
            hidden_flags(&self.tree.borrow(), &self.viewport.eligible())
        }

        /// Host redraw logic showing everything again
        fn host_reveals(&self) {
            self.tree.borrow_mut().reveal_subtree(self.viewport.container);
        }
    }

    #[test]
    fn test_toggle_alternates() {
        let mut h = Harness::active();
        for n in 1..=7 {
            h.controller.toggle();
            assert_eq!(h.controller.is_hidden(), n % 2 == 1, "after {} toggles", n);
        }
        assert_eq!(h.eligible_hidden(), vec![true; 3]);
    }

    #[test]
    fn test_activate_resets_to_shown() {
        let mut h = Harness::new();
        h.tree.borrow_mut().set_hidden(h.viewport.orbs, true);
        h.controller.toggle();
        assert!(h.controller.is_hidden());

        h.controller.activate();
        assert!(!h.controller.is_hidden());
        assert!(h.controller.state().is_active());
        assert_eq!(h.eligible_hidden(), vec![false; 3]);
    }

    #[test]
    fn test_deactivate_restores_widgets() {
        let mut h = Harness::active();
        h.controller.toggle();
        assert_eq!(h.eligible_hidden(), vec![true; 3]);

        h.controller.deactivate();
        assert_eq!(h.eligible_hidden(), vec![false; 3]);
        assert!(!h.controller.state().is_active());
    }

    #[test]
    fn test_redraw_reasserts_hidden() {
        let mut h = Harness::active();
        h.controller.toggle();
        h.host_reveals();
        assert_eq!(h.eligible_hidden(), vec![false; 3]);

        h.controller.handle_event(&HostEvent::script(TOPLEVEL_REDRAW));
        assert_eq!(h.eligible_hidden(), vec![true; 3]);
    }

    #[test]
    fn test_panel_redraw_reasserts_hidden() {
        let mut h = Harness::active();
        h.controller.toggle();
        h.host_reveals();

        h.controller.handle_event(&HostEvent::script(INVENTORY_PANEL_REDRAW));
        assert_eq!(h.eligible_hidden(), vec![true; 3]);
    }

    #[test]
    fn test_redraw_while_shown_does_not_hide() {
        let mut h = Harness::active();
        h.controller.toggle();
        h.controller.toggle();

        h.controller.handle_event(&HostEvent::script(TOPLEVEL_REDRAW));
        assert_eq!(h.eligible_hidden(), vec![false; 3]);
    }

    #[test]
    fn test_unrelated_script_is_ignored() {
        let mut h = Harness::active();
        h.controller.toggle();
        h.host_reveals();

        h.controller.handle_event(&HostEvent::script(1));
        assert_eq!(h.eligible_hidden(), vec![false; 3]);
    }

    #[test]
    fn test_fixed_mode_canvas_change_shows_widgets() {
        let mut h = Harness::active();
        h.controller.toggle();

        h.display.set_resized(false);
        h.controller.handle_event(&HostEvent::CanvasSizeChanged);
        assert_eq!(h.eligible_hidden(), vec![false; 3]);
        assert!(h.controller.is_hidden());

        // Redraw in fixed mode must not hide
        h.controller.handle_event(&HostEvent::script(TOPLEVEL_REDRAW));
        assert_eq!(h.eligible_hidden(), vec![false; 3]);

        // Back to resizable, the next redraw restores the hidden state
        h.display.set_resized(true);
        h.controller.handle_event(&HostEvent::CanvasSizeChanged);
        assert_eq!(h.eligible_hidden(), vec![false; 3]);
        h.controller.handle_event(&HostEvent::script(TOPLEVEL_REDRAW));
        assert_eq!(h.eligible_hidden(), vec![true; 3]);
    }

    #[test]
    fn test_toggle_in_fixed_mode_never_hides() {
        let mut h = Harness::active();
        h.display.set_resized(false);

        h.controller.toggle();
        assert!(h.controller.is_hidden());
        assert_eq!(h.eligible_hidden(), vec![false; 3]);
    }

    #[test]
    fn test_hotkey_toggles() {
        let mut h = Harness::active();
        let hotkey = h.controller.hotkey();

        h.controller.handle_event(&HostEvent::key(hotkey.code, hotkey.modifiers));
        assert!(h.controller.is_hidden());

        assert!(!h.controller.on_key_pressed(KeyCode::Char('x'), KeyModifiers::ALT));
        assert!(h.controller.is_hidden());
    }

    #[test]
    fn test_events_ignored_while_inactive() {
        let mut h = Harness::new();
        let hotkey = h.controller.hotkey();

        h.controller.handle_event(&HostEvent::key(hotkey.code, hotkey.modifiers));
        assert!(!h.controller.is_hidden());

        h.controller.activate();
        h.controller.toggle();
        h.controller.deactivate();
        h.host_reveals();
        h.controller.handle_event(&HostEvent::script(TOPLEVEL_REDRAW));
        assert_eq!(h.eligible_hidden(), vec![false; 3]);
    }

    #[test]
    fn test_render_surface_survives_every_path() {
        let mut h = Harness::active();
        let surface = h.viewport.render_surface;

        h.controller.toggle();
        h.controller.handle_event(&HostEvent::script(TOPLEVEL_REDRAW));
        h.display.set_resized(false);
        h.controller.handle_event(&HostEvent::CanvasSizeChanged);
        h.controller.deactivate();
        assert!(!h.tree.borrow().is_hidden(surface));
    }
}
