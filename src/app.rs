//! Application state: the simulated client plus the widget subsystem running
//! inside it.
//!
//! Frontend events are routed either to the client (host actions, which in
//! turn fire host events) or to the subsystem as key presses.

use crate::config::Config;
use crate::core::input_router::{route_input, InputRoute};
use crate::core::{HostEvent, ToggleController};
use crate::data::{DisplayMode, LayoutVariant};
use crate::frontend::{Frontend, FrontendEvent};
use crate::host::client_thread::ClientThread;
use crate::host::{DisplayHandle, HostAction, SimClient};
use anyhow::Result;
use std::collections::VecDeque;

/// How many host events the log keeps
const EVENT_LOG_CAPACITY: usize = 200;

pub struct App {
    pub config: Config,
    pub client: SimClient,
    pub controller: ToggleController<DisplayHandle, ClientThread>,
    pub running: bool,
    /// Most recent host events, oldest first
    pub event_log: VecDeque<String>,
}

impl App {
    pub fn new(config: Config, layout: LayoutVariant, mode: DisplayMode) -> Self {
        let client = SimClient::new(layout, mode);
        let controller =
            ToggleController::from_config(&config, client.display_handle(), client.client_thread());
        Self {
            config,
            client,
            controller,
            running: true,
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
        }
    }

    /// Start-up: activate the subsystem and let the client run the
    /// initial show pass.
    pub fn start(&mut self) {
        self.controller.activate();
        self.client.tick();
    }

    /// Shut-down: nothing may stay hidden once the subsystem stops.
    pub fn shutdown(&mut self) {
        self.controller.deactivate();
        self.client.tick();
    }

    /// Drive the client until the user quits. Shut-down runs even when the
    /// frontend fails, so nothing is left hidden.
    pub fn run<F: Frontend>(&mut self, frontend: &mut F) -> Result<()> {
        self.start();
        let result = self.event_loop(frontend);
        self.shutdown();
        if let Err(e) = &result {
            tracing::error!("Frontend failed: {:#}", e);
        }
        result
    }

    fn event_loop<F: Frontend>(&mut self, frontend: &mut F) -> Result<()> {
        while self.running {
            for event in frontend.poll_events()? {
                self.handle_frontend_event(event);
            }
            self.tick();
            frontend.render(self)?;
        }
        Ok(())
    }

    pub fn handle_frontend_event(&mut self, event: FrontendEvent) {
        match event {
            FrontendEvent::Key { code, modifiers } => {
                match route_input(code, modifiers, &self.controller.hotkey()) {
                    InputRoute::Host(HostAction::Quit) => self.running = false,
                    InputRoute::Host(action) => self.perform(action),
                    InputRoute::Subsystem => self.dispatch(HostEvent::key(code, modifiers)),
                }
            }
            FrontendEvent::Resize { width, height } => {
                tracing::debug!("Canvas resized to {}x{}", width, height);
                self.dispatch(HostEvent::CanvasSizeChanged);
            }
        }
    }

    /// One client tick
    pub fn tick(&mut self) {
        self.client.tick();
    }

    fn perform(&mut self, action: HostAction) {
        for event in self.client.perform(action) {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: HostEvent) {
        self.log_event(&event);
        self.controller.handle_event(&event);
    }

    fn log_event(&mut self, event: &HostEvent) {
        let entry = match event {
            HostEvent::ScriptPostFired { script_id } => format!("script {} fired", script_id),
            HostEvent::CanvasSizeChanged => "canvas size changed".to_string(),
            HostEvent::KeyPressed { code, .. } => format!("key {:?}", code),
        };
        if self.event_log.len() == EVENT_LOG_CAPACITY {
            self.event_log.pop_front();
        }
        self.event_log.push_back(format!("[{}] {}", self.client.ticks(), entry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use crossterm::event::{KeyCode, KeyModifiers};

    /// Replays scripted polls, then fails once the script runs out
    struct ScriptedFrontend {
        polls: VecDeque<Vec<FrontendEvent>>,
        hidden_per_frame: Vec<usize>,
    }

    impl ScriptedFrontend {
        fn new(polls: Vec<Vec<FrontendEvent>>) -> Self {
            Self {
                polls: polls.into(),
                hidden_per_frame: Vec::new(),
            }
        }
    }

    impl Frontend for ScriptedFrontend {
        fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
            self.polls.pop_front().ok_or_else(|| anyhow!("terminal closed"))
        }

        fn render(&mut self, app: &App) -> Result<()> {
            self.hidden_per_frame.push(app.client.hidden_count());
            Ok(())
        }

        fn cleanup(&mut self) -> Result<()> {
            Ok(())
        }

        fn size(&self) -> (u16, u16) {
            (80, 24)
        }
    }

    fn key(c: char) -> FrontendEvent {
        FrontendEvent::key(KeyCode::Char(c), KeyModifiers::empty())
    }

    fn started() -> App {
        let mut app = App::new(Config::default(), LayoutVariant::Modern, DisplayMode::Resizable);
        app.start();
        app
    }

    fn press(app: &mut App, c: char) {
        app.handle_frontend_event(FrontendEvent::key(KeyCode::Char(c), KeyModifiers::empty()));
        app.tick();
    }

    #[test]
    fn test_hotkey_hides_and_shows() {
        let mut app = started();
        press(&mut app, 'h');
        assert!(app.controller.is_hidden());
        assert_eq!(app.client.hidden_count(), 6);

        press(&mut app, 'h');
        assert!(!app.controller.is_hidden());
        assert_eq!(app.client.hidden_count(), 0);
    }

    #[test]
    fn test_host_actions_are_logged_and_reasserted() {
        let mut app = started();
        press(&mut app, 'h');
        press(&mut app, 'b');

        assert_eq!(app.client.hidden_count(), 6);
        assert!(app
            .event_log
            .back()
            .map(|e| e.ends_with("script 903 fired"))
            .unwrap_or(false));
    }

    #[test]
    fn test_terminal_resize_is_canvas_change() {
        let mut app = started();
        app.handle_frontend_event(FrontendEvent::resize(80, 24));
        assert!(app
            .event_log
            .back()
            .map(|e| e.ends_with("canvas size changed"))
            .unwrap_or(false));
    }

    #[test]
    fn test_quit_key_and_shutdown() {
        let mut app = started();
        press(&mut app, 'h');
        press(&mut app, 'q');
        assert!(!app.running);

        app.shutdown();
        assert_eq!(app.client.hidden_count(), 0);
        assert!(!app.controller.state().is_active());
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut app = started();
        for _ in 0..(EVENT_LOG_CAPACITY + 10) {
            app.handle_frontend_event(key('r'));
        }
        assert_eq!(app.event_log.len(), EVENT_LOG_CAPACITY);
    }

    #[test]
    fn test_run_until_quit_restores_widgets() {
        let mut app = App::new(Config::default(), LayoutVariant::Modern, DisplayMode::Resizable);
        let mut frontend = ScriptedFrontend::new(vec![vec![key('h')], vec![key('q')]]);

        app.run(&mut frontend).expect("runs");
        assert_eq!(frontend.hidden_per_frame, vec![6, 6]);
        assert_eq!(app.client.hidden_count(), 0);
        assert!(!app.controller.state().is_active());
    }

    #[test]
    fn test_frontend_error_still_shuts_down() {
        let mut app = App::new(Config::default(), LayoutVariant::Modern, DisplayMode::Resizable);
        let mut frontend = ScriptedFrontend::new(vec![vec![key('h')]]);

        assert!(app.run(&mut frontend).is_err());
        assert_eq!(frontend.hidden_per_frame, vec![6]);
        assert_eq!(app.client.hidden_count(), 0);
        assert!(!app.controller.is_hidden());
        assert!(!app.controller.state().is_active());
    }
}
