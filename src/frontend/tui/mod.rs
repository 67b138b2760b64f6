//! Terminal frontend - renders the simulated client and forwards input.

pub mod widget_tree;

use crate::app::App;
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use std::io;
use std::time::Duration;

/// TUI Frontend using ratatui
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    restored: bool,
}

impl TuiFrontend {
    /// Initializes terminal in raw mode and enters the alternate screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(50),
            restored: false,
        })
    }

    /// Set poll timeout (one simulated client tick)
    pub fn set_poll_timeout(&mut self, timeout: Duration) {
        self.poll_timeout = timeout;
    }

    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only key presses, no repeats or releases
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            _ => None,
        }
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        if event::poll(self.poll_timeout)? {
            // Drain everything already buffered without waiting again
            loop {
                if let Some(frontend_event) = Self::convert_event(event::read()?) {
                    events.push(frontend_event);
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        Ok(events)
    }

    fn render(&mut self, app: &App) -> Result<()> {
        let status = status_lines(app);
        let excluded = app.config.safety.excluded_content_type;
        let tree = widget_tree::tree_lines(app.client.tree(), excluded);
        let log: Vec<Line> = app
            .event_log
            .iter()
            .rev()
            .map(|entry| Line::from(entry.as_str()))
            .collect();
        let show_help = app.config.ui.show_help;
        let help = help_line(app);

        self.terminal.draw(|f| {
            let mut constraints = vec![Constraint::Length(4), Constraint::Min(3)];
            if show_help {
                constraints.push(Constraint::Length(1));
            }
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(f.area());

            f.render_widget(
                Paragraph::new(status)
                    .block(Block::default().borders(Borders::ALL).title(" hide-widgets ")),
                rows[0],
            );

            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(rows[1]);

            f.render_widget(
                Paragraph::new(tree)
                    .block(Block::default().borders(Borders::ALL).title(" Widget tree ")),
                body[0],
            );
            f.render_widget(
                Paragraph::new(log)
                    .block(Block::default().borders(Borders::ALL).title(" Host events ")),
                body[1],
            );

            if show_help {
                f.render_widget(Paragraph::new(help), rows[2]);
            }
        })?;

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

fn status_lines(app: &App) -> Vec<Line<'static>> {
    let (mode_text, mode_color) = if app.controller.is_hidden() {
        ("HIDDEN", Color::Yellow)
    } else {
        ("SHOWN", Color::Green)
    };

    vec![
        Line::from(vec![
            Span::raw("Widgets: "),
            Span::styled(
                mode_text,
                Style::default().fg(mode_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "   {} hidden   subsystem {}",
                app.client.hidden_count(),
                if app.controller.state().is_active() { "active" } else { "stopped" }
            )),
        ]),
        Line::from(format!(
            "Display: {:?}   Skin: {}   Bank: {}   Tick: {}",
            app.client.display_mode(),
            app.client.layout().display_name(),
            if app.client.bank_open() { "open" } else { "closed" },
            app.client.ticks(),
        )),
    ]
}

fn help_line(app: &App) -> Line<'static> {
    let key = Style::default().fg(Color::Cyan);
    Line::from(vec![
        Span::styled(format!(" {} ", app.controller.hotkey()), key),
        Span::raw("toggle  "),
        Span::styled("l ", key),
        Span::raw("skin  "),
        Span::styled("b ", key),
        Span::raw("bank  "),
        Span::styled("f ", key),
        Span::raw("fixed/resizable  "),
        Span::styled("r ", key),
        Span::raw("redraw  "),
        Span::styled("q ", key),
        Span::raw("quit"),
    ])
}
