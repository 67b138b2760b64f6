//! Simulated game client
//!
//! Stands in for the real host: owns the widget tree, the display mode and the
//! client-thread queue, and turns host actions (switching skins, opening the
//! bank, resizing) into the events the widget subsystem subscribes to.

pub mod arena;
pub mod client_thread;
pub mod layouts;

use crate::core::events::{HostEvent, INVENTORY_PANEL_REDRAW, TOPLEVEL_REDRAW};
use crate::core::host::{DisplayModeQuery, WidgetTree};
use crate::data::{DisplayMode, LayoutVariant};
use arena::WidgetArena;
use client_thread::ClientThread;
use std::cell::Cell;
use std::rc::Rc;

/// Things the user can make the simulated client do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    /// Switch between the modern and classic resizable skins
    SwitchLayout,
    /// Open (or close) the bank over the inventory
    OpenBank,
    /// Switch between fixed and resizable display mode
    ToggleDisplayMode,
    /// Force a top-level interface redraw
    Redraw,
    Quit,
}

/// Shared, cloneable view of the client's display mode
#[derive(Clone)]
pub struct DisplayHandle(Rc<Cell<DisplayMode>>);

impl DisplayHandle {
    pub fn get(&self) -> DisplayMode {
        self.0.get()
    }

    fn set(&self, mode: DisplayMode) {
        self.0.set(mode);
    }
}

impl DisplayModeQuery for DisplayHandle {
    fn is_resized(&self) -> bool {
        self.0.get().is_resized()
    }
}

pub struct SimClient {
    tree: WidgetArena,
    display: DisplayHandle,
    client_thread: ClientThread,
    layout: LayoutVariant,
    bank_open: bool,
    ticks: u64,
}

impl SimClient {
    pub fn new(layout: LayoutVariant, mode: DisplayMode) -> Self {
        let mut client = Self {
            tree: WidgetArena::new(),
            display: DisplayHandle(Rc::new(Cell::new(mode))),
            client_thread: ClientThread::new(),
            layout,
            bank_open: false,
            ticks: 0,
        };
        client.rebuild();
        client
    }

    pub fn display_handle(&self) -> DisplayHandle {
        self.display.clone()
    }

    pub fn client_thread(&self) -> ClientThread {
        self.client_thread.clone()
    }

    pub fn tree(&self) -> &WidgetArena {
        &self.tree
    }

    pub fn layout(&self) -> LayoutVariant {
        self.layout
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display.get()
    }

    pub fn bank_open(&self) -> bool {
        self.bank_open
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of widgets currently hidden anywhere in the tree
    pub fn hidden_count(&self) -> usize {
        (0..self.tree.len())
            .filter(|i| self.tree.is_hidden(crate::data::WidgetHandle(*i)))
            .count()
    }

    /// Perform a host action and return the events the client fires for it
    pub fn perform(&mut self, action: HostAction) -> Vec<HostEvent> {
        tracing::debug!("Host action: {:?}", action);
        match action {
            HostAction::SwitchLayout => {
                self.layout = self.layout.other();
                self.rebuild();
                vec![HostEvent::script(TOPLEVEL_REDRAW)]
            }
            HostAction::OpenBank => {
                self.bank_open = !self.bank_open;
                // Opening a panel over the inventory redraws the viewport with
                // everything visible
                self.reveal_all();
                vec![HostEvent::script(INVENTORY_PANEL_REDRAW)]
            }
            HostAction::ToggleDisplayMode => {
                self.display.set(self.display.get().toggled());
                self.rebuild();
                vec![
                    HostEvent::CanvasSizeChanged,
                    HostEvent::script(TOPLEVEL_REDRAW),
                ]
            }
            HostAction::Redraw => {
                self.reveal_all();
                vec![HostEvent::script(TOPLEVEL_REDRAW)]
            }
            HostAction::Quit => Vec::new(),
        }
    }

    /// Advance one client tick: run every queued widget task
    pub fn tick(&mut self) -> usize {
        self.ticks += 1;
        let queued = self.client_thread.pending();
        let ran = self.client_thread.drain_into(&mut self.tree);
        if ran > 0 {
            tracing::trace!(
                "Tick {}: ran {} widget tasks ({} queued at tick start)",
                self.ticks,
                ran,
                queued
            );
        }
        ran
    }

    fn reveal_all(&mut self) {
        let roots = self.tree.roots().to_vec();
        for root in roots {
            self.tree.reveal_subtree(root);
        }
    }

    fn rebuild(&mut self) {
        match self.display.get() {
            DisplayMode::Fixed => layouts::build_fixed(&mut self.tree),
            DisplayMode::Resizable => layouts::build_resizable(&mut self.tree, self.layout),
        }
    }
}
