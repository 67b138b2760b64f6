//! Test doubles standing in for the host client

use crate::core::host::{DisplayModeQuery, Scheduler, WidgetTask, WidgetTree};
use crate::core::locator::{CLASSIC_RESIZABLE_MINIMAP, MODERN_RESIZABLE_MINIMAP};
use crate::data::{WidgetHandle, RENDER_SURFACE_CONTENT_TYPE};
use crate::host::arena::{ChildKind, WidgetArena};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Runs every task immediately against the shared arena
#[derive(Clone)]
pub struct InlineScheduler {
    pub tree: Rc<RefCell<WidgetArena>>,
    pub runs: Rc<Cell<usize>>,
}

impl InlineScheduler {
    pub fn new(tree: Rc<RefCell<WidgetArena>>) -> Self {
        Self {
            tree,
            runs: Rc::new(Cell::new(0)),
        }
    }
}

impl Scheduler for InlineScheduler {
    fn invoke_later(&self, task: WidgetTask) {
        self.runs.set(self.runs.get() + 1);
        let mut tree = self.tree.borrow_mut();
        task(&mut *tree);
    }
}

/// Display mode that tests can flip
#[derive(Clone)]
pub struct FakeDisplay(pub Rc<Cell<bool>>);

impl FakeDisplay {
    pub fn resizable() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn set_resized(&self, resized: bool) {
        self.0.set(resized);
    }
}

impl DisplayModeQuery for FakeDisplay {
    fn is_resized(&self) -> bool {
        self.0.get()
    }
}

/// Handles into the synthetic viewport built by `viewport_tree`
pub struct Viewport {
    pub container: WidgetHandle,
    pub minimap: WidgetHandle,
    pub chatbox: WidgetHandle,
    pub orbs: WidgetHandle,
    pub render_surface: WidgetHandle,
    /// Child of `chatbox`
    pub chat_line: WidgetHandle,
}

impl Viewport {
    /// Direct children eligible for hiding
    pub fn eligible(&self) -> [WidgetHandle; 3] {
        [self.minimap, self.chatbox, self.orbs]
    }
}

/// Three-level modern viewport: container -> {minimap, chatbox, orbs,
/// render surface} -> chat line.
pub fn viewport_tree(arena: &mut WidgetArena) -> Viewport {
    let container = arena.add_root("viewport", None);
    let minimap = arena.add_child(
        container,
        ChildKind::Static,
        "minimap",
        Some(MODERN_RESIZABLE_MINIMAP),
    );
    let chatbox = arena.add_child(container, ChildKind::Nested, "chatbox", None);
    let orbs = arena.add_child(container, ChildKind::Dynamic, "orbs", None);
    let render_surface = arena.add_child(container, ChildKind::Static, "render", None);
    arena.set_content_type(render_surface, RENDER_SURFACE_CONTENT_TYPE);
    let chat_line = arena.add_child(chatbox, ChildKind::Dynamic, "chat_line", None);

    Viewport {
        container,
        minimap,
        chatbox,
        orbs,
        render_surface,
        chat_line,
    }
}

/// Classic-skin container whose minimap uses the classic anchor
pub fn classic_container(arena: &mut WidgetArena) -> (WidgetHandle, WidgetHandle) {
    let container = arena.add_root("classic_viewport", None);
    let minimap = arena.add_child(
        container,
        ChildKind::Static,
        "minimap",
        Some(CLASSIC_RESIZABLE_MINIMAP),
    );
    (container, minimap)
}

/// Hidden flags of `widgets`, in order
pub fn hidden_flags(tree: &WidgetArena, widgets: &[WidgetHandle]) -> Vec<bool> {
    widgets.iter().map(|w| tree.is_hidden(*w)).collect()
}
