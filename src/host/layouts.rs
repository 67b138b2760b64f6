//! Synthetic viewport layouts for the simulated client
//!
//! Each builder produces a top-level interface with a container that holds
//! the minimap and the other viewport widgets, spread across all three child
//! collections. The game render surface carries the excluded content type.

use crate::data::{ComponentId, LayoutVariant, RENDER_SURFACE_CONTENT_TYPE};
use crate::host::arena::{ChildKind, WidgetArena};

/// Interface group of the fixed-size viewport
pub const FIXED_VIEWPORT_GROUP: u16 = 548;

/// Interface group of the classic resizable viewport
pub const CLASSIC_VIEWPORT_GROUP: u16 = 161;

/// Interface group of the modern resizable viewport
pub const MODERN_VIEWPORT_GROUP: u16 = 164;

/// Child index of the minimap within each viewport group
const MINIMAP_CHILD: u16 = 32;

/// Rebuild `arena` for a resizable skin
pub fn build_resizable(arena: &mut WidgetArena, variant: LayoutVariant) {
    let (group, title) = match variant {
        LayoutVariant::Modern => (MODERN_VIEWPORT_GROUP, "Resizable viewport (modern)"),
        LayoutVariant::Classic => (CLASSIC_VIEWPORT_GROUP, "Resizable viewport (classic)"),
    };
    build_viewport(arena, group, title);
}

/// Rebuild `arena` for fixed mode. Its minimap is not one of the resizable
/// anchors, so nothing resolves as a hiding root.
pub fn build_fixed(arena: &mut WidgetArena) {
    build_viewport(arena, FIXED_VIEWPORT_GROUP, "Fixed viewport");
}

fn build_viewport(arena: &mut WidgetArena, group: u16, title: &str) {
    arena.clear();

    let top = arena.add_root(title, Some(ComponentId::new(group, 0)));
    let container = arena.add_child(
        top,
        ChildKind::Static,
        "Viewport container",
        Some(ComponentId::new(group, 1)),
    );

    let game_view = arena.add_child(container, ChildKind::Static, "Game view", None);
    arena.set_content_type(game_view, RENDER_SURFACE_CONTENT_TYPE);

    let minimap = arena.add_child(
        container,
        ChildKind::Static,
        "Minimap",
        Some(ComponentId::new(group, MINIMAP_CHILD)),
    );
    arena.add_child(minimap, ChildKind::Dynamic, "Compass", None);
    arena.add_child(minimap, ChildKind::Dynamic, "World map orb", None);

    let orbs = arena.add_child(container, ChildKind::Nested, "Status orbs", None);
    for orb in ["Hitpoints", "Prayer", "Run energy", "Special attack"] {
        arena.add_child(orbs, ChildKind::Dynamic, orb, None);
    }

    let chatbox = arena.add_child(container, ChildKind::Nested, "Chatbox", None);
    arena.add_child(chatbox, ChildKind::Static, "Chat tabs", None);
    arena.add_child(chatbox, ChildKind::Dynamic, "Chat lines", None);
    // The chatbox is also listed among the dynamic children
    arena.link_child(container, ChildKind::Dynamic, chatbox);

    let side_panel = arena.add_child(container, ChildKind::Nested, "Side panel", None);
    arena.add_child(side_panel, ChildKind::Static, "Inventory", None);
    arena.add_child(side_panel, ChildKind::Static, "Equipment", None);

    arena.add_child(container, ChildKind::Dynamic, "XP drops", None);
    arena.add_child(container, ChildKind::Dynamic, "Overhead text", None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::WidgetTree;
    use crate::core::locator::WidgetLocator;

    #[test]
    fn test_each_variant_resolves_one_root() {
        let locator = WidgetLocator::default();
        for variant in [LayoutVariant::Modern, LayoutVariant::Classic] {
            let mut arena = WidgetArena::new();
            build_resizable(&mut arena, variant);
            let roots = locator.locate_roots(&arena);
            assert_eq!(roots.len(), 1, "{:?}", variant);
            assert_eq!(
                arena.node(roots[0]).map(|n| n.name.as_str()),
                Some("Viewport container")
            );
        }
    }

    #[test]
    fn test_container_children_are_unique() {
        let mut arena = WidgetArena::new();
        build_resizable(&mut arena, LayoutVariant::Modern);
        let root = WidgetLocator::default().locate_roots(&arena)[0];

        let names: Vec<&str> = arena
            .children(root)
            .into_iter()
            .filter_map(|child| arena.node(child).map(|n| n.name.as_str()))
            .collect();
        assert_eq!(names.len(), 7);
        assert_eq!(names.iter().filter(|n| **n == "Chatbox").count(), 1);
    }

    #[test]
    fn test_fixed_resolves_nothing() {
        let mut arena = WidgetArena::new();
        build_fixed(&mut arena);
        assert!(WidgetLocator::default().locate_roots(&arena).is_empty());
    }

    #[test]
    fn test_rebuild_replaces_tree() {
        let mut arena = WidgetArena::new();
        build_resizable(&mut arena, LayoutVariant::Modern);
        let size = arena.len();
        build_resizable(&mut arena, LayoutVariant::Classic);
        assert_eq!(arena.len(), size);
        assert_eq!(arena.roots().len(), 1);
        assert!(arena.widget(ComponentId::new(MODERN_VIEWPORT_GROUP, 0)).is_none());
    }
}
