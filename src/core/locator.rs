//! Traversal-root resolution
//!
//! The hideable viewport widgets sit in the container that holds the minimap.
//! Each resizable skin has its own minimap component, so both are looked up
//! every time and whichever resolves contributes its parent as a root.

use crate::core::host::WidgetTree;
use crate::data::{ComponentId, WidgetHandle};

/// Minimap under the modern (bottom-line) resizable skin
pub const MODERN_RESIZABLE_MINIMAP: ComponentId = ComponentId::new(164, 32);

/// Minimap under the classic (side box) resizable skin
pub const CLASSIC_RESIZABLE_MINIMAP: ComponentId = ComponentId::new(161, 32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetLocator {
    modern_anchor: ComponentId,
    classic_anchor: ComponentId,
}

impl Default for WidgetLocator {
    fn default() -> Self {
        Self::new(MODERN_RESIZABLE_MINIMAP, CLASSIC_RESIZABLE_MINIMAP)
    }
}

impl WidgetLocator {
    pub fn new(modern_anchor: ComponentId, classic_anchor: ComponentId) -> Self {
        Self {
            modern_anchor,
            classic_anchor,
        }
    }

    pub fn anchors(&self) -> [ComponentId; 2] {
        [self.modern_anchor, self.classic_anchor]
    }

    /// Resolve zero, one or two traversal roots (modern first, then classic).
    ///
    /// A missing anchor or an anchor without a parent is skipped.
    pub fn locate_roots(&self, tree: &dyn WidgetTree) -> Vec<WidgetHandle> {
        let mut roots = Vec::with_capacity(2);
        for anchor in self.anchors() {
            let Some(minimap) = tree.widget(anchor) else {
                continue;
            };
            match tree.parent(minimap) {
                Some(parent) if !roots.contains(&parent) => roots.push(parent),
                Some(_) => {}
                None => tracing::trace!("Minimap {} has no parent container", anchor),
            }
        }
        roots
    }
}
