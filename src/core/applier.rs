//! Applies a hidden/shown state to the viewport widgets.
//!
//! Mutation never happens inline: every apply is packaged as a task and handed
//! to the host scheduler, which runs it on the client thread against the tree
//! as it is at that moment.

use crate::core::host::{DisplayModeQuery, Scheduler, WidgetTree};
use crate::core::locator::WidgetLocator;
use crate::data::{ContentType, WidgetHandle, RENDER_SURFACE_CONTENT_TYPE};

pub struct VisibilityApplier<D, S> {
    display: D,
    scheduler: S,
    locator: WidgetLocator,
    excluded: ContentType,
}

impl<D: DisplayModeQuery, S: Scheduler> VisibilityApplier<D, S> {
    pub fn new(display: D, scheduler: S, locator: WidgetLocator) -> Self {
        Self {
            display,
            scheduler,
            locator,
            excluded: RENDER_SURFACE_CONTENT_TYPE,
        }
    }

    /// Override the content type that is never touched
    pub fn with_excluded_content_type(mut self, excluded: ContentType) -> Self {
        self.excluded = excluded;
        self
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Hide (`true`) or show (`false`) the direct children of every located root.
    ///
    /// Hiding in fixed mode does nothing useful and can break the client, so a
    /// hide request there becomes a show.
    pub fn apply(&self, hidden: bool) {
        if hidden && !self.display.is_resized() {
            tracing::debug!("Fixed display mode, showing widgets instead of hiding");
            return self.apply(false);
        }

        let locator = self.locator;
        let excluded = self.excluded;
        self.scheduler.invoke_later(Box::new(move |tree: &mut dyn WidgetTree| {
            let roots = locator.locate_roots(&*tree);
            let mut changed = 0;
            for root in roots {
                changed += set_children_hidden(tree, root, hidden, excluded);
            }
            tracing::trace!("Set hidden={} on {} widgets", hidden, changed);
        }));
    }
}

/// Set `hidden` on the direct children of `root`, skipping any child tagged
/// with `excluded`. Grandchildren are left alone. Returns how many children
/// were written.
pub fn set_children_hidden(
    tree: &mut dyn WidgetTree,
    root: WidgetHandle,
    hidden: bool,
    excluded: ContentType,
) -> usize {
    let mut written = 0;
    for child in tree.children(root) {
        if tree.content_type(child) == excluded {
            continue;
        }
        tree.set_hidden(child, hidden);
        written += 1;
    }
    written
}
