//! Host collaborator interfaces
//!
//! The widget tree, display mode and deferred execution all belong to the
//! host client. The subsystem only ever sees them through these traits, so a
//! real client, the simulated client in `host/`, or a test double can drive it.

use crate::data::{ComponentId, ContentType, WidgetHandle};

/// Unit of work that mutates the widget tree.
///
/// The host passes a fresh tree borrow when it runs the task, never a snapshot
/// taken at scheduling time.
pub type WidgetTask = Box<dyn FnOnce(&mut dyn WidgetTree)>;

/// Read/write access to the host's widget tree
pub trait WidgetTree {
    /// Look up a widget by its well-known identity
    fn widget(&self, id: ComponentId) -> Option<WidgetHandle>;

    fn parent(&self, widget: WidgetHandle) -> Option<WidgetHandle>;

    fn dynamic_children(&self, widget: WidgetHandle) -> Vec<WidgetHandle>;

    fn nested_children(&self, widget: WidgetHandle) -> Vec<WidgetHandle>;

    fn static_children(&self, widget: WidgetHandle) -> Vec<WidgetHandle>;

    fn content_type(&self, widget: WidgetHandle) -> ContentType;

    fn is_hidden(&self, widget: WidgetHandle) -> bool;

    fn set_hidden(&mut self, widget: WidgetHandle, hidden: bool);

    /// Full direct child set of `widget`.
    ///
    /// The host splits children into three collections; none of them alone is
    /// complete. This concatenates dynamic, nested and static children and
    /// drops repeated handles, keeping the first occurrence.
    fn children(&self, widget: WidgetHandle) -> Vec<WidgetHandle> {
        let mut all = self.dynamic_children(widget);
        all.extend(self.nested_children(widget));
        all.extend(self.static_children(widget));

        let mut seen = std::collections::HashSet::with_capacity(all.len());
        all.retain(|w| seen.insert(*w));
        all
    }
}

/// Display-mode query
pub trait DisplayModeQuery {
    /// true = resizable viewport, false = fixed
    fn is_resized(&self) -> bool;
}

/// Host-mandated deferred execution ("run on the client thread")
pub trait Scheduler {
    /// Queue `task` to run once at the host's next safe point.
    fn invoke_later(&self, task: WidgetTask);
}
