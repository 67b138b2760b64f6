//! In-memory widget tree used by the simulated client
//!
//! Nodes live in a flat arena and refer to each other by `WidgetHandle`.
//! Like the real client, every node keeps its children in three separate
//! collections (dynamic, nested, static).

use crate::core::host::WidgetTree;
use crate::data::{ComponentId, ContentType, WidgetHandle};
use std::collections::HashMap;

/// Which child collection a node is attached through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildKind {
    Dynamic,
    Nested,
    Static,
}

/// A single widget node
#[derive(Clone, Debug)]
pub struct WidgetNode {
    pub id: Option<ComponentId>,
    pub name: String,
    pub parent: Option<WidgetHandle>,
    pub content_type: ContentType,
    pub hidden: bool,
    pub dynamic_children: Vec<WidgetHandle>,
    pub nested_children: Vec<WidgetHandle>,
    pub static_children: Vec<WidgetHandle>,
}

impl WidgetNode {
    fn new(name: &str, id: Option<ComponentId>, parent: Option<WidgetHandle>) -> Self {
        Self {
            id,
            name: name.to_string(),
            parent,
            content_type: ContentType::NONE,
            hidden: false,
            dynamic_children: Vec::new(),
            nested_children: Vec::new(),
            static_children: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct WidgetArena {
    nodes: Vec<WidgetNode>,
    roots: Vec<WidgetHandle>,
    by_id: HashMap<ComponentId, WidgetHandle>,
}

impl WidgetArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level interface
    pub fn add_root(&mut self, name: &str, id: Option<ComponentId>) -> WidgetHandle {
        let handle = self.push(WidgetNode::new(name, id, None));
        self.roots.push(handle);
        handle
    }

    /// Attach a new child to `parent` through the given collection.
    ///
    /// An unknown parent yields a detached node that is still addressable by id.
    pub fn add_child(
        &mut self,
        parent: WidgetHandle,
        kind: ChildKind,
        name: &str,
        id: Option<ComponentId>,
    ) -> WidgetHandle {
        let handle = self.push(WidgetNode::new(name, id, Some(parent)));
        if let Some(node) = self.nodes.get_mut(parent.0) {
            match kind {
                ChildKind::Dynamic => node.dynamic_children.push(handle),
                ChildKind::Nested => node.nested_children.push(handle),
                ChildKind::Static => node.static_children.push(handle),
            }
        }
        handle
    }

    /// Also list an existing node under another collection of its parent
    pub fn link_child(&mut self, parent: WidgetHandle, kind: ChildKind, child: WidgetHandle) {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            match kind {
                ChildKind::Dynamic => node.dynamic_children.push(child),
                ChildKind::Nested => node.nested_children.push(child),
                ChildKind::Static => node.static_children.push(child),
            }
        }
    }

    pub fn set_content_type(&mut self, widget: WidgetHandle, content_type: ContentType) {
        if let Some(node) = self.nodes.get_mut(widget.0) {
            node.content_type = content_type;
        }
    }

    pub fn node(&self, widget: WidgetHandle) -> Option<&WidgetNode> {
        self.nodes.get(widget.0)
    }

    pub fn roots(&self) -> &[WidgetHandle] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every node. Handles from before the call are invalid afterwards.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.by_id.clear();
    }

    /// Host-side redraw behaviour: make every node below `widget` visible again
    pub fn reveal_subtree(&mut self, widget: WidgetHandle) {
        let mut stack = vec![widget];
        while let Some(current) = stack.pop() {
            let children = self.children(current);
            for child in children {
                if let Some(node) = self.nodes.get_mut(child.0) {
                    node.hidden = false;
                }
                stack.push(child);
            }
        }
    }

    fn push(&mut self, node: WidgetNode) -> WidgetHandle {
        let handle = WidgetHandle(self.nodes.len());
        if let Some(id) = node.id {
            self.by_id.insert(id, handle);
        }
        self.nodes.push(node);
        handle
    }
}

impl WidgetTree for WidgetArena {
    fn widget(&self, id: ComponentId) -> Option<WidgetHandle> {
        self.by_id.get(&id).copied()
    }

    fn parent(&self, widget: WidgetHandle) -> Option<WidgetHandle> {
        self.node(widget).and_then(|n| n.parent)
    }

    fn dynamic_children(&self, widget: WidgetHandle) -> Vec<WidgetHandle> {
        self.node(widget)
            .map(|n| n.dynamic_children.clone())
            .unwrap_or_default()
    }

    fn nested_children(&self, widget: WidgetHandle) -> Vec<WidgetHandle> {
        self.node(widget)
            .map(|n| n.nested_children.clone())
            .unwrap_or_default()
    }

    fn static_children(&self, widget: WidgetHandle) -> Vec<WidgetHandle> {
        self.node(widget)
            .map(|n| n.static_children.clone())
            .unwrap_or_default()
    }

    fn content_type(&self, widget: WidgetHandle) -> ContentType {
        self.node(widget)
            .map(|n| n.content_type)
            .unwrap_or_default()
    }

    fn is_hidden(&self, widget: WidgetHandle) -> bool {
        self.node(widget).map(|n| n.hidden).unwrap_or(false)
    }

    fn set_hidden(&mut self, widget: WidgetHandle, hidden: bool) {
        if let Some(node) = self.nodes.get_mut(widget.0) {
            node.hidden = hidden;
        }
    }
}
