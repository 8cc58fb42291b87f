//! Arena-backed document tree.

use crate::builder::ElementBuilder;
use crate::error::{DomError, DomResult};
use crate::event::{DispatchOutcome, DomEvent, EventContext, Listener, ListenerId, ListenerTable};
use crate::node::{ElementData, Node, NodeId, NodeKind, NodeList};
use hatch_core::profiling::profile_function;
use indexmap::IndexMap;
use std::rc::Rc;

/// An in-memory document.
///
/// The document always has a root element (`<html>`). Nodes created with
/// [`create_element`](Document::create_element) start detached and become
/// part of the document once appended under the root.
pub struct Document {
    nodes: IndexMap<NodeId, Node>,
    root: NodeId,
    next_id: usize,
    listeners: ListenerTable,
}

impl Document {
    /// Create a document containing only the root element.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = IndexMap::new();
        nodes.insert(root, Node::new(NodeKind::Element(ElementData::new("html"))));
        Self {
            nodes,
            root,
            next_id: 1,
            listeners: ListenerTable::default(),
        }
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn insert_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(kind));
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert_node(NodeKind::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.insert_node(NodeKind::Text(text.to_string()))
    }

    /// Start building a detached element.
    pub fn build(&mut self, tag: &str) -> ElementBuilder<'_> {
        let node = self.create_element(tag);
        ElementBuilder::new(self, node)
    }

    /// Whether `node` belongs to this document (attached or detached).
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Whether `node` is an element of this document.
    pub fn is_element(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(Node::is_element)
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(&node)
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        self.nodes.get(&node).and_then(Node::as_element)
    }

    fn element_mut(&mut self, node: NodeId) -> DomResult<&mut ElementData> {
        self.nodes
            .get_mut(&node)
            .ok_or(DomError::UnknownNode(node))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(node))
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    /// All child nodes, including text nodes.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Child elements only, in order.
    pub fn element_children(&self, node: NodeId) -> NodeList {
        self.children(node)
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
            .collect()
    }

    /// Whether the node is reachable from the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == self.root {
                return self.contains(node);
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Append `child` as the last child of `parent`, moving it if already attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if !self.contains(parent) {
            return Err(DomError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(DomError::UnknownNode(child));
        }
        if !self.is_element(parent)
            || child == self.root
            || self.is_inclusive_ancestor(child, parent)
        {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);
        self.link_child(parent, child);
        Ok(())
    }

    /// Link without validation; callers guarantee both nodes exist, `parent`
    /// is an element and `child` is detached.
    pub(crate) fn link_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = Some(parent);
        }
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(child);
        }
    }

    /// Detach `node` from its parent. The subtree stays in the document.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|id| *id != node);
        }
        if let Some(child_node) = self.nodes.get_mut(&node) {
            child_node.parent = None;
        }
    }

    /// Remove `node` and its whole subtree from the document, returning the
    /// removed ids in pre-order. Listeners on removed nodes are dropped.
    pub fn remove(&mut self, node: NodeId) -> DomResult<Vec<NodeId>> {
        if !self.contains(node) {
            return Err(DomError::UnknownNode(node));
        }
        if node == self.root {
            return Err(DomError::HierarchyRequest {
                parent: node,
                child: node,
            });
        }

        self.detach(node);
        let removed = self.descendants(node);
        for id in &removed {
            self.nodes.shift_remove(id);
            self.listeners.clear_node(*id);
        }
        tracing::trace!("Removed {} node(s) rooted at {}", removed.len(), node);
        Ok(removed)
    }

    /// `node` and every node below it, in pre-order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    // -- Classes --

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.element(node)
            .map(|e| e.classes.as_slice())
            .unwrap_or(&[])
    }

    /// Add a class. Returns `true` if it was not present.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> DomResult<bool> {
        let element = self.element_mut(node)?;
        if element.has_class(class) {
            return Ok(false);
        }
        element.classes.push(class.to_string());
        Ok(true)
    }

    /// Remove a class. Returns `true` if it was present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> DomResult<bool> {
        let element = self.element_mut(node)?;
        let before = element.classes.len();
        element.classes.retain(|c| c != class);
        Ok(element.classes.len() != before)
    }

    /// Toggle a class, returning whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> DomResult<bool> {
        if self.remove_class(node, class)? {
            Ok(false)
        } else {
            self.add_class(node, class)
        }
    }

    // -- Attributes --

    /// Attribute value. `class` is derived from the class list.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let element = self.element(node)?;
        if name.eq_ignore_ascii_case("class") {
            if element.classes.is_empty() {
                return None;
            }
            return Some(element.classes.join(" "));
        }
        element.attributes.get(&name.to_ascii_lowercase()).cloned()
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        let element = self.element_mut(node)?;
        let lowered = name.to_ascii_lowercase();
        if lowered == "class" {
            element.set_class_value(value);
        } else {
            element.attributes.insert(lowered, value.to_string());
        }
        Ok(())
    }

    /// Remove an attribute. Returns the previous value.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<Option<String>> {
        let element = self.element_mut(node)?;
        let lowered = name.to_ascii_lowercase();
        if lowered == "class" {
            if element.classes.is_empty() {
                return Ok(None);
            }
            let previous = element.classes.join(" ");
            element.classes.clear();
            return Ok(Some(previous));
        }
        Ok(element.attributes.shift_remove(&lowered))
    }

    // -- Text --

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .into_iter()
            .filter_map(|id| match &self.nodes.get(&id)?.kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Element(_) => None,
            })
            .collect()
    }

    // -- Queries --

    /// All connected elements carrying `class`, in document order.
    pub fn query_class_all(&self, class: &str) -> NodeList {
        self.query_class_all_in(self.root, class)
    }

    /// Elements under (and including) `scope` carrying `class`, in document order.
    pub fn query_class_all_in(&self, scope: NodeId, class: &str) -> NodeList {
        profile_function!();
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// First element in document order carrying `class`.
    pub fn query_class(&self, class: &str) -> Option<NodeId> {
        self.query_class_all(class).item(0)
    }

    /// First element under `scope` (exclusive) carrying `class`.
    pub fn query_class_in(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.query_class_all_in(scope, class)
            .iter()
            .find(|id| *id != scope)
    }

    /// Number of nodes (attached and detached).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- Events --

    /// Register a listener for `kind` on `node`.
    pub fn add_event_listener<F>(&mut self, node: NodeId, kind: &str, listener: F) -> DomResult<ListenerId>
    where
        F: Fn(&mut EventContext<'_>) + 'static,
    {
        if !self.contains(node) {
            return Err(DomError::UnknownNode(node));
        }
        let listener: Listener = Rc::new(listener);
        Ok(self.listeners.add(node, kind, listener))
    }

    /// Remove a listener. Returns `true` if it was registered.
    pub fn remove_event_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        self.listeners.remove(node, id)
    }

    /// Number of listeners attached to `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.count(node)
    }

    /// Dispatch `event` on its target, bubbling to ancestors when requested.
    pub fn dispatch_event(&self, event: &DomEvent) -> DomResult<DispatchOutcome> {
        if !self.contains(event.target) {
            return Err(DomError::UnknownNode(event.target));
        }

        let path: Vec<NodeId> = if event.bubbles {
            let mut path = Vec::new();
            let mut cursor = Some(event.target);
            while let Some(current) = cursor {
                path.push(current);
                cursor = self.parent(current);
            }
            path
        } else {
            vec![event.target]
        };

        let mut ctx = EventContext::new(event, event.target);
        let mut outcome = DispatchOutcome::default();
        for node in path {
            ctx.set_current_target(node);
            for listener in self.listeners.matching(node, &event.kind) {
                (*listener)(&mut ctx);
                outcome.delivered += 1;
            }
            if ctx.propagation_stopped() {
                break;
            }
        }
        outcome.default_prevented = ctx.default_prevented();

        tracing::trace!(
            "Dispatched '{}' on {} to {} listener(s)",
            event.kind,
            event.target,
            outcome.delivered
        );
        Ok(outcome)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
