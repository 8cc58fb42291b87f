//! Declarative builder API for constructing element subtrees.

use crate::document::Document;
use crate::node::NodeId;

/// Builder for a single element and its children.
///
/// ```
/// use hatch_dom::Document;
///
/// let mut doc = Document::new();
/// let field = doc
///     .build("div")
///     .class("hatch-selectfield")
///     .attr("id", "country")
///     .child("select", |select| select.class("hatch-selectfield__select"))
///     .finish();
///
/// assert!(doc.has_class(field, "hatch-selectfield"));
/// assert_eq!(doc.element_children(field).len(), 1);
/// ```
pub struct ElementBuilder<'a> {
    doc: &'a mut Document,
    node: NodeId,
}

impl<'a> ElementBuilder<'a> {
    pub(crate) fn new(doc: &'a mut Document, node: NodeId) -> Self {
        Self { doc, node }
    }

    /// Add a class.
    pub fn class(self, class: &str) -> Self {
        // The node is a freshly created element.
        let _ = self.doc.add_class(self.node, class);
        self
    }

    /// Add several classes at once.
    pub fn classes(mut self, classes: &[&str]) -> Self {
        for class in classes {
            self = self.class(class);
        }
        self
    }

    /// Set an attribute.
    pub fn attr(self, name: &str, value: &str) -> Self {
        let _ = self.doc.set_attribute(self.node, name, value);
        self
    }

    /// Append a text node.
    pub fn text(self, text: &str) -> Self {
        let text_node = self.doc.create_text(text);
        self.doc.link_child(self.node, text_node);
        self
    }

    /// Append a child element configured by `build`.
    pub fn child(self, tag: &str, build: impl FnOnce(ElementBuilder<'_>) -> ElementBuilder<'_>) -> Self {
        let child = self.doc.create_element(tag);
        build(ElementBuilder::new(&mut *self.doc, child));
        self.doc.link_child(self.node, child);
        self
    }

    /// Append an existing detached node.
    pub fn append(self, node: NodeId) -> Self {
        if let Err(e) = self.doc.append_child(self.node, node) {
            tracing::warn!("Could not append {} to built element {}: {}", node, self.node, e);
        }
        self
    }

    /// Append the built element under `parent` and return its id.
    pub fn append_to(self, parent: NodeId) -> NodeId {
        let node = self.node;
        if let Err(e) = self.doc.append_child(parent, node) {
            tracing::warn!("Built element {} left detached: {}", node, e);
        }
        node
    }

    /// Return the id of the (still detached) built element.
    pub fn finish(self) -> NodeId {
        self.node
    }
}
