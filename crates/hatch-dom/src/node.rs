//! Node storage types and node collections.

use indexmap::IndexMap;
use std::fmt;

/// Node identifier in a [`Document`](crate::Document).
///
/// Ids are never reused within a document, so a stale id simply stops
/// resolving once its node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element payload: tag, ordered class list and attributes.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: IndexMap<String, String>,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: IndexMap::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Replace the class list from a whitespace separated `class` value.
    pub(crate) fn set_class_value(&mut self, value: &str) {
        self.classes.clear();
        for class in value.split_ascii_whitespace() {
            if !self.has_class(class) {
                self.classes.push(class.to_string());
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

/// A node in the document arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }
}

/// An ordered, static snapshot of nodes, as returned by queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList(Vec<NodeId>);

impl NodeList {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Node at `index`, if any.
    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }
}

impl IntoIterator for NodeList {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<NodeId> for NodeList {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Anything that can be normalized to a list of nodes: a single node,
/// a slice, a vector or a [`NodeList`].
pub trait IntoNodes {
    fn into_nodes(self) -> Vec<NodeId>;
}

impl IntoNodes for NodeId {
    fn into_nodes(self) -> Vec<NodeId> {
        vec![self]
    }
}

impl IntoNodes for Vec<NodeId> {
    fn into_nodes(self) -> Vec<NodeId> {
        self
    }
}

impl IntoNodes for &[NodeId] {
    fn into_nodes(self) -> Vec<NodeId> {
        self.to_vec()
    }
}

impl IntoNodes for &Vec<NodeId> {
    fn into_nodes(self) -> Vec<NodeId> {
        self.clone()
    }
}

impl<const N: usize> IntoNodes for [NodeId; N] {
    fn into_nodes(self) -> Vec<NodeId> {
        self.to_vec()
    }
}

impl IntoNodes for NodeList {
    fn into_nodes(self) -> Vec<NodeId> {
        self.0
    }
}

impl IntoNodes for &NodeList {
    fn into_nodes(self) -> Vec<NodeId> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_value_dedupes_and_splits() {
        let mut element = ElementData::new("DIV");
        element.set_class_value("  js-foo js-bar\tjs-foo ");

        assert_eq!(element.tag, "div");
        assert_eq!(element.classes, vec!["js-foo", "js-bar"]);
        assert!(element.has_class("js-bar"));
        assert!(!element.has_class("js"));
    }

    #[test]
    fn test_into_nodes_normalizes_inputs() {
        let single = NodeId(3).into_nodes();
        let array = [NodeId(1), NodeId(2)].into_nodes();
        let list: NodeList = vec![NodeId(4), NodeId(5)].into_iter().collect();

        assert_eq!(single, vec![NodeId(3)]);
        assert_eq!(array, vec![NodeId(1), NodeId(2)]);
        assert_eq!(list.item(1), Some(NodeId(5)));
        assert_eq!((&list).into_nodes().len(), 2);
    }
}
