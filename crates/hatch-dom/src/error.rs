use crate::node::NodeId;

/// Errors raised by document operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The node id does not refer to a node of this document.
    UnknownNode(NodeId),

    /// The operation requires an element but the node is not one.
    NotAnElement(NodeId),

    /// Inserting `child` under `parent` would break the tree
    /// (cycle, non-element parent, or moving the document root).
    HierarchyRequest { parent: NodeId, child: NodeId },
}

impl std::fmt::Display for DomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomError::UnknownNode(node) => write!(f, "Unknown node: {}", node),
            DomError::NotAnElement(node) => write!(f, "Node {} is not an element", node),
            DomError::HierarchyRequest { parent, child } => {
                write!(f, "Cannot insert {} under {}", child, parent)
            }
        }
    }
}

impl std::error::Error for DomError {}

/// Result type for document operations.
pub type DomResult<T> = Result<T, DomError>;
