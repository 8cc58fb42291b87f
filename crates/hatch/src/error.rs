use hatch_dom::{DomError, NodeId};

/// Errors raised by the component engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// A descriptor with this selector is already registered.
    DuplicateSelector { selector: String },

    /// A descriptor with this name is already registered.
    DuplicateName { name: String },

    /// The component would overwrite the engine's bookkeeping slot.
    ReservedProperty { name: String, property: &'static str },

    /// No descriptor is registered under this name.
    UnregisteredComponent { name: String },

    /// The node is not an element of the handler's document.
    InvalidElement { node: NodeId },

    /// The node is neither part of the document nor tracked by the engine.
    InvalidArgument { node: NodeId },

    /// A component constructor rejected its element.
    Construction { component: String, message: String },

    /// A document operation failed.
    Dom(DomError),
}

impl ComponentError {
    /// Build a [`ComponentError::Construction`].
    pub fn construction(component: impl Into<String>, message: impl Into<String>) -> Self {
        ComponentError::Construction {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Whether this error comes from registration (fix the code, not the input).
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            ComponentError::DuplicateSelector { .. }
                | ComponentError::DuplicateName { .. }
                | ComponentError::ReservedProperty { .. }
        )
    }
}

impl std::fmt::Display for ComponentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentError::DuplicateSelector { selector } => {
                write!(f, "The provided selector has already been registered: {}", selector)
            }
            ComponentError::DuplicateName { name } => {
                write!(f, "The provided name has already been registered: {}", name)
            }
            ComponentError::ReservedProperty { name, property } => write!(
                f,
                "Component '{}' must not use the reserved property '{}'",
                name, property
            ),
            ComponentError::UnregisteredComponent { name } => {
                write!(f, "Unable to find a registered component named '{}'", name)
            }
            ComponentError::InvalidElement { node } => {
                write!(f, "Invalid argument provided to upgrade: {} is not an element", node)
            }
            ComponentError::InvalidArgument { node } => {
                write!(f, "Invalid argument provided to downgrade: unknown node {}", node)
            }
            ComponentError::Construction { component, message } => {
                write!(f, "Failed to construct '{}': {}", component, message)
            }
            ComponentError::Dom(err) => write!(f, "Document error: {}", err),
        }
    }
}

impl std::error::Error for ComponentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComponentError::Dom(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomError> for ComponentError {
    fn from(err: DomError) -> Self {
        ComponentError::Dom(err)
    }
}

/// Result type for component engine operations.
pub type ComponentResult<T> = Result<T, ComponentError>;
