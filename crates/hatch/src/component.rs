//! Traits implemented by component types.

use crate::error::ComponentResult;
use crate::handler::ComponentHandler;
use hatch_dom::{Document, NodeId};
use std::any::Any;

/// A live behavior object attached to an element.
///
/// The handler owns every instance it creates; components keep only the id
/// of the element they were built from.
pub trait Component: Any + 'static {
    /// The element this instance was built from.
    fn element(&self) -> NodeId;

    /// Teardown hook, run when the instance is downgraded.
    ///
    /// Undo whatever `construct` did to the document (listeners, injected
    /// children, state classes). The element may already be gone from the
    /// document when the whole subtree was removed first.
    fn downgrade(&mut self, _document: &mut Document) {}

    /// Downcast support: return `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Downcast support: return `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Capability "can be built from an element".
///
/// Construction runs synchronously and may fail, typically when required
/// child structure is missing. It receives the handler itself, so a
/// component can upgrade markup it injects:
///
/// ```
/// use hatch::{Component, ComponentHandler, ComponentResult, Constructible};
/// use hatch_dom::NodeId;
/// use std::any::Any;
///
/// struct Panel {
///     element: NodeId,
/// }
///
/// impl Component for Panel {
///     fn element(&self) -> NodeId {
///         self.element
///     }
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
///
/// impl Constructible for Panel {
///     fn construct(handler: &mut ComponentHandler, element: NodeId) -> ComponentResult<Self> {
///         let body = handler.document_mut().build("div").class("js-panel-body").finish();
///         handler.document_mut().append_child(element, body)?;
///         handler.upgrade_elements(body)?;
///         Ok(Panel { element })
///     }
/// }
/// ```
pub trait Constructible: Component + Sized {
    fn construct(handler: &mut ComponentHandler, element: NodeId) -> ComponentResult<Self>;
}
