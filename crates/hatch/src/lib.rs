//! Hatch - component registry and upgrade engine
//!
//! Elements of a [`Document`](hatch_dom::Document) opt into behavior by
//! carrying a class. Hatch turns them into live component instances:
//! - Registration of component types by name and selector class
//! - Upgrade of single elements, subtrees or the whole document
//! - Per-element marker of applied components, mirrored to `data-upgraded`
//! - Downgrade with teardown hooks
//! - Upgrade callbacks, lifecycle observers and DOM lifecycle events
//!
//! ## Quick Start
//!
//! ```rust
//! use hatch::{Component, ComponentConfig, ComponentHandler, ComponentResult, Constructible};
//! use hatch_dom::{Document, NodeId};
//! use std::any::Any;
//!
//! struct Button {
//!     element: NodeId,
//! }
//!
//! impl Component for Button {
//!     fn element(&self) -> NodeId {
//!         self.element
//!     }
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!     fn as_any_mut(&mut self) -> &mut dyn Any {
//!         self
//!     }
//! }
//!
//! impl Constructible for Button {
//!     fn construct(_handler: &mut ComponentHandler, element: NodeId) -> ComponentResult<Self> {
//!         Ok(Button { element })
//!     }
//! }
//!
//! let mut document = Document::new();
//! let root = document.root();
//! let button = document.build("button").class("js-button").append_to(root);
//!
//! let mut handler = ComponentHandler::new(document);
//! handler.register::<Button>(ComponentConfig::new("Button", "js-button")).unwrap();
//! handler.load().unwrap();
//!
//! assert!(handler.is_upgraded(button, "Button"));
//! assert_eq!(handler.document().attribute(button, "data-upgraded").as_deref(), Some(",Button"));
//! assert!(handler.widget::<Button>(button).is_some());
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod handler;
pub mod marker;
pub mod observer;
pub mod registry;

pub use component::{Component, Constructible};
pub use config::HandlerConfig;
pub use error::{ComponentError, ComponentResult};
pub use handler::{ComponentHandler, InstanceId};
pub use marker::{decode_marker, encode_marker};
pub use observer::{LifecycleEvent, LifecycleKind, LifecycleObserver};
pub use registry::{
    ComponentConfig, ComponentDescriptor, ComponentFactory, ComponentRegistry, RESERVED_PROPERTY, UpgradeCallback,
};
