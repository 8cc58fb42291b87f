//! Hatch DOM - in-memory host document
//!
//! The component engine upgrades elements of a document. This crate provides
//! the document it works on:
//! - Arena-backed node tree with element and text nodes
//! - Class lists and attributes
//! - Class-selector queries in document order
//! - Bubbling synthetic events with listeners
//! - A builder for markup-like subtree construction

pub mod builder;
pub mod document;
pub mod error;
pub mod event;
pub mod node;

pub use builder::ElementBuilder;
pub use document::Document;
pub use error::{DomError, DomResult};
pub use event::{DispatchOutcome, DomEvent, EventContext, Listener, ListenerId};
pub use node::{ElementData, IntoNodes, Node, NodeId, NodeKind, NodeList};
