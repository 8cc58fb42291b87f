//! Test utilities for Hatch.
//!
//! This crate provides probe components and a call recorder for exercising
//! the component handler without a real page.
//!
//! # Overview
//!
//! - [`CallRecorder`] - Collects constructor, teardown and callback calls
//! - [`Foo`], [`Bar`], [`Baz`] - Probe components that always construct
//! - [`Failing`] - A component whose constructor always fails
//! - [`Nesting`] - A component that injects and upgrades child markup
//! - [`Checkbox`] - A component with required child structure and a
//!   teardown hook
//!
//! # Example
//!
//! ```rust
//! use hatch::ComponentHandler;
//! use hatch_test_utils::{CallRecorder, RecordedCall, register_probes};
//!
//! let recorder = CallRecorder::install();
//! let mut handler = ComponentHandler::default();
//! register_probes(&mut handler).unwrap();
//!
//! let root = handler.document().root();
//! let el = handler.document_mut().build("div").class("js-foo").append_to(root);
//! handler.upgrade_all().unwrap();
//!
//! assert_eq!(recorder.calls(), vec![RecordedCall::Constructed { component: "Foo", element: el }]);
//! ```
//!
//! # Recording
//!
//! Constructors are plain functions, so probes report to the recorder
//! installed on the current thread. Tests run on separate threads and never
//! see each other's calls.

pub mod components;
pub mod recorder;

pub use components::*;
pub use recorder::{CallRecorder, RecordedCall, record};
