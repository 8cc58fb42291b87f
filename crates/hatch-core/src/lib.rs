//! Hatch Core
//!
//! Shared utilities for the Hatch component runtime: hash collections,
//! logging setup and profiling hooks.

pub mod alloc;
pub mod logging;
pub mod profiling;
