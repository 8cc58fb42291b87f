//! Collection types used across Hatch.
//!
//! This module provides:
//! - Re-exports of hash collections using AHash
//! - Insertion-ordered map/set aliases backed by `indexmap` with the same hasher

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Insertion-ordered map hashed with AHash.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

/// Insertion-ordered set hashed with AHash.
pub type IndexSet<T> = indexmap::IndexSet<T, RandomState>;
