//! # Hierarchical Store Access
//!
//! The store is modeled as an injected capability rather than ambient
//! state: the consistency checker and the aggregate bootstrap take a
//! `&dyn Store` and own nothing about the backing implementation. Disk,
//! network, or memory is irrelevant to the metadata layer, and tests run
//! against [`MemoryStore`] without any I/O.
//!
//! Lookups are synchronous. Retry policy, timeouts, and cancellation are
//! the store implementation's business, not the metadata layer's.

use std::collections::HashMap;

use serde_json::Value;

use ngff_core::StorePath;

/// What a store holds at a given path.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreNode {
    /// An n-dimensional array.
    Array {
        /// Array shape, slowest-varying dimension first.
        shape: Vec<u64>,
        /// Element type, verbatim from the store.
        dtype: String,
    },
    /// A group of named children.
    Group,
    /// Nothing exists at the path.
    Missing,
}

impl StoreNode {
    /// Returns true for [`StoreNode::Array`].
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    /// Returns true for [`StoreNode::Group`].
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group)
    }
}

/// Synchronous lookup into a hierarchical array store.
pub trait Store {
    /// The node stored at `path`. Never fails: an unknown path is
    /// [`StoreNode::Missing`].
    fn resolve(&self, path: &StorePath) -> StoreNode;

    /// The attribute tree attached to the node at `path`, if any.
    fn attributes(&self, path: &StorePath) -> Option<Value>;
}

/// A literal in-memory store: exactly the nodes and attribute trees that
/// were inserted, nothing inferred.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    nodes: HashMap<StorePath, StoreNode>,
    attrs: HashMap<StorePath, Value>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an array at `path`.
    pub fn insert_array(&mut self, path: StorePath, shape: Vec<u64>, dtype: impl Into<String>) {
        self.nodes.insert(
            path,
            StoreNode::Array {
                shape,
                dtype: dtype.into(),
            },
        );
    }

    /// Put a group at `path`.
    pub fn insert_group(&mut self, path: StorePath) {
        self.nodes.insert(path, StoreNode::Group);
    }

    /// Attach an attribute tree to the node at `path`.
    pub fn insert_attributes(&mut self, path: StorePath, attrs: Value) {
        self.attrs.insert(path, attrs);
    }

    /// Remove whatever is at `path`, attributes included.
    pub fn remove(&mut self, path: &StorePath) {
        self.nodes.remove(path);
        self.attrs.remove(path);
    }
}

impl Store for MemoryStore {
    fn resolve(&self, path: &StorePath) -> StoreNode {
        self.nodes.get(path).cloned().unwrap_or(StoreNode::Missing)
    }

    fn attributes(&self, path: &StorePath) -> Option<Value> {
        self.attrs.get(path).cloned()
    }
}
