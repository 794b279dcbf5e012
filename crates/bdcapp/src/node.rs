//! # Nodes and the Forest Arena
//!
//! Both the store and the cache hold trees of the same shape: a node has a value, a soft-delete
//! flag, an optional store identity, a parent and an ordered list of children. Nodes never own
//! each other. They live in a [`Forest`] keyed by an integer handle, and parent/child links are
//! handles into that same forest.
//!
//! ## Identity Spaces
//!
//! - [`DbId`]: permanent identity assigned by the store. Never reused.
//! - [`CacheId`]: transient identity assigned by the cache while a node is staged.
//!
//! A cache node is keyed by its `CacheId` and additionally carries a `db_id` once it has been
//! loaded from or committed to the store.
//!
//! ## Linkage Rules
//!
//! - A node's parent is assigned once. A second assignment is a [`BdcError::Linkage`].
//! - Attaching a node under a deleted parent marks the node deleted (the node only, not its
//!   subtree; see [`Forest::append_child`]).
//! - Deleting a node marks its whole subtree and reports which descendants flipped.
//!
//! Deletion is monotone. Nothing in this crate clears `is_deleted`.

use crate::error::{BdcError, Result};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Permanent identity of a node in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DbId(pub u64);

/// Transient identity of a node staged in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheId(pub u64);

impl fmt::Display for DbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DbId> for u64 {
    fn from(id: DbId) -> Self {
        id.0
    }
}

impl From<CacheId> for u64 {
    fn from(id: CacheId) -> Self {
        id.0
    }
}

/// Handle type usable as a forest key.
pub trait NodeKey: Copy + Ord + fmt::Debug + fmt::Display + Into<u64> {}

impl NodeKey for DbId {}
impl NodeKey for CacheId {}

/// Detached snapshot of a store node, without links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeParams {
    pub db_id: DbId,
    pub value: String,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K> {
    pub id: K,
    pub value: String,
    pub db_id: Option<DbId>,
    is_deleted: bool,
    parent: Option<K>,
    children: Vec<K>,
}

impl<K: NodeKey> Node<K> {
    pub fn new(id: K, value: impl Into<String>, db_id: Option<DbId>, is_deleted: bool) -> Self {
        Self {
            id,
            value: value.into(),
            db_id,
            is_deleted,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Builds an unlinked node mirroring a store snapshot.
    pub fn from_params(id: K, params: NodeParams) -> Self {
        Self::new(id, params.value, Some(params.db_id), params.is_deleted)
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn parent(&self) -> Option<K> {
        self.parent
    }

    pub fn children(&self) -> &[K] {
        &self.children
    }

    fn set_parent(&mut self, parent: K) -> Result<()> {
        if self.parent.is_some() {
            return Err(BdcError::Linkage(self.id.into()));
        }
        self.parent = Some(parent);
        Ok(())
    }
}

/// Arena of nodes addressed by handle. Iteration follows key order, which for monotonically
/// allocated handles is registration order.
#[derive(Debug, Clone)]
pub struct Forest<K> {
    nodes: BTreeMap<K, Node<K>>,
}

impl<K: NodeKey> Default for Forest<K> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }
}

impl<K: NodeKey> Forest<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an unlinked node under its own `id`. A handle that is already registered is
    /// a [`BdcError::Consistency`] and leaves the forest unchanged.
    pub fn insert(&mut self, node: Node<K>) -> Result<&mut Node<K>> {
        match self.nodes.entry(node.id) {
            Entry::Occupied(_) => Err(BdcError::Consistency(format!(
                "handle {} is already registered",
                node.id
            ))),
            Entry::Vacant(slot) => Ok(slot.insert(node)),
        }
    }

    pub fn get(&self, id: K) -> Option<&Node<K>> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: K) -> Option<&mut Node<K>> {
        self.nodes.get_mut(&id)
    }

    /// Like [`Forest::get`], for callers that treat a miss as a bug.
    pub fn node(&self, id: K) -> Result<&Node<K>> {
        self.nodes
            .get(&id)
            .ok_or_else(|| BdcError::NodeNotFound(id.into()))
    }

    pub fn node_mut(&mut self, id: K) -> Result<&mut Node<K>> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| BdcError::NodeNotFound(id.into()))
    }

    pub fn contains(&self, id: K) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.nodes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node<K>> {
        self.nodes.values()
    }

    /// Nodes with no parent, in key order.
    pub fn roots(&self) -> impl Iterator<Item = &Node<K>> {
        self.nodes.values().filter(|n| n.parent.is_none())
    }

    /// Links `child` under `parent`.
    ///
    /// Fails without mutating anything if the child already has a parent, or if the link would
    /// close a cycle. When the parent is already deleted the child is marked deleted too; its own
    /// descendants are left to the caller.
    pub fn append_child(&mut self, parent: K, child: K) -> Result<()> {
        let parent_deleted = self.node(parent)?.is_deleted;
        let child_node = self.node(child)?;
        // a childless node can only close a cycle with itself
        let closes_cycle = if child_node.children.is_empty() {
            child == parent
        } else {
            self.is_ancestor_or_self(child, parent)
        };
        if child_node.parent.is_some() || closes_cycle {
            return Err(BdcError::Linkage(child.into()));
        }

        let child_node = self.node_mut(child)?;
        child_node.set_parent(parent)?;
        if parent_deleted {
            child_node.is_deleted = true;
        }
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Marks `id` and its whole subtree deleted. Returns the descendants that were live before
    /// the call; `id` itself is never part of the result.
    pub fn delete(&mut self, id: K) -> Result<Vec<K>> {
        let node = self.node_mut(id)?;
        node.is_deleted = true;

        let mut newly_deleted = Vec::new();
        let mut pending = node.children.clone();
        while let Some(next) = pending.pop() {
            if let Some(child) = self.nodes.get_mut(&next) {
                if !child.is_deleted {
                    child.is_deleted = true;
                    newly_deleted.push(next);
                }
                pending.extend(child.children.iter().copied());
            }
        }
        Ok(newly_deleted)
    }

    /// Every node below `id`, depth first.
    pub fn descendants(&self, id: K) -> Result<Vec<K>> {
        let mut found = Vec::new();
        let mut pending = self.node(id)?.children.clone();
        while let Some(next) = pending.pop() {
            found.push(next);
            if let Some(child) = self.nodes.get(&next) {
                pending.extend(child.children.iter().copied());
            }
        }
        Ok(found)
    }

    fn is_ancestor_or_self(&self, candidate: K, of: K) -> bool {
        let mut cursor = Some(of);
        while let Some(id) = cursor {
            if id == candidate {
                return true;
            }
            cursor = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }
}
