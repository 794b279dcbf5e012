//! # Storage Layer
//!
//! The store is the durable side of the system: the committed tree. The [`NodeStore`] trait is
//! the whole surface the cache consumes, so a disk-backed store can replace the in-memory one
//! without the cache noticing.
//!
//! ## Identity
//!
//! Every node gets a [`DbId`] on creation, allocated from a counter that only goes up. Identities
//! are never reused, and a node's parent link is fixed at creation.
//!
//! ## Deletion
//!
//! `update_node` with `is_deleted = true` cascades to every descendant and reports the ones that
//! flipped. The cache depends on that report to learn about mirrored nodes it has no cache-side
//! link to. Passing `is_deleted = false` never undeletes.
//!
//! ## Structural Queries
//!
//! `get_node_params`, `get_parent_id`, `get_children_ids` and `is_child` return detached data
//! only. They require the identity to exist and report [`BdcError::NodeNotFound`] otherwise;
//! callers should only ask about identities they already know.
//!
//! ## Implementations
//!
//! - [`memory::Db`]: in-memory node table, with the example hierarchy fixture.
//!
//! [`BdcError::NodeNotFound`]: crate::error::BdcError::NodeNotFound

use crate::error::Result;
use crate::node::{DbId, NodeParams};

pub mod memory;

pub use memory::Db;

/// Node store interface consumed by the cache.
pub trait NodeStore {
    /// Create the root node. Fails if the store already has any node.
    fn add_root(&mut self, value: &str) -> Result<NodeParams>;

    /// Create a node under `parent`. If the parent is deleted, the new node is created deleted.
    fn add_to_parent(&mut self, parent: DbId, value: &str, is_deleted: bool)
        -> Result<NodeParams>;

    /// Detached copy of a node.
    fn get_node_params(&self, id: DbId) -> Result<NodeParams>;

    fn get_parent_id(&self, id: DbId) -> Result<Option<DbId>>;

    /// Child identities in insertion order.
    fn get_children_ids(&self, id: DbId) -> Result<Vec<DbId>>;

    /// Overwrite a node's value and, when `is_deleted` is set, delete it with its subtree.
    ///
    /// Returns `Some` with the newly deleted descendants when deleting (possibly empty),
    /// `None` otherwise.
    fn update_node(
        &mut self,
        id: DbId,
        value: &str,
        is_deleted: bool,
    ) -> Result<Option<Vec<NodeParams>>>;

    /// Whether `candidate` is a direct child of `parent`.
    fn is_child(&self, candidate: DbId, parent: DbId) -> Result<bool> {
        Ok(self.get_parent_id(candidate)? == Some(parent))
    }

    /// All identities in creation order.
    fn ids(&self) -> Vec<DbId>;
}
