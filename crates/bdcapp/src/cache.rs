//! # Cache: the Staged Working Copy
//!
//! The cache mirrors a subset of the store and stages edits against it. Nothing reaches the store
//! until [`Cache::save`].
//!
//! ## Indexes
//!
//! - `nodes`: every staged node, keyed by [`CacheId`]. Iteration is registration order.
//! - `db_nodes`: store identity to cache identity, for nodes loaded from or committed to the store.
//! - `orphans`: store identities loaded into the cache whose store parent is not loaded yet.
//!
//! ## Loading in Any Order
//!
//! Callers may load a deep node before its ancestors. Each [`Cache::load`] reconciles in two
//! directions:
//!
//! 1. **Downward**: every orphan whose store parent is the node just loaded is attached under it
//!    and leaves `orphans`.
//! 2. **Upward**: if the store parent of the node just loaded is mirrored, the node is attached
//!    under it. Otherwise it becomes an orphan until that parent arrives.
//!
//! Once every identity on a chain is loaded, the cache tree matches the store tree for those
//! identities no matter the load order.
//!
//! Attaching under a deleted node deletes the attached node together with whatever cache subtree
//! it already carries.
//!
//! ## Saving
//!
//! [`Cache::save`] walks nodes in registration order. A parent is always registered before any
//! child created with [`Cache::add_node`], so by the time a new node is reached its parent already
//! has a store identity.
//!
//! - Committed nodes push value and delete flag with `update_node`.
//! - New nodes are created with `add_to_parent` and receive their store identity.
//! - Finally, every store identity that the store reports as deleted (by cascade, or by a delete
//!   that happened outside this cache) is deleted in the cache too. This is how a mirrored node
//!   with no cache-side link to a deleted ancestor learns about it.
//!
//! `save` is not atomic. If it fails partway, nodes already visited stay committed.

use crate::error::{BdcError, Result};
use crate::node::{CacheId, DbId, Forest, Node, NodeParams};
use crate::store::NodeStore;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

pub const DEFAULT_NODE_VALUE: &str = "New Node";

pub type CacheNode = Node<CacheId>;

/// Outcome of a [`Cache::save`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Already-committed nodes pushed with `update_node`.
    pub updated: usize,
    /// New nodes and the store identities they received.
    pub created: Vec<(CacheId, DbId)>,
    /// Cache nodes deleted because the store reported them deleted.
    pub cascaded: Vec<CacheId>,
}

#[derive(Debug)]
pub struct Cache {
    nodes: Forest<CacheId>,
    db_nodes: HashMap<DbId, CacheId>,
    orphans: BTreeSet<DbId>,
    next_id: u64,
    default_value: String,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    pub fn new() -> Self {
        Self::with_default_value(DEFAULT_NODE_VALUE)
    }

    /// Cache whose `add_node` uses `value` for new nodes.
    pub fn with_default_value(value: impl Into<String>) -> Self {
        Self {
            nodes: Forest::new(),
            db_nodes: HashMap::new(),
            orphans: BTreeSet::new(),
            next_id: 0,
            default_value: value.into(),
        }
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Mirror store node `db_id` and link it to whatever is already loaded.
    ///
    /// Loading an identity that is already mirrored changes nothing and returns the existing
    /// cache identity.
    pub fn load<S: NodeStore>(&mut self, db_id: DbId, db: &S) -> Result<CacheId> {
        if let Some(&existing) = self.db_nodes.get(&db_id) {
            return Ok(existing);
        }

        let params = db.get_node_params(db_id)?;
        let parent_db_id = db.get_parent_id(db_id)?;
        let cache_id = self.allocate_id();
        self.nodes.insert(Node::from_params(cache_id, params))?;
        self.db_nodes.insert(db_id, cache_id);
        debug!(%db_id, %cache_id, "loaded into cache");

        let mut adopted = Vec::new();
        for &orphan in &self.orphans {
            if db.is_child(orphan, db_id)? {
                adopted.push(orphan);
            }
        }
        for orphan in adopted {
            self.orphans.remove(&orphan);
            let child = self.mirror_of(orphan)?;
            self.attach(cache_id, child)?;
            debug!(%orphan, parent = %db_id, "orphan adopted");
        }

        if let Some(parent) = parent_db_id {
            match self.db_nodes.get(&parent).copied() {
                Some(parent_cache_id) => self.attach(parent_cache_id, cache_id)?,
                None => {
                    self.orphans.insert(db_id);
                }
            }
        }

        Ok(cache_id)
    }

    /// Stage a new node under `parent`. It has the default value and no store identity until
    /// the next save.
    pub fn add_node(&mut self, parent: CacheId) -> Result<&mut CacheNode> {
        if !self.nodes.contains(parent) {
            return Err(BdcError::UnknownParent(parent.0));
        }
        let cache_id = self.allocate_id();
        self.nodes.insert(Node::new(
            cache_id,
            self.default_value.clone(),
            None,
            false,
        ))?;
        self.nodes.append_child(parent, cache_id)?;
        debug!(%parent, %cache_id, "staged new node");
        self.nodes.node_mut(cache_id)
    }

    /// Soft-delete a cache node and its attached subtree. The store is not touched.
    pub fn delete(&mut self, cache_id: CacheId) -> Result<Vec<CacheId>> {
        self.nodes.delete(cache_id)
    }

    /// Commit every staged node to `db`.
    pub fn save<S: NodeStore>(&mut self, db: &mut S) -> Result<SaveReport> {
        let mut report = SaveReport::default();
        let mut deleted_in_db: Vec<NodeParams> = Vec::new();

        let staged: Vec<CacheId> = self.nodes.ids().collect();
        for cache_id in staged {
            let node = self.nodes.node(cache_id)?;
            let is_deleted = node.is_deleted();

            if let Some(db_id) = node.db_id {
                if let Some(cascade) = db.update_node(db_id, &node.value, is_deleted)? {
                    deleted_in_db.extend(cascade);
                }
                report.updated += 1;

                let stored = db.get_node_params(db_id)?;
                if stored.is_deleted && !is_deleted {
                    deleted_in_db.push(stored);
                }
                continue;
            }

            let parent_db_id = self.committed_parent(cache_id)?;
            let node = self.nodes.node(cache_id)?;
            let created = db.add_to_parent(parent_db_id, &node.value, is_deleted)?;
            self.nodes.node_mut(cache_id)?.db_id = Some(created.db_id);
            self.db_nodes.insert(created.db_id, cache_id);
            debug!(%cache_id, db_id = %created.db_id, "committed new node");
            report.created.push((cache_id, created.db_id));

            if created.is_deleted && !is_deleted {
                deleted_in_db.push(created);
            }
        }

        for params in deleted_in_db {
            let Some(&cache_id) = self.db_nodes.get(&params.db_id) else {
                continue;
            };
            if self.nodes.node(cache_id)?.is_deleted() {
                continue;
            }
            self.nodes.delete(cache_id)?;
            report.cascaded.push(cache_id);
        }

        info!(
            updated = report.updated,
            created = report.created.len(),
            cascaded = report.cascaded.len(),
            "cache saved"
        );
        Ok(report)
    }

    pub fn node(&self, cache_id: CacheId) -> Option<&CacheNode> {
        self.nodes.get(cache_id)
    }

    /// Mutable access; renaming is a plain write to `value`.
    pub fn node_mut(&mut self, cache_id: CacheId) -> Option<&mut CacheNode> {
        self.nodes.get_mut(cache_id)
    }

    /// The cache node mirroring store node `db_id`, if loaded or committed.
    pub fn by_db_id(&self, db_id: DbId) -> Option<&CacheNode> {
        self.db_nodes
            .get(&db_id)
            .and_then(|&cache_id| self.nodes.get(cache_id))
    }

    pub fn nodes(&self) -> &Forest<CacheId> {
        &self.nodes
    }

    pub fn db_nodes(&self) -> &HashMap<DbId, CacheId> {
        &self.db_nodes
    }

    pub fn orphans(&self) -> impl Iterator<Item = DbId> + '_ {
        self.orphans.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn allocate_id(&mut self) -> CacheId {
        let id = CacheId(self.next_id);
        self.next_id += 1;
        id
    }

    fn mirror_of(&self, db_id: DbId) -> Result<CacheId> {
        self.db_nodes
            .get(&db_id)
            .copied()
            .ok_or(BdcError::NodeNotFound(db_id.0))
    }

    /// Link `child` under `parent`; if that marks the child deleted, cascade through the subtree
    /// the child already carries.
    fn attach(&mut self, parent: CacheId, child: CacheId) -> Result<()> {
        let was_deleted = self.nodes.node(child)?.is_deleted();
        self.nodes.append_child(parent, child)?;
        if !was_deleted && self.nodes.node(child)?.is_deleted() {
            self.nodes.delete(child)?;
        }
        Ok(())
    }

    /// Store identity of a new node's parent, which registration order guarantees is committed.
    fn committed_parent(&self, cache_id: CacheId) -> Result<DbId> {
        let Some(parent) = self.nodes.node(cache_id)?.parent() else {
            warn!(%cache_id, "new node without parent");
            return Err(BdcError::Consistency(format!(
                "new node {} has no parent; all new nodes must be subnodes",
                cache_id
            )));
        };
        self.nodes.node(parent)?.db_id.ok_or_else(|| {
            warn!(%cache_id, %parent, "parent of new node was never committed");
            BdcError::Consistency(format!(
                "parent {} of new node {} has no store identity",
                parent, cache_id
            ))
        })
    }
}
