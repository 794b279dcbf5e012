use super::NodeStore;
use crate::error::{BdcError, Result};
use crate::node::{DbId, Forest, Node, NodeParams};
use tracing::debug;

/// In-memory node table.
///
/// Single-threaded: the cache and the store are driven by one caller, so plain `&mut self`
/// methods are enough.
#[derive(Debug, Default)]
pub struct Db {
    nodes: Forest<DbId>,
    next_id: u64,
}

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the fixed example hierarchy (creation order gives the identities):
    ///
    /// ```text
    /// 0 root
    /// 1   node_1_1
    /// 3     node_2_1
    /// 5       node_3_1
    /// 7         node_4_1
    /// 8         node_4_2
    /// 6       node_3_2
    /// 4     node_2_2
    /// 2   node_1_2
    /// ```
    pub fn example() -> Self {
        let mut db = Self::new();
        db.build_example()
            .expect("example hierarchy is built on an empty store");
        db
    }

    fn build_example(&mut self) -> Result<()> {
        let root = self.add_root("root")?.db_id;

        let node_1_1 = self.add_to_parent(root, "node_1_1", false)?.db_id;
        self.add_to_parent(root, "node_1_2", false)?;

        let node_2_1 = self.add_to_parent(node_1_1, "node_2_1", false)?.db_id;
        self.add_to_parent(node_1_1, "node_2_2", false)?;

        let node_3_1 = self.add_to_parent(node_2_1, "node_3_1", false)?.db_id;
        self.add_to_parent(node_2_1, "node_3_2", false)?;

        self.add_to_parent(node_3_1, "node_4_1", false)?;
        self.add_to_parent(node_3_1, "node_4_2", false)?;
        Ok(())
    }

    /// Point lookup; a miss is not an error here.
    pub fn get(&self, id: DbId) -> Option<&Node<DbId>> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn create_node(&mut self, value: &str, is_deleted: bool) -> Result<DbId> {
        let id = DbId(self.next_id);
        self.nodes
            .insert(Node::new(id, value, Some(id), is_deleted))?;
        self.next_id += 1;
        Ok(id)
    }

    fn params(node: &Node<DbId>) -> NodeParams {
        NodeParams {
            db_id: node.id,
            value: node.value.clone(),
            is_deleted: node.is_deleted(),
        }
    }
}

impl NodeStore for Db {
    fn add_root(&mut self, value: &str) -> Result<NodeParams> {
        if !self.nodes.is_empty() || self.next_id != 0 {
            return Err(BdcError::AlreadyInitialized);
        }
        let id = self.create_node(value, false)?;
        self.get_node_params(id)
    }

    fn add_to_parent(
        &mut self,
        parent: DbId,
        value: &str,
        is_deleted: bool,
    ) -> Result<NodeParams> {
        if !self.nodes.contains(parent) {
            return Err(BdcError::UnknownParent(parent.0));
        }
        let id = self.create_node(value, is_deleted)?;
        self.nodes.append_child(parent, id)?;
        debug!(%parent, %id, "store node created");
        self.get_node_params(id)
    }

    fn get_node_params(&self, id: DbId) -> Result<NodeParams> {
        self.nodes.node(id).map(Self::params)
    }

    fn get_parent_id(&self, id: DbId) -> Result<Option<DbId>> {
        Ok(self.nodes.node(id)?.parent())
    }

    fn get_children_ids(&self, id: DbId) -> Result<Vec<DbId>> {
        Ok(self.nodes.node(id)?.children().to_vec())
    }

    fn update_node(
        &mut self,
        id: DbId,
        value: &str,
        is_deleted: bool,
    ) -> Result<Option<Vec<NodeParams>>> {
        self.nodes.node_mut(id)?.value = value.to_string();
        if !is_deleted {
            return Ok(None);
        }

        let newly_deleted = self.nodes.delete(id)?;
        debug!(%id, cascaded = newly_deleted.len(), "store node deleted");
        newly_deleted
            .into_iter()
            .map(|child| self.get_node_params(child))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    fn ids(&self) -> Vec<DbId> {
        self.nodes.ids().collect()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// A single chain `root -> a -> b -> c`, returned with its identities in that order.
    pub fn chain() -> (Db, [DbId; 4]) {
        let mut db = Db::new();
        let root = db.add_root("root").unwrap().db_id;
        let a = db.add_to_parent(root, "a", false).unwrap().db_id;
        let b = db.add_to_parent(a, "b", false).unwrap().db_id;
        let c = db.add_to_parent(b, "c", false).unwrap().db_id;
        (db, [root, a, b, c])
    }
}
