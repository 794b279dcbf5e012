//! # Tree Views
//!
//! Renderers never walk the arenas themselves. They get a listing of [`DisplayNode`] rows: an
//! owned, serializable projection of either the store or the cache, rebuilt on every request.
//! The store side only goes through [`NodeStore`], so any store implementation can be shown.
//!
//! ## Shape
//!
//! A listing is flat. Rows come in pre-order and carry their `depth` (0 for roots), so a tree of
//! any depth is built, rendered, serialized and dropped without recursion.
//!
//! ## Ordering
//!
//! - Roots in identity order. For the cache that is load order, and orphans show up as roots
//!   of their own next to the top-level mirrors.
//! - Children in insertion order, as kept by the arena.

use crate::cache::Cache;
use crate::error::Result;
use crate::node::{CacheId, DbId};
use crate::store::NodeStore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_id: Option<CacheId>,
    pub db_id: Option<DbId>,
    pub value: String,
    pub is_deleted: bool,
    /// Cache only: a loaded node still waiting for its store parent.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_orphan: bool,
    pub depth: usize,
}

/// Rows of the subtree starting at `rows[index]`, that row included.
pub fn subtree(rows: &[DisplayNode], index: usize) -> &[DisplayNode] {
    let Some(head) = rows.get(index) else {
        return &[];
    };
    let len = rows[index + 1..]
        .iter()
        .take_while(|row| row.depth > head.depth)
        .count();
    &rows[index..=index + len]
}

pub fn db_tree<S: NodeStore>(db: &S) -> Result<Vec<DisplayNode>> {
    let mut pending = Vec::new();
    for id in db.ids().into_iter().rev() {
        if db.get_parent_id(id)?.is_none() {
            pending.push((id, 0));
        }
    }

    let mut rows = Vec::new();
    while let Some((id, depth)) = pending.pop() {
        let params = db.get_node_params(id)?;
        rows.push(DisplayNode {
            cache_id: None,
            db_id: Some(params.db_id),
            value: params.value,
            is_deleted: params.is_deleted,
            is_orphan: false,
            depth,
        });
        let children = db.get_children_ids(id)?;
        pending.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }
    Ok(rows)
}

pub fn cache_tree(cache: &Cache) -> Vec<DisplayNode> {
    let orphans: Vec<DbId> = cache.orphans().collect();
    let forest = cache.nodes();
    let mut pending: Vec<(CacheId, usize)> = forest.roots().map(|root| (root.id, 0)).collect();
    pending.reverse();

    let mut rows = Vec::new();
    while let Some((id, depth)) = pending.pop() {
        let Some(node) = forest.get(id) else {
            continue;
        };
        rows.push(DisplayNode {
            cache_id: Some(node.id),
            db_id: node.db_id,
            value: node.value.clone(),
            is_deleted: node.is_deleted(),
            is_orphan: node.db_id.is_some_and(|id| orphans.contains(&id)),
            depth,
        });
        pending.extend(node.children().iter().rev().map(|&child| (child, depth + 1)));
    }
    rows
}
