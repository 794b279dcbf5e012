use crate::cache::Cache;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::NodeStore;
use crate::view::{cache_tree, db_tree};

/// Which layers to project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layers {
    Db,
    Cache,
    #[default]
    Both,
}

pub fn run<S: NodeStore>(cache: &Cache, db: &S, layers: Layers) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if matches!(layers, Layers::Db | Layers::Both) {
        result = result.with_db_tree(db_tree(db)?);
    }
    if matches!(layers, Layers::Cache | Layers::Both) {
        result = result.with_cache_tree(cache_tree(cache));
    }
    Ok(result)
}
