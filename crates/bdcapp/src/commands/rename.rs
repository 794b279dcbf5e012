use crate::cache::Cache;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BdcError, Result};
use crate::node::CacheId;

/// Overwrite a staged value. Deleted nodes are read-only.
pub fn run(cache: &mut Cache, cache_id: CacheId, value: &str) -> Result<CmdResult> {
    if value.trim().is_empty() {
        return Err(BdcError::Api("Value cannot be empty".to_string()));
    }

    let node = cache
        .node_mut(cache_id)
        .ok_or(BdcError::NodeNotFound(cache_id.0))?;
    if node.is_deleted() {
        return Err(BdcError::Api(format!(
            "Node {} is deleted and cannot be renamed",
            cache_id
        )));
    }

    let previous = std::mem::replace(&mut node.value, value.to_string());
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Renamed ({}): {} -> {}",
        cache_id, previous, node.value
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DbId;
    use crate::store::Db;

    #[test]
    fn renames_staged_value() {
        let db = Db::example();
        let mut cache = Cache::new();
        let id = cache.load(DbId(2), &db).unwrap();

        let result = run(&mut cache, id, "renamed").unwrap();
        assert_eq!(cache.node(id).unwrap().value, "renamed");
        assert_eq!(result.messages[0].content, "Renamed (0): node_1_2 -> renamed");
        // nothing reaches the store before save
        assert_eq!(db.get(DbId(2)).unwrap().value, "node_1_2");
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        let db = Db::example();
        let mut cache = Cache::new();
        let id = cache.load(DbId(2), &db).unwrap();

        run(&mut cache, id, "  padded ").unwrap();
        assert_eq!(cache.node(id).unwrap().value, "  padded ");
    }

    #[test]
    fn deleted_node_is_rejected() {
        let db = Db::example();
        let mut cache = Cache::new();
        let id = cache.load(DbId(2), &db).unwrap();
        cache.delete(id).unwrap();

        assert!(matches!(run(&mut cache, id, "x"), Err(BdcError::Api(_))));
        assert_eq!(cache.node(id).unwrap().value, "node_1_2");
    }

    #[test]
    fn empty_value_is_rejected() {
        let db = Db::example();
        let mut cache = Cache::new();
        let id = cache.load(DbId(2), &db).unwrap();
        assert!(matches!(run(&mut cache, id, "   "), Err(BdcError::Api(_))));
    }

    #[test]
    fn unknown_node_fails() {
        let mut cache = Cache::new();
        assert!(matches!(
            run(&mut cache, CacheId(0), "x"),
            Err(BdcError::NodeNotFound(0))
        ));
    }
}
