use crate::cache::Cache;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::node::DbId;
use crate::store::NodeStore;

/// Mirror each of `ids` into the cache, in the given order.
///
/// Stops at the first unknown identity; the ones before it stay loaded.
pub fn run<S: NodeStore>(cache: &mut Cache, db: &S, ids: &[DbId]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &db_id in ids {
        if let Some(existing) = cache.by_db_id(db_id) {
            result.add_message(CmdMessage::info(format!(
                "Already loaded ({}): {}",
                existing.id, existing.value
            )));
            continue;
        }

        let cache_id = cache.load(db_id, db)?;
        let value = cache
            .node(cache_id)
            .map(|n| n.value.clone())
            .unwrap_or_default();
        result.add_message(CmdMessage::success(format!(
            "Loaded {} as {}: {}",
            db_id, cache_id, value
        )));
        if cache.orphans().any(|orphan| orphan == db_id) {
            result.add_message(CmdMessage::info(format!(
                "{} is waiting for its parent to be loaded",
                db_id
            )));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::BdcError;
    use crate::node::CacheId;
    use crate::store::Db;

    #[test]
    fn loads_in_order() {
        let db = Db::example();
        let mut cache = Cache::new();
        let result = run(&mut cache, &db, &[DbId(5), DbId(7)]).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.by_db_id(DbId(7)).unwrap().parent(), Some(CacheId(0)));
        assert_eq!(result.messages[0].content, "Loaded 5 as 0: node_3_1");
    }

    #[test]
    fn reports_orphans() {
        let db = Db::example();
        let mut cache = Cache::new();
        let result = run(&mut cache, &db, &[DbId(7)]).unwrap();

        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[1].level, MessageLevel::Info);
        assert!(result.messages[1].content.contains("waiting for its parent"));
    }

    #[test]
    fn second_load_is_reported_not_repeated() {
        let db = Db::example();
        let mut cache = Cache::new();
        run(&mut cache, &db, &[DbId(0)]).unwrap();
        let result = run(&mut cache, &db, &[DbId(0)]).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(result.messages[0].content.starts_with("Already loaded"));
    }

    #[test]
    fn unknown_id_keeps_earlier_loads() {
        let db = Db::example();
        let mut cache = Cache::new();
        let err = run(&mut cache, &db, &[DbId(1), DbId(99)]).unwrap_err();

        assert!(matches!(err, BdcError::NodeNotFound(99)));
        assert_eq!(cache.len(), 1);
    }
}
