use crate::cache::Cache;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::{BdcConfig, Seed};
use crate::error::Result;
use crate::store::{Db, NodeStore};
use tracing::info;

/// A fresh store populated according to `config.seed`.
pub fn seeded_store(config: &BdcConfig) -> Result<Db> {
    match config.seed {
        Seed::Example => Ok(Db::example()),
        Seed::Root => {
            let mut db = Db::new();
            db.add_root(&config.root_value)?;
            Ok(db)
        }
    }
}

/// Throw away every staged edit and every committed change.
pub fn run(db: &mut Db, cache: &mut Cache, config: &BdcConfig) -> Result<CmdResult> {
    *db = seeded_store(config)?;
    *cache = Cache::with_default_value(config.new_node_value.clone());
    info!(seed = ?config.seed, nodes = db.len(), "store reset");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Reset: store has {} node(s), cache is empty",
        db.len()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DbId;

    #[test]
    fn example_seed() {
        let db = seeded_store(&BdcConfig::default()).unwrap();
        assert_eq!(db.len(), 9);
    }

    #[test]
    fn root_seed() {
        let config = BdcConfig {
            seed: Seed::Root,
            root_value: "top".to_string(),
            ..Default::default()
        };
        let db = seeded_store(&config).unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db.get(DbId(0)).unwrap().value, "top");
    }

    #[test]
    fn discards_staged_and_committed_changes() {
        let config = BdcConfig {
            new_node_value: "fresh".to_string(),
            ..Default::default()
        };
        let mut db = Db::example();
        let mut cache = Cache::new();
        let root = cache.load(DbId(0), &db).unwrap();
        cache.add_node(root).unwrap();
        cache.save(&mut db).unwrap();
        assert_eq!(db.len(), 10);

        let result = run(&mut db, &mut cache, &config).unwrap();
        assert_eq!(db.len(), 9);
        assert!(cache.is_empty());
        assert_eq!(cache.default_value(), "fresh");
        assert_eq!(
            result.messages[0].content,
            "Reset: store has 9 node(s), cache is empty"
        );
    }
}
