//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UIs.
//!
//! [`BdcApi`] owns one store, one cache and the configuration, so a UI only keeps the facade
//! around and passes typed identities in. It never does business logic itself; each method
//! dispatches to `commands::<action>::run`.
//!
//! ## Generic Over NodeStore
//!
//! `BdcApi<S: NodeStore>` works with any store. Reset needs to build a fresh store, so it is only
//! available on `BdcApi<Db>`.

use crate::cache::Cache;
use crate::commands::{self, view::Layers, CmdResult};
use crate::config::BdcConfig;
use crate::error::Result;
use crate::node::{CacheId, DbId};
use crate::store::{Db, NodeStore};

pub struct BdcApi<S: NodeStore> {
    store: S,
    cache: Cache,
    config: BdcConfig,
}

impl<S: NodeStore> BdcApi<S> {
    pub fn new(store: S, config: BdcConfig) -> Self {
        let cache = Cache::with_default_value(config.new_node_value.clone());
        Self {
            store,
            cache,
            config,
        }
    }

    pub fn load(&mut self, ids: &[DbId]) -> Result<CmdResult> {
        commands::load::run(&mut self.cache, &self.store, ids)
    }

    pub fn add_node(&mut self, parent: CacheId) -> Result<CmdResult> {
        commands::add::run(&mut self.cache, parent)
    }

    pub fn delete(&mut self, cache_id: CacheId) -> Result<CmdResult> {
        commands::delete::run(&mut self.cache, cache_id)
    }

    pub fn rename(&mut self, cache_id: CacheId, value: &str) -> Result<CmdResult> {
        commands::rename::run(&mut self.cache, cache_id, value)
    }

    pub fn save(&mut self) -> Result<CmdResult> {
        commands::save::run(&mut self.cache, &mut self.store)
    }

    pub fn view(&self, layers: Layers) -> Result<CmdResult> {
        commands::view::run(&self.cache, &self.store, layers)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn config(&self) -> &BdcConfig {
        &self.config
    }
}

impl BdcApi<Db> {
    /// Facade over a store seeded as `config.seed` says.
    pub fn from_config(config: BdcConfig) -> Result<Self> {
        let store = commands::reset::seeded_store(&config)?;
        Ok(Self::new(store, config))
    }

    pub fn reset(&mut self) -> Result<CmdResult> {
        commands::reset::run(&mut self.store, &mut self.cache, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Seed;

    fn api() -> BdcApi<Db> {
        BdcApi::from_config(BdcConfig::default()).unwrap()
    }

    #[test]
    fn test_from_config_seeds_store() {
        let api = api();
        assert_eq!(api.store().len(), 9);
        assert!(api.cache().is_empty());

        let config = BdcConfig {
            seed: Seed::Root,
            ..Default::default()
        };
        let api = BdcApi::from_config(config).unwrap();
        assert_eq!(api.store().len(), 1);
    }

    #[test]
    fn test_cache_uses_configured_default_value() {
        let config = BdcConfig {
            new_node_value: "todo".to_string(),
            ..Default::default()
        };
        let mut api = BdcApi::from_config(config).unwrap();
        api.load(&[DbId(0)]).unwrap();
        api.add_node(CacheId(0)).unwrap();
        assert_eq!(api.cache().node(CacheId(1)).unwrap().value, "todo");
    }

    #[test]
    fn test_dispatch_round_trip() {
        let mut api = api();
        api.load(&[DbId(2)]).unwrap();
        api.rename(CacheId(0), "edited").unwrap();
        api.save().unwrap();
        assert_eq!(api.store().get(DbId(2)).unwrap().value, "edited");

        let view = api.view(Layers::Both).unwrap();
        assert_eq!(view.cache_tree[0].value, "edited");
    }

    #[test]
    fn test_reset() {
        let mut api = api();
        api.load(&[DbId(0)]).unwrap();
        api.delete(CacheId(0)).unwrap();
        api.save().unwrap();
        assert!(api.store().get(DbId(4)).unwrap().is_deleted());

        api.reset().unwrap();
        assert!(!api.store().get(DbId(4)).unwrap().is_deleted());
        assert!(api.cache().is_empty());
    }
}
