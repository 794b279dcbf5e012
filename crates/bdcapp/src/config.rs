//! # Configuration
//!
//! Configuration is derived with [`confique`], which layers a TOML file, environment variables
//! and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `BDC_NEW_NODE_VALUE`, `BDC_SEED`, ...
//! 2. **Config file**: the path given by the caller (the shell passes `--config` or
//!    `bdc.toml` in the platform config directory). A missing file is skipped.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `new_node_value` | `BDC_NEW_NODE_VALUE` | `New Node` | Value of nodes staged with `add` |
//! | `seed` | `BDC_SEED` | `example` | Initial store: `example` or `root` |
//! | `root_value` | `BDC_ROOT_VALUE` | `root` | Root value when `seed = "root"` |
//! | `log_level` | `BDC_LOG_LEVEL` | `warn` | Log filter when `BDC_LOG` is unset |
//! | `log_format` | `BDC_LOG_FORMAT` | `text` | `text` or `json` |

use crate::cache::DEFAULT_NODE_VALUE;
use crate::error::Result;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a fresh store is populated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Seed {
    /// The fixed nine-node hierarchy.
    #[default]
    Example,
    /// A single root node.
    Root,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for bdc, stored in `bdc.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BdcConfig {
    /// Value given to nodes created with `add`.
    #[config(default = "New Node", env = "BDC_NEW_NODE_VALUE")]
    pub new_node_value: String,

    #[config(default = "example", env = "BDC_SEED")]
    pub seed: Seed,

    /// Only used with `seed = "root"`.
    #[config(default = "root", env = "BDC_ROOT_VALUE")]
    pub root_value: String,

    /// Any `tracing` filter directive, e.g. `debug` or `bdcapp=trace`.
    #[config(default = "warn", env = "BDC_LOG_LEVEL")]
    pub log_level: String,

    #[config(default = "text", env = "BDC_LOG_FORMAT")]
    pub log_format: LogFormat,
}

impl Default for BdcConfig {
    fn default() -> Self {
        Self {
            new_node_value: DEFAULT_NODE_VALUE.to_string(),
            seed: Seed::Example,
            root_value: "root".to_string(),
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl BdcConfig {
    /// Resolve env, then `path` (skipped when absent or missing), then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }
}
