//! # Command Layer
//!
//! One submodule per user action. Each exposes a `run` function that drives the [`Cache`] and
//! a [`NodeStore`] and reports back with a [`CmdResult`].
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout or stderr. Messages and trees are returned, the UI renders them.
//! - **Argument parsing**: identities arrive already typed.
//! - **Exit codes**: return `Result`, let the caller decide.
//!
//! ## Structured Returns
//!
//! [`CmdResult`] carries:
//! - `messages`: leveled messages (info, success, warning, error)
//! - `db_tree` / `cache_tree`: pre-order [`DisplayNode`] listings, filled by commands that show trees
//!
//! ## Testing Strategy
//!
//! Command tests use the in-memory [`Db`](crate::store::Db) with the example hierarchy and check
//! both the returned messages and the resulting cache and store state.
//!
//! ## Command Modules
//!
//! - [`load`]: mirror store nodes into the cache
//! - [`add`]: stage a new node
//! - [`delete`]: soft-delete a cache subtree
//! - [`rename`]: change a staged value
//! - [`save`]: commit the cache to the store
//! - [`reset`]: fresh seeded store and empty cache
//! - [`view`]: tree projections of both layers
//!
//! [`Cache`]: crate::cache::Cache
//! [`NodeStore`]: crate::store::NodeStore

use crate::view::DisplayNode;
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod load;
pub mod rename;
pub mod reset;
pub mod save;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub db_tree: Vec<DisplayNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cache_tree: Vec<DisplayNode>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_db_tree(mut self, tree: Vec<DisplayNode>) -> Self {
        self.db_tree = tree;
        self
    }

    pub fn with_cache_tree(mut self, tree: Vec<DisplayNode>) -> Self {
        self.cache_tree = tree;
        self
    }
}
