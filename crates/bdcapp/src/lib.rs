//! # bdcapp Architecture
//!
//! bdcapp keeps a tree of nodes in two layers: a durable **store** holding committed nodes, and a
//! **cache** that stages edits (renames, new nodes, soft-deletes) until they are saved back. It is
//! a library first; the `bdc` shell is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns one store, one cache and the configuration          │
//! │  - Dispatches to command modules                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user action, returns CmdResult            │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Cache (cache.rs)                                           │
//! │  - Any-order loading with orphan reconciliation             │
//! │  - Save: commit in registration order, replay deletions     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - NodeStore trait, in-memory Db                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both the store and the cache keep their nodes in a [`node::Forest`], an arena addressed by
//! integer handles ([`node::DbId`] and [`node::CacheId`]).
//!
//! ## Key Principle: No I/O in Core
//!
//! Nothing in this crate writes to stdout or stderr or exits the process. Diagnostics go through
//! `tracing`; whoever embeds the library decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Node, store and cache**: unit tests beside the code, on the example hierarchy.
//! 2. **Commands**: messages and resulting state for each action.
//! 3. **Reconciliation scenarios** (`tests/`): load orders, save round-trips, cascades.
//!
//! ## Module Overview
//!
//! - [`api`]: facade
//! - [`cache`]: staging cache and save
//! - [`commands`]: user actions
//! - [`config`]: layered configuration
//! - [`error`]: error type
//! - [`node`]: node and arena
//! - [`store`]: store trait and in-memory store
//! - [`view`]: tree projections for renderers

pub mod api;
pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod node;
pub mod store;
pub mod view;
