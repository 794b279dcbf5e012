//! # Shell Behavior
//!
//! This is **one possible UI client** for bdcapp, not the application itself. It plays the part
//! of a two-pane window: the store tree on one side, the cache tree on the other, and one command
//! per button.
//!
//! ## Session
//!
//! `bdc` reads commands from stdin, one per line, until `quit` or end of input. Blank lines and
//! lines starting with `#` are skipped, so a session can be scripted:
//!
//! ```text
//! load 3 5 7
//! add 1
//! rm 1
//! save
//! db
//! ```
//!
//! A line that fails to parse or to run prints its error and the session goes on. Only setup
//! failures (bad config, logging) end the process with a non-zero exit code.
//!
//! ## Identities
//!
//! `load` takes store identities. Every other command takes cache identities. Trees show both as
//! `[cache/db]`, with `-` for a node that has not been saved yet.
//!
//! ## Module Structure
//!
//! - `setup`: clap definitions for process args and for shell lines
//! - `commands`: read loop and dispatch to the API
//! - `render`: text and JSON output

mod commands;
mod render;
pub mod setup;

pub use commands::run;
