//! # bdc Shell
//!
//! `bdc` is a line-oriented terminal client for `bdcapp`. The binary is intentionally thin: the
//! shell lives in `src/cli/`, while this file only invokes `cli::run()` and handles process
//! termination.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell (crates/bdc/src/cli/)                                │
//! │  - clap parsing of process args and of each input line      │
//! │  - read loop and dispatch (commands.rs)                     │
//! │  - colored trees and messages, or JSON (render.rs)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/bdcapp/src/api.rs)                       │
//! │  - Owns the store and the cache                             │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything below the shell is UI agnostic. The shell is responsible for all user-facing
//! concerns: argument parsing, config file lookup, logging setup, rendering and exit codes.
//!
//! ## Testing Approach
//!
//! - **Line parsing and rendering**: unit tests next to `setup.rs` and `render.rs`.
//! - **End to end**: `tests/shell_e2e.rs` drives the binary over stdin with `assert_cmd`.

mod cli;
mod logging;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
