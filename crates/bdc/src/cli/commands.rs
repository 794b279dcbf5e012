//! # Read Loop
//!
//! 1. **Setup**: parse process args, resolve and load config, start logging, seed the store.
//! 2. **Loop**: parse each stdin line, dispatch it to [`BdcApi`], render the result.
//! 3. **Errors**: line-level errors are printed and the loop continues.

use super::render::{render_json, render_message, render_text};
use super::setup::{parse_line, shell_help, Cli, OutputFormat, ShellCommand};
use crate::logging;
use anyhow::Context;
use bdcapp::api::BdcApi;
use bdcapp::commands::view::Layers;
use bdcapp::commands::{CmdMessage, CmdResult};
use bdcapp::config::BdcConfig;
use bdcapp::node::{CacheId, DbId};
use bdcapp::store::Db;
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::debug;

const PROMPT: &str = "bdc> ";

enum Flow {
    Continue(CmdResult),
    Help,
    Quit,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(default_config_path);
    let config = BdcConfig::load(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("failed to load config from {}", path.display()),
        None => "failed to load config".to_string(),
    })?;
    logging::init(&config, cli.verbose)?;
    debug!(path = ?config_path, seed = ?config.seed, "config loaded");

    let mut api = BdcApi::from_config(config)?;
    let interactive = io::stdin().is_terminal();
    if interactive {
        println!("bdc {}. Type `help` for commands.", env!("CARGO_PKG_VERSION"));
        prompt()?;
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match execute(&mut api, command) {
                Ok(Flow::Continue(result)) => print_result(&result, cli.output)?,
                Ok(Flow::Help) => print!("{}", shell_help()),
                Ok(Flow::Quit) => break,
                Err(e) => print_error(&e.to_string(), cli.output)?,
            },
            Err(e) => e.print()?,
        }
        if interactive {
            prompt()?;
        }
    }

    Ok(())
}

/// `bdc.toml` in the platform config directory.
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bdc").map(|dirs| dirs.config_dir().join("bdc.toml"))
}

fn execute(api: &mut BdcApi<Db>, command: ShellCommand) -> bdcapp::error::Result<Flow> {
    let result = match command {
        ShellCommand::Db => api.view(Layers::Db)?,
        ShellCommand::Cache => {
            let result = api.view(Layers::Cache)?;
            if result.cache_tree.is_empty() {
                let mut empty = CmdResult::default();
                empty.add_message(CmdMessage::info(
                    "Cache is empty. Load store nodes with `load <db-id>`.",
                ));
                empty
            } else {
                result
            }
        }
        ShellCommand::Load { ids } => {
            let ids: Vec<DbId> = ids.into_iter().map(DbId).collect();
            api.load(&ids)?
        }
        ShellCommand::Add { parent } => api.add_node(CacheId(parent))?,
        ShellCommand::Rm { id } => api.delete(CacheId(id))?,
        ShellCommand::Rename { id, value } => api.rename(CacheId(id), &value.join(" "))?,
        ShellCommand::Save => api.save()?,
        ShellCommand::Reset => api.reset()?,
        ShellCommand::Help => return Ok(Flow::Help),
        ShellCommand::Quit => return Ok(Flow::Quit),
    };
    Ok(Flow::Continue(result))
}

fn print_result(result: &CmdResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
    }
    io::stdout().flush()?;
    Ok(())
}

fn print_error(message: &str, format: OutputFormat) -> anyhow::Result<()> {
    let message = CmdMessage::error(format!("Error: {}", message));
    match format {
        OutputFormat::Text => eprintln!("{}", render_message(&message)),
        OutputFormat::Json => {
            let mut result = CmdResult::default();
            result.add_message(message);
            eprintln!("{}", render_json(&result)?);
        }
    }
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("{}", PROMPT);
    io::stdout().flush()
}
