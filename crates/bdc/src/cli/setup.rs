use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bdc",
    bin_name = "bdc",
    version,
    about = "Stage edits to a node tree and commit them",
    long_about = None,
    after_help = "Commands are read from stdin, one per line. Type `help` inside the shell."
)]
pub struct Cli {
    /// Config file [default: bdc.toml in the platform config directory]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// One shell line. The first word names the command.
#[derive(Parser, Debug)]
#[command(
    multicall = true,
    disable_help_subcommand = true,
    subcommand_value_name = "COMMAND",
    subcommand_help_heading = "Commands",
    help_template = "{all-args}"
)]
pub struct Line {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Show the store tree
    Db,

    /// Show the cache tree
    Cache,

    /// Load store nodes into the cache, in the given order
    Load {
        /// Store identities
        #[arg(required = true, value_name = "DB_ID")]
        ids: Vec<u64>,
    },

    /// Stage a new node under a cache node
    #[command(alias = "new")]
    Add {
        #[arg(value_name = "CACHE_ID")]
        parent: u64,
    },

    /// Delete a cache node and everything below it
    #[command(alias = "delete")]
    Rm {
        #[arg(value_name = "CACHE_ID")]
        id: u64,
    },

    /// Change the value of a cache node
    #[command(alias = "edit")]
    Rename {
        #[arg(value_name = "CACHE_ID")]
        id: u64,

        /// New value; the remaining words are joined with spaces
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        value: Vec<String>,
    },

    /// Commit the cache to the store
    #[command(alias = "apply")]
    Save,

    /// Fresh store, empty cache
    Reset,

    /// Show this help
    Help,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Parse one input line. `Ok(None)` for blank lines and `#` comments.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.first() {
        None => Ok(None),
        Some(first) if first.starts_with('#') => Ok(None),
        Some(_) => Line::try_parse_from(words).map(|line| Some(line.command)),
    }
}

pub fn shell_help() -> String {
    Line::command().render_help().to_string()
}
