//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::traverse::TraversalMode;

/// Unbalanced binary search tree playground
#[derive(Parser, Debug)]
#[command(name = "bstree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .bstree.toml
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu loop (default)
    Session,

    /// Insert values, delete some, then print the result
    Build {
        /// Values to insert, in order
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Values to delete afterwards, in order
        #[arg(short = 'x', long = "delete", allow_negative_numbers = true)]
        delete: Vec<i64>,
        /// Traversal order (default from config)
        #[arg(short, long, value_enum)]
        mode: Option<TraversalMode>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print config file locations
    Path,
    /// Print a commented template
    Template,
}
