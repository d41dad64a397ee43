//! CLI argument parsing (spec.md §6 CLI surface).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// `cog` — a developer-machine code-intelligence engine.
#[derive(Parser)]
#[command(name = "cog", version = env!("CARGO_PKG_VERSION"), about = "Code intelligence index")]
pub struct Cli {
    /// Path to a custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Indexing and query operations against the local SCIP-subset index
    Code {
        #[command(subcommand)]
        action: CodeAction,
    },

    /// Long-form associative-memory operations (out of scope; see spec.md §1)
    Mem {
        /// Sub-operation name, passed through verbatim to the remote caller
        operation: String,

        /// Remaining arguments, passed through verbatim
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },

    /// Start the MCP stdio server
    Mcp,
}

#[derive(Subcommand)]
pub enum CodeAction {
    /// Build or refresh the index over files matching a glob pattern
    #[command(about = "Build searchable index from the workspace")]
    Index {
        /// Glob pattern (default `**/*`): `*` no slash, `**` any depth, `?` single char
        pattern: Option<String>,
    },

    /// Query the index
    #[command(about = "Query symbols and occurrences")]
    Query {
        #[arg(long)]
        find: Option<String>,
        #[arg(long)]
        refs: Option<String>,
        #[arg(long)]
        symbols: Option<String>,
        #[arg(long)]
        structure: bool,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Replace an exact text match inside a file, then re-extract
    #[command(about = "Edit a file and re-index it")]
    Edit {
        file: PathBuf,
        #[arg(long = "old")]
        old: String,
        #[arg(long = "new")]
        new: String,
    },

    /// Create a new file and index it
    #[command(about = "Create a file and index it")]
    Create {
        file: PathBuf,
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a file and drop its document from the index
    #[command(about = "Delete a file and remove it from the index")]
    Delete { file: PathBuf },

    /// Rename a file, re-extracting under the new path
    #[command(about = "Rename a file and re-index it")]
    Rename {
        old: PathBuf,
        #[arg(long = "to")]
        to: PathBuf,
    },

    /// Report index presence, document and symbol counts
    #[command(about = "Show index status")]
    Status,
}
