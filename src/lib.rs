//! `cog` — a developer-machine code intelligence engine: tree-sitter-backed
//! symbol extraction, a SCIP-subset binary index, and a workspace watcher,
//! exposed through a CLI and an MCP stdio server.

pub mod cli;
pub mod config;
pub mod error;
pub mod indexing;
pub mod logging;
pub mod mcp;
pub mod parsing;
pub mod scip;
pub mod storage;
pub mod symbol;
pub mod types;
pub mod watcher;
