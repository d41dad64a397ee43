//! Error types for the code intelligence engine.
//!
//! Each subsystem gets its own `thiserror` enum so call sites can match on
//! the failure kind without string-sniffing. The CLI's top-level handler
//! collapses all of these into a single `error: {e}` line on stderr.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the Symbol Extractor (§4.B).
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to set grammar for language '{language}': {reason}")]
    GrammarMismatch { language: String, reason: String },

    #[error("failed to compile capture query for '{language}': {reason} (offset {offset})")]
    QueryCompile {
        language: String,
        reason: String,
        offset: usize,
    },

    #[error("tree-sitter failed to parse '{path}'")]
    ParseFailed { path: PathBuf },

    #[error("source is not valid UTF-8: '{path}'")]
    InvalidUtf8 { path: PathBuf },
}

/// Errors from the SCIP Codec (§4.C).
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("unexpected end of input while reading {context}")]
    Eof { context: &'static str },

    #[error("malformed varint while reading {context}")]
    MalformedVarint { context: &'static str },

    #[error("invalid UTF-8 string in field {context}")]
    InvalidUtf8 { context: &'static str },

    #[error("wire type {wire_type} not valid for field {field} in {message}")]
    UnexpectedWireType {
        message: &'static str,
        field: u32,
        wire_type: u8,
    },

    #[error("packed range has {len} elements, expected 3 or 4")]
    BadRangeShape { len: usize },
}

/// Errors from the Index Store (§4.D).
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode index at '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("duplicate document path '{path}' encountered while merging index")]
    DuplicatePath { path: String },

    #[error("symbol '{name}' not found")]
    SymbolNotFound { name: String },

    #[error("document '{path}' not found in index")]
    DocumentNotFound { path: String },

    #[error("unsupported file extension '{extension}' for '{path}'")]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

/// Errors from the Workspace Watcher (§4.E).
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("file watching is not supported on this platform")]
    Unsupported,

    #[error("failed to install watch on '{path}': {source}")]
    Install {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("watcher backend error: {0}")]
    Backend(#[from] notify::Error),
}

/// Errors from the MCP transport (§6).
#[derive(Error, Debug)]
pub enum McpError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("invalid arguments for '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error(transparent)]
    Index(#[from] IndexError),
}

pub type ParseResult<T> = Result<T, ParseError>;
pub type CodecResult<T> = Result<T, CodecError>;
pub type IndexResult<T> = Result<T, IndexError>;
pub type WatchResult<T> = Result<T, WatchError>;
pub type McpResult<T> = Result<T, McpError>;
