//! Tool catalogue and dispatch for `tools/list` / `tools/call` (spec.md §6).
//!
//! Each tool name mirrors a `code/*` CLI operation under a `cog_` prefix.
//! Tool arguments are object-typed JSON; results are returned as a single
//! text content block carrying the operation's JSON result, matching the
//! CLI's own JSON output.

use std::path::PathBuf;

use serde_json::{json, Value};

use crate::cli::commands::{create, delete, edit, index, query, rename, status};
use crate::error::{McpError, McpResult};
use crate::indexing::Maintainer;

pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn catalogue() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "cog_code_index",
            description: "Build or refresh the index over files matching a glob pattern",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "pattern": { "type": "string", "description": "Glob pattern, defaults to **/*" }
                }
            }),
        },
        ToolDescriptor {
            name: "cog_code_query",
            description: "Query symbols and occurrences: exactly one of find/refs/symbols/structure",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "find": { "type": "string" },
                    "refs": { "type": "string" },
                    "symbols": { "type": "string" },
                    "structure": { "type": "boolean" },
                    "kind": { "type": "string" },
                    "limit": { "type": "integer" }
                }
            }),
        },
        ToolDescriptor {
            name: "cog_code_edit",
            description: "Replace an exact text match inside a file, then re-index it",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file": { "type": "string" },
                    "old": { "type": "string" },
                    "new": { "type": "string" }
                },
                "required": ["file", "old", "new"]
            }),
        },
        ToolDescriptor {
            name: "cog_code_create",
            description: "Create a new file and index it",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file": { "type": "string" },
                    "content": { "type": "string" }
                },
                "required": ["file"]
            }),
        },
        ToolDescriptor {
            name: "cog_code_delete",
            description: "Delete a file and remove it from the index",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file": { "type": "string" }
                },
                "required": ["file"]
            }),
        },
        ToolDescriptor {
            name: "cog_code_rename",
            description: "Rename a file and re-index it under the new path",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "old": { "type": "string" },
                    "to": { "type": "string" }
                },
                "required": ["old", "to"]
            }),
        },
        ToolDescriptor {
            name: "cog_code_status",
            description: "Report index presence, document and symbol counts",
            input_schema: json!({ "type": "object", "properties": {} }),
        },
    ]
}

fn require_str<'a>(args: &'a Value, field: &str, tool: &str) -> McpResult<&'a str> {
    args.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| McpError::InvalidArguments {
            tool: tool.to_string(),
            reason: format!("missing or non-string field '{field}'"),
        })
}

fn text_result(value: Value) -> Value {
    json!({
        "content": [
            { "type": "text", "text": value.to_string() }
        ]
    })
}

/// Dispatches a `tools/call` invocation to the matching `code/*` operation.
pub fn call(maintainer: &Maintainer, tool: &str, args: &Value) -> McpResult<Value> {
    match tool {
        "cog_code_index" => {
            let pattern = args
                .get("pattern")
                .and_then(Value::as_str)
                .map(str::to_string);
            Ok(text_result(index::run(maintainer, pattern)))
        }
        "cog_code_query" => {
            let cmd = query::QueryCommand {
                find: args.get("find").and_then(Value::as_str).map(str::to_string),
                refs: args.get("refs").and_then(Value::as_str).map(str::to_string),
                symbols: args
                    .get("symbols")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                structure: args
                    .get("structure")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                kind: args.get("kind").and_then(Value::as_str).map(str::to_string),
                limit: args.get("limit").and_then(Value::as_u64).map(|n| n as usize),
            };
            query::run(maintainer, cmd)
                .map(text_result)
                .map_err(|reason| McpError::InvalidArguments {
                    tool: tool.to_string(),
                    reason,
                })
        }
        "cog_code_edit" => {
            let file = PathBuf::from(require_str(args, "file", tool)?);
            let old = require_str(args, "old", tool)?;
            let new = require_str(args, "new", tool)?;
            edit::run(maintainer, &file, old, new)?;
            Ok(text_result(json!({ "status": "ok" })))
        }
        "cog_code_create" => {
            let file = PathBuf::from(require_str(args, "file", tool)?);
            let content = args.get("content").and_then(Value::as_str);
            create::run(maintainer, &file, content)?;
            Ok(text_result(json!({ "status": "ok" })))
        }
        "cog_code_delete" => {
            let file = PathBuf::from(require_str(args, "file", tool)?);
            delete::run(maintainer, &file)?;
            Ok(text_result(json!({ "status": "ok" })))
        }
        "cog_code_rename" => {
            let old = PathBuf::from(require_str(args, "old", tool)?);
            let to = PathBuf::from(require_str(args, "to", tool)?);
            rename::run(maintainer, &old, &to)?;
            Ok(text_result(json!({ "status": "ok" })))
        }
        "cog_code_status" => Ok(text_result(status::run(maintainer))),
        _ => Err(McpError::UnknownTool(tool.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::GrammarRegistry;
    use crate::storage::IndexStore;

    fn maintainer_in(dir: &std::path::Path) -> Maintainer {
        let store = IndexStore::load(dir.join(".cog").join("index.scip")).unwrap();
        Maintainer::new(dir.to_path_buf(), GrammarRegistry::new(), store)
    }

    #[test]
    fn catalogue_lists_seven_tools() {
        assert_eq!(catalogue().len(), 7);
    }

    #[test]
    fn status_tool_round_trips_through_text_content() {
        let dir = tempfile::tempdir().unwrap();
        let maintainer = maintainer_in(dir.path());
        let result = call(&maintainer, "cog_code_status", &json!({})).unwrap();
        let text = result["content"][0]["text"].as_str().unwrap();
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["documents"], 0);
    }

    #[test]
    fn unknown_tool_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let maintainer = maintainer_in(dir.path());
        let err = call(&maintainer, "cog_code_frobnicate", &json!({})).unwrap_err();
        assert!(matches!(err, McpError::UnknownTool(_)));
    }

    #[test]
    fn edit_tool_requires_file_field() {
        let dir = tempfile::tempdir().unwrap();
        let maintainer = maintainer_in(dir.path());
        let err = call(&maintainer, "cog_code_edit", &json!({"old": "a", "new": "b"})).unwrap_err();
        assert!(matches!(err, McpError::InvalidArguments { .. }));
    }
}
