//! MCP stdio server (spec.md §6): a hand-rolled JSON-RPC 2.0 loop, not
//! `rmcp`'s own transport — the framing and dispatch below are deliberately
//! explicit so the on-wire contract (headers, method set, `cog_`-prefixed
//! tool names) stays exactly what spec.md §6 names.

pub mod protocol;
pub mod tools;

use serde_json::{json, Value};
use tokio::io::{stdin, stdout, BufReader};

use crate::indexing::Maintainer;
use protocol::{error_code, Request, Response};

const PROTOCOL_VERSION_FALLBACK: &str = "2024-11-05";

/// Runs the stdio server loop until EOF or a `shutdown`+`exit` sequence.
/// `protocol_version` is the value reported from `initialize` (normally
/// `Settings::mcp.protocol_version`).
pub async fn serve(maintainer: &Maintainer, protocol_version: &str) -> std::io::Result<()> {
    let mut reader = BufReader::new(stdin());
    let mut writer = stdout();
    let mut shutting_down = false;

    loop {
        let Some(request) = protocol::read_message(&mut reader).await? else {
            break;
        };

        let Some(id) = request.id.clone() else {
            // Notification: no response, and no-op handling is sufficient
            // for `initialized`/`cancelled`/`progress`.
            continue;
        };

        let response = dispatch(maintainer, &request, protocol_version, &mut shutting_down);
        protocol::write_message(&mut writer, &response).await?;

        if request.method == "exit" {
            break;
        }
    }

    Ok(())
}

fn dispatch(
    maintainer: &Maintainer,
    request: &Request,
    protocol_version: &str,
    shutting_down: &mut bool,
) -> Response {
    let id = request.id.clone().unwrap_or(Value::Null);

    if *shutting_down && request.method != "exit" {
        return Response::failure(
            id,
            error_code::INVALID_PARAMS,
            "server is shutting down",
        );
    }

    match request.method.as_str() {
        "initialize" => Response::success(
            id,
            json!({
                "protocolVersion": protocol_version,
                "serverInfo": { "name": "cog", "version": env!("CARGO_PKG_VERSION") },
                "capabilities": {
                    "tools": {},
                    "resources": {},
                    "prompts": {}
                }
            }),
        ),
        "shutdown" => {
            *shutting_down = true;
            Response::success(id, Value::Null)
        }
        "exit" => Response::success(id, Value::Null),
        "ping" => Response::success(id, json!({})),
        "tools/list" => {
            let tools: Vec<Value> = tools::catalogue()
                .into_iter()
                .map(|t| {
                    json!({
                        "name": t.name,
                        "description": t.description,
                        "inputSchema": t.input_schema,
                    })
                })
                .collect();
            Response::success(id, json!({ "tools": tools }))
        }
        "tools/call" => {
            let Some(name) = request.params.get("name").and_then(Value::as_str) else {
                return Response::failure(
                    id,
                    error_code::INVALID_PARAMS,
                    "'tools/call' requires a string 'name'",
                );
            };
            let empty = json!({});
            let arguments = request.params.get("arguments").unwrap_or(&empty);
            match tools::call(maintainer, name, arguments) {
                Ok(result) => Response::success(id, result),
                Err(e) => Response::failure(id, error_code::INVALID_PARAMS, e.to_string()),
            }
        }
        "resources/list" => Response::success(id, json!({ "resources": [] })),
        "resources/read" => Response::failure(
            id,
            error_code::INVALID_PARAMS,
            "no resources are exposed by this server",
        ),
        "prompts/list" => Response::success(id, json!({ "prompts": [] })),
        "prompts/get" => Response::failure(
            id,
            error_code::INVALID_PARAMS,
            "no prompts are exposed by this server",
        ),
        "notifications/initialized" | "notifications/cancelled" | "notifications/progress" => {
            Response::success(id, Value::Null)
        }
        other => Response::failure(
            id,
            error_code::METHOD_NOT_FOUND,
            format!("unknown method '{other}'"),
        ),
    }
}

/// Fallback used when settings failed to load (main.rs always prefers the
/// configured value).
pub fn default_protocol_version() -> &'static str {
    PROTOCOL_VERSION_FALLBACK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::GrammarRegistry;
    use crate::storage::IndexStore;
    use serde_json::Value as Json;

    fn maintainer_in(dir: &std::path::Path) -> Maintainer {
        let store = IndexStore::load(dir.join(".cog").join("index.scip")).unwrap();
        Maintainer::new(dir.to_path_buf(), GrammarRegistry::new(), store)
    }

    fn req(method: &str, params: Json) -> Request {
        Request {
            jsonrpc: Some("2.0".to_string()),
            id: Some(Json::from(1)),
            method: method.to_string(),
            params,
        }
    }

    #[test]
    fn initialize_reports_the_configured_protocol_version() {
        let dir = tempfile::tempdir().unwrap();
        let maintainer = maintainer_in(dir.path());
        let mut shutting_down = false;
        let response = dispatch(
            &maintainer,
            &req("initialize", json!({})),
            "2024-11-05",
            &mut shutting_down,
        );
        assert_eq!(
            response.result.unwrap()["protocolVersion"],
            json!("2024-11-05")
        );
    }

    #[test]
    fn tools_list_includes_cog_code_query() {
        let dir = tempfile::tempdir().unwrap();
        let maintainer = maintainer_in(dir.path());
        let mut shutting_down = false;
        let response = dispatch(
            &maintainer,
            &req("tools/list", json!({})),
            "2024-11-05",
            &mut shutting_down,
        );
        let tools = response.result.unwrap();
        let names: Vec<&str> = tools["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"cog_code_query"));
    }

    #[test]
    fn unknown_method_is_method_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let maintainer = maintainer_in(dir.path());
        let mut shutting_down = false;
        let response = dispatch(
            &maintainer,
            &req("frobnicate", json!({})),
            "2024-11-05",
            &mut shutting_down,
        );
        assert_eq!(
            response.error.unwrap().code,
            error_code::METHOD_NOT_FOUND
        );
    }

    #[test]
    fn tools_call_dispatches_to_status() {
        let dir = tempfile::tempdir().unwrap();
        let maintainer = maintainer_in(dir.path());
        let mut shutting_down = false;
        let response = dispatch(
            &maintainer,
            &req(
                "tools/call",
                json!({ "name": "cog_code_status", "arguments": {} }),
            ),
            "2024-11-05",
            &mut shutting_down,
        );
        assert!(response.error.is_none());
    }
}
