//! `cog` binary entry point: argument parsing, workspace discovery, and
//! dispatch to the `code/*` CLI commands or the MCP stdio server
//! (spec.md §6).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use cog::cli::commands::{create, delete, edit, index, query, rename, status};
use cog::cli::{Cli, CodeAction, Commands};
use cog::config::{Settings, COG_DIR};
use cog::indexing::Maintainer;
use cog::mcp;
use cog::parsing::GrammarRegistry;
use cog::storage::IndexStore;
use cog::watcher;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("error: failed to load settings: {e}");
        Settings::default()
    });

    cog::logging::init_with_config(&settings.logging);

    let workspace_root = Settings::workspace_root().unwrap_or_else(|| {
        std::env::current_dir().expect("current directory must be resolvable")
    });

    let mut registry = GrammarRegistry::new();
    if let Err(e) = registry.load_installed(&workspace_root.join(COG_DIR)) {
        tracing::warn!("failed to load installed extensions: {e}");
    }

    let index_path = workspace_root.join(&settings.index_path);
    let store = match IndexStore::load(index_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let maintainer = Maintainer::new(workspace_root.clone(), registry.clone(), store)
        .with_parallel_threads(settings.indexing.parallel_threads);

    match cli.command {
        Commands::Code { action } => run_code_action(&maintainer, action),
        Commands::Mem { operation, args } => run_mem_passthrough(&operation, &args),
        Commands::Mcp => run_mcp(maintainer, registry, workspace_root, &settings).await,
    }
}

fn run_code_action(maintainer: &Maintainer, action: CodeAction) -> ExitCode {
    let outcome: Result<serde_json::Value, String> = match action {
        CodeAction::Index { pattern } => Ok(index::run(maintainer, pattern)),
        CodeAction::Query {
            find,
            refs,
            symbols,
            structure,
            kind,
            limit,
        } => query::run(
            maintainer,
            query::QueryCommand {
                find,
                refs,
                symbols,
                structure,
                kind,
                limit,
            },
        ),
        CodeAction::Edit { file, old, new } => edit::run(maintainer, &file, &old, &new)
            .map(|()| serde_json::json!({ "status": "ok" }))
            .map_err(|e| e.to_string()),
        CodeAction::Create { file, content } => {
            create::run(maintainer, &file, content.as_deref())
                .map(|()| serde_json::json!({ "status": "ok" }))
                .map_err(|e| e.to_string())
        }
        CodeAction::Delete { file } => delete::run(maintainer, &file)
            .map(|()| serde_json::json!({ "status": "ok" }))
            .map_err(|e| e.to_string()),
        CodeAction::Rename { old, to } => rename::run(maintainer, &old, &to)
            .map(|()| serde_json::json!({ "status": "ok" }))
            .map_err(|e| e.to_string()),
        CodeAction::Status => Ok(status::run(maintainer)),
    };

    match outcome {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `mem/*` operations are out of scope (spec.md §1): they are remote RPC
/// calls against a hosted associative-memory service this core never owns.
/// The dispatcher passes the operation name and arguments through verbatim
/// and reports that no local handling occurred.
fn run_mem_passthrough(operation: &str, args: &[String]) -> ExitCode {
    eprintln!(
        "error: 'mem {operation}' is a remote operation (args: {args:?}); this binary does not embed a memory-service client"
    );
    ExitCode::FAILURE
}

async fn run_mcp(
    maintainer: Maintainer,
    registry: GrammarRegistry,
    workspace_root: PathBuf,
    settings: &Settings,
) -> ExitCode {
    let maintainer = Arc::new(maintainer);
    let shutdown = tokio_util::sync::CancellationToken::new();
    let (tx, mut rx) = tokio::sync::mpsc::channel(256);

    let watcher_shutdown = shutdown.clone();
    let watcher_root = workspace_root.clone();
    let watcher_registry = Arc::new(registry);
    let debounce_ms = settings.watcher.debounce_ms;
    let watcher_handle = tokio::spawn(async move {
        if let Err(e) = watcher::run(watcher_root, watcher_registry, debounce_ms, watcher_shutdown, tx).await {
            tracing::error!("watcher exited: {e}");
        }
    });

    let dispatch_maintainer = maintainer.clone();
    let dispatch_handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            dispatch_maintainer.apply_watch_event(event);
        }
    });

    let result = mcp::serve(&maintainer, &settings.mcp.protocol_version).await;

    shutdown.cancel();
    let _ = watcher_handle.await;
    drop(maintainer);
    let _ = dispatch_handle.await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
