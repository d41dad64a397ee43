//! Workspace Watcher (spec.md §4.E): delivers filtered, debounced change
//! events for paths the Grammar Registry recognizes.

pub mod debouncer;
pub mod filter;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, EventKind, RecursiveMode, Watcher as _};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{WatchError, WatchResult};
use crate::parsing::GrammarRegistry;

use debouncer::Debouncer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Modified,
    Removed,
}

#[derive(Debug, Clone)]
pub struct WatchEvent {
    pub relative_path: String,
    pub kind: ChangeKind,
}

/// Runs the watch loop until `shutdown` is cancelled, sending filtered and
/// debounced `WatchEvent`s to `sink`. Debounce window and poll interval are
/// both 500ms per spec.md §5 ("shutdown within one poll interval").
pub async fn run(
    workspace_root: PathBuf,
    registry: Arc<GrammarRegistry>,
    debounce_ms: u64,
    shutdown: CancellationToken,
    sink: mpsc::Sender<WatchEvent>,
) -> WatchResult<()> {
    let (tx, mut rx) = mpsc::channel::<notify::Result<Event>>(256);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.blocking_send(res);
    })
    .map_err(WatchError::from)?;

    watcher
        .watch(&workspace_root, RecursiveMode::Recursive)
        .map_err(|source| WatchError::Install {
            path: workspace_root.clone(),
            source,
        })?;

    crate::log_event!("watcher", "started", "{}", workspace_root.display());

    let mut debouncer = Debouncer::new(debounce_ms);
    let mut removed: Vec<PathBuf> = Vec::new();

    loop {
        let poll = tokio::time::sleep(Duration::from_millis(500.min(debounce_ms.max(1))));
        tokio::pin!(poll);

        tokio::select! {
            _ = shutdown.cancelled() => {
                crate::log_event!("watcher", "shutdown");
                return Ok(());
            }
            maybe = rx.recv() => {
                match maybe {
                    Some(Ok(event)) => handle_event(event, &registry, &mut debouncer, &mut removed),
                    Some(Err(e)) => {
                        tracing::error!("watcher backend error: {e}");
                    }
                    None => {
                        tracing::warn!("watcher channel closed, degrading to no live updates");
                        return Ok(());
                    }
                }
            }
            _ = &mut poll => {
                flush_ready(&workspace_root, &mut debouncer, &mut removed, &sink).await;
            }
        }
    }
}

fn handle_event(
    event: Event,
    registry: &GrammarRegistry,
    debouncer: &mut Debouncer,
    removed: &mut Vec<PathBuf>,
) {
    for path in event.paths {
        if !filter::should_watch(&path, registry) {
            continue;
        }
        match event.kind {
            EventKind::Remove(_) => {
                debouncer.remove(&path);
                removed.push(path);
            }
            EventKind::Create(_) | EventKind::Modify(_) => {
                debouncer.record(path);
            }
            _ => {}
        }
    }
}

async fn flush_ready(
    workspace_root: &Path,
    debouncer: &mut Debouncer,
    removed: &mut Vec<PathBuf>,
    sink: &mpsc::Sender<WatchEvent>,
) {
    for path in removed.drain(..) {
        if let Some(relative_path) = relativize(workspace_root, &path) {
            let _ = sink
                .send(WatchEvent {
                    relative_path,
                    kind: ChangeKind::Removed,
                })
                .await;
        }
    }
    for path in debouncer.take_ready() {
        // A rename-as-modify (common on macOS) can leave a path that no
        // longer exists; treat it as a removal instead.
        let kind = if path.exists() {
            ChangeKind::Modified
        } else {
            ChangeKind::Removed
        };
        if let Some(relative_path) = relativize(workspace_root, &path) {
            let _ = sink.send(WatchEvent { relative_path, kind }).await;
        }
    }
}

fn relativize(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
}
