//! The indexing maintainer (spec.md §2 "dispatcher"): resolves a changed
//! path through the Grammar Registry, runs the Symbol Extractor, and
//! replaces the document in the Index Store.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{IndexError, IndexResult};
use crate::indexing::walker;
use crate::parsing::{self, GrammarConfig, GrammarRegistry};
use crate::storage::IndexStore;
use crate::watcher::{ChangeKind, WatchEvent};

pub struct IndexStats {
    pub files_indexed: usize,
    pub files_skipped: usize,
}

/// Wires the Grammar Registry, Symbol Extractor, and Index Store together
/// (spec.md §2's data-flow: Watcher → dispatcher → Registry → Extractor →
/// Store).
pub struct Maintainer {
    workspace_root: PathBuf,
    registry: GrammarRegistry,
    store: IndexStore,
    parallel_threads: usize,
}

impl Maintainer {
    pub fn new(workspace_root: PathBuf, registry: GrammarRegistry, store: IndexStore) -> Self {
        Self {
            workspace_root,
            registry,
            store,
            parallel_threads: 1,
        }
    }

    /// Sets the worker count for bulk `index_all` runs (spec.md §5's
    /// "optionally, an indexing worker pool when bulk-indexing a glob").
    pub fn with_parallel_threads(mut self, parallel_threads: usize) -> Self {
        self.parallel_threads = parallel_threads.max(1);
        self
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    fn relative_path(&self, absolute: &Path) -> String {
        absolute
            .strip_prefix(&self.workspace_root)
            .unwrap_or(absolute)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Re-extracts `absolute_path` and replaces its document in the store.
    /// An unsupported extension is a silent no-op, per the state machine's
    /// "Any -> unsupported-ext -> (unchanged)" row. A read/parse failure
    /// leaves the prior document untouched and is returned as an error so
    /// callers (e.g. `MutationTransaction`) can decide whether to roll back;
    /// the watcher's own dispatch path instead logs it as a warning.
    pub fn reindex_path(&self, absolute_path: &Path) -> IndexResult<()> {
        let relative_path = self.relative_path(absolute_path);
        let Some(ext) = absolute_path.extension().and_then(|e| e.to_str()) else {
            return Ok(());
        };
        let Some(GrammarConfig::TreeSitter { language }) = self.registry.resolve(ext) else {
            return Ok(());
        };

        let source = fs::read(absolute_path).map_err(|source| IndexError::Read {
            path: absolute_path.to_path_buf(),
            source,
        })?;
        let document = parsing::extract(&relative_path, language, &source)?;
        self.store.replace(document);
        Ok(())
    }

    /// Drops the document at `absolute_path`, if present. Idempotent.
    pub fn remove_path(&self, absolute_path: &Path) {
        let relative_path = self.relative_path(absolute_path);
        self.store.remove(&relative_path);
    }

    /// Re-extracts under the new path and atomically moves the document
    /// from `old` to `new` in the store.
    pub fn reindex_rename(&self, old: &Path, new: &Path) -> IndexResult<()> {
        let old_relative = self.relative_path(old);
        let new_relative = self.relative_path(new);
        let Some(ext) = new.extension().and_then(|e| e.to_str()) else {
            self.store.remove(&old_relative);
            return Ok(());
        };
        let Some(GrammarConfig::TreeSitter { language }) = self.registry.resolve(ext) else {
            self.store.remove(&old_relative);
            return Ok(());
        };

        let source = fs::read(new).map_err(|source| IndexError::Read {
            path: new.to_path_buf(),
            source,
        })?;
        let document = parsing::extract(&new_relative, language, &source)?;
        self.store.rename(&old_relative, &new_relative, document);
        Ok(())
    }

    /// Bulk-indexes every file under the workspace root matching `pattern`
    /// (spec.md §6 `code/index [pattern]`), spread across `parallel_threads`
    /// workers. Each worker reuses its own tree-sitter parser via the
    /// extractor's thread-local cache; the Index Store's lock serializes the
    /// per-document replace.
    pub fn index_all(&self, pattern: &str) -> IndexStats {
        let paths = walker::walk(&self.workspace_root, pattern, &self.registry);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallel_threads)
            .build()
            .expect("thread pool with a bounded, non-zero thread count");

        let (indexed, skipped) = pool.install(|| {
            paths
                .par_iter()
                .map(|path| match self.reindex_path(path) {
                    Ok(()) => (1, 0),
                    Err(e) => {
                        tracing::warn!("failed to index '{}': {e}", path.display());
                        (0, 1)
                    }
                })
                .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
        });

        IndexStats {
            files_indexed: indexed,
            files_skipped: skipped,
        }
    }

    /// Applies a single watcher-sourced event. Failures are logged as
    /// warnings and never abort the watch loop (spec.md §4.D failure
    /// semantics: "a failed extraction... leaves the prior document in
    /// place and logs a warning").
    pub fn apply_watch_event(&self, event: WatchEvent) {
        let absolute = self.workspace_root.join(&event.relative_path);
        match event.kind {
            ChangeKind::Removed => self.remove_path(&absolute),
            ChangeKind::Modified => {
                if let Err(e) = self.reindex_path(&absolute) {
                    tracing::warn!("failed to reindex '{}': {e}", event.relative_path);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maintainer_in(dir: &Path) -> Maintainer {
        let store = IndexStore::load(dir.join(".cog").join("index.scip")).unwrap();
        Maintainer::new(dir.to_path_buf(), GrammarRegistry::new(), store)
    }

    #[test]
    fn reindex_path_extracts_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "package main\nfunc Hello() {}\n").unwrap();
        let maintainer = maintainer_in(dir.path());
        maintainer.reindex_path(&dir.path().join("a.go")).unwrap();
        assert_eq!(maintainer.store().document_count(), 1);
    }

    #[test]
    fn unsupported_extension_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.zig"), "fn main() {}").unwrap();
        let maintainer = maintainer_in(dir.path());
        maintainer.reindex_path(&dir.path().join("a.zig")).unwrap();
        assert_eq!(maintainer.store().document_count(), 0);
    }

    #[test]
    fn remove_path_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "package main\nfunc Hello() {}\n").unwrap();
        let maintainer = maintainer_in(dir.path());
        maintainer.reindex_path(&dir.path().join("a.go")).unwrap();
        maintainer.remove_path(&dir.path().join("a.go"));
        maintainer.remove_path(&dir.path().join("a.go"));
        assert_eq!(maintainer.store().document_count(), 0);
    }

    #[test]
    fn index_all_discovers_and_indexes_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "package main\nfunc Hello() {}\n").unwrap();
        fs::write(dir.path().join("b.py"), "def hi():\n    pass\n").unwrap();
        let maintainer = maintainer_in(dir.path());
        let stats = maintainer.index_all(walker::DEFAULT_PATTERN);
        assert_eq!(stats.files_indexed, 2);
        assert_eq!(maintainer.store().document_count(), 2);
    }
}
