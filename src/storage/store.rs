//! Index Store (spec.md §4.D): owns the in-memory `Index`, applies
//! `Replace`/`Remove`/`Rename` atomically under a single shared/exclusive
//! lock, and persists to disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::IndexResult;
use crate::storage::persistence;
use crate::symbol::{Document, Index};

struct IndexState {
    index: Index,
    /// relative path -> index into `index.documents`, for O(1) Replace/Remove
    /// (spec.md §4.D "use a path → index mapping beside the list").
    path_to_slot: HashMap<Box<str>, usize>,
}

impl IndexState {
    fn rebuild_slots(&mut self) {
        self.path_to_slot.clear();
        for (slot, doc) in self.index.documents.iter().enumerate() {
            self.path_to_slot
                .insert(doc.relative_path.as_str().into(), slot);
        }
    }
}

/// Owns the workspace's live index plus the `.cog/index.scip` path it
/// persists to. A single `RwLock` realizes the "readers proceed
/// concurrently, mutations are exclusive" concurrency model (spec.md §5).
pub struct IndexStore {
    on_disk_path: PathBuf,
    state: RwLock<IndexState>,
}

impl IndexStore {
    /// `Load` (spec.md §4.D): reads the existing index, or starts empty.
    pub fn load(on_disk_path: PathBuf) -> IndexResult<Self> {
        let index = persistence::load(&on_disk_path)?;
        let mut state = IndexState {
            index,
            path_to_slot: HashMap::new(),
        };
        state.rebuild_slots();
        Ok(Self {
            on_disk_path,
            state: RwLock::new(state),
        })
    }

    pub fn on_disk_path(&self) -> &Path {
        &self.on_disk_path
    }

    /// `Replace` (spec.md §4.D): removes any existing document at the same
    /// path, then inserts `document`.
    pub fn replace(&self, document: Document) {
        let mut state = self.state.write();
        let path: Box<str> = document.relative_path.as_str().into();
        if let Some(&slot) = state.path_to_slot.get(&path) {
            state.index.documents[slot] = document;
        } else {
            let slot = state.index.documents.len();
            state.index.documents.push(document);
            state.path_to_slot.insert(path, slot);
        }
    }

    /// `Remove` (spec.md §4.D): idempotent drop of the document at `path`.
    pub fn remove(&self, relative_path: &str) {
        let mut state = self.state.write();
        let Some(slot) = state.path_to_slot.remove(relative_path) else {
            return;
        };
        state.index.documents.swap_remove(slot);
        state.rebuild_slots();
    }

    /// `Rename` (spec.md §4.D): atomically drop `old` and insert `new_document`
    /// under `new`. Symbol IDs embedded in `new_document` are left exactly as
    /// the extractor produced them — they are opaque and not path-rewritten.
    pub fn rename(&self, old: &str, new: &str, new_document: Document) {
        debug_assert_eq!(new_document.relative_path, new);
        let mut state = self.state.write();
        if let Some(slot) = state.path_to_slot.remove(old) {
            state.index.documents.swap_remove(slot);
        }
        let path: Box<str> = new.into();
        if let Some(&slot) = state.path_to_slot.get(&path) {
            state.index.documents[slot] = new_document;
        } else {
            let slot = state.index.documents.len();
            state.index.documents.push(new_document);
            state.path_to_slot.insert(path, slot);
        }
        state.rebuild_slots();
    }

    /// `Persist` (spec.md §4.D): atomically rewrites the on-disk index.
    /// Holds the lock for the whole encode+write+rename, per §5.
    pub fn persist(&self) -> IndexResult<()> {
        let state = self.state.read();
        persistence::persist(&self.on_disk_path, &state.index)
    }

    /// Read-only snapshot access for queries (§4.D `Query`). The lock is
    /// held only for the duration of `f`.
    pub fn with_index<R>(&self, f: impl FnOnce(&Index) -> R) -> R {
        let state = self.state.read();
        f(&state.index)
    }

    pub fn document_count(&self) -> usize {
        self.state.read().index.documents.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.state
            .read()
            .index
            .documents
            .iter()
            .map(|d| d.symbols.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, IndexStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cog").join("index.scip");
        let store = IndexStore::load(path).unwrap();
        (dir, store)
    }

    #[test]
    fn replace_then_remove_round_trips() {
        let (_dir, store) = temp_store();
        store.replace(Document::new("a.rs", "rust"));
        assert_eq!(store.document_count(), 1);
        store.remove("a.rs");
        assert_eq!(store.document_count(), 0);
        store.remove("a.rs"); // idempotent
        assert_eq!(store.document_count(), 0);
    }

    #[test]
    fn replace_on_existing_path_overwrites_not_appends() {
        let (_dir, store) = temp_store();
        store.replace(Document::new("a.rs", "rust"));
        store.replace(Document::new("a.rs", "rust"));
        assert_eq!(store.document_count(), 1);
    }

    #[test]
    fn rename_moves_the_document_under_the_new_path() {
        let (_dir, store) = temp_store();
        store.replace(Document::new("a.rs", "rust"));
        store.rename("a.rs", "b.rs", Document::new("b.rs", "rust"));
        assert_eq!(store.document_count(), 1);
        assert!(store.with_index(|i| i.find_document("b.rs").is_some()));
        assert!(store.with_index(|i| i.find_document("a.rs").is_none()));
    }

    #[test]
    fn persist_and_reload_survives_a_store_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".cog").join("index.scip");
        let store = IndexStore::load(path.clone()).unwrap();
        store.replace(Document::new("a.rs", "rust"));
        store.persist().unwrap();

        let reloaded = IndexStore::load(path).unwrap();
        assert_eq!(reloaded.document_count(), 1);
    }
}
