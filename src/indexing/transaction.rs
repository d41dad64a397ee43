//! Write-through-with-rollback for CLI mutation commands (`edit`, `create`,
//! `delete`, `rename`) — spec.md §4.D "Recovery on external mutation".
//!
//! Captures the file's prior bytes (or absence) before mutating, then
//! attempts re-extraction + persist. If either step fails, the filesystem
//! change is rolled back and the old state is re-extracted so the index
//! stays consistent with what's actually on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IndexError, IndexResult};
use crate::indexing::maintainer::Maintainer;

enum PriorState {
    Absent,
    Present(Vec<u8>),
}

/// A single file mutation, applied with rollback on failure.
pub struct MutationTransaction<'a> {
    maintainer: &'a Maintainer,
    path: PathBuf,
    prior: PriorState,
}

impl<'a> MutationTransaction<'a> {
    /// Captures `path`'s current bytes (or records its absence) before any
    /// mutation happens.
    pub fn begin(maintainer: &'a Maintainer, path: PathBuf) -> IndexResult<Self> {
        let prior = if path.exists() {
            let bytes = fs::read(&path).map_err(|source| IndexError::Read {
                path: path.clone(),
                source,
            })?;
            PriorState::Present(bytes)
        } else {
            PriorState::Absent
        };
        Ok(Self {
            maintainer,
            path,
            prior,
        })
    }

    /// Writes `new_contents` to disk, re-extracts, and persists. On failure,
    /// restores the prior bytes (or removes the file if it didn't exist
    /// before) and re-extracts that restored state. Per spec.md's Open
    /// Question 1 resolution, a failure during the rollback's own
    /// re-extraction is logged as a warning, not propagated — the store
    /// keeps whatever document it had before this mutation attempt.
    pub fn commit(self, new_contents: Option<&[u8]>) -> IndexResult<()> {
        let write_result = match new_contents {
            Some(bytes) => fs::write(&self.path, bytes).map_err(|source| IndexError::Write {
                path: self.path.clone(),
                source,
            }),
            None => fs::remove_file(&self.path).map_err(|source| IndexError::Write {
                path: self.path.clone(),
                source,
            }),
        };

        let apply = write_result.and_then(|_| self.reindex_current());

        match apply {
            Ok(()) => Ok(()),
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }

    /// Re-extracts whatever is on disk at `self.path` right now, or drops
    /// the document if the mutation deleted the file.
    fn reindex_current(&self) -> IndexResult<()> {
        if self.path.exists() {
            self.maintainer.reindex_path(&self.path)
        } else {
            self.maintainer.remove_path(&self.path);
            Ok(())
        }
    }

    fn rollback(self) {
        let restore = match &self.prior {
            PriorState::Present(bytes) => fs::write(&self.path, bytes),
            PriorState::Absent => fs::remove_file(&self.path).or_else(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Ok(())
                } else {
                    Err(e)
                }
            }),
        };
        if let Err(e) = restore {
            tracing::warn!("rollback failed to restore '{}': {e}", self.path.display());
            return;
        }
        if let Err(e) = self.reindex_current() {
            tracing::warn!(
                "rollback restored '{}' but re-extraction failed: {e}",
                self.path.display()
            );
        }
    }
}

/// Renames `old` to `new`, with rollback of both the filesystem rename and
/// the index entry if re-extraction under the new path fails.
pub fn rename(maintainer: &Maintainer, old: &Path, new: &Path) -> IndexResult<()> {
    fs::rename(old, new).map_err(|source| IndexError::Write {
        path: new.to_path_buf(),
        source,
    })?;

    match maintainer.reindex_rename(old, new) {
        Ok(()) => Ok(()),
        Err(e) => {
            if let Err(restore_err) = fs::rename(new, old) {
                tracing::warn!(
                    "rollback failed to restore rename '{}' -> '{}': {restore_err}",
                    new.display(),
                    old.display()
                );
            } else if let Err(reindex_err) = maintainer.reindex_path(old) {
                tracing::warn!(
                    "rollback restored '{}' but re-extraction failed: {reindex_err}",
                    old.display()
                );
            }
            Err(e)
        }
    }
}
