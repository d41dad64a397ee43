//! Atomic on-disk persistence for the SCIP index: write-to-temp + rename
//! (spec.md §4.D `Persist`).

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{IndexError, IndexResult};
use crate::scip;
use crate::symbol::Index;

/// Reads and decodes `path`. A missing file yields an empty `Index`, not an
/// error (spec.md §4.D `Load`).
pub fn load(path: &Path) -> IndexResult<Index> {
    if !path.exists() {
        return Ok(Index::new());
    }
    let bytes = fs::read(path).map_err(|source| IndexError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    scip::decode(&bytes).map_err(|source| IndexError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Encodes `index` and atomically replaces `path` via a sibling temp file
/// plus rename, so a crash mid-write never leaves a truncated index on disk.
pub fn persist(path: &Path, index: &Index) -> IndexResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| IndexError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let bytes = scip::encode(index);
    let tmp_path = path.with_extension("scip.tmp");
    let write = || -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    };
    write().map_err(|source| IndexError::Write {
        path: path.to_path_buf(),
        source,
    })
}
