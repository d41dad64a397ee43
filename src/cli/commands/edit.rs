//! `code/edit FILE --old TEXT --new TEXT` (spec.md §6).

use std::fs;
use std::path::Path;

use crate::error::{IndexError, IndexResult};
use crate::indexing::transaction::MutationTransaction;
use crate::indexing::Maintainer;

pub fn run(maintainer: &Maintainer, file: &Path, old: &str, new: &str) -> IndexResult<()> {
    let current = fs::read_to_string(file).map_err(|source| IndexError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    if !current.contains(old) {
        return Err(IndexError::Invariant(format!(
            "'{}' not found in {}",
            old,
            file.display()
        )));
    }
    let replaced = current.replacen(old, new, 1);

    let txn = MutationTransaction::begin(maintainer, file.to_path_buf())?;
    txn.commit(Some(replaced.as_bytes()))?;
    maintainer.store().persist()
}
