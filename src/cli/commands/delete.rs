//! `code/delete FILE` (spec.md §6).

use std::path::Path;

use crate::error::IndexResult;
use crate::indexing::transaction::MutationTransaction;
use crate::indexing::Maintainer;

pub fn run(maintainer: &Maintainer, file: &Path) -> IndexResult<()> {
    let txn = MutationTransaction::begin(maintainer, file.to_path_buf())?;
    txn.commit(None)?;
    maintainer.store().persist()
}
