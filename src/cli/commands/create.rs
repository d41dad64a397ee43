//! `code/create FILE [--content TEXT]` (spec.md §6).

use std::path::Path;

use crate::error::{IndexError, IndexResult};
use crate::indexing::transaction::MutationTransaction;
use crate::indexing::Maintainer;

pub fn run(maintainer: &Maintainer, file: &Path, content: Option<&str>) -> IndexResult<()> {
    if file.exists() {
        return Err(IndexError::Invariant(format!(
            "{} already exists",
            file.display()
        )));
    }
    let txn = MutationTransaction::begin(maintainer, file.to_path_buf())?;
    txn.commit(Some(content.unwrap_or("").as_bytes()))?;
    maintainer.store().persist()
}
