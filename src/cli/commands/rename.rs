//! `code/rename OLD --to NEW` (spec.md §6).

use std::path::Path;

use crate::error::IndexResult;
use crate::indexing::transaction;
use crate::indexing::Maintainer;

pub fn run(maintainer: &Maintainer, old: &Path, new: &Path) -> IndexResult<()> {
    transaction::rename(maintainer, old, new)?;
    maintainer.store().persist()
}
