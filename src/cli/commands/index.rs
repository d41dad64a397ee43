//! `code/index [pattern]` (spec.md §6).

use crate::indexing::{walker, Maintainer};
use serde_json::{json, Value};

pub fn run(maintainer: &Maintainer, pattern: Option<String>) -> Value {
    let pattern = pattern.unwrap_or_else(|| walker::DEFAULT_PATTERN.to_string());
    let stats = maintainer.index_all(&pattern);
    json!({
        "files_indexed": stats.files_indexed,
        "files_skipped": stats.files_skipped,
        "documents": maintainer.store().document_count(),
        "symbols": maintainer.store().symbol_count(),
    })
}
