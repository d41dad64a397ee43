//! `code/status` (SPEC_FULL.md §6.1): reports index presence, document and
//! symbol counts, and when the on-disk index was last persisted.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::indexing::Maintainer;

pub fn run(maintainer: &Maintainer) -> Value {
    let path = maintainer.store().on_disk_path();
    let index_present = path.exists();
    let last_persisted = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(|t| DateTime::<Utc>::from(t).to_rfc3339());

    json!({
        "index_present": index_present,
        "documents": maintainer.store().document_count(),
        "symbols": maintainer.store().symbol_count(),
        "index_path": path.display().to_string(),
        "last_persisted": last_persisted,
    })
}
