//! Indexing dispatcher: wires the watcher, Grammar Registry, Symbol
//! Extractor, and Index Store, plus the write-through-with-rollback
//! mutation transaction and glob-based bulk indexing (spec.md §4.D, §5).

pub mod maintainer;
pub mod transaction;
pub mod walker;

pub use maintainer::{IndexStats, Maintainer};
