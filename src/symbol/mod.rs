//! Document/Index data model: Occurrence, SymbolInformation, Document,
//! Index, and the opaque Symbol ID scheme (spec.md §3).

use crate::types::{Range, SymbolKind, SymbolRole};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An opaque symbol identifier: `local <relative-path>:<N>` where N is the
/// per-file 0-based sequence index (spec.md §3, §9 "per-file symbol IDs
/// encode the path"). Consumers must treat this as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub Arc<str>);

impl SymbolId {
    /// Build the canonical local id for the Nth (0-based) definition in a
    /// file at `relative_path`.
    pub fn local(relative_path: &str, index: usize) -> Self {
        Self(Arc::from(format!("local {relative_path}:{index}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (range, symbol-id, roles) triple locating one mention of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub range: Range,
    pub symbol: SymbolId,
    pub roles: SymbolRole,
    /// Reserved for future capture kinds; the core extractor always emits 0.
    pub syntax_kind: i32,
    /// Covers the full definition body, not just the name (spec.md §3).
    pub enclosing_range: Range,
}

/// Edge to a related symbol (documents/external symbols only; the core
/// extractor never emits these but must round-trip them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub symbol: SymbolId,
    pub is_reference: bool,
    pub is_implementation: bool,
    pub is_type_definition: bool,
    pub is_definition: bool,
}

/// Metadata about a single symbol: its kind, display name, docs, and any
/// relationships to other symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolInformation {
    pub symbol: SymbolId,
    pub documentation: Vec<String>,
    pub relationships: Vec<Relationship>,
    pub kind: SymbolKind,
    pub display_name: String,
    pub enclosing_symbol: Option<SymbolId>,
}

/// A single source file's extracted symbols and occurrences. All string
/// slices (symbol ids, display names) were allocated out of `pool`, which
/// must be kept alive for as long as the Document is used (spec.md §4.B
/// backing-buffer ownership; see `pool` below for the actual bytes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub relative_path: String,
    pub language: String,
    pub occurrences: Vec<Occurrence>,
    pub symbols: Vec<SymbolInformation>,
}

impl Document {
    pub fn new(relative_path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            language: language.into(),
            occurrences: Vec::new(),
            symbols: Vec::new(),
        }
    }

    /// Check the per-document invariant: every Definition occurrence's
    /// symbol-id has a matching SymbolInformation in the same document
    /// (spec.md §3 invariant).
    pub fn is_consistent(&self) -> bool {
        self.occurrences.iter().all(|occ| {
            if !occ.roles.has(SymbolRole::DEFINITION) {
                return true;
            }
            self.symbols.iter().any(|s| s.symbol == occ.symbol)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Metadata {
    pub version: i32,
    pub tool_info: Option<ToolInfo>,
    pub project_root: String,
    pub text_document_encoding: i32,
}

/// The top-level aggregate: metadata, documents keyed by relative path, and
/// external symbols (references into third-party code the core never
/// emits, but must round-trip).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Index {
    pub metadata: Option<Metadata>,
    pub documents: Vec<Document>,
    pub external_symbols: Vec<SymbolInformation>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// No two documents may share a relative path (spec.md §3 invariant).
    pub fn has_duplicate_paths(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        !self.documents.iter().all(|d| seen.insert(d.relative_path.as_str()))
    }

    pub fn find_document(&self, relative_path: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.relative_path == relative_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_id_local_scheme() {
        let id = SymbolId::local("src/main.rs", 3);
        assert_eq!(id.as_str(), "local src/main.rs:3");
    }

    #[test]
    fn document_consistency_requires_matching_symbol_info() {
        let mut doc = Document::new("a.rs", "rust");
        let id = SymbolId::local("a.rs", 0);
        doc.occurrences.push(Occurrence {
            range: Range::new(0, 0, 0, 3),
            symbol: id.clone(),
            roles: SymbolRole::DEFINITION,
            syntax_kind: 0,
            enclosing_range: Range::new(0, 0, 0, 3),
        });
        assert!(!doc.is_consistent());

        doc.symbols.push(SymbolInformation {
            symbol: id,
            documentation: vec![],
            relationships: vec![],
            kind: SymbolKind::Function,
            display_name: "foo".into(),
            enclosing_symbol: None,
        });
        assert!(doc.is_consistent());
    }

    #[test]
    fn index_rejects_duplicate_paths() {
        let mut index = Index::new();
        index.documents.push(Document::new("a.rs", "rust"));
        assert!(!index.has_duplicate_paths());
        index.documents.push(Document::new("a.rs", "rust"));
        assert!(index.has_duplicate_paths());
    }
}
