//! Index Store query modes (spec.md §4.D `Query`): `find`, `refs`,
//! `symbols`, `structure`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::storage::store::IndexStore;
use crate::symbol::{Document, Occurrence};
use crate::types::{SymbolKind, SymbolRole};

#[derive(Debug, Clone, Default)]
pub struct QueryArgs {
    pub name: Option<String>,
    pub file: Option<String>,
    pub kind: Option<SymbolKind>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ResultEntry {
    path: String,
    line: u32,
    column: u32,
    name: String,
    kind: i32,
    enclosing_range: [u32; 4],
}

/// Parses a `--kind` CLI/MCP argument (a lowercase kind name) into a
/// `SymbolKind`. Query results themselves report `kind` numerically
/// (spec.md §3's wire-contractual values); this lowercase form is only the
/// filter argument's surface.
pub fn parse_kind(tag: &str) -> Option<SymbolKind> {
    Some(match tag.to_ascii_lowercase().as_str() {
        "class" => SymbolKind::Class,
        "constant" => SymbolKind::Constant,
        "constructor" => SymbolKind::Constructor,
        "field" => SymbolKind::Field,
        "function" => SymbolKind::Function,
        "interface" => SymbolKind::Interface,
        "implementation" => SymbolKind::Implementation,
        "macro" => SymbolKind::Macro,
        "method" => SymbolKind::Method,
        "module" => SymbolKind::Module,
        "namespace" => SymbolKind::Namespace,
        "trait" => SymbolKind::Trait,
        "type" => SymbolKind::Type,
        "variable" => SymbolKind::Variable,
        "enum" => SymbolKind::Enum,
        "struct" => SymbolKind::Struct,
        "property" => SymbolKind::Property,
        _ => return None,
    })
}

/// JSON object keys must be strings; `structure`'s `symbols_by_kind` map is
/// keyed by the numeric `SymbolKind` value, stringified, per spec.md §3's
/// wire-contractual numbering (e.g. `{"17": 2, "49": 1}`).
fn kind_key(kind: SymbolKind) -> String {
    kind.as_i32().to_string()
}

struct Candidate<'a> {
    doc: &'a Document,
    occ: &'a Occurrence,
    exact_case: bool,
    kind_match: bool,
    display_name: &'a str,
    kind: SymbolKind,
}

fn collect_candidates<'a>(
    documents: &'a [Document],
    name: &str,
    kind: Option<SymbolKind>,
    definitions_only: bool,
) -> Vec<Candidate<'a>> {
    let mut out = Vec::new();
    for doc in documents {
        for occ in &doc.occurrences {
            if definitions_only && !occ.roles.has(SymbolRole::DEFINITION) {
                continue;
            }
            let Some(info) = doc.symbols.iter().find(|s| s.symbol == occ.symbol) else {
                continue;
            };
            if !info.display_name.eq_ignore_ascii_case(name) {
                continue;
            }
            out.push(Candidate {
                doc,
                occ,
                exact_case: info.display_name == name,
                kind_match: kind.is_none_or(|k| k == info.kind),
                display_name: info.display_name.as_str(),
                kind: info.kind,
            });
        }
    }
    out
}

/// Ranks and truncates candidates per the five-key ordering spec.md's
/// `find` bullet specifies: exact case, kind-filter match, shallower path,
/// lexicographic path, then line number.
fn rank(mut candidates: Vec<Candidate<'_>>, kind_filter_supplied: bool, limit: usize) -> Vec<Candidate<'_>> {
    candidates.sort_by(|a, b| {
        b.exact_case
            .cmp(&a.exact_case)
            .then_with(|| {
                if kind_filter_supplied {
                    b.kind_match.cmp(&a.kind_match)
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .then_with(|| {
                let depth_a = a.doc.relative_path.matches('/').count();
                let depth_b = b.doc.relative_path.matches('/').count();
                depth_a.cmp(&depth_b)
            })
            .then_with(|| a.doc.relative_path.cmp(&b.doc.relative_path))
            .then_with(|| a.occ.range.start_line.cmp(&b.occ.range.start_line))
    });
    candidates.truncate(limit);
    candidates
}

fn to_entry(c: &Candidate<'_>) -> ResultEntry {
    ResultEntry {
        path: c.doc.relative_path.clone(),
        line: c.occ.range.start_line,
        column: c.occ.range.start_char,
        name: c.display_name.to_string(),
        kind: c.kind.as_i32(),
        enclosing_range: [
            c.occ.enclosing_range.start_line,
            c.occ.enclosing_range.start_char,
            c.occ.enclosing_range.end_line,
            c.occ.enclosing_range.end_char,
        ],
    }
}

/// `find(name, kind?, limit)`: exact matches on `display_name` among
/// Definition occurrences, limit defaults to 1.
pub fn find(store: &IndexStore, args: &QueryArgs) -> Value {
    let name = args.name.as_deref().unwrap_or_default();
    let limit = args.limit.unwrap_or(1);
    store.with_index(|index| {
        let candidates = collect_candidates(&index.documents, name, args.kind, true);
        let ranked = rank(candidates, args.kind.is_some(), limit);
        let results: Vec<ResultEntry> = ranked.iter().map(to_entry).collect();
        json!({ "results": results })
    })
}

/// `refs(name, kind?, limit)`: all occurrences (Definition and reference
/// roles alike) whose display name matches; limit defaults to 100.
pub fn refs(store: &IndexStore, args: &QueryArgs) -> Value {
    let name = args.name.as_deref().unwrap_or_default();
    let limit = args.limit.unwrap_or(100);
    store.with_index(|index| {
        let candidates = collect_candidates(&index.documents, name, args.kind, false);
        let ranked = rank(candidates, args.kind.is_some(), limit);
        let results: Vec<ResultEntry> = ranked.iter().map(to_entry).collect();
        json!({ "results": results })
    })
}

/// `symbols(file, kind?)`: every `SymbolInformation` in the document at
/// `file`, filtered by kind if supplied.
pub fn symbols(store: &IndexStore, args: &QueryArgs) -> Value {
    let file = args.file.as_deref().unwrap_or_default();
    store.with_index(|index| {
        let Some(doc) = index.find_document(file) else {
            return json!({ "symbols": [] });
        };
        let entries: Vec<Value> = doc
            .symbols
            .iter()
            .filter(|s| args.kind.is_none_or(|k| k == s.kind))
            .map(|s| {
                let occ = doc.occurrences.iter().find(|o| o.symbol == s.symbol);
                json!({
                    "name": s.display_name,
                    "kind": s.kind.as_i32(),
                    "line": occ.map(|o| o.range.start_line),
                    "column": occ.map(|o| o.range.start_char),
                })
            })
            .collect();
        json!({ "symbols": entries })
    })
}

/// `structure`: per top-level directory, document count and symbol counts
/// by kind.
pub fn structure(store: &IndexStore) -> Value {
    store.with_index(|index| {
        let mut by_dir: BTreeMap<String, (usize, BTreeMap<String, usize>)> = BTreeMap::new();
        for doc in &index.documents {
            let top = doc
                .relative_path
                .split_once('/')
                .map(|(dir, _)| dir.to_string())
                .unwrap_or_else(|| ".".to_string());
            let entry = by_dir.entry(top).or_default();
            entry.0 += 1;
            for sym in &doc.symbols {
                *entry.1.entry(kind_key(sym.kind)).or_insert(0) += 1;
            }
        }
        let structure: serde_json::Map<String, Value> = by_dir
            .into_iter()
            .map(|(dir, (documents, kinds))| {
                (
                    dir,
                    json!({
                        "documents": documents,
                        "symbols_by_kind": kinds,
                    }),
                )
            })
            .collect();
        json!({ "structure": structure })
    })
}
