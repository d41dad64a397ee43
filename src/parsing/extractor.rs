//! Symbol Extractor (spec.md §4.B): parse a source file with the resolved
//! grammar, run its capture query, and build a `Document`.

use std::cell::RefCell;
use std::collections::HashMap;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

use crate::error::{ParseError, ParseResult};
use crate::parsing::keywords;
use crate::parsing::language::Language;
use crate::parsing::queries;
use crate::symbol::{Document, Occurrence, SymbolId, SymbolInformation};
use crate::types::{Range, SymbolKind, SymbolRole};

thread_local! {
    static PARSERS: RefCell<HashMap<Language, (Parser, Query)>> = RefCell::new(HashMap::new());
}

/// First N bytes scanned for a Flow pragma (spec.md §4.B point 1).
const FLOW_PRAGMA_SCAN_WINDOW: usize = 256;

/// If `language` is JavaScript and the source starts with a `@flow` pragma
/// in its first 256 bytes, parse with the TypeScript grammar instead while
/// keeping the JavaScript capture query (their node shapes are compatible
/// for the patterns that query defines).
fn effective_language(language: Language, source: &[u8]) -> Language {
    if language != Language::JavaScript {
        return language;
    }
    let window = &source[..source.len().min(FLOW_PRAGMA_SCAN_WINDOW)];
    if window.windows(5).any(|w| w == b"@flow") {
        Language::TypeScript
    } else {
        language
    }
}

struct RawDefinition {
    name: String,
    kind: SymbolKind,
    name_range: Range,
    enclosing_range: Range,
}

fn kind_from_capture_label(label: &str) -> SymbolKind {
    match label {
        "function" => SymbolKind::Function,
        "method" => SymbolKind::Method,
        "class" => SymbolKind::Class,
        "struct" => SymbolKind::Struct,
        "interface" => SymbolKind::Interface,
        "enum" => SymbolKind::Enum,
        "constant" => SymbolKind::Constant,
        "variable" => SymbolKind::Variable,
        "constructor" => SymbolKind::Constructor,
        "field" => SymbolKind::Field,
        "property" => SymbolKind::Property,
        "macro" => SymbolKind::Macro,
        "module" => SymbolKind::Module,
        "trait" => SymbolKind::Trait,
        "implementation" => SymbolKind::Implementation,
        "type" => SymbolKind::Type,
        _ => SymbolKind::Unspecified,
    }
}

/// Extract all symbol definitions from `source`, a file at `relative_path`
/// of the given `language`. Parse failures and query-compile failures are
/// returned as `ParseError`; a parseable-but-empty file yields a `Document`
/// with no symbols, not an error.
pub fn extract(
    relative_path: &str,
    language: Language,
    source: &[u8],
) -> ParseResult<Document> {
    std::str::from_utf8(source).map_err(|_| ParseError::InvalidUtf8 {
        path: relative_path.into(),
    })?;

    let effective = effective_language(language, source);

    let raw_definitions = PARSERS.with(|cell| -> ParseResult<Vec<RawDefinition>> {
        let mut parsers = cell.borrow_mut();
        let (parser, query) = parsers.entry(effective).or_insert_with(|| {
            let mut parser = Parser::new();
            parser
                .set_language(&effective.ts_language())
                .unwrap_or_else(|e| {
                    panic!("grammar mismatch for {:?}: {}", effective, e);
                });
            let query = Query::new(&effective.ts_language(), queries::capture_query(effective))
                .unwrap_or_else(|e| {
                    panic!("bad capture query for {:?}: {}", effective, e);
                });
            (parser, query)
        });

        let tree = parser.parse(source, None).ok_or_else(|| ParseError::ParseFailed {
            path: relative_path.into(),
        })?;

        let name_capture = query
            .capture_names()
            .iter()
            .position(|n| *n == "name")
            .ok_or_else(|| ParseError::QueryCompile {
                language: effective.tag().to_string(),
                reason: "query is missing a @name capture".into(),
                offset: 0,
            })?;

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, tree.root_node(), source);
        let mut out = Vec::new();
        let container_kinds = queries::method_container_kinds(effective);

        while let Some(m) = matches.next() {
            let mut name_node = None;
            let mut def_node = None;
            for cap in m.captures {
                let cap_name = query.capture_names()[cap.index as usize];
                if cap.index as usize == name_capture {
                    name_node = Some(cap.node);
                } else if cap_name.starts_with("definition.") {
                    def_node = Some((cap.node, &cap_name["definition.".len()..]));
                }
            }
            let (Some(name_node), Some((def_node, kind_label))) = (name_node, def_node) else {
                continue;
            };
            if name_node.is_error() || name_node.parent().is_some_and(|p| p.is_error()) {
                continue;
            }
            if name_node.start_byte() >= name_node.end_byte() || name_node.end_byte() > source.len() {
                continue;
            }

            let mut kind = kind_from_capture_label(kind_label);
            if kind == SymbolKind::Function && !container_kinds.is_empty() {
                let mut ancestor = def_node.parent();
                while let Some(node) = ancestor {
                    if container_kinds.contains(&node.kind()) {
                        kind = SymbolKind::Method;
                        break;
                    }
                    ancestor = node.parent();
                }
            }

            let name = name_node
                .utf8_text(source)
                .map_err(|_| ParseError::InvalidUtf8 {
                    path: relative_path.into(),
                })?
                .to_string();

            out.push(RawDefinition {
                name,
                kind,
                name_range: Range::from_ts(name_node.start_position(), name_node.end_position()),
                enclosing_range: Range::from_ts(def_node.start_position(), def_node.end_position()),
                enclosing_kinds: Vec::new(),
            });
        }
        Ok(out)
    })?;

    let mut document = Document::new(relative_path, language.tag());
    let mut seen_lines: HashMap<(u32, String), ()> = HashMap::new();

    for (index, raw) in raw_definitions.into_iter().enumerate() {
        if keywords::is_suppressed(effective, &raw.name) {
            continue;
        }
        // Per-line dedup: at most one definition per (line, name) pair —
        // guards against a node matching more than one pattern.
        let dedup_key = (raw.name_range.start_line, raw.name.clone());
        if seen_lines.insert(dedup_key, ()).is_some() {
            continue;
        }

        let id = SymbolId::local(relative_path, index);
        document.occurrences.push(Occurrence {
            range: raw.name_range,
            symbol: id.clone(),
            roles: SymbolRole::DEFINITION,
            syntax_kind: 0,
            enclosing_range: raw.enclosing_range,
        });
        document.symbols.push(SymbolInformation {
            symbol: id,
            documentation: Vec::new(),
            relationships: Vec::new(),
            kind: raw.kind,
            display_name: raw.name,
            enclosing_symbol: None,
        });
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_a_go_function() {
        let source = b"package main\n\nfunc Hello() string {\n\treturn \"hi\"\n}\n";
        let doc = extract("main.go", Language::Go, source).unwrap();
        assert_eq!(doc.symbols.len(), 1);
        assert_eq!(doc.symbols[0].display_name, "Hello");
        assert_eq!(doc.symbols[0].kind, SymbolKind::Function);
    }

    #[test]
    fn reclassifies_python_method_inside_a_class() {
        let source = b"class Greeter:\n    def hello(self):\n        return 1\n\ndef standalone():\n    return 2\n";
        let doc = extract("greeter.py", Language::Python, source).unwrap();
        let hello = doc
            .symbols
            .iter()
            .find(|s| s.display_name == "hello")
            .unwrap();
        assert_eq!(hello.kind, SymbolKind::Method);
        let standalone = doc
            .symbols
            .iter()
            .find(|s| s.display_name == "standalone")
            .unwrap();
        assert_eq!(standalone.kind, SymbolKind::Function);
    }

    #[test]
    fn flow_pragma_routes_js_through_the_typescript_grammar() {
        let source = b"// @flow\nfunction greet() { return 1; }\n";
        let doc = extract("greet.js", Language::JavaScript, source).unwrap();
        assert_eq!(doc.symbols.len(), 1);
        assert_eq!(doc.symbols[0].display_name, "greet");
    }

    #[test]
    fn suppresses_js_constructor_keyword() {
        let source = b"class Foo {\n  constructor() {}\n  bar() {}\n}\n";
        let doc = extract("foo.js", Language::JavaScript, source).unwrap();
        assert!(!doc.symbols.iter().any(|s| s.display_name == "constructor"));
        assert!(doc.symbols.iter().any(|s| s.display_name == "bar"));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let source = &[0xff, 0xfe, 0x00];
        let err = extract("bad.go", Language::Go, source).unwrap_err();
        assert!(matches!(err, ParseError::InvalidUtf8 { .. }));
    }
}
