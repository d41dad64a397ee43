//! Per-language tree-sitter capture queries (spec.md §4.B point 3).
//!
//! Each query follows the fixed capture convention: `@name` marks the
//! identifier node that becomes the symbol's display name, and
//! `@definition.<kind>` marks the enclosing node whose span becomes the
//! occurrence's `enclosing_range`. `<kind>` is a SymbolKind label.

mod c;
mod cpp;
mod go;
mod java;
mod javascript;
mod python;
mod rust;
mod typescript;

use crate::parsing::language::Language;

/// The capture query text for a language, plus the node kinds whose
/// descendants get a `Function`→`Method` reclassification pass (needed for
/// grammars where methods and free functions share one node type; see
/// SPEC_FULL.md §4.B).
pub fn capture_query(language: Language) -> &'static str {
    match language {
        Language::Go => go::QUERY,
        Language::TypeScript => typescript::QUERY,
        Language::JavaScript => javascript::QUERY,
        Language::Python => python::QUERY,
        Language::Java => java::QUERY,
        Language::Rust => rust::QUERY,
        Language::C => c::QUERY,
        Language::Cpp => cpp::QUERY,
    }
}

pub fn method_container_kinds(language: Language) -> &'static [&'static str] {
    match language {
        Language::Python => &["class_definition"],
        Language::Rust => &["impl_item", "trait_item"],
        Language::Cpp => &["class_specifier", "struct_specifier"],
        Language::Go
        | Language::TypeScript
        | Language::JavaScript
        | Language::Java
        | Language::C => &[],
    }
}
