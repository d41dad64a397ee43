//! JS/TS reserved-word suppression (spec.md §4.B point 5, Open Question 2).
//!
//! Some JS/TS grammars capture reserved words like `constructor` or `get`/
//! `set` accessor keywords as plain `property_identifier` nodes in contexts
//! tree-sitter can't distinguish from a real method name. Definitions whose
//! captured name is in this set are dropped before indexing. Gated to
//! JavaScript and TypeScript only — other grammars don't share this
//! ambiguity and must not be filtered through it.

use crate::parsing::language::Language;

const JS_TS_RESERVED: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "break", "continue", "return", "throw",
    "try", "catch", "finally", "with", "debugger", "delete", "typeof", "instanceof", "void", "in",
    "of", "new", "yield", "await", "this", "super", "null", "true", "false", "undefined",
];

pub fn is_suppressed(language: Language, name: &str) -> bool {
    matches!(language, Language::JavaScript | Language::TypeScript) && JS_TS_RESERVED.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppresses_reserved_words_only_for_js_and_ts() {
        assert!(is_suppressed(Language::JavaScript, "this"));
        assert!(is_suppressed(Language::TypeScript, "yield"));
        assert!(!is_suppressed(Language::Python, "this"));
    }

    #[test]
    fn leaves_ordinary_names_alone() {
        assert!(!is_suppressed(Language::JavaScript, "handleClick"));
    }
}
