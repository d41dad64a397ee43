// Shared between JavaScript and Flow-pragma'd files parsed with the
// TypeScript grammar (spec.md §4.B point 1) — the TS grammar produces
// compatible node types for these patterns.
pub const QUERY: &str = r#"
(function_declaration name: (identifier) @name) @definition.function

(generator_function_declaration name: (identifier) @name) @definition.function

(class_declaration name: (identifier) @name) @definition.class

(method_definition name: (property_identifier) @name) @definition.method
"#;
