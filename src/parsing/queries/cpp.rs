// Shares C's function/struct/enum shapes plus class and method_container
// reclassification (spec.md §4.B point 4) via queries::method_container_kinds.
pub const QUERY: &str = r#"
(function_definition declarator: (function_declarator declarator: (identifier) @name)) @definition.function

(function_definition declarator: (function_declarator declarator: (field_identifier) @name)) @definition.function

(class_specifier name: (type_identifier) @name body: (field_declaration_list)) @definition.class

(struct_specifier name: (type_identifier) @name body: (field_declaration_list)) @definition.struct

(enum_specifier name: (type_identifier) @name body: (enumerator_list)) @definition.enum

(type_definition declarator: (type_identifier) @name) @definition.type
"#;
