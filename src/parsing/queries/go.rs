pub const QUERY: &str = r#"
(function_declaration name: (identifier) @name) @definition.function

(method_declaration name: (field_identifier) @name) @definition.method

(type_spec name: (type_identifier) @name type: (struct_type)) @definition.struct

(type_spec name: (type_identifier) @name type: (interface_type)) @definition.interface

(const_spec name: (identifier) @name) @definition.constant

(var_spec name: (identifier) @name) @definition.variable
"#;
