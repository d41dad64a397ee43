//! Encoding half of the SCIP-subset codec (spec.md §4.C).

use super::wire::*;
use crate::symbol::{Document, Index, Metadata, Occurrence, Relationship, SymbolInformation, ToolInfo};
use crate::types::Range;

/// Serialize an Index to its on-disk byte representation.
pub fn encode_index(index: &Index) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(metadata) = &index.metadata {
        let inner = encode_metadata(metadata);
        write_message_field(&mut buf, 1, &inner);
    }
    for doc in &index.documents {
        let inner = encode_document(doc);
        write_message_field(&mut buf, 2, &inner);
    }
    for sym in &index.external_symbols {
        let inner = encode_symbol_information(sym);
        write_message_field(&mut buf, 3, &inner);
    }
    buf
}

fn encode_metadata(metadata: &Metadata) -> Vec<u8> {
    let mut buf = Vec::new();
    write_varint_field(&mut buf, 1, metadata.version as i64);
    if let Some(tool_info) = &metadata.tool_info {
        let inner = encode_tool_info(tool_info);
        write_message_field(&mut buf, 2, &inner);
    }
    write_string_field(&mut buf, 3, &metadata.project_root);
    write_varint_field(&mut buf, 4, metadata.text_document_encoding as i64);
    buf
}

fn encode_tool_info(tool_info: &ToolInfo) -> Vec<u8> {
    let mut buf = Vec::new();
    write_string_field(&mut buf, 1, &tool_info.name);
    write_string_field(&mut buf, 2, &tool_info.version);
    buf
}

fn encode_document(doc: &Document) -> Vec<u8> {
    let mut buf = Vec::new();
    write_string_field(&mut buf, 1, &doc.relative_path);
    for occ in &doc.occurrences {
        let inner = encode_occurrence(occ);
        write_message_field(&mut buf, 2, &inner);
    }
    for sym in &doc.symbols {
        let inner = encode_symbol_information(sym);
        write_message_field(&mut buf, 3, &inner);
    }
    write_string_field(&mut buf, 4, &doc.language);
    buf
}

/// Pack a Range as 3 elements (same line) or 4 elements (spans lines),
/// matching spec.md §4.C's shape rule exactly.
fn pack_range(range: &Range) -> Vec<i32> {
    if range.is_single_line() {
        vec![
            range.start_line as i32,
            range.start_char as i32,
            range.end_char as i32,
        ]
    } else {
        vec![
            range.start_line as i32,
            range.start_char as i32,
            range.end_line as i32,
            range.end_char as i32,
        ]
    }
}

fn encode_occurrence(occ: &Occurrence) -> Vec<u8> {
    let mut buf = Vec::new();
    write_packed_i32_field(&mut buf, 1, &pack_range(&occ.range));
    write_string_field(&mut buf, 2, occ.symbol.as_str());
    write_varint_field(&mut buf, 3, occ.roles.0 as i64);
    write_varint_field(&mut buf, 5, occ.syntax_kind as i64);
    write_packed_i32_field(&mut buf, 7, &pack_range(&occ.enclosing_range));
    buf
}

fn encode_symbol_information(sym: &SymbolInformation) -> Vec<u8> {
    let mut buf = Vec::new();
    write_string_field(&mut buf, 1, sym.symbol.as_str());
    for doc in &sym.documentation {
        write_string_field(&mut buf, 3, doc);
    }
    for rel in &sym.relationships {
        let inner = encode_relationship(rel);
        write_message_field(&mut buf, 4, &inner);
    }
    write_varint_field(&mut buf, 5, sym.kind.as_i32() as i64);
    write_string_field(&mut buf, 6, &sym.display_name);
    if let Some(enclosing) = &sym.enclosing_symbol {
        write_string_field(&mut buf, 8, enclosing.as_str());
    }
    buf
}

fn encode_relationship(rel: &Relationship) -> Vec<u8> {
    let mut buf = Vec::new();
    write_string_field(&mut buf, 1, rel.symbol.as_str());
    write_bool_field(&mut buf, 2, rel.is_reference);
    write_bool_field(&mut buf, 3, rel.is_implementation);
    write_bool_field(&mut buf, 4, rel.is_type_definition);
    write_bool_field(&mut buf, 5, rel.is_definition);
    buf
}
