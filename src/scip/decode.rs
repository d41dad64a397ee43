//! Decoding half of the SCIP-subset codec (spec.md §4.C).
//!
//! Unknown fields are skipped by wire type per spec.md's tolerance rule, so
//! this decoder happily reads indexes produced by a fuller SCIP encoder.

use super::wire::*;
use crate::error::{CodecError, CodecResult};
use crate::symbol::{
    Document, Index, Metadata, Occurrence, Relationship, SymbolId, SymbolInformation, ToolInfo,
};
use crate::types::{Range, SymbolKind, SymbolRole};

pub fn decode_index(bytes: &[u8]) -> CodecResult<Index> {
    let mut reader = Reader::new(bytes);
    let mut index = Index::default();
    while let Some(tag) = reader.read_tag()? {
        match tag.field {
            1 => {
                let inner = reader.read_len_delimited("Index.metadata")?;
                index.metadata = Some(decode_metadata(inner)?);
            }
            2 => {
                let inner = reader.read_len_delimited("Index.documents")?;
                index.documents.push(decode_document(inner)?);
            }
            3 => {
                let inner = reader.read_len_delimited("Index.external_symbols")?;
                index.external_symbols.push(decode_symbol_information(inner)?);
            }
            _ => reader.skip_field(tag.wire_type)?,
        }
    }
    Ok(index)
}

fn decode_metadata(bytes: &[u8]) -> CodecResult<Metadata> {
    let mut reader = Reader::new(bytes);
    let mut metadata = Metadata::default();
    while let Some(tag) = reader.read_tag()? {
        match tag.field {
            1 => metadata.version = reader.read_varint("Metadata.version")? as i32,
            2 => {
                let inner = reader.read_len_delimited("Metadata.tool_info")?;
                metadata.tool_info = Some(decode_tool_info(inner)?);
            }
            3 => metadata.project_root = reader.read_string("Metadata.project_root")?,
            4 => {
                metadata.text_document_encoding =
                    reader.read_varint("Metadata.text_document_encoding")? as i32
            }
            _ => reader.skip_field(tag.wire_type)?,
        }
    }
    Ok(metadata)
}

fn decode_tool_info(bytes: &[u8]) -> CodecResult<ToolInfo> {
    let mut reader = Reader::new(bytes);
    let mut tool_info = ToolInfo::default();
    while let Some(tag) = reader.read_tag()? {
        match tag.field {
            1 => tool_info.name = reader.read_string("ToolInfo.name")?,
            2 => tool_info.version = reader.read_string("ToolInfo.version")?,
            _ => reader.skip_field(tag.wire_type)?,
        }
    }
    Ok(tool_info)
}

fn decode_document(bytes: &[u8]) -> CodecResult<Document> {
    let mut reader = Reader::new(bytes);
    let mut doc = Document::new(String::new(), String::new());
    while let Some(tag) = reader.read_tag()? {
        match tag.field {
            1 => doc.relative_path = reader.read_string("Document.relative_path")?,
            2 => {
                let inner = reader.read_len_delimited("Document.occurrences")?;
                doc.occurrences.push(decode_occurrence(inner)?);
            }
            3 => {
                let inner = reader.read_len_delimited("Document.symbols")?;
                doc.symbols.push(decode_symbol_information(inner)?);
            }
            4 => doc.language = reader.read_string("Document.language")?,
            _ => reader.skip_field(tag.wire_type)?,
        }
    }
    Ok(doc)
}

/// Unpack a 3- or 4-element packed range (spec.md §4.C shape rule).
fn unpack_range(values: &[i32]) -> CodecResult<Range> {
    match values.len() {
        3 => Ok(Range::new(
            values[0] as u32,
            values[1] as u32,
            values[0] as u32,
            values[2] as u32,
        )),
        4 => Ok(Range::new(
            values[0] as u32,
            values[1] as u32,
            values[2] as u32,
            values[3] as u32,
        )),
        len => Err(CodecError::BadRangeShape { len }),
    }
}

fn decode_occurrence(bytes: &[u8]) -> CodecResult<Occurrence> {
    let mut reader = Reader::new(bytes);
    let mut range = Range::new(0, 0, 0, 0);
    let mut symbol = SymbolId(std::sync::Arc::from(""));
    let mut roles = SymbolRole::NONE;
    let mut syntax_kind = 0i32;
    let mut enclosing_range = Range::new(0, 0, 0, 0);

    while let Some(tag) = reader.read_tag()? {
        match tag.field {
            1 => range = unpack_range(&reader.read_packed_i32("Occurrence.range")?)?,
            2 => symbol = SymbolId(std::sync::Arc::from(reader.read_string("Occurrence.symbol")?)),
            3 => roles = SymbolRole(reader.read_varint("Occurrence.symbol_roles")? as i32),
            5 => syntax_kind = reader.read_varint("Occurrence.syntax_kind")? as i32,
            7 => {
                enclosing_range =
                    unpack_range(&reader.read_packed_i32("Occurrence.enclosing_range")?)?
            }
            _ => reader.skip_field(tag.wire_type)?,
        }
    }

    Ok(Occurrence {
        range,
        symbol,
        roles,
        syntax_kind,
        enclosing_range,
    })
}

fn decode_symbol_information(bytes: &[u8]) -> CodecResult<SymbolInformation> {
    let mut reader = Reader::new(bytes);
    let mut symbol = SymbolId(std::sync::Arc::from(""));
    let mut documentation = Vec::new();
    let mut relationships = Vec::new();
    let mut kind = SymbolKind::Unspecified;
    let mut display_name = String::new();
    let mut enclosing_symbol = None;

    while let Some(tag) = reader.read_tag()? {
        match tag.field {
            1 => symbol = SymbolId(std::sync::Arc::from(reader.read_string("SymbolInformation.symbol")?)),
            3 => documentation.push(reader.read_string("SymbolInformation.documentation")?),
            4 => {
                let inner = reader.read_len_delimited("SymbolInformation.relationships")?;
                relationships.push(decode_relationship(inner)?);
            }
            5 => kind = SymbolKind::from_i32(reader.read_varint("SymbolInformation.kind")? as i32),
            6 => display_name = reader.read_string("SymbolInformation.display_name")?,
            8 => {
                let s = reader.read_string("SymbolInformation.enclosing_symbol")?;
                if !s.is_empty() {
                    enclosing_symbol = Some(SymbolId(std::sync::Arc::from(s)));
                }
            }
            _ => reader.skip_field(tag.wire_type)?,
        }
    }

    Ok(SymbolInformation {
        symbol,
        documentation,
        relationships,
        kind,
        display_name,
        enclosing_symbol,
    })
}

fn decode_relationship(bytes: &[u8]) -> CodecResult<Relationship> {
    let mut reader = Reader::new(bytes);
    let mut rel = Relationship {
        symbol: SymbolId(std::sync::Arc::from("")),
        is_reference: false,
        is_implementation: false,
        is_type_definition: false,
        is_definition: false,
    };
    while let Some(tag) = reader.read_tag()? {
        match tag.field {
            1 => rel.symbol = SymbolId(std::sync::Arc::from(reader.read_string("Relationship.symbol")?)),
            2 => rel.is_reference = reader.read_varint("Relationship.is_reference")? != 0,
            3 => rel.is_implementation = reader.read_varint("Relationship.is_implementation")? != 0,
            4 => rel.is_type_definition = reader.read_varint("Relationship.is_type_definition")? != 0,
            5 => rel.is_definition = reader.read_varint("Relationship.is_definition")? != 0,
            _ => reader.skip_field(tag.wire_type)?,
        }
    }
    Ok(rel)
}
