//! SCIP-subset binary index codec (spec.md §4.C).

mod decode;
mod encode;
mod wire;

use crate::error::CodecResult;
use crate::symbol::Index;

/// Serialize an Index to the on-disk wire format.
pub fn encode(index: &Index) -> Vec<u8> {
    encode::encode_index(index)
}

/// Deserialize an Index from wire bytes, tolerating unknown fields.
pub fn decode(bytes: &[u8]) -> CodecResult<Index> {
    decode::decode_index(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Document, Metadata, Occurrence, SymbolId, SymbolInformation, ToolInfo};
    use crate::types::{Range, SymbolKind, SymbolRole};

    fn sample_index() -> Index {
        let mut doc = Document::new("src/main.rs", "rust");
        let id = SymbolId::local("src/main.rs", 0);
        doc.occurrences.push(Occurrence {
            range: Range::new(2, 3, 2, 8),
            symbol: id.clone(),
            roles: SymbolRole::DEFINITION,
            syntax_kind: 0,
            enclosing_range: Range::new(2, 0, 4, 1),
        });
        doc.symbols.push(SymbolInformation {
            symbol: id,
            documentation: vec![],
            relationships: vec![],
            kind: SymbolKind::Function,
            display_name: "hello".into(),
            enclosing_symbol: None,
        });

        Index {
            metadata: Some(Metadata {
                version: 1,
                tool_info: Some(ToolInfo {
                    name: "cog".into(),
                    version: "0.1.0".into(),
                }),
                project_root: "file:///workspace".into(),
                text_document_encoding: 1,
            }),
            documents: vec![doc],
            external_symbols: vec![],
        }
    }

    #[test]
    fn round_trips_a_full_index() {
        let index = sample_index();
        let bytes = encode(&index);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, index);
    }

    #[test]
    fn round_trips_an_empty_index() {
        let index = Index::new();
        let bytes = encode(&index);
        assert!(bytes.is_empty());
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, index);
    }

    #[test]
    fn single_line_range_round_trips() {
        // spec.md §8 scenario 6: start_line == end_line == 10.
        let mut doc = Document::new("x.rs", "rust");
        let id = SymbolId::local("x.rs", 0);
        doc.occurrences.push(Occurrence {
            range: Range::new(10, 5, 10, 15),
            symbol: id.clone(),
            roles: SymbolRole::DEFINITION,
            syntax_kind: 0,
            enclosing_range: Range::new(10, 5, 10, 15),
        });
        doc.symbols.push(SymbolInformation {
            symbol: id,
            documentation: vec![],
            relationships: vec![],
            kind: SymbolKind::Function,
            display_name: "f".into(),
            enclosing_symbol: None,
        });
        let index = Index {
            metadata: None,
            documents: vec![doc],
            external_symbols: vec![],
        };
        let decoded = decode(&encode(&index)).unwrap();
        let occ = &decoded.documents[0].occurrences[0];
        assert_eq!(occ.range, Range::new(10, 5, 10, 15));
        assert_eq!(occ.range.end_line, 10);
    }

    #[test]
    fn decoder_skips_unknown_fields() {
        let mut buf = Vec::new();
        wire::write_varint_field(&mut buf, 99, 42);
        let inner_doc_bytes = {
            let mut d = Vec::new();
            wire::write_string_field(&mut d, 1, "x.rs");
            wire::write_varint_field(&mut d, 50, 7);
            d
        };
        wire::write_message_field(&mut buf, 2, &inner_doc_bytes);
        let decoded = decode(&buf).unwrap();
        assert_eq!(decoded.documents.len(), 1);
        assert_eq!(decoded.documents[0].relative_path, "x.rs");
    }
}
