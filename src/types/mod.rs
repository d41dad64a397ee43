//! Core wire-adjacent data types (spec.md §3).

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// In-process file handle, used only by the indexing maintainer for
/// mtime/generation tracking. Never serialized into the SCIP index — the
/// wire format keys documents by relative path, not by this id
/// (SPEC_FULL.md §3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(NonZeroU32);

impl FileId {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn value(&self) -> u32 {
        self.0.get()
    }
}

/// A closed-open character span within a document: zero-based,
/// line-terminator-agnostic (spec.md §3 Range).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start_line: u32,
    pub start_char: u32,
    pub end_line: u32,
    pub end_char: u32,
}

impl Range {
    pub fn new(start_line: u32, start_char: u32, end_line: u32, end_char: u32) -> Self {
        Self {
            start_line,
            start_char,
            end_line,
            end_char,
        }
    }

    /// Construct a Range from a tree-sitter node span (row/column pairs).
    pub fn from_ts(start: tree_sitter::Point, end: tree_sitter::Point) -> Self {
        Self {
            start_line: start.row as u32,
            start_char: start.column as u32,
            end_line: end.row as u32,
            end_char: end.column as u32,
        }
    }

    /// `true` if start <= end, and when on the same line, start_char <=
    /// end_char (spec.md §3 invariant).
    pub fn is_well_formed(&self) -> bool {
        if self.start_line > self.end_line {
            return false;
        }
        if self.start_line == self.end_line && self.start_char > self.end_char {
            return false;
        }
        true
    }

    /// Whether this range spans a single source line — determines the
    /// 3-element vs 4-element packed encoding in the SCIP codec (spec.md §4.C).
    pub fn is_single_line(&self) -> bool {
        self.start_line == self.end_line
    }
}

/// Numeric symbol-kind tag. Values are wire-level contractual: they match
/// the SCIP enum verbatim (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum SymbolKind {
    Unspecified = 0,
    Class = 7,
    Constant = 8,
    Constructor = 9,
    Field = 15,
    Function = 17,
    Interface = 21,
    Implementation = 20,
    Macro = 25,
    Method = 26,
    Module = 29,
    Namespace = 30,
    Trait = 53,
    Type = 54,
    Variable = 61,
    Enum = 11,
    Struct = 49,
    Property = 41,
}

impl SymbolKind {
    /// Round-trip from the wire's raw varint. Unknown values decode to
    /// `Unspecified` rather than erroring — the spec treats this enum as a
    /// fixed contractual set, but decoders must tolerate skew gracefully.
    pub fn from_i32(value: i32) -> Self {
        match value {
            7 => Self::Class,
            8 => Self::Constant,
            9 => Self::Constructor,
            15 => Self::Field,
            17 => Self::Function,
            21 => Self::Interface,
            20 => Self::Implementation,
            25 => Self::Macro,
            26 => Self::Method,
            29 => Self::Module,
            30 => Self::Namespace,
            53 => Self::Trait,
            54 => Self::Type,
            61 => Self::Variable,
            11 => Self::Enum,
            49 => Self::Struct,
            41 => Self::Property,
            _ => Self::Unspecified,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Bitset of occurrence roles. The core extractor only ever emits
/// `Definition`; readers must tolerate other bits set by other producers
/// (spec.md §3 SymbolRole).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRole(pub i32);

impl SymbolRole {
    pub const DEFINITION: SymbolRole = SymbolRole(1);
    pub const NONE: SymbolRole = SymbolRole(0);

    pub fn has(self, role: SymbolRole) -> bool {
        self.0 & role.0 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_rejects_zero() {
        assert!(FileId::new(0).is_none());
        assert_eq!(FileId::new(5).unwrap().value(), 5);
    }

    #[test]
    fn range_well_formed() {
        assert!(Range::new(1, 0, 1, 5).is_well_formed());
        assert!(Range::new(1, 5, 2, 0).is_well_formed());
        assert!(!Range::new(1, 5, 1, 2).is_well_formed());
        assert!(!Range::new(3, 0, 1, 0).is_well_formed());
    }

    #[test]
    fn range_single_line() {
        assert!(Range::new(10, 5, 10, 15).is_single_line());
        assert!(!Range::new(10, 5, 11, 0).is_single_line());
    }

    #[test]
    fn symbol_kind_wire_values_match_scip() {
        assert_eq!(SymbolKind::Function.as_i32(), 17);
        assert_eq!(SymbolKind::Class.as_i32(), 7);
        assert_eq!(SymbolKind::Method.as_i32(), 26);
        assert_eq!(SymbolKind::Struct.as_i32(), 49);
        assert_eq!(SymbolKind::from_i32(17), SymbolKind::Function);
        assert_eq!(SymbolKind::from_i32(9999), SymbolKind::Unspecified);
    }

    #[test]
    fn symbol_role_definition_bit() {
        assert!(SymbolRole::DEFINITION.has(SymbolRole::DEFINITION));
        assert!(!SymbolRole::NONE.has(SymbolRole::DEFINITION));
        let combo = SymbolRole(SymbolRole::DEFINITION.0 | 2);
        assert!(combo.has(SymbolRole::DEFINITION));
    }
}
