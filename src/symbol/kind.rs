//! Declaration kinds emitted by the documentation generator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declaration category of a symbol.
///
/// The text form of each variant is the exact tag used in symbol listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Module,
    FunctionDeclaration,
    TemplateDeclaration,
    StructDeclaration,
    ClassDeclaration,
    EnumMemberDeclaration,
    AliasDeclaration,
    VariableDeclaration,
}

impl SymbolKind {
    /// All kinds, in the order they are reported by `kind_counts`.
    pub const ALL: [SymbolKind; 8] = [
        SymbolKind::Module,
        SymbolKind::FunctionDeclaration,
        SymbolKind::TemplateDeclaration,
        SymbolKind::StructDeclaration,
        SymbolKind::ClassDeclaration,
        SymbolKind::EnumMemberDeclaration,
        SymbolKind::AliasDeclaration,
        SymbolKind::VariableDeclaration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Module => "module",
            SymbolKind::FunctionDeclaration => "functiondeclaration",
            SymbolKind::TemplateDeclaration => "templatedeclaration",
            SymbolKind::StructDeclaration => "structdeclaration",
            SymbolKind::ClassDeclaration => "classdeclaration",
            SymbolKind::EnumMemberDeclaration => "enummemberdeclaration",
            SymbolKind::AliasDeclaration => "aliasdeclaration",
            SymbolKind::VariableDeclaration => "variabledeclaration",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a kind tag is outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for SymbolKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymbolKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
