//! Symbol records and their unvalidated wire shape

use serde::{Deserialize, Serialize};

use super::kind::SymbolKind;
use crate::error::{Result, SymbolError};

/// One declaration in a documentation symbol listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Dotted identifier path, e.g. `ddash.algorithm.compact`
    pub name: String,
    /// Declaration category
    pub kind: SymbolKind,
    /// Relative reference to the documentation page
    pub path: String,
    /// Qualifier tags in listing order
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl SymbolRecord {
    pub fn new(
        name: impl Into<String>,
        kind: SymbolKind,
        path: impl Into<String>,
        attributes: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            path: path.into(),
            attributes,
        }
    }

    /// Name of the enclosing symbol, if the name is qualified
    pub fn parent_name(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(parent, _)| parent)
    }

    /// Last segment of the dotted name
    pub fn leaf_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(_, leaf)| leaf)
    }

    pub fn has_attribute(&self, tag: &str) -> bool {
        self.attributes.iter().any(|a| a == tag)
    }
}

/// A symbol as it appears in an input listing, before validation.
///
/// Every field is optional so that a missing field surfaces as a validation
/// error from `load` rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSymbol {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl RawSymbol {
    /// Validate into a record. `position` is the record's index in its listing.
    pub fn validate(self, position: usize) -> Result<SymbolRecord> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            Some(_) => return Err(SymbolError::validation(position, "empty name")),
            None => return Err(SymbolError::validation(position, "missing name")),
        };

        let path = match self.path {
            Some(path) if !path.is_empty() => path,
            Some(_) => {
                return Err(SymbolError::validation(
                    position,
                    format!("empty path for '{}'", name),
                ))
            }
            None => {
                return Err(SymbolError::validation(
                    position,
                    format!("missing path for '{}'", name),
                ))
            }
        };

        let kind = match self.kind {
            Some(kind) => kind
                .parse::<SymbolKind>()
                .map_err(|e| SymbolError::validation(position, format!("{} for '{}'", e, name)))?,
            None => {
                return Err(SymbolError::validation(
                    position,
                    format!("missing kind for '{}'", name),
                ))
            }
        };

        Ok(SymbolRecord {
            name,
            kind,
            path,
            attributes: self.attributes,
        })
    }
}

impl From<SymbolRecord> for RawSymbol {
    fn from(record: SymbolRecord) -> Self {
        Self {
            name: Some(record.name),
            kind: Some(record.kind.as_str().to_string()),
            path: Some(record.path),
            attributes: record.attributes,
        }
    }
}

impl From<&SymbolRecord> for RawSymbol {
    fn from(record: &SymbolRecord) -> Self {
        record.clone().into()
    }
}
