//! Errors reported by the symbol index.

use std::path::PathBuf;
use thiserror::Error;

use crate::symbol::UnknownKind;

/// Errors that can occur while loading or querying symbols.
#[derive(Error, Debug)]
pub enum SymbolError {
    /// A record failed validation during load.
    #[error("Invalid symbol record #{position}: {reason}")]
    Validation { position: usize, reason: String },

    /// Two records share a name and the index is configured to reject that.
    #[error("Duplicate symbol name '{name}' (records #{first} and #{second})")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },

    /// A kind tag used in a query is outside the recognized set.
    #[error("Invalid kind filter: {0}")]
    Kind(#[from] UnknownKind),

    /// No record carries the requested name.
    #[error("Symbol not found: {name}")]
    NotFound { name: String },

    /// A line of a symbols.js file could not be understood.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Malformed JSON symbol listing.
    #[error("Invalid JSON symbol listing: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a symbol listing from disk.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A search request carries an unsupported option.
    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    /// A page path filter is not a valid glob.
    #[error("Invalid path pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),
}

impl SymbolError {
    pub(crate) fn validation(position: usize, reason: impl Into<String>) -> Self {
        Self::Validation {
            position,
            reason: reason.into(),
        }
    }

    /// True for errors caused by malformed records or unknown kind tags
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::DuplicateName { .. } | Self::Kind(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SymbolError>;
