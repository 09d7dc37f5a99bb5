//! Readers for symbol listings on disk

pub mod ddox;
pub mod json;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SymbolError};
use crate::symbol::RawSymbol;

/// Encoding of a symbol listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Pick by file extension: `.js` is DDOX, anything else JSON
    #[default]
    Auto,
    /// `symbols.js` as written by DDOX
    Ddox,
    /// JSON array of symbol objects
    Json,
}

impl SourceFormat {
    /// Resolve `Auto` against a file path
    pub fn resolve(self, path: &Path) -> SourceFormat {
        match self {
            SourceFormat::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("js") => SourceFormat::Ddox,
                _ => SourceFormat::Json,
            },
            other => other,
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Auto => write!(f, "auto"),
            SourceFormat::Ddox => write!(f, "ddox"),
            SourceFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse listing text in an explicit format (`Auto` is treated as DDOX)
pub fn parse(text: &str, format: SourceFormat) -> Result<Vec<RawSymbol>> {
    match format {
        SourceFormat::Json => json::parse(text),
        SourceFormat::Ddox | SourceFormat::Auto => ddox::parse(text),
    }
}

/// Read and parse a listing file
pub fn read_file(path: &Path, format: SourceFormat) -> Result<Vec<RawSymbol>> {
    let format = format.resolve(path);
    debug!("Reading {} symbol listing from {}", format, path.display());

    let text = std::fs::read_to_string(path).map_err(|source| SymbolError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse(&text, format)
}
