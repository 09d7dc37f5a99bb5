//! JSON symbol listings: an array of `{name, kind, path, attributes}` objects

use crate::error::Result;
use crate::symbol::{RawSymbol, SymbolRecord};

pub fn parse(text: &str) -> Result<Vec<RawSymbol>> {
    Ok(serde_json::from_str(text)?)
}

/// Render records in the same shape `parse` accepts
pub fn to_string_pretty<'a>(records: impl IntoIterator<Item = &'a SymbolRecord>) -> Result<String> {
    let records: Vec<&SymbolRecord> = records.into_iter().collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
