pub mod config;
pub mod error;
pub mod logging;
pub mod source;
pub mod symbol;

pub use config::Config;
pub use error::{Result, SymbolError};
pub use source::SourceFormat;
pub use symbol::{RawSymbol, SymbolIndex, SymbolKind, SymbolMatches, SymbolRecord, SymbolStore};
