//! Symbol indexing and search module
//!
//! This module holds the documentation symbol listing produced by the doc
//! generator as an immutable snapshot, and answers exact, prefix, kind and
//! attribute queries over it. Snapshots are replaced atomically by `load`.

pub mod index;
pub mod kind;
pub mod record;
pub mod search;
pub mod store;

pub use index::{DuplicatePolicy, SymbolFilter, SymbolIndex};
pub use kind::{SymbolKind, UnknownKind};
pub use record::{RawSymbol, SymbolRecord};
pub use search::{FindSymbolRequest, ListSymbolsRequest, SymbolSearcher};
pub use store::{SymbolMatches, SymbolStore};

use lazy_static::lazy_static;

lazy_static! {
    static ref GLOBAL_STORE: SymbolStore = SymbolStore::default();
}

/// The process-wide symbol store
pub fn global() -> &'static SymbolStore {
    &GLOBAL_STORE
}
