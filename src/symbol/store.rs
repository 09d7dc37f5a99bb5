//! Atomically swappable holder of the current symbol snapshot

use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info, warn};

use super::index::{DuplicatePolicy, SymbolFilter, SymbolIndex};
use super::kind::SymbolKind;
use super::record::{RawSymbol, SymbolRecord};
use crate::error::Result;
use crate::source::{self, SourceFormat};

/// A published snapshot together with the load that produced it
#[derive(Debug)]
struct Published {
    index: Arc<SymbolIndex>,
    generation: u64,
}

/// Single-writer, multi-reader store for the symbol snapshot.
///
/// Loads build a complete `SymbolIndex` without holding the snapshot lock
/// and publish it with one pointer swap. Readers clone the `Arc` and query
/// without any lock, so they always see a fully formed snapshot.
#[derive(Debug)]
pub struct SymbolStore {
    current: RwLock<Published>,
    /// Serializes loads so generations are published in order
    load_lock: Mutex<()>,
    duplicates: DuplicatePolicy,
}

impl SymbolStore {
    /// Create a store serving an empty snapshot
    pub fn new(duplicates: DuplicatePolicy) -> Self {
        Self {
            current: RwLock::new(Published {
                index: Arc::new(SymbolIndex::new()),
                generation: 0,
            }),
            load_lock: Mutex::new(()),
            duplicates,
        }
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Validate `symbols` and replace the current snapshot with them.
    ///
    /// On error the previously published snapshot stays in place.
    /// Returns the generation number of the new snapshot.
    pub fn load<I, S>(&self, symbols: I) -> Result<u64>
    where
        I: IntoIterator<Item = S>,
        S: Into<RawSymbol>,
    {
        let _serialized = self
            .load_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let index = match SymbolIndex::build(symbols.into_iter().map(Into::into), self.duplicates)
        {
            Ok(index) => Arc::new(index),
            Err(e) => {
                warn!("Rejected symbol load, keeping previous snapshot: {}", e);
                return Err(e);
            }
        };

        let count = index.len();
        let generation = {
            let mut current = self
                .current
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            current.index = index;
            current.generation += 1;
            current.generation
        };

        info!(
            "Published symbol snapshot generation {} with {} symbols",
            generation, count
        );
        Ok(generation)
    }

    /// Read a listing from disk and load it
    pub fn load_file(&self, path: &Path, format: SourceFormat) -> Result<u64> {
        let symbols = source::read_file(path, format)?;
        self.load(symbols)
    }

    /// The currently published snapshot
    pub fn snapshot(&self) -> Arc<SymbolIndex> {
        Arc::clone(&self.read().index)
    }

    /// Number of successful loads so far
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Published> {
        // Only complete snapshots are ever stored, so a poisoned lock is still usable
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Find the first record named exactly `name`
    pub fn find_by_exact_name(&self, name: &str) -> Result<SymbolRecord> {
        self.snapshot().find_by_exact_name(name).cloned()
    }

    /// Records whose name starts with `prefix`, in load order
    pub fn find_by_prefix(&self, prefix: &str) -> SymbolMatches {
        debug!("Prefix query '{}'", prefix);
        self.matches(SymbolFilter::Prefix(prefix.to_string()))
    }

    /// Records of `kind`, in load order
    pub fn filter_by_kind(&self, kind: SymbolKind) -> SymbolMatches {
        self.matches(SymbolFilter::Kind(kind))
    }

    /// Like `filter_by_kind`, parsing the kind from its tag
    pub fn filter_by_kind_name(&self, kind: &str) -> Result<SymbolMatches> {
        Ok(self.filter_by_kind(kind.parse::<SymbolKind>()?))
    }

    /// Records carrying `tag`, in load order
    pub fn filter_by_attribute(&self, tag: &str) -> SymbolMatches {
        self.matches(SymbolFilter::Attribute(tag.to_string()))
    }

    /// Records matching `filter` on the current snapshot
    pub fn matches(&self, filter: SymbolFilter) -> SymbolMatches {
        SymbolMatches {
            index: self.snapshot(),
            filter,
            position: 0,
        }
    }
}

impl Default for SymbolStore {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

/// Lazy sequence of records from one snapshot.
///
/// The sequence pins the snapshot it started on; later loads do not affect
/// it. Each query call starts a fresh sequence.
#[derive(Debug, Clone)]
pub struct SymbolMatches {
    index: Arc<SymbolIndex>,
    filter: SymbolFilter,
    position: usize,
}

impl SymbolMatches {
    /// The snapshot this sequence reads from
    pub fn snapshot(&self) -> &Arc<SymbolIndex> {
        &self.index
    }
}

impl Iterator for SymbolMatches {
    type Item = SymbolRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(record) = self.index.get(self.position) {
            self.position += 1;
            if self.filter.matches(record) {
                return Some(record.clone());
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.index.len().saturating_sub(self.position)))
    }
}

impl std::iter::FusedIterator for SymbolMatches {}
