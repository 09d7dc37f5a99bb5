//! Immutable in-memory symbol index

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use super::kind::SymbolKind;
use super::record::{RawSymbol, SymbolRecord};
use crate::error::{Result, SymbolError};

/// How records sharing a name are handled at load time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep every record; exact lookup returns the first in load order
    #[default]
    Allow,
    /// Fail the load on the second occurrence of a name
    Reject,
}

/// Predicate over records, shared by the borrowing and owning query paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolFilter {
    All,
    Prefix(String),
    Kind(SymbolKind),
    Attribute(String),
}

impl SymbolFilter {
    pub fn matches(&self, record: &SymbolRecord) -> bool {
        match self {
            SymbolFilter::All => true,
            SymbolFilter::Prefix(prefix) => record.name.starts_with(prefix.as_str()),
            SymbolFilter::Kind(kind) => record.kind == *kind,
            SymbolFilter::Attribute(tag) => record.has_attribute(tag),
        }
    }
}

/// Snapshot of symbol records with lookup tables.
///
/// Records keep their load order; every sequence-returning query yields
/// records in that order.
#[derive(Debug, Default)]
pub struct SymbolIndex {
    /// Records in load order
    records: Vec<SymbolRecord>,
    /// Record positions by exact name
    by_name: HashMap<String, Vec<usize>>,
    /// Record positions by kind
    by_kind: HashMap<SymbolKind, Vec<usize>>,
}

impl SymbolIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw symbols and build an index from them.
    ///
    /// Fails on the first invalid record; nothing is kept from a failed build.
    pub fn build<I>(symbols: I, duplicates: DuplicatePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = RawSymbol>,
    {
        let mut index = Self::new();

        for (position, raw) in symbols.into_iter().enumerate() {
            let record = raw.validate(position)?;

            if duplicates == DuplicatePolicy::Reject {
                if let Some(&first) = index.by_name.get(&record.name).and_then(|p| p.first()) {
                    return Err(SymbolError::DuplicateName {
                        name: record.name,
                        first,
                        second: position,
                    });
                }
            }

            index.push(record);
        }

        info!(
            "Built symbol index with {} symbols ({} distinct names)",
            index.records.len(),
            index.by_name.len()
        );

        Ok(index)
    }

    fn push(&mut self, record: SymbolRecord) {
        let position = self.records.len();

        self.by_name
            .entry(record.name.clone())
            .or_default()
            .push(position);

        self.by_kind.entry(record.kind).or_default().push(position);

        self.records.push(record);
    }

    /// Find the first record with exactly this name
    pub fn find_by_exact_name(&self, name: &str) -> Result<&SymbolRecord> {
        self.by_name
            .get(name)
            .and_then(|positions| positions.first())
            .map(|&i| &self.records[i])
            .ok_or_else(|| SymbolError::NotFound {
                name: name.to_string(),
            })
    }

    /// All records with exactly this name, in load order
    pub fn find_all_by_name<'a>(
        &'a self,
        name: &str,
    ) -> impl Iterator<Item = &'a SymbolRecord> + 'a {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(move |&i| &self.records[i])
    }

    /// Records whose name starts with `prefix` (case-sensitive)
    pub fn find_by_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a SymbolRecord> + 'a {
        debug!("Prefix lookup for '{}'", prefix);
        self.records
            .iter()
            .filter(move |record| record.name.starts_with(prefix))
    }

    /// Records of one kind
    pub fn filter_by_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &SymbolRecord> + '_ {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(move |&i| &self.records[i])
    }

    /// Records carrying an attribute tag
    pub fn filter_by_attribute<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a SymbolRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.has_attribute(tag))
    }

    /// Records matching an arbitrary filter
    pub fn matching<'a>(
        &'a self,
        filter: &'a SymbolFilter,
    ) -> impl Iterator<Item = &'a SymbolRecord> + 'a {
        self.records.iter().filter(move |record| filter.matches(record))
    }

    /// Records whose parent name is `name`
    pub fn children_of<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a SymbolRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.parent_name() == Some(name))
    }

    /// Find symbols by fuzzy matching against full and leaf names.
    ///
    /// Results are sorted by distance; equal distances keep load order.
    pub fn find_fuzzy(&self, query: &str, max_distance: usize) -> Vec<(&SymbolRecord, usize)> {
        let query_lower = query.to_lowercase();
        let mut results = Vec::new();

        for record in &self.records {
            let full = levenshtein_distance(&query_lower, &record.name.to_lowercase());
            let leaf = levenshtein_distance(&query_lower, &record.leaf_name().to_lowercase());
            let distance = full.min(leaf);

            if distance <= max_distance {
                results.push((record, distance));
            }
        }

        // Stable sort keeps load order among equal distances
        results.sort_by_key(|(_, dist)| *dist);
        results
    }

    /// Records in load order
    pub fn iter(&self) -> std::slice::Iter<'_, SymbolRecord> {
        self.records.iter()
    }

    pub fn get(&self, position: usize) -> Option<&SymbolRecord> {
        self.records.get(position)
    }

    /// Number of records of each kind, for kinds that occur at least once
    pub fn kind_counts(&self) -> Vec<(SymbolKind, usize)> {
        SymbolKind::ALL
            .into_iter()
            .filter_map(|kind| {
                self.by_kind
                    .get(&kind)
                    .map(|positions| (kind, positions.len()))
            })
            .collect()
    }

    /// Distinct attribute tags in first-seen order
    pub fn list_attributes(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.records.iter().flat_map(|r| r.attributes.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a SymbolIndex {
    type Item = &'a SymbolRecord;
    type IntoIter = std::slice::Iter<'a, SymbolRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two rolling rows instead of the full matrix
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}
