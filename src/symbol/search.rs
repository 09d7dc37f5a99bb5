//! Symbol search for documentation viewers

use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use super::index::SymbolIndex;
use super::kind::SymbolKind;
use super::record::SymbolRecord;
use crate::config::SearchConfig;
use crate::error::{Result, SymbolError};

/// How the query is matched against symbol names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Exact,
    #[default]
    Prefix,
    Fuzzy,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Exact => write!(f, "exact"),
            SearchMode::Prefix => write!(f, "prefix"),
            SearchMode::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(SearchMode::Exact),
            "prefix" => Ok(SearchMode::Prefix),
            "fuzzy" => Ok(SearchMode::Fuzzy),
            _ => Err(SymbolError::InvalidRequest(format!(
                "unknown search mode '{}'",
                s
            ))),
        }
    }
}

/// Request for finding symbols
#[derive(Debug, Default, Deserialize)]
pub struct FindSymbolRequest {
    /// Symbol name, prefix or approximate name
    pub query: String,
    /// Filter by declaration kind tag
    pub kind: Option<String>,
    /// Only symbols carrying this attribute
    pub attribute: Option<String>,
    /// Filter by documentation page path (glob)
    pub path_pattern: Option<String>,
    /// Search mode: 'exact', 'prefix', 'fuzzy'
    pub mode: Option<String>,
    /// Maximum number of results
    pub limit: Option<usize>,
}

/// Response for symbol search
#[derive(Debug, Serialize)]
pub struct FindSymbolResponse {
    pub symbols: Vec<SymbolResult>,
    /// Matches before `limit` was applied
    pub total_matches: usize,
    pub search_mode_used: String,
}

/// Individual symbol result
#[derive(Debug, Serialize, Clone)]
pub struct SymbolResult {
    pub name: String,
    pub kind: SymbolKind,
    pub path: String,
    pub attributes: Vec<String>,
    pub relevance_score: f32,
}

/// Request for listing symbols
#[derive(Debug, Default, Deserialize)]
pub struct ListSymbolsRequest {
    /// List direct members of this symbol instead of everything
    pub parent: Option<String>,
    /// Filter by symbol kinds
    pub kind_filter: Option<Vec<String>>,
    /// Also return the listing grouped by kind
    #[serde(default)]
    pub group_by_kind: bool,
}

/// Response for listing symbols
#[derive(Debug, Serialize)]
pub struct ListSymbolsResponse {
    pub parent: Option<String>,
    pub symbols: Vec<SymbolSummary>,
    pub total_symbols: usize,
    pub by_kind: Option<BTreeMap<String, Vec<SymbolSummary>>>,
}

/// Symbol summary for listing
#[derive(Debug, Serialize, Clone)]
pub struct SymbolSummary {
    pub name: String,
    pub leaf: String,
    pub kind: SymbolKind,
    pub path: String,
}

impl From<&SymbolRecord> for SymbolSummary {
    fn from(record: &SymbolRecord) -> Self {
        Self {
            name: record.name.clone(),
            leaf: record.leaf_name().to_string(),
            kind: record.kind,
            path: record.path.clone(),
        }
    }
}

/// Answers viewer search requests against one snapshot
pub struct SymbolSearcher {
    symbol_index: Arc<SymbolIndex>,
    config: SearchConfig,
}

impl SymbolSearcher {
    /// Create a new symbol searcher
    pub fn new(symbol_index: Arc<SymbolIndex>, config: SearchConfig) -> Self {
        Self {
            symbol_index,
            config,
        }
    }

    /// Find symbols based on the request criteria
    pub fn find_symbol(&self, request: FindSymbolRequest) -> Result<FindSymbolResponse> {
        let mode = match request.mode.as_deref() {
            Some(mode) => mode.parse::<SearchMode>()?,
            None => self.config.default_mode,
        };
        let limit = request.limit.unwrap_or(self.config.default_limit);

        debug!(
            "Searching for symbol '{}' with mode '{}', limit {}",
            request.query, mode, limit
        );

        // Parse filters up front so a bad request fails before any matching
        let kind = request
            .kind
            .as_deref()
            .map(str::parse::<SymbolKind>)
            .transpose()?;
        let path_glob = request
            .path_pattern
            .as_deref()
            .map(Pattern::new)
            .transpose()?;

        let mut results: Vec<(&SymbolRecord, f32)> = match mode {
            SearchMode::Exact => self
                .symbol_index
                .find_all_by_name(&request.query)
                .map(|s| (s, 1.0))
                .collect(),
            SearchMode::Prefix => self
                .symbol_index
                .find_by_prefix(&request.query)
                .map(|s| (s, 0.9))
                .collect(),
            SearchMode::Fuzzy => self
                .symbol_index
                .find_fuzzy(&request.query, self.config.max_distance)
                .into_iter()
                .map(|(s, dist)| {
                    // Lower distance = higher score
                    (s, 1.0 / (1.0 + dist as f32))
                })
                .collect(),
        };

        // Apply filters
        if let Some(kind) = kind {
            results.retain(|(s, _)| s.kind == kind);
        }

        if let Some(ref tag) = request.attribute {
            results.retain(|(s, _)| s.has_attribute(tag));
        }

        if let Some(ref glob) = path_glob {
            results.retain(|(s, _)| glob.matches(&s.path));
        }

        // Stable sort, so equal scores stay in load order
        results.sort_by(|a, b| b.1.total_cmp(&a.1));

        let total_matches = results.len();
        results.truncate(limit);

        let symbols: Vec<SymbolResult> = results
            .iter()
            .map(|(s, score)| SymbolResult {
                name: s.name.clone(),
                kind: s.kind,
                path: s.path.clone(),
                attributes: s.attributes.clone(),
                relevance_score: *score,
            })
            .collect();

        Ok(FindSymbolResponse {
            symbols,
            total_matches,
            search_mode_used: mode.to_string(),
        })
    }

    /// List members of a symbol, or every symbol, in load order
    pub fn list_symbols(&self, request: ListSymbolsRequest) -> Result<ListSymbolsResponse> {
        let mut symbols: Vec<&SymbolRecord> = match request.parent {
            Some(ref parent) => self.symbol_index.children_of(parent).collect(),
            None => self.symbol_index.iter().collect(),
        };

        if let Some(ref kinds) = request.kind_filter {
            let kinds = kinds
                .iter()
                .map(|k| k.parse::<SymbolKind>())
                .collect::<std::result::Result<Vec<_>, _>>()?;
            symbols.retain(|s| kinds.contains(&s.kind));
        }

        let summaries: Vec<SymbolSummary> = symbols.into_iter().map(SymbolSummary::from).collect();

        let by_kind = if request.group_by_kind {
            let mut grouped: BTreeMap<String, Vec<SymbolSummary>> = BTreeMap::new();
            for summary in &summaries {
                grouped
                    .entry(summary.kind.to_string())
                    .or_default()
                    .push(summary.clone());
            }
            Some(grouped)
        } else {
            None
        };

        Ok(ListSymbolsResponse {
            parent: request.parent,
            total_symbols: summaries.len(),
            symbols: summaries,
            by_kind,
        })
    }
}
