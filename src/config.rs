use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::source::SourceFormat;
use crate::symbol::search::SearchMode;
use crate::symbol::{DuplicatePolicy, SymbolStore};

const CONFIG_DIR: &str = ".symdex";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    /// What to do when two records share a name
    #[serde(default)]
    pub duplicate_names: DuplicatePolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Symbol listing loaded by `Config::open_store` (relative to the root)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Listing encoding: "auto" (by extension), "ddox" or "json"
    #[serde(default)]
    pub format: SourceFormat,
}

/// Defaults applied to search requests that leave options unset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search mode when the request names none
    #[serde(default)]
    pub default_mode: SearchMode,

    /// Default number of results to return
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,

    /// Largest edit distance accepted by fuzzy search
    #[serde(default = "default_max_distance")]
    pub max_distance: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_mode: SearchMode::default(),
            default_limit: default_search_limit(),
            max_distance: default_max_distance(),
        }
    }
}

fn default_search_limit() -> usize {
    20
}

fn default_max_distance() -> usize {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to rotating files
    #[serde(default)]
    pub enabled: bool,

    /// Write logs to stderr (filtered by RUST_LOG)
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// File log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log directory (relative paths resolve against the root)
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// hourly, daily, minutely or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_true(),
            level: default_log_level(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("logs")
}

fn default_file_prefix() -> String {
    "symdex.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Load configuration from the .symdex directory
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to the .symdex directory
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_dir = root.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the .symdex directory
    pub fn symdex_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR)
    }

    /// Resolved path of the configured symbol listing
    pub fn source_path(&self, root: &Path) -> Option<PathBuf> {
        self.source.path.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                root.join(path)
            }
        })
    }

    /// Create a store with the configured duplicate policy, loading the
    /// configured listing if there is one
    pub fn open_store(&self, root: &Path) -> Result<SymbolStore> {
        let store = SymbolStore::new(self.index.duplicate_names);

        if let Some(path) = self.source_path(root) {
            store
                .load_file(&path, self.source.format)
                .with_context(|| format!("Failed to load symbols from {:?}", path))?;
            info!("Loaded {} symbols from {}", store.snapshot().len(), path.display());
        }

        Ok(store)
    }
}
