use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SEARCH_URL: &str = "https://dummyjson.com/products/search";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoOptions {
    pub search_url: String,
    /// JSON file backing the key-value store; in-memory when unset.
    pub storage_path: Option<PathBuf>,
    /// Initial location fragment, e.g. `"#about"`.
    pub start_hash: String,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            storage_path: None,
            start_hash: String::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DemoOptions {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `REMOUNT_SEARCH_URL`, `REMOUNT_STORAGE` and `REMOUNT_HASH`.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("REMOUNT_SEARCH_URL") {
            self.search_url = url;
        }
        if let Some(path) = lookup("REMOUNT_STORAGE") {
            self.storage_path = Some(PathBuf::from(path));
        }
        if let Some(hash) = lookup("REMOUNT_HASH") {
            self.start_hash = hash;
        }
        self
    }
}
