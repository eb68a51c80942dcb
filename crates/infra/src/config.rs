//! Storage configuration loaded from the environment.
//!
//! - `CATALOG_STORAGE`: `memory` | `json` (default `json`)
//! - `CATALOG_DATA_FILE`: path of the JSON data file (default `data/products.json`)

use std::path::PathBuf;
use std::sync::Arc;

use crate::repository::{
    InMemoryProductRepository, JsonFileProductRepository, ProductRepository, RepositoryError,
};

pub const STORAGE_VAR: &str = "CATALOG_STORAGE";
pub const DATA_FILE_VAR: &str = "CATALOG_DATA_FILE";
pub const DEFAULT_DATA_FILE: &str = "data/products.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    JsonFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::JsonFile,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let backend = match lookup(STORAGE_VAR) {
            None => defaults.backend,
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "memory" | "in-memory" | "in_memory" => StorageBackend::Memory,
                "json" => StorageBackend::JsonFile,
                other => {
                    tracing::warn!(
                        value = other,
                        "{STORAGE_VAR} not recognized; falling back to json storage"
                    );
                    defaults.backend
                }
            },
        };

        let data_file = lookup(DATA_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);

        Self { backend, data_file }
    }

    /// Open the configured repository.
    pub fn open(&self) -> Result<Arc<dyn ProductRepository>, RepositoryError> {
        match self.backend {
            StorageBackend::Memory => {
                tracing::info!("using in-memory product storage");
                Ok(Arc::new(InMemoryProductRepository::new()))
            }
            StorageBackend::JsonFile => {
                tracing::info!(path = %self.data_file.display(), "using json product storage");
                Ok(Arc::new(JsonFileProductRepository::open(&self.data_file)?))
            }
        }
    }
}
