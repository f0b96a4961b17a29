//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::constants::DEFAULT_DATA_DIR;
use crate::store::{DocumentStore, FileStore, MemoryStore};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Which [`DocumentStore`] backend to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// One JSON file per document under the data directory.
    #[default]
    File,
    /// Process-local maps; everything is lost on exit.
    Memory,
}

impl FromStr for StoreKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreKind::File),
            "memory" => Ok(StoreKind::Memory),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown store kind '{other}' (expected 'file' or 'memory')"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    store_kind: StoreKind,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(data_dir: PathBuf, store_kind: StoreKind) -> CoreResult<Self> {
        if store_kind == StoreKind::File && data_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig(
                "data directory cannot be empty for the file store".into(),
            ));
        }

        Ok(Self {
            data_dir,
            store_kind,
        })
    }

    /// Build a configuration from raw environment values.
    ///
    /// Missing or blank values fall back to the file store under [`DEFAULT_DATA_DIR`].
    pub fn from_env_values(
        data_dir: Option<String>,
        store_kind: Option<String>,
    ) -> CoreResult<Self> {
        let data_dir = data_dir
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.into());
        let store_kind = store_kind_from_env_value(store_kind)?;

        Self::new(PathBuf::from(data_dir), store_kind)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store_kind(&self) -> StoreKind {
        self.store_kind
    }

    /// Open the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StorageDirCreation`] if the file store's data directory cannot be
    /// created.
    pub fn open_store(&self) -> CoreResult<Arc<dyn DocumentStore>> {
        match self.store_kind {
            StoreKind::File => {
                let store = FileStore::open(&self.data_dir)?;
                tracing::info!("opened file store at {}", self.data_dir.display());
                Ok(Arc::new(store))
            }
            StoreKind::Memory => {
                tracing::warn!("using in-memory store; documents will not survive a restart");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}

/// Parse the store kind from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`StoreKind::File`].
pub fn store_kind_from_env_value(value: Option<String>) -> CoreResult<StoreKind> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<StoreKind>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}
