use async_trait::async_trait;
use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;

use crate::error::StoreError;
use crate::models::FightDocument;

/// Loads and saves the whole fight document in one piece.
///
/// One invocation is expected to run a single load/mutate/save cycle.
/// Nothing here coordinates concurrent writers; the last save wins.
#[async_trait]
pub trait FightStore: Send + Sync {
    async fn load(&self) -> Result<FightDocument, StoreError>;
    async fn save(&self, document: &FightDocument) -> Result<(), StoreError>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "fights.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl FightStore for JsonFileStore {
    async fn load(&self) -> Result<FightDocument, StoreError> {
        debug!("Loading fights from {}", self.path.display());

        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("{} does not exist yet, starting with no fights", self.path.display());
                return Ok(FightDocument::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, document: &FightDocument) -> Result<(), StoreError> {
        let mut body = serde_json::to_string_pretty(document).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        body.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
        }

        // Write beside the target and rename over it so readers never see a
        // half-written document.
        let tmp = self.temp_path();
        debug!("Saving fights to {} via {}", self.path.display(), tmp.display());
        fs::write(&tmp, body).await.map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                warn!("Could not remove {}: {}", tmp.display(), cleanup);
            }
            return Err(self.io_error(e));
        }

        Ok(())
    }
}

// In-memory store, handy for tests and dry runs
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<FightDocument>,
}

impl MemoryStore {
    pub fn new(document: FightDocument) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }

    pub fn snapshot(&self) -> FightDocument {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl FightStore for MemoryStore {
    async fn load(&self) -> Result<FightDocument, StoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, document: &FightDocument) -> Result<(), StoreError> {
        *self
            .document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = document.clone();
        Ok(())
    }
}
