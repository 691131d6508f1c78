//! Persistence of the tag record to a JSON data file

use std::{
    fs,
    path::PathBuf,
    sync::Mutex,
};
use anyhow::{Context, Result};
use tracing::debug;

use crate::state::PersistedRecord;

/// Load/save hook for the tag record
pub trait RecordStore: Send + Sync {
    /// Read the saved record; `None` when nothing was saved yet
    fn load(&self) -> Result<Option<PersistedRecord>>;

    fn save(&self, record: &PersistedRecord) -> Result<()>;
}

/// Stores the record as pretty-printed JSON at a path
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Result<Option<PersistedRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read tag data from {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(None);
        }
        let record = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse tag data in {}", self.path.display()))?;
        Ok(Some(record))
    }

    fn save(&self, record: &PersistedRecord) -> Result<()> {
        let serialized = serde_json::to_string_pretty(record)?;
        // Write beside the data file and rename over it, so a crash mid-write
        // leaves the previous save intact.
        let temp_path = self.temp_path();
        fs::write(&temp_path, serialized)
            .with_context(|| format!("Failed to write tag data to {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace tag data at {}", self.path.display()))?;
        debug!("Saved tag data to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the record in memory; used when no data file is wanted
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<Option<PersistedRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Option<PersistedRecord>> {
        self.record
            .lock()
            .map(|record| record.clone())
            .map_err(|e| anyhow::anyhow!("Failed to lock stored record: {}", e))
    }

    fn save(&self, record: &PersistedRecord) -> Result<()> {
        let mut stored = self.record
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock stored record: {}", e))?;
        *stored = Some(record.clone());
        Ok(())
    }
}
