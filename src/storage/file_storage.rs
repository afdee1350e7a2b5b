use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Keys of the persisted snapshots, one JSON file each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    /// Subject list
    Subjects,
    /// History of completed study sessions (drives the subject rotation)
    StudyCycle,
    /// Logged error entries
    ErrorLog,
    /// Completed review occurrences
    CompletedReviews,
    /// Last known timer state
    StudyTimer,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Subjects,
        StorageKey::StudyCycle,
        StorageKey::ErrorLog,
        StorageKey::CompletedReviews,
        StorageKey::StudyTimer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Subjects => "subjects",
            StorageKey::StudyCycle => "studyCycle",
            StorageKey::ErrorLog => "errorLog",
            StorageKey::CompletedReviews => "completedReviews",
            StorageKey::StudyTimer => "studyTimer",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value snapshot storage on the local filesystem
///
/// Layout:
/// ```text
/// {data_dir}/
/// ├── subjects.json
/// ├── studyCycle.json
/// ├── errorLog.json
/// ├── completedReviews.json
/// └── studyTimer.json
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("studyloop"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Initialize storage directories
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    /// Get the path of the snapshot file for a key
    pub fn snapshot_path(&self, key: StorageKey) -> PathBuf {
        self.base_path.join(format!("{}.json", key.as_str()))
    }

    /// Load a snapshot, returning `None` when it was never written
    pub fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>> {
        let path = self.snapshot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    /// Serialize and write a snapshot
    pub fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_raw(key, &json)
    }

    /// Write an already serialized snapshot
    pub fn write_raw(&self, key: StorageKey, json: &str) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.snapshot_path(key), json)?;
        log::debug!("Wrote snapshot '{}' ({} bytes)", key, json.len());
        Ok(())
    }
}
