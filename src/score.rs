use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Failures at the score-store boundary. Both are non-fatal to gameplay.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to load high score: {0}")]
    LoadFailure(String),
    #[error("failed to save high score: {0}")]
    SaveFailure(String),
}

/// Persistence collaborator for the single high-score value.
pub trait ScoreStore: Send + Sync {
    /// Returns the persisted high score, `0` when nothing has been stored yet.
    fn get_high_score(&self) -> Result<u32, ScoreError>;

    /// Persists `score` as the new high score.
    fn update_high_score(&self, score: u32) -> Result<(), ScoreError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = data_dir();
    base.push(SCORE_FILE_NAME);
    base
}

/// Returns the per-user application data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base
}

/// Stores the high score as a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store at the default per-user location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn get_high_score(&self) -> Result<u32, ScoreError> {
        load_high_score_from_path(&self.path).map_err(|e| ScoreError::LoadFailure(e.to_string()))
    }

    fn update_high_score(&self, score: u32) -> Result<(), ScoreError> {
        save_high_score_to_path(&self.path, score)
            .map_err(|e| ScoreError::SaveFailure(e.to_string()))
    }
}

/// Keeps the high score in process memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    high_score: Mutex<u32>,
}

impl MemoryStore {
    #[must_use]
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score: Mutex::new(high_score),
        }
    }
}

impl ScoreStore for MemoryStore {
    fn get_high_score(&self) -> Result<u32, ScoreError> {
        self.high_score
            .lock()
            .map(|guard| *guard)
            .map_err(|e| ScoreError::LoadFailure(e.to_string()))
    }

    fn update_high_score(&self, score: u32) -> Result<(), ScoreError> {
        let mut guard = self
            .high_score
            .lock()
            .map_err(|e| ScoreError::SaveFailure(e.to_string()))?;
        *guard = score;
        Ok(())
    }
}

fn load_high_score_from_path(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.high_score)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_high_score_to_path(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{JsonFileStore, MemoryStore, ScoreError, ScoreStore};

    #[test]
    fn file_store_persists_written_score() {
        let path = unique_test_path("persist");
        let store = JsonFileStore::new(path.clone());

        store.update_high_score(42).expect("score save should succeed");
        let reopened = JsonFileStore::new(path.clone());

        assert_eq!(reopened.get_high_score().expect("load should succeed"), 42);
        let raw = fs::read_to_string(&path).expect("score file should exist");
        assert!(raw.contains("\"high_score\": 42"));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let store = JsonFileStore::new(unique_test_path("missing"));

        let loaded = store
            .get_high_score()
            .expect("missing file should return Ok(0)");
        assert_eq!(loaded, 0);
    }

    #[test]
    fn malformed_score_file_is_a_load_failure() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        let result = JsonFileStore::new(path.clone()).get_high_score();

        assert!(matches!(result, Err(ScoreError::LoadFailure(_))));
        cleanup_test_path(&path);
    }

    #[test]
    fn unwritable_location_is_a_save_failure() {
        let blocker = unique_test_path("blocker");
        if let Some(parent) = blocker.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&blocker, "file, not a directory").expect("test file write should succeed");
        let store = JsonFileStore::new(blocker.join(super::SCORE_FILE_NAME));

        let result = store.update_high_score(10);

        assert!(matches!(result, Err(ScoreError::SaveFailure(_))));
        cleanup_test_path(&blocker);
    }

    #[test]
    fn memory_store_returns_last_written_value() {
        let store = MemoryStore::with_high_score(5);
        assert_eq!(store.get_high_score().expect("load should succeed"), 5);

        store.update_high_score(90).expect("save should succeed");
        assert_eq!(store.get_high_score().expect("load should succeed"), 90);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    // The shared parent directory is left in place; sibling tests may be using it.
    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
