//! Storage backends for player progress
//!
//! - `MemoryStore`: nothing touches disk (tests, demos)
//! - `JsonFileStore`: pretty JSON on disk, written via a temp file then renamed

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ProgressError;
use crate::progress::{PlayerProgress, ResultRecorder};
use crate::sim::SessionConfig;

pub trait ProgressStore {
    fn load(&self) -> Result<PlayerProgress, ProgressError>;
    fn save(&mut self, progress: &PlayerProgress) -> Result<(), ProgressError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<PlayerProgress>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<PlayerProgress, ProgressError> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, progress: &PlayerProgress) -> Result<(), ProgressError> {
        self.saved = Some(progress.clone());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    /// A missing file is a fresh player, not an error
    fn load(&self) -> Result<PlayerProgress, ProgressError> {
        if !self.path.exists() {
            log::info!("No progress at {}, starting fresh", self.path.display());
            return Ok(PlayerProgress::default());
        }
        let bytes = fs::read(&self.path)?;
        let progress: PlayerProgress = serde_json::from_slice(&bytes)?;
        log::info!(
            "Loaded progress: {} sessions, {} best scores",
            progress.sessions_played,
            progress.best_scores.len()
        );
        Ok(progress)
    }

    fn save(&mut self, progress: &PlayerProgress) -> Result<(), ProgressError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(progress)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Progress saved to {}", self.path.display());
        Ok(())
    }
}

/// Progress backed by a store: every recorded result is saved immediately
#[derive(Debug)]
pub struct StoredProgress<S: ProgressStore> {
    store: S,
    progress: PlayerProgress,
}

impl<S: ProgressStore> StoredProgress<S> {
    /// Load from `store`. Unreadable progress is replaced by a fresh record.
    pub fn open(store: S) -> Self {
        let progress = match store.load() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Discarding unreadable progress: {e}");
                PlayerProgress::default()
            }
        };
        Self { store, progress }
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ProgressStore> ResultRecorder for StoredProgress<S> {
    fn record_result(&mut self, score: u32, config: &SessionConfig) -> bool {
        let is_new = self.progress.record(score, config);
        if let Err(e) = self.store.save(&self.progress) {
            log::warn!("Failed to save progress: {e}");
        }
        is_new
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Difficulty, SessionDuration};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_fresh() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::with_path(dir.path().join("progress.json"));
        assert_eq!(store.load().unwrap(), PlayerProgress::default());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.json");
        let mut store = JsonFileStore::with_path(&path);

        let mut progress = PlayerProgress::new();
        progress.record(12, &SessionConfig::new(SessionDuration::Marathon, Difficulty::Hard, 3));
        store.save(&progress).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(store.load().unwrap(), progress);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = JsonFileStore::with_path(&path);
        assert!(matches!(store.load(), Err(ProgressError::Json(_))));

        // StoredProgress recovers with a fresh record
        let stored = StoredProgress::open(store);
        assert_eq!(stored.progress().sessions_played, 0);
    }

    #[test]
    fn test_stored_progress_persists_each_result() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let config = SessionConfig::default();

        let mut stored = StoredProgress::open(JsonFileStore::with_path(&path));
        let flags: Vec<bool> = [10, 3, 10]
            .into_iter()
            .map(|s| stored.record_result(s, &config))
            .collect();
        assert_eq!(flags, vec![true, false, false]);

        let reopened = StoredProgress::open(JsonFileStore::with_path(&path));
        assert_eq!(reopened.progress().best_score(&config), 10);
        assert_eq!(reopened.progress().sessions_played, 3);
    }

    #[test]
    fn test_memory_store() {
        let mut stored = StoredProgress::open(MemoryStore::new());
        assert!(stored.record_result(4, &SessionConfig::default()));
        assert_eq!(stored.store().load().unwrap().total_correct_taps, 4);
    }
}
