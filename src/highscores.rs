//! High score persistence
//!
//! A single integer under a fixed key. Read once at session start, written
//! through whenever a run ends above it. Storage failures are logged and
//! never reach the simulation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Storage key for the best score
pub const STORAGE_KEY: &str = "neonBreakerHighScore";

/// Persistence collaborator for the best score
pub trait HighScoreStore {
    /// Stored best score, 0 when nothing is stored or storage is unavailable
    fn load(&self) -> u64;
    /// Persist a new best score
    fn save(&mut self, score: u64);
}

/// Volatile store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    score: u64,
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_score(score: u64) -> Self {
        Self { score, writes: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.score
    }

    fn save(&mut self, score: u64) {
        self.score = score;
        self.writes += 1;
    }
}

/// JSON file of `key -> score` entries (native)
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> crate::Result<BTreeMap<String, u64>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Stored score, propagating I/O and parse errors
    pub fn try_load(&self) -> crate::Result<u64> {
        Ok(self
            .read_entries()?
            .get(STORAGE_KEY)
            .copied()
            .unwrap_or(0))
    }

    /// Write the score, keeping any other keys in the file
    pub fn try_save(&self, score: u64) -> crate::Result<()> {
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            log::warn!("Replacing unreadable score file {}: {}", self.path.display(), e);
            BTreeMap::new()
        });
        entries.insert(STORAGE_KEY.to_string(), score);
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> u64 {
        match self.try_load() {
            Ok(score) => {
                log::info!("Loaded high score {} from {}", score, self.path.display());
                score
            }
            Err(e) => {
                log::warn!("Could not read high score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        match self.try_save(score) {
            Ok(()) => log::info!("High score {} saved", score),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }
}

/// Browser LocalStorage, value stored as a decimal string
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score starts at 0");
            return 0;
        };
        storage
            .get_item(STORAGE_KEY)
            .ok()
            .flatten()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    fn save(&mut self, score: u64) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(STORAGE_KEY, &score.to_string()).is_ok() {
                log::info!("High score {} saved", score);
                return;
            }
        }
        log::warn!("Could not save high score");
    }
}
