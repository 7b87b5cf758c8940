use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Backing storage for the single global high score.
pub trait HighScoreStore {
    /// Returns the stored value, `0` when nothing has been stored yet.
    fn load(&mut self) -> Result<u32, StoreError>;

    fn save(&mut self, score: u32) -> Result<(), StoreError>;

    /// Short label used in log output.
    fn describe(&self) -> String;
}

/// Returns the platform-correct score file path.
pub fn default_scores_path() -> Result<PathBuf, StoreError> {
    let mut base = dirs::data_local_dir().ok_or(StoreError::NoDataDir)?;
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    Ok(base)
}

/// High score kept as pretty JSON in one file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Opens the store at the platform data directory.
    pub fn at_default_location() -> Result<Self, StoreError> {
        default_scores_path().map(Self::new)
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str::<ScoreFile>(&raw)
            .map(|file| file.high_score)
            .map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let payload = ScoreFile { high_score: score };
        let json = serde_json::to_string_pretty(&payload).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, json).map_err(io_error)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Session-scoped store; the value is gone when the process exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStore {
    value: u32,
}

impl MemoryStore {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = score;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_owned()
    }
}

/// Owns the high-score store and never lets its failures reach the game.
///
/// A malformed score file reads as `0` and is overwritten by the next
/// record. Any other load error, or any save error, switches the keeper to a
/// [`MemoryStore`] holding the best value seen so far.
pub struct ScoreKeeper {
    store: Box<dyn HighScoreStore>,
    best: u32,
    writes: u64,
    warning: Option<String>,
    degraded: bool,
}

impl ScoreKeeper {
    /// Wraps `store`, loading the current best immediately.
    #[must_use]
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        let mut keeper = Self {
            store,
            best: 0,
            writes: 0,
            warning: None,
            degraded: false,
        };
        keeper.reload();
        keeper
    }

    /// Keeper with nothing persisted beyond this process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    /// Reads the store again and returns the best score known.
    ///
    /// The cached best never goes down, so a value recorded after a failed
    /// load survives a reload.
    pub fn reload(&mut self) -> u32 {
        match self.store.load() {
            Ok(stored) => {
                debug!(store = %self.store.describe(), stored, "loaded high score");
                self.best = self.best.max(stored);
            }
            Err(error @ StoreError::Malformed { .. }) => {
                warn!(%error, "ignoring unreadable high score, it will be overwritten");
                self.warning = Some(format!("{error}; starting from {}", self.best));
            }
            Err(error) => {
                warn!(%error, "high score unavailable, keeping it in memory only");
                self.warning = Some(format!("{error}; high score lasts this session only"));
                self.degrade(MemoryStore::new(self.best));
            }
        }

        self.best
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Number of writes handed to the store so far.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Persists `score` when it beats the current best.
    pub fn record(&mut self, score: u32) {
        if score <= self.best {
            return;
        }

        self.best = score;
        self.writes += 1;
        match self.store.save(score) {
            Ok(()) if !self.degraded => self.warning = None,
            Ok(()) => {}
            Err(error) => {
                warn!(%error, score, "failed to save high score, keeping it in memory only");
                self.warning = Some(format!("{error}; high score lasts this session only"));
                self.degrade(MemoryStore::new(score));
            }
        }
    }

    fn degrade(&mut self, fallback: MemoryStore) {
        self.store = Box::new(fallback);
        self.degraded = true;
    }

    /// Outstanding persistence problem, for showing outside the game screen.
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Label of the store currently in use.
    #[must_use]
    pub fn describe(&self) -> String {
        self.store.describe()
    }
}
