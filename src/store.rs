//! Session store: keeps in-progress scoring state per match so scoring can resume after a reload.

use crate::models::{MatchId, SessionState};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serde(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {}", e),
            StoreError::Serde(e) => write!(f, "invalid session data: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serde(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serde(e)
    }
}

/// Key-value persistence for session state, keyed by match id.
pub trait SessionStore {
    /// Saved state for `match_id`, or None if nothing was saved.
    fn load(&self, match_id: MatchId) -> Result<Option<SessionState>, StoreError>;

    /// Insert or replace the saved state for `match_id`.
    fn save(&mut self, match_id: MatchId, state: &SessionState) -> Result<(), StoreError>;

    /// Drop saved state. Returns true if there was any.
    fn remove(&mut self, match_id: MatchId) -> Result<bool, StoreError>;
}

/// Storage key for a match, shared by all stores.
pub fn storage_key(match_id: MatchId) -> String {
    format!("scoring_data_match_{}", match_id)
}

/// In-memory store, for tests and for running without a data directory.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    entries: HashMap<MatchId, SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, match_id: MatchId) -> Result<Option<SessionState>, StoreError> {
        Ok(self.entries.get(&match_id).cloned())
    }

    fn save(&mut self, match_id: MatchId, state: &SessionState) -> Result<(), StoreError> {
        self.entries.insert(match_id, state.clone());
        Ok(())
    }

    fn remove(&mut self, match_id: MatchId) -> Result<bool, StoreError> {
        Ok(self.entries.remove(&match_id).is_some())
    }
}

/// One JSON file per match under a directory: `<dir>/scoring_data_match_<id>.json`.
#[derive(Clone, Debug)]
pub struct JsonFileSessionStore {
    dir: PathBuf,
}

impl JsonFileSessionStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, match_id: MatchId) -> PathBuf {
        self.dir.join(format!("{}.json", storage_key(match_id)))
    }
}

impl SessionStore for JsonFileSessionStore {
    fn load(&self, match_id: MatchId) -> Result<Option<SessionState>, StoreError> {
        let data = match fs::read(self.path_for(match_id)) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }

    fn save(&mut self, match_id: MatchId, state: &SessionState) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let data = serde_json::to_vec(state)?;
        // Readers only ever see a complete file.
        let path = self.path_for(match_id);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, match_id: MatchId) -> Result<bool, StoreError> {
        match fs::remove_file(self.path_for(match_id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
