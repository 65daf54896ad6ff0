//! Card state persistence.
//!
//! The scheduler core only needs load-all-for-learner and save-one; the
//! `CardStateStore` trait keeps it agnostic to the backend. Two backends
//! are provided: an in-memory map for tests and embedding, and a
//! file-backed store with one JSON state file per learner:
//!
//! ```text
//! <data dir>/learners/
//! └── {learner}.json   # map of item id -> card state
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use super::models::{CardState, LearnerId};
use crate::catalog::ItemId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine data directory")]
    DataDirNotFound,
}

/// Persistence boundary for card states.
///
/// Implementations must guarantee read-your-writes for a single learner:
/// a `load_states` after a `save_state` for the same learner reflects that
/// write. Distinct learners are independent; callers serialize operations
/// within one learner.
pub trait CardStateStore {
    /// Load every card state recorded for a learner. A learner with no
    /// history yields an empty map.
    fn load_states(
        &self,
        learner: &LearnerId,
    ) -> std::result::Result<HashMap<ItemId, CardState>, StoreError>;

    /// Persist one card state for a learner, replacing any prior record
    /// for the same item.
    fn save_state(
        &mut self,
        learner: &LearnerId,
        state: &CardState,
    ) -> std::result::Result<(), StoreError>;
}

/// In-memory store, keyed by learner.
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: HashMap<LearnerId, HashMap<ItemId, CardState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CardStateStore for MemoryStore {
    fn load_states(
        &self,
        learner: &LearnerId,
    ) -> std::result::Result<HashMap<ItemId, CardState>, StoreError> {
        Ok(self.states.get(learner).cloned().unwrap_or_default())
    }

    fn save_state(
        &mut self,
        learner: &LearnerId,
        state: &CardState,
    ) -> std::result::Result<(), StoreError> {
        self.states
            .entry(learner.clone())
            .or_default()
            .insert(state.item_id.clone(), state.clone());
        Ok(())
    }
}

/// File-backed store: one JSON file of card states per learner.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn default_data_dir() -> std::result::Result<PathBuf, StoreError> {
        dirs::data_local_dir()
            .map(|p| p.join("lexi"))
            .ok_or(StoreError::DataDirNotFound)
    }

    fn states_path(&self, learner: &LearnerId) -> PathBuf {
        // Learner ids are caller-supplied; keep the filename safe
        let safe: String = learner
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.data_dir.join("learners").join(format!("{}.json", safe))
    }
}

impl CardStateStore for FileStore {
    fn load_states(
        &self,
        learner: &LearnerId,
    ) -> std::result::Result<HashMap<ItemId, CardState>, StoreError> {
        let path = self.states_path(learner);
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&path)?;
        let states: HashMap<ItemId, CardState> = serde_json::from_str(&content)?;
        Ok(states)
    }

    fn save_state(
        &mut self,
        learner: &LearnerId,
        state: &CardState,
    ) -> std::result::Result<(), StoreError> {
        let mut states = self.load_states(learner)?;
        states.insert(state.item_id.clone(), state.clone());

        let path = self.states_path(learner);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(&states)?)?;

        log::debug!(
            "saved state for item {} of learner {}",
            state.item_id,
            learner
        );
        Ok(())
    }
}
