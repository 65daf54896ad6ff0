//! Review session coordination.
//!
//! A session snapshots the due batch once at start and walks it with a
//! cursor. Answers must arrive in cursor order and each is graded exactly
//! once; the resulting card state is persisted through the store before
//! the cursor advances, so a crash mid-session loses at most the unanswered
//! remainder of the batch.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::algorithm::{grade, select_due};
use super::config::SchedulerConfig;
use super::models::{CardState, LearnerId};
use super::storage::CardStateStore;
use crate::catalog::{Catalog, ItemId};
use crate::error::{Error, Result};

/// Explicit session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress { batch: Vec<ItemId>, cursor: usize },
    Completed,
}

/// Drives one review session for a single learner.
///
/// The catalog is read-only input; all card state mutation goes through
/// the scheduler's `grade` and is committed to the store. Time is supplied
/// by the caller on every operation.
pub struct ReviewSession<'a, S: CardStateStore> {
    id: Uuid,
    learner: LearnerId,
    catalog: &'a Catalog,
    store: &'a mut S,
    config: SchedulerConfig,
    state: SessionState,
}

impl<'a, S: CardStateStore> ReviewSession<'a, S> {
    pub fn new(
        learner: LearnerId,
        catalog: &'a Catalog,
        store: &'a mut S,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            learner,
            catalog,
            store,
            config,
            state: SessionState::NotStarted,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn learner(&self) -> &LearnerId {
        &self.learner
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// Snapshot the due batch and begin. Returns the batch size; an empty
    /// batch completes the session immediately.
    pub fn start(&mut self, now: DateTime<Utc>, max_items: usize) -> Result<usize> {
        if self.state != SessionState::NotStarted {
            return Err(Error::InvalidState("session already started".to_string()));
        }

        let states = self.store.load_states(&self.learner)?;
        let batch = select_due(self.catalog, &states, now, max_items)?;
        let len = batch.len();

        log::info!(
            "session {}: started for learner {} with {} due item(s)",
            self.id,
            self.learner,
            len
        );

        self.state = if batch.is_empty() {
            SessionState::Completed
        } else {
            SessionState::InProgress { batch, cursor: 0 }
        };
        Ok(len)
    }

    /// Item currently waiting for an answer, or `None` once the session is
    /// completed (or not yet started).
    pub fn current_item(&self) -> Option<&ItemId> {
        match &self.state {
            SessionState::InProgress { batch, cursor } => batch.get(*cursor),
            _ => None,
        }
    }

    /// Items answered so far and the batch size, for progress display.
    pub fn position(&self) -> (usize, usize) {
        match &self.state {
            SessionState::InProgress { batch, cursor } => (*cursor, batch.len()),
            _ => (0, 0),
        }
    }

    /// Grade the answer for the item at the cursor, persist the updated
    /// card state, and advance. The final answer completes the session.
    pub fn submit_answer(
        &mut self,
        item_id: &ItemId,
        correct: bool,
        now: DateTime<Utc>,
    ) -> Result<CardState> {
        let (expected, cursor, batch_len) = match &self.state {
            SessionState::InProgress { batch, cursor } => {
                (batch[*cursor].clone(), *cursor, batch.len())
            }
            SessionState::NotStarted => {
                return Err(Error::InvalidState("session not started".to_string()));
            }
            SessionState::Completed => {
                return Err(Error::InvalidState("session already completed".to_string()));
            }
        };

        if *item_id != expected {
            return Err(Error::InvalidState(format!(
                "answer for {} out of order; expected {}",
                item_id, expected
            )));
        }
        self.catalog.require(item_id)?;

        let states = self.store.load_states(&self.learner)?;
        let updated = grade(states.get(item_id), item_id, correct, now, &self.config)?;
        self.store.save_state(&self.learner, &updated)?;

        if cursor + 1 >= batch_len {
            log::info!("session {}: completed after {} answer(s)", self.id, batch_len);
            self.state = SessionState::Completed;
        } else if let SessionState::InProgress { cursor, .. } = &mut self.state {
            *cursor += 1;
        }

        Ok(updated)
    }
}
