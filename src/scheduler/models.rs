//! Data models for the scheduling engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::BOX_COUNT;
use crate::catalog::ItemId;

/// Learner identifier, assigned by the embedding application.
/// Card states belonging to different learners are fully independent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnerId(String);

impl LearnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LearnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-learner, per-item scheduling record.
///
/// Created lazily the first time an item is graded; absence of a record is
/// equivalent to box 1, due now. Only `grade` mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardState {
    pub item_id: ItemId,
    /// Current Leitner box; 1 is the most frequent review tier
    #[serde(default = "default_box")]
    pub box_no: u8,
    /// When the item was last reviewed, if ever
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// When the item next becomes eligible; absent means due immediately
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Correct answers since the last demotion. Analytics only; promotion
    /// is always a single step per correct answer.
    #[serde(default)]
    pub consecutive_correct: u32,
    /// Total reviews over the card's lifetime
    #[serde(default)]
    pub review_count: u32,
    /// Correct reviews over the card's lifetime
    #[serde(default)]
    pub correct_count: u32,
}

fn default_box() -> u8 {
    1
}

impl CardState {
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            box_no: 1,
            last_reviewed_at: None,
            due_at: None,
            consecutive_correct: 0,
            review_count: 0,
            correct_count: 0,
        }
    }

    /// Check whether the card is due at `now`. A card without a schedule
    /// has never been reviewed and is always due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_at.map_or(true, |due| due <= now)
    }

    /// Due time used for ordering; unscheduled cards count as due at `now`.
    pub(crate) fn effective_due(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.due_at.unwrap_or(now)
    }
}

/// Summary derived from a learner's card states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Cards per box; index 0 is box 1. Every box is present even at zero.
    pub box_distribution: [usize; BOX_COUNT as usize],
    /// Fraction of lifetime reviews graded correct; absent until the
    /// learner has reviewed at least once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_estimate: Option<f64>,
    /// Cards due at the time the summary was taken
    pub due_now_count: usize,
    /// Cards with any state record at all
    pub tracked_count: usize,
}

impl ProgressSummary {
    /// Count for a box number (1-based).
    pub fn count_in_box(&self, box_no: u8) -> usize {
        self.box_distribution[box_no.clamp(1, BOX_COUNT) as usize - 1]
    }
}
