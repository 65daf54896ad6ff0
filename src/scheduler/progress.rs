//! Read-only progress summaries over a learner's card states.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::config::BOX_COUNT;
use super::models::{CardState, ProgressSummary};
use crate::catalog::ItemId;

/// Summarize box occupancy, lifetime accuracy, and the currently due count.
///
/// Accuracy is computed from the lifetime counters the grading step keeps
/// on each card; it is absent until at least one review has happened.
/// Empty input yields an all-zero summary.
pub fn summarize(states: &HashMap<ItemId, CardState>, now: DateTime<Utc>) -> ProgressSummary {
    let mut box_distribution = [0usize; BOX_COUNT as usize];
    let mut reviews: u64 = 0;
    let mut correct: u64 = 0;
    let mut due_now_count = 0;

    for state in states.values() {
        let idx = state.box_no.clamp(1, BOX_COUNT) as usize - 1;
        box_distribution[idx] += 1;
        reviews += u64::from(state.review_count);
        correct += u64::from(state.correct_count);
        if state.is_due(now) {
            due_now_count += 1;
        }
    }

    ProgressSummary {
        box_distribution,
        accuracy_estimate: (reviews > 0).then(|| correct as f64 / reviews as f64),
        due_now_count,
        tracked_count: states.len(),
    }
}
