//! Leitner scheduling decisions.
//!
//! Pure functions over catalog, card states, and a caller-supplied "now":
//! `select_due` picks the next review batch and `grade` applies an answer
//! to a card. Nothing here reads the clock or touches storage, so every
//! decision is reproducible from its inputs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::config::{SchedulerConfig, BOX_COUNT};
use super::models::CardState;
use crate::catalog::{Catalog, ItemId};
use crate::error::{Error, Result};

/// Select up to `max_items` due items, most-struggling first.
///
/// An item is due when it has no card state yet or its `due_at` has passed.
/// Ordering is lower box first, then earliest due time (never-reviewed
/// cards count as due at `now`), then catalog insertion order, so identical
/// inputs always produce the same batch.
pub fn select_due(
    catalog: &Catalog,
    states: &HashMap<ItemId, CardState>,
    now: DateTime<Utc>,
    max_items: usize,
) -> Result<Vec<ItemId>> {
    if max_items == 0 {
        return Err(Error::InvalidArgument(
            "max_items must be positive".to_string(),
        ));
    }

    let mut due: Vec<(u8, DateTime<Utc>, usize, &ItemId)> = Vec::new();
    for (pos, item) in catalog.iter().enumerate() {
        match states.get(&item.id) {
            None => due.push((1, now, pos, &item.id)),
            Some(state) if state.is_due(now) => {
                due.push((state.box_no, state.effective_due(now), pos, &item.id));
            }
            Some(_) => {}
        }
    }

    due.sort_by(|a, b| (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2)));
    due.truncate(max_items);

    log::debug!("{} of {} item(s) due", due.len(), catalog.len());
    Ok(due.into_iter().map(|(_, _, _, id)| id.clone()).collect())
}

/// Apply a graded answer to a card, producing the updated state.
///
/// This is the only writer of `CardState`. A correct answer promotes the
/// card one box, capped at the top box; a miss resets it to box 1, the
/// most frequent review tier. Callers must grade each answer exactly once.
pub fn grade(
    state: Option<&CardState>,
    item_id: &ItemId,
    correct: bool,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Result<CardState> {
    let mut state = state
        .cloned()
        .unwrap_or_else(|| CardState::new(item_id.clone()));

    if correct {
        state.box_no = (state.box_no + 1).min(BOX_COUNT);
        state.consecutive_correct += 1;
        state.correct_count += 1;
    } else {
        state.box_no = 1;
        state.consecutive_correct = 0;
    }
    state.review_count += 1;

    // Unreachable given the clamp above; guards against a corrupted state
    // record read back from storage.
    if state.box_no < 1 || state.box_no > BOX_COUNT {
        return Err(Error::InvalidArgument(format!(
            "card {} left box range after transition: box {}",
            item_id, state.box_no
        )));
    }

    state.last_reviewed_at = Some(now);
    state.due_at = Some(now + config.interval(state.box_no));

    Ok(state)
}

/// Format an interval in days to a human-readable string.
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days == 1 {
        "1d".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        let weeks = days / 7;
        if weeks == 1 {
            "1w".to_string()
        } else {
            format!("{}w", weeks)
        }
    } else if days < 365 {
        let months = days / 30;
        if months == 1 {
            "1mo".to_string()
        } else {
            format!("{}mo", months)
        }
    } else {
        let years = days / 365;
        if years == 1 {
            "1y".to_string()
        } else {
            format!("{}y", years)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::catalog::{CefrLevel, Item};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn catalog_of(n: usize) -> Catalog {
        let items = (0..n).map(|i| {
            Item::new(
                format!("w{}", i),
                CefrLevel::A1,
                format!("word {}", i),
                format!("translation {}", i),
            )
        });
        Catalog::new(items).unwrap()
    }

    fn state(id: &str, box_no: u8, due_at: DateTime<Utc>) -> CardState {
        CardState {
            box_no,
            due_at: Some(due_at),
            last_reviewed_at: Some(due_at - Duration::days(1)),
            ..CardState::new(ItemId::from(id))
        }
    }

    fn into_map(states: Vec<CardState>) -> HashMap<ItemId, CardState> {
        states.into_iter().map(|s| (s.item_id.clone(), s)).collect()
    }

    #[test]
    fn test_unseen_items_selected_in_catalog_order() {
        let catalog = catalog_of(10);
        let states = HashMap::new();

        let batch = select_due(&catalog, &states, fixed_now(), 5).unwrap();

        assert_eq!(batch.len(), 5);
        let ids: Vec<&str> = batch.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["w0", "w1", "w2", "w3", "w4"]);
    }

    #[test]
    fn test_zero_max_items_rejected() {
        let catalog = catalog_of(3);
        let result = select_due(&catalog, &HashMap::new(), fixed_now(), 0);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_catalog_yields_empty_batch() {
        let catalog = catalog_of(0);
        let batch = select_due(&catalog, &HashMap::new(), fixed_now(), 10).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_only_due_items_selected() {
        let now = fixed_now();
        let catalog = catalog_of(4);
        let states = into_map(vec![
            state("w0", 2, now - Duration::days(1)), // overdue
            state("w1", 3, now + Duration::days(3)), // not due
            state("w2", 4, now),                     // due exactly now
        ]);
        // w3 has no state: due

        let batch = select_due(&catalog, &states, now, 10).unwrap();
        let ids: Vec<&str> = batch.iter().map(|id| id.as_str()).collect();
        assert!(ids.contains(&"w0"));
        assert!(ids.contains(&"w2"));
        assert!(ids.contains(&"w3"));
        assert!(!ids.contains(&"w1"));
    }

    #[test]
    fn test_lower_box_comes_first() {
        let now = fixed_now();
        let catalog = catalog_of(3);
        let states = into_map(vec![
            state("w0", 4, now - Duration::days(5)),
            state("w1", 2, now - Duration::days(1)),
            state("w2", 2, now - Duration::days(3)),
        ]);

        let batch = select_due(&catalog, &states, now, 10).unwrap();
        let ids: Vec<&str> = batch.iter().map(|id| id.as_str()).collect();
        // Box 2 cards first, the staler one ahead; box 4 last despite
        // being the most overdue.
        assert_eq!(ids, vec!["w2", "w1", "w0"]);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let now = fixed_now();
        let catalog = catalog_of(8);
        let states = into_map(vec![
            state("w1", 3, now - Duration::days(2)),
            state("w4", 1, now - Duration::days(2)),
            state("w6", 2, now),
        ]);

        let first = select_due(&catalog, &states, now, 6).unwrap();
        let second = select_due(&catalog, &states, now, 6).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fewer_due_than_max_returns_only_due() {
        let now = fixed_now();
        let catalog = catalog_of(3);
        let states = into_map(vec![
            state("w0", 2, now + Duration::days(1)),
            state("w1", 2, now + Duration::days(1)),
            state("w2", 2, now - Duration::days(1)),
        ]);

        let batch = select_due(&catalog, &states, now, 10).unwrap();
        assert_eq!(batch, vec![ItemId::from("w2")]);
    }

    #[test]
    fn test_grade_initializes_missing_state() {
        let now = fixed_now();
        let config = SchedulerConfig::default();
        let id = ItemId::from("apple");

        let state = grade(None, &id, true, now, &config).unwrap();

        assert_eq!(state.item_id, id);
        assert_eq!(state.box_no, 2);
        assert_eq!(state.consecutive_correct, 1);
        assert_eq!(state.review_count, 1);
        assert_eq!(state.correct_count, 1);
        assert_eq!(state.last_reviewed_at, Some(now));
        assert_eq!(state.due_at, Some(now + Duration::days(2)));
    }

    #[test]
    fn test_promotion_is_single_step_and_capped() {
        let config = SchedulerConfig::default();
        let id = ItemId::from("w");
        let mut now = fixed_now();
        let mut state: Option<CardState> = None;
        // A fresh card starts in box 1 before its first grade
        let mut previous_box = 1u8;

        for _ in 0..10 {
            let next = grade(state.as_ref(), &id, true, now, &config).unwrap();
            assert!(next.box_no >= previous_box);
            assert!(next.box_no <= BOX_COUNT);
            assert!(next.box_no - previous_box <= 1);
            previous_box = next.box_no;
            now = next.due_at.unwrap();
            state = Some(next);
        }

        assert_eq!(state.unwrap().box_no, BOX_COUNT);
    }

    #[test]
    fn test_miss_resets_to_box_one() {
        let now = fixed_now();
        let config = SchedulerConfig::default();
        for box_no in 1..=BOX_COUNT {
            let before = CardState {
                box_no,
                consecutive_correct: 3,
                ..CardState::new(ItemId::from("w"))
            };
            let after = grade(Some(&before), &before.item_id.clone(), false, now, &config).unwrap();
            assert_eq!(after.box_no, 1);
            assert_eq!(after.consecutive_correct, 0);
            // Box 1 has a zero delay: due again immediately
            assert!(after.is_due(now));
        }
    }

    #[test]
    fn test_apple_walkthrough() {
        let config = SchedulerConfig::default();
        let id = ItemId::from("apple");
        let now = fixed_now();

        let first = grade(None, &id, true, now, &config).unwrap();
        assert_eq!(first.box_no, 2);
        assert_eq!(first.due_at, Some(now + Duration::days(2)));

        let second_now = first.due_at.unwrap();
        let second = grade(Some(&first), &id, true, second_now, &config).unwrap();
        assert_eq!(second.box_no, 3);
        assert_eq!(second.due_at, Some(second_now + Duration::days(4)));

        let third_now = second.due_at.unwrap();
        let third = grade(Some(&second), &id, false, third_now, &config).unwrap();
        assert_eq!(third.box_no, 1);
        assert!(third.is_due(third_now));
    }

    #[test]
    fn test_miss_keeps_lifetime_counters() {
        let now = fixed_now();
        let config = SchedulerConfig::default();
        let before = CardState {
            box_no: 3,
            review_count: 7,
            correct_count: 5,
            consecutive_correct: 2,
            ..CardState::new(ItemId::from("w"))
        };

        let after = grade(Some(&before), &before.item_id.clone(), false, now, &config).unwrap();

        assert_eq!(after.review_count, 8);
        assert_eq!(after.correct_count, 5);
    }

    #[test]
    fn test_due_at_never_precedes_last_reviewed() {
        let now = fixed_now();
        let config = SchedulerConfig::default();
        let id = ItemId::from("w");

        for correct in [true, false] {
            let state = grade(None, &id, correct, now, &config).unwrap();
            assert!(state.due_at.unwrap() >= state.last_reviewed_at.unwrap());
        }
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(365), "1y");
        assert_eq!(format_interval(730), "2y");
    }
}
