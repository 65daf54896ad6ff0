//! Review interval policy.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of Leitner boxes.
pub const BOX_COUNT: u8 = 5;

/// Per-box review delays, in days.
///
/// Box 1 is reviewed again in the same session; higher boxes wait
/// progressively longer. The exact day counts are tunable policy; the only
/// hard requirement is that they increase strictly with the box number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    #[serde(default = "default_interval_days")]
    interval_days: [i64; BOX_COUNT as usize],
}

fn default_interval_days() -> [i64; BOX_COUNT as usize] {
    [0, 2, 4, 9, 16]
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_days: default_interval_days(),
        }
    }
}

impl SchedulerConfig {
    /// Build a config with custom per-box delays.
    pub fn with_interval_days(days: [i64; BOX_COUNT as usize]) -> Result<Self> {
        if days[0] < 0 || !days.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::InvalidArgument(
                "review intervals must be non-negative and strictly increasing".to_string(),
            ));
        }
        Ok(Self {
            interval_days: days,
        })
    }

    /// Delay before the next review of a card sitting in `box_no`.
    pub fn interval(&self, box_no: u8) -> Duration {
        let idx = box_no.clamp(1, BOX_COUNT) as usize - 1;
        Duration::days(self.interval_days[idx])
    }

    /// Delay for `box_no` in whole days.
    pub fn interval_days(&self, box_no: u8) -> i64 {
        let idx = box_no.clamp(1, BOX_COUNT) as usize - 1;
        self.interval_days[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intervals_increase_with_box() {
        let config = SchedulerConfig::default();
        for box_no in 1..BOX_COUNT {
            assert!(config.interval(box_no) < config.interval(box_no + 1));
        }
        assert_eq!(config.interval(1), Duration::zero());
        assert_eq!(config.interval(5), Duration::days(16));
    }

    #[test]
    fn test_custom_intervals_validated() {
        assert!(SchedulerConfig::with_interval_days([1, 2, 4, 8, 16]).is_ok());
        assert!(SchedulerConfig::with_interval_days([1, 2, 2, 8, 16]).is_err());
        assert!(SchedulerConfig::with_interval_days([4, 3, 2, 1, 0]).is_err());
        assert!(SchedulerConfig::with_interval_days([-1, 2, 4, 8, 16]).is_err());
    }

    #[test]
    fn test_out_of_range_box_clamps() {
        let config = SchedulerConfig::default();
        assert_eq!(config.interval(0), config.interval(1));
        assert_eq!(config.interval(9), config.interval(BOX_COUNT));
    }
}
