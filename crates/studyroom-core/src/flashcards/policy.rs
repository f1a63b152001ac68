//! Interval curve and status transitions for card reviews.

use crate::model::{CardStatus, ReviewResult};

/// Tunable spaced-repetition schedule.
///
/// Intervals are whole days:
///
/// | result    | next interval                         |
/// |-----------|---------------------------------------|
/// | difficult | 1                                     |
/// | hard      | max(`hard_floor`, ⌈1.2 × previous⌉)   |
/// | easy      | max(`easy_floor`, 2 × previous)       |
/// | mastered  | max(`mastered_floor`, easy interval)  |
///
/// every value capped at `max_interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewPolicy {
    pub hard_floor: u32,
    pub easy_floor: u32,
    pub mastered_floor: u32,
    pub max_interval: u32,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            hard_floor: 2,
            easy_floor: 3,
            mastered_floor: 30,
            max_interval: 365,
        }
    }
}

impl ReviewPolicy {
    /// Days until the next review given the previous interval and this result.
    pub fn next_interval(&self, previous: u32, result: ReviewResult) -> u32 {
        let previous = u64::from(previous);
        let easy = u64::from(self.easy_floor).max(previous * 2);
        let days = match result {
            ReviewResult::Difficult => 1,
            ReviewResult::Hard => u64::from(self.hard_floor).max((previous * 6 + 4) / 5),
            ReviewResult::Easy => easy,
            ReviewResult::Mastered => u64::from(self.mastered_floor).max(easy),
        };
        days.min(u64::from(self.max_interval.max(1))) as u32
    }

    /// Card status after a review.
    ///
    /// MASTERED survives `easy` but is demoted by `hard` or `difficult`.
    pub fn next_status(current: CardStatus, result: ReviewResult) -> CardStatus {
        match (current, result) {
            (_, ReviewResult::Mastered) => CardStatus::Mastered,
            (_, ReviewResult::Difficult) => CardStatus::Difficult,
            (CardStatus::Mastered, ReviewResult::Easy) => CardStatus::Mastered,
            (_, ReviewResult::Easy | ReviewResult::Hard) => CardStatus::Reviewing,
        }
    }
}
