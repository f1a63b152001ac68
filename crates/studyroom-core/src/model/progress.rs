//! Study session log and the streak/total aggregates derived from it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One logged study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySession {
    pub date: NaiveDate,
    pub duration_hours: f64,
    #[serde(default)]
    pub topics_covered: Vec<String>,
    #[serde(default)]
    pub resources_used: Vec<String>,
    #[serde(default)]
    pub notes: String,
    /// e.g. "energized", "tired", "focused"
    #[serde(default)]
    pub mood: Option<String>,
    pub logged_at: DateTime<Utc>,
}

/// Running aggregates over the session log.
///
/// `daily_sessions` is kept in chronological order by `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(default)]
    pub daily_sessions: Vec<DailySession>,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub last_session_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub completed_milestones: u32,
    #[serde(default)]
    pub total_milestones: u32,
    pub updated_at: DateTime<Utc>,
}

impl ProgressState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            daily_sessions: Vec::new(),
            current_streak: 0,
            longest_streak: 0,
            last_session_date: None,
            total_hours: 0.0,
            completed_milestones: 0,
            total_milestones: 0,
            updated_at: now,
        }
    }
}
