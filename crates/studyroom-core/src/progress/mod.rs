//! Progress tracker: session log, streaks and weekly aggregates.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{Result, ValidationError};
use crate::model::{normalize_labels, DailySession, ProgressState};

/// Input for [`ProgressState::log_session`].
#[derive(Debug, Clone, Default)]
pub struct SessionInput {
    pub duration_hours: f64,
    pub topics: Vec<String>,
    pub resources: Vec<String>,
    pub notes: String,
    pub mood: Option<String>,
}

impl SessionInput {
    pub fn new(duration_hours: f64) -> Self {
        Self {
            duration_hours,
            ..Self::default()
        }
    }

    pub fn with_topics<S: AsRef<str>>(mut self, topics: impl IntoIterator<Item = S>) -> Self {
        self.topics = topics.into_iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    pub fn with_resources<S: AsRef<str>>(mut self, resources: impl IntoIterator<Item = S>) -> Self {
        self.resources = resources.into_iter().map(|r| r.as_ref().to_string()).collect();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_mood(mut self, mood: Option<String>) -> Self {
        self.mood = mood;
        self
    }
}

/// Sessions within one Monday–Sunday week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub session_count: usize,
    pub days_logged: usize,
    pub total_hours: f64,
    /// Distinct topics in first-seen order.
    pub topics: Vec<String>,
}

/// Overall totals plus the most recent sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_session_date: Option<NaiveDate>,
    pub total_hours: f64,
    pub total_sessions: usize,
    pub completed_milestones: u32,
    pub total_milestones: u32,
    pub recent_sessions: Vec<DailySession>,
}

impl ProgressSummary {
    /// Completed share of all curriculum tasks, 0-100.
    pub fn completion_percent(&self) -> f64 {
        if self.total_milestones == 0 {
            return 0.0;
        }
        f64::from(self.completed_milestones) * 100.0 / f64::from(self.total_milestones)
    }
}

/// First day (Monday) of the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

impl ProgressState {
    /// Record a study session dated `date` and update the aggregates.
    ///
    /// Same-day sessions leave the streak as is, the next calendar day
    /// extends it, a longer gap restarts it at 1. A session dated before
    /// `last_session_date` is slotted into the log and counted toward total
    /// hours but does not touch the streak fields.
    ///
    /// # Errors
    /// [`ValidationError::NonPositiveDuration`] if `duration_hours` is not a
    /// finite positive number; nothing is modified in that case.
    pub fn log_session(
        &mut self,
        input: SessionInput,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<DailySession> {
        let hours = input.duration_hours;
        if !hours.is_finite() || hours <= 0.0 {
            return Err(ValidationError::NonPositiveDuration(hours).into());
        }

        let session = DailySession {
            date,
            duration_hours: hours,
            topics_covered: normalize_labels(&input.topics),
            resources_used: normalize_labels(&input.resources),
            notes: input.notes.trim().to_string(),
            mood: input
                .mood
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            logged_at: now,
        };

        let backdated = self.last_session_date.is_some_and(|last| date < last);
        let at = self.daily_sessions.partition_point(|s| s.date <= date);
        self.daily_sessions.insert(at, session.clone());
        self.total_hours += hours;

        if backdated {
            tracing::debug!(%date, "backdated session; streak unchanged");
        } else {
            self.current_streak = match self.last_session_date {
                None => 1,
                Some(last) => match (date - last).num_days() {
                    0 => self.current_streak.max(1),
                    1 => self.current_streak + 1,
                    _ => 1,
                },
            };
            self.longest_streak = self.longest_streak.max(self.current_streak);
            self.last_session_date = Some(date);
        }
        self.updated_at = now;

        tracing::info!(
            %date,
            hours,
            streak = self.current_streak,
            "session logged"
        );
        Ok(session)
    }

    /// Aggregate the sessions of the Monday–Sunday week containing `today`.
    pub fn weekly_summary(&self, today: NaiveDate) -> WeeklySummary {
        let start = week_start(today);
        let end = start + Duration::days(6);
        let sessions: Vec<&DailySession> = self
            .daily_sessions
            .iter()
            .filter(|s| (start..=end).contains(&s.date))
            .collect();

        let mut days: Vec<NaiveDate> = sessions.iter().map(|s| s.date).collect();
        days.dedup();

        WeeklySummary {
            week_start: start,
            week_end: end,
            session_count: sessions.len(),
            days_logged: days.len(),
            total_hours: sessions.iter().map(|s| s.duration_hours).sum(),
            topics: normalize_labels(sessions.iter().flat_map(|s| &s.topics_covered)),
        }
    }

    /// The `n` latest sessions, oldest first.
    pub fn recent_sessions(&self, n: usize) -> &[DailySession] {
        let skip = self.daily_sessions.len().saturating_sub(n);
        &self.daily_sessions[skip..]
    }

    pub fn progress_summary(&self, recent: usize) -> ProgressSummary {
        ProgressSummary {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_session_date: self.last_session_date,
            total_hours: self.total_hours,
            total_sessions: self.daily_sessions.len(),
            completed_milestones: self.completed_milestones,
            total_milestones: self.total_milestones,
            recent_sessions: self.recent_sessions(recent).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn log(state: &mut ProgressState, hours: f64, date: NaiveDate) {
        state
            .log_session(SessionInput::new(hours), date, Utc::now())
            .unwrap();
    }

    #[test]
    fn first_session_starts_streak() {
        let mut state = ProgressState::new(Utc::now());
        let session = state
            .log_session(SessionInput::new(2.5).with_topics(["Python"]), day(10), Utc::now())
            .unwrap();

        assert_eq!(session.topics_covered, vec!["Python".to_string()]);
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.longest_streak, 1);
        assert_eq!(state.total_hours, 2.5);
        assert_eq!(state.last_session_date, Some(day(10)));
    }

    #[test]
    fn consecutive_days_extend_and_gap_resets() {
        let mut state = ProgressState::new(Utc::now());
        for d in 1..=3 {
            log(&mut state, 1.0, day(d));
        }
        assert_eq!(state.current_streak, 3);

        log(&mut state, 1.0, day(5));
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.longest_streak, 3);
    }

    #[test]
    fn same_day_counts_hours_but_not_streak() {
        let mut state = ProgressState::new(Utc::now());
        log(&mut state, 1.0, day(1));
        log(&mut state, 0.5, day(1));

        assert_eq!(state.current_streak, 1);
        assert_eq!(state.daily_sessions.len(), 2);
        assert_eq!(state.total_hours, 1.5);
    }

    #[test]
    fn non_positive_duration_is_rejected_without_mutation() {
        let mut state = ProgressState::new(Utc::now());
        let before = state.clone();
        for hours in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = state
                .log_session(SessionInput::new(hours), day(1), Utc::now())
                .unwrap_err();
            assert!(matches!(
                err,
                crate::CoreError::Validation(ValidationError::NonPositiveDuration(_))
            ));
        }
        assert_eq!(state, before);
    }

    #[test]
    fn backdated_session_is_inserted_in_order_without_streak_change() {
        let mut state = ProgressState::new(Utc::now());
        log(&mut state, 1.0, day(4));
        log(&mut state, 1.0, day(5));
        log(&mut state, 2.0, day(2));

        assert_eq!(state.current_streak, 2);
        assert_eq!(state.last_session_date, Some(day(5)));
        assert_eq!(state.total_hours, 4.0);
        let dates: Vec<_> = state.daily_sessions.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(2), day(4), day(5)]);
    }

    #[test]
    fn labels_are_trimmed_and_deduplicated() {
        let mut state = ProgressState::new(Utc::now());
        let session = state
            .log_session(
                SessionInput::new(1.0)
                    .with_topics([" NumPy", "Pandas", "NumPy", ""])
                    .with_mood(Some("  ".into())),
                day(1),
                Utc::now(),
            )
            .unwrap();
        assert_eq!(session.topics_covered, vec!["NumPy", "Pandas"]);
        assert_eq!(session.mood, None);
    }

    #[test]
    fn weekly_summary_uses_monday_to_sunday() {
        // 2024-01-01 is a Monday.
        let mut state = ProgressState::new(Utc::now());
        let sunday_before = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        log(&mut state, 5.0, sunday_before);
        state
            .log_session(SessionInput::new(1.0).with_topics(["A"]), day(1), Utc::now())
            .unwrap();
        state
            .log_session(SessionInput::new(2.0).with_topics(["B", "A"]), day(3), Utc::now())
            .unwrap();
        log(&mut state, 4.0, day(8));

        let summary = state.weekly_summary(day(7));
        assert_eq!(summary.week_start, day(1));
        assert_eq!(summary.week_end, day(7));
        assert_eq!(summary.session_count, 2);
        assert_eq!(summary.days_logged, 2);
        assert_eq!(summary.total_hours, 3.0);
        assert_eq!(summary.topics, vec!["A", "B"]);
    }

    #[test]
    fn recent_sessions_keeps_tail() {
        let mut state = ProgressState::new(Utc::now());
        for d in 1..=5 {
            log(&mut state, 1.0, day(d));
        }
        let recent = state.recent_sessions(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, day(4));
        assert_eq!(state.recent_sessions(10).len(), 5);
    }

    #[test]
    fn completion_percent_handles_empty_roadmap() {
        let state = ProgressState::new(Utc::now());
        assert_eq!(state.progress_summary(3).completion_percent(), 0.0);
    }
}
