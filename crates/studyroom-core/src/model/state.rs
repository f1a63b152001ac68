//! The aggregate root persisted as one document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FlashcardDeck, GitHubProject, ProgressState, Resource, Roadmap, WeeklyTip};
use crate::curriculum;

/// Everything the tracker knows, loaded and saved as a whole per command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub roadmap: Roadmap,
    pub progress: ProgressState,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub flashcard_decks: Vec<FlashcardDeck>,
    #[serde(default)]
    pub github_projects: Vec<GitHubProject>,
    #[serde(default)]
    pub weekly_tips: Vec<WeeklyTip>,
    pub last_updated: DateTime<Utc>,
}

impl AppState {
    /// Empty collections around the given roadmap.
    pub fn new(roadmap: Roadmap, now: DateTime<Utc>) -> Self {
        let mut state = Self {
            roadmap,
            progress: ProgressState::new(now),
            resources: Vec::new(),
            flashcard_decks: Vec::new(),
            github_projects: Vec::new(),
            weekly_tips: Vec::new(),
            last_updated: now,
        };
        state.normalize();
        state
    }

    /// First-run state seeded with the default curriculum.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self::new(curriculum::default_roadmap(now), now)
    }

    /// Restore tree ordering, parent statuses and milestone counters.
    ///
    /// Applied after every load so hand-edited documents still satisfy the
    /// parent-status invariant.
    pub fn normalize(&mut self) {
        self.roadmap.normalize();
        self.sync_milestones();
    }

    /// Mirror the roadmap's task completion counts into the progress record.
    pub fn sync_milestones(&mut self) {
        let (completed, total) = self.roadmap.milestone_counts();
        self.progress.completed_milestones = completed;
        self.progress.total_milestones = total;
    }

    /// Most recently generated batch of tips (one per category).
    pub fn latest_tips(&self) -> &[WeeklyTip] {
        let Some(last) = self.weekly_tips.last() else {
            return &[];
        };
        let start = self
            .weekly_tips
            .iter()
            .rposition(|tip| tip.created_at != last.created_at || tip.week != last.week)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        &self.weekly_tips[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TipCategory, TipSource};
    use chrono::Duration;

    fn tip(week: u32, at: DateTime<Utc>, category: TipCategory) -> WeeklyTip {
        WeeklyTip {
            tip_id: format!("{week}-{category}"),
            week,
            category,
            title: category.title(),
            content: "content".into(),
            source: TipSource::Template,
            created_at: at,
        }
    }

    #[test]
    fn fresh_state_counts_default_tasks() {
        let state = AppState::fresh(Utc::now());
        assert!(state.progress.total_milestones > 0);
        assert_eq!(state.progress.completed_milestones, 0);
        assert_eq!(state.progress.current_streak, 0);
    }

    #[test]
    fn latest_tips_returns_trailing_batch() {
        let now = Utc::now();
        let mut state = AppState::new(Roadmap::new(Vec::new(), now), now);
        assert!(state.latest_tips().is_empty());

        let earlier = now - Duration::days(7);
        state.weekly_tips.push(tip(1, earlier, TipCategory::LearningStrategy));
        state.weekly_tips.push(tip(1, earlier, TipCategory::Networking));
        state.weekly_tips.push(tip(2, now, TipCategory::LearningStrategy));
        state.weekly_tips.push(tip(2, now, TipCategory::Portfolio));

        let latest = state.latest_tips();
        assert_eq!(latest.len(), 2);
        assert!(latest.iter().all(|t| t.week == 2));
    }
}
