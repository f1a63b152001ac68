//! Curriculum tracker.
//!
//! Navigates the year → quarter → month → week → task tree, answers
//! "what should I work on now" and propagates task completion upward.
//!
//! Parent statuses are never patched incrementally: after any leaf change
//! the whole tree is re-folded with [`MilestoneStatus::fold`], which is
//! cheap for curriculum-sized trees and keeps the invariant trivially true.

mod default_plan;

pub use default_plan::default_roadmap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CoreError, EntityKind, Result};
use crate::model::{MilestoneStatus, Month, Quarter, Roadmap, Week, WeeklyTask, Year};

/// Default number of tasks returned by [`Roadmap::upcoming_tasks`].
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Where the learner currently is in the curriculum.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Focus {
    Active(FocusPoint),
    /// The first incomplete node has no incomplete children to descend
    /// into, e.g. a quarter that is only outlined.
    Unplanned {
        year: String,
        quarter: Option<String>,
        month: Option<String>,
    },
    /// Every year is completed.
    Complete,
}

/// Names along the path to the first incomplete week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusPoint {
    pub year: String,
    pub quarter: String,
    pub month: String,
    pub week: String,
    /// Incomplete tasks of that week, in order.
    pub tasks: Vec<String>,
}

/// Outcome of [`Roadmap::mark_task_complete`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCompletion {
    pub task_id: String,
    pub name: String,
    pub already_completed: bool,
}

/// An incomplete task together with the names of its ancestors.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpcomingTask<'a> {
    pub year: &'a str,
    pub quarter: &'a str,
    pub month: &'a str,
    pub week: &'a str,
    pub task: &'a WeeklyTask,
}

impl UpcomingTask<'_> {
    /// "Week - Task (description)"
    pub fn label(&self) -> String {
        if self.task.description.is_empty() {
            format!("{} - {}", self.week, self.task.name)
        } else {
            format!("{} - {} ({})", self.week, self.task.name, self.task.description)
        }
    }
}

/// Common view over the non-leaf curriculum nodes.
pub trait Milestone {
    fn label(&self) -> &str;

    fn status(&self) -> MilestoneStatus;

    /// (completed direct children, total direct children)
    fn child_progress(&self) -> (usize, usize);

    /// Share of completed direct children, 0-100.
    fn completion_percent(&self) -> u8 {
        let (done, total) = self.child_progress();
        if total == 0 {
            return if self.status().is_completed() { 100 } else { 0 };
        }
        (done * 100 / total) as u8
    }
}

fn count_completed<I: IntoIterator<Item = MilestoneStatus>>(statuses: I) -> (usize, usize) {
    statuses
        .into_iter()
        .fold((0, 0), |(done, total), s| (done + s.is_completed() as usize, total + 1))
}

impl Milestone for Week {
    fn label(&self) -> &str {
        &self.name
    }

    fn status(&self) -> MilestoneStatus {
        self.status
    }

    fn child_progress(&self) -> (usize, usize) {
        count_completed(self.tasks.iter().map(|t| t.status))
    }
}

impl Milestone for Month {
    fn label(&self) -> &str {
        &self.name
    }

    fn status(&self) -> MilestoneStatus {
        self.status
    }

    fn child_progress(&self) -> (usize, usize) {
        count_completed(self.weeks.iter().map(|w| w.status))
    }
}

impl Milestone for Quarter {
    fn label(&self) -> &str {
        &self.name
    }

    fn status(&self) -> MilestoneStatus {
        self.status
    }

    fn child_progress(&self) -> (usize, usize) {
        count_completed(self.months.iter().map(|m| m.status))
    }
}

impl Milestone for Year {
    fn label(&self) -> &str {
        &self.name
    }

    fn status(&self) -> MilestoneStatus {
        self.status
    }

    fn child_progress(&self) -> (usize, usize) {
        count_completed(self.quarters.iter().map(|q| q.status))
    }
}

impl Roadmap {
    /// Sort every level by sequence number and re-derive parent statuses.
    pub fn normalize(&mut self) {
        self.years.sort_by_key(|y| y.year_num);
        for year in &mut self.years {
            year.quarters.sort_by_key(|q| q.quarter_num);
            for quarter in &mut year.quarters {
                quarter.months.sort_by_key(|m| m.month_num);
                for month in &mut quarter.months {
                    month.weeks.sort_by_key(|w| w.week_num);
                }
            }
        }
        self.refresh_statuses();
    }

    /// Bottom-up fold of task statuses into weeks, months, quarters, years.
    pub fn refresh_statuses(&mut self) {
        for year in &mut self.years {
            for quarter in &mut year.quarters {
                for month in &mut quarter.months {
                    for week in &mut month.weeks {
                        week.status =
                            MilestoneStatus::fold(week.status, week.tasks.iter().map(|t| t.status));
                    }
                    month.status =
                        MilestoneStatus::fold(month.status, month.weeks.iter().map(|w| w.status));
                }
                quarter.status =
                    MilestoneStatus::fold(quarter.status, quarter.months.iter().map(|m| m.status));
            }
            year.status = MilestoneStatus::fold(year.status, year.quarters.iter().map(|q| q.status));
        }
    }

    fn tasks(&self) -> impl Iterator<Item = &WeeklyTask> + '_ {
        self.years
            .iter()
            .flat_map(|y| &y.quarters)
            .flat_map(|q| &q.months)
            .flat_map(|m| &m.weeks)
            .flat_map(|w| &w.tasks)
    }

    pub fn find_task(&self, task_id: &str) -> Option<&WeeklyTask> {
        self.tasks().find(|t| t.task_id == task_id)
    }

    fn find_task_mut(&mut self, task_id: &str) -> Option<&mut WeeklyTask> {
        self.years
            .iter_mut()
            .flat_map(|y| &mut y.quarters)
            .flat_map(|q| &mut q.months)
            .flat_map(|m| &mut m.weeks)
            .flat_map(|w| &mut w.tasks)
            .find(|t| t.task_id == task_id)
    }

    /// (completed tasks, total tasks)
    pub fn milestone_counts(&self) -> (u32, u32) {
        self.tasks().fold((0, 0), |(done, total), t| {
            (done + t.status.is_completed() as u32, total + 1)
        })
    }

    /// Descend through the first incomplete node of each level.
    ///
    /// [`Focus::Complete`] only when every year is completed; a descent that
    /// stops above week level yields [`Focus::Unplanned`].
    pub fn current_focus(&self) -> Focus {
        let open = |s: MilestoneStatus| !s.is_completed();
        let Some(year) = self.years.iter().find(|y| open(y.status)) else {
            return Focus::Complete;
        };
        let unplanned = |quarter: Option<&Quarter>, month: Option<&Month>| Focus::Unplanned {
            year: year.name.clone(),
            quarter: quarter.map(|q| q.name.clone()),
            month: month.map(|m| m.name.clone()),
        };

        let Some(quarter) = year.quarters.iter().find(|q| open(q.status)) else {
            return unplanned(None, None);
        };
        let Some(month) = quarter.months.iter().find(|m| open(m.status)) else {
            return unplanned(Some(quarter), None);
        };
        let Some(week) = month.weeks.iter().find(|w| open(w.status)) else {
            return unplanned(Some(quarter), Some(month));
        };

        Focus::Active(FocusPoint {
            year: year.name.clone(),
            quarter: quarter.name.clone(),
            month: month.name.clone(),
            week: week.name.clone(),
            tasks: week
                .tasks
                .iter()
                .filter(|t| open(t.status))
                .map(|t| t.name.clone())
                .collect(),
        })
    }

    /// Mark one task completed and propagate upward.
    ///
    /// Completing an already completed task is a successful no-op.
    ///
    /// # Errors
    /// Returns [`CoreError::NotFound`] if no task has `task_id`.
    pub fn mark_task_complete(&mut self, task_id: &str, now: DateTime<Utc>) -> Result<TaskCompletion> {
        let task = self
            .find_task_mut(task_id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Task, task_id))?;

        let already_completed = task.status.is_completed();
        let completion = TaskCompletion {
            task_id: task.task_id.clone(),
            name: task.name.clone(),
            already_completed,
        };
        if already_completed {
            tracing::debug!(task_id, "task already completed");
            return Ok(completion);
        }

        task.status = MilestoneStatus::Completed;
        self.refresh_statuses();
        self.last_updated = now;
        tracing::info!(task_id, "task completed");
        Ok(completion)
    }

    /// Incomplete tasks in traversal order, at most `limit` of them.
    ///
    /// The iterator borrows the roadmap and is evaluated lazily; call again
    /// to restart from the beginning.
    pub fn upcoming_tasks(&self, limit: usize) -> impl Iterator<Item = UpcomingTask<'_>> + '_ {
        self.years
            .iter()
            .flat_map(|year| {
                year.quarters.iter().flat_map(move |quarter| {
                    quarter.months.iter().flat_map(move |month| {
                        month.weeks.iter().flat_map(move |week| {
                            week.tasks
                                .iter()
                                .filter(|task| !task.status.is_completed())
                                .map(move |task| UpcomingTask {
                                    year: &year.name,
                                    quarter: &quarter.name,
                                    month: &month.name,
                                    week: &week.name,
                                    task,
                                })
                        })
                    })
                })
            })
            .take(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MilestoneStatus::*;

    fn small_roadmap() -> Roadmap {
        let week1 = Week::new(1, "Week A", "").with_tasks(vec![
            WeeklyTask::new("a1", "Task A1", ""),
            WeeklyTask::new("a2", "Task A2", ""),
        ]);
        let week2 = Week::new(2, "Week B", "")
            .with_tasks(vec![WeeklyTask::new("b1", "Task B1", "read chapter")]);
        let month = Month::new(1, "Month 1", "").with_weeks(vec![week1, week2]);
        let quarter = Quarter::new(1, "Q1", "").with_months(vec![month]);
        let year = Year::new(1, "Year 1", "").with_quarters(vec![quarter]);
        Roadmap::new(vec![year], Utc::now())
    }

    #[test]
    fn focus_starts_at_first_week() {
        let roadmap = small_roadmap();
        match roadmap.current_focus() {
            Focus::Active(point) => {
                assert_eq!(point.year, "Year 1");
                assert_eq!(point.week, "Week A");
                assert_eq!(point.tasks, vec!["Task A1", "Task A2"]);
            }
            other => panic!("expected active focus, got {other:?}"),
        }
    }

    #[test]
    fn completing_a_task_moves_week_in_progress() {
        let mut roadmap = small_roadmap();
        roadmap.mark_task_complete("a1", Utc::now()).unwrap();
        let year = &roadmap.years[0];
        let month = &year.quarters[0].months[0];
        assert_eq!(month.weeks[0].status, InProgress);
        assert_eq!(month.weeks[1].status, NotStarted);
        assert_eq!(month.status, InProgress);
        assert_eq!(year.status, InProgress);
    }

    #[test]
    fn completing_every_task_completes_the_year() {
        let mut roadmap = small_roadmap();
        for id in ["a1", "a2", "b1"] {
            roadmap.mark_task_complete(id, Utc::now()).unwrap();
        }
        assert_eq!(roadmap.years[0].status, Completed);
        assert_eq!(roadmap.current_focus(), Focus::Complete);
    }

    #[test]
    fn focus_moves_past_completed_week() {
        let mut roadmap = small_roadmap();
        roadmap.mark_task_complete("a1", Utc::now()).unwrap();
        roadmap.mark_task_complete("a2", Utc::now()).unwrap();
        match roadmap.current_focus() {
            Focus::Active(point) => assert_eq!(point.week, "Week B"),
            other => panic!("expected active focus, got {other:?}"),
        }
    }

    #[test]
    fn mark_task_complete_is_idempotent() {
        let mut roadmap = small_roadmap();
        let first = roadmap.mark_task_complete("a1", Utc::now()).unwrap();
        let snapshot = roadmap.clone();
        let second = roadmap.mark_task_complete("a1", Utc::now()).unwrap();
        assert!(!first.already_completed);
        assert!(second.already_completed);
        assert_eq!(roadmap, snapshot);
    }

    #[test]
    fn mark_unknown_task_is_not_found() {
        let mut roadmap = small_roadmap();
        let snapshot = roadmap.clone();
        let err = roadmap.mark_task_complete("zzz", Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: EntityKind::Task, .. }));
        assert_eq!(roadmap, snapshot);
    }

    #[test]
    fn upcoming_tasks_skips_completed_and_truncates() {
        let mut roadmap = small_roadmap();
        roadmap.mark_task_complete("a1", Utc::now()).unwrap();
        let ids: Vec<_> = roadmap.upcoming_tasks(5).map(|u| u.task.task_id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "b1"]);

        let first: Vec<_> = roadmap.upcoming_tasks(1).map(|u| u.label()).collect();
        assert_eq!(first, vec!["Week A - Task A2"]);
        // Restartable: a second call yields the same sequence.
        assert_eq!(roadmap.upcoming_tasks(5).count(), 2);
    }

    #[test]
    fn upcoming_label_includes_description() {
        let roadmap = small_roadmap();
        let b1 = roadmap
            .upcoming_tasks(10)
            .find(|u| u.task.task_id == "b1")
            .unwrap();
        assert_eq!(b1.label(), "Week B - Task B1 (read chapter)");
    }

    #[test]
    fn normalize_sorts_by_sequence_and_refolds() {
        let mut roadmap = small_roadmap();
        let weeks = &mut roadmap.years[0].quarters[0].months[0].weeks;
        weeks.reverse();
        weeks[1].tasks[0].status = Completed;
        weeks[1].tasks[1].status = Completed;
        roadmap.normalize();

        let month = &roadmap.years[0].quarters[0].months[0];
        assert_eq!(month.weeks[0].week_num, 1);
        assert_eq!(month.weeks[0].status, Completed);
        assert_eq!(month.status, InProgress);
    }

    #[test]
    fn completion_percent_counts_direct_children() {
        let mut roadmap = small_roadmap();
        roadmap.mark_task_complete("a1", Utc::now()).unwrap();
        let month = &roadmap.years[0].quarters[0].months[0];
        assert_eq!(month.weeks[0].completion_percent(), 50);
        assert_eq!(month.completion_percent(), 0);
        assert_eq!(Quarter::new(3, "Empty", "").completion_percent(), 0);
    }

    #[test]
    fn milestone_counts_tracks_tasks() {
        let mut roadmap = small_roadmap();
        assert_eq!(roadmap.milestone_counts(), (0, 3));
        roadmap.mark_task_complete("b1", Utc::now()).unwrap();
        assert_eq!(roadmap.milestone_counts(), (1, 3));
    }
}
