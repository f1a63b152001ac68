//! Curriculum hierarchy: years → quarters → months → weeks → tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

token_enum! {
    /// Completion status carried by every curriculum node.
    pub enum MilestoneStatus("milestone status") {
        NotStarted => "not_started",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

impl Default for MilestoneStatus {
    fn default() -> Self {
        MilestoneStatus::NotStarted
    }
}

impl MilestoneStatus {
    pub fn is_completed(self) -> bool {
        self == MilestoneStatus::Completed
    }

    /// Parent status from its children's statuses.
    ///
    /// NOT_STARTED iff every child is NOT_STARTED, COMPLETED iff every child
    /// is COMPLETED, IN_PROGRESS otherwise. A node without children keeps
    /// `own`.
    pub fn fold<I>(own: MilestoneStatus, children: I) -> MilestoneStatus
    where
        I: IntoIterator<Item = MilestoneStatus>,
    {
        let mut any = false;
        let mut all_completed = true;
        let mut all_not_started = true;
        for status in children {
            any = true;
            all_completed &= status == MilestoneStatus::Completed;
            all_not_started &= status == MilestoneStatus::NotStarted;
        }
        match (any, all_completed, all_not_started) {
            (false, _, _) => own,
            (true, true, _) => MilestoneStatus::Completed,
            (true, _, true) => MilestoneStatus::NotStarted,
            _ => MilestoneStatus::InProgress,
        }
    }
}

/// A single task within a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTask {
    pub task_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: MilestoneStatus,
    /// 1 = high, 2 = medium, 3 = low
    #[serde(default = "default_priority")]
    pub priority: u8,
}

fn default_priority() -> u8 {
    1
}

impl WeeklyTask {
    pub fn new(task_id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            name: name.into(),
            description: description.into(),
            status: MilestoneStatus::NotStarted,
            priority: default_priority(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub week_num: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<WeeklyTask>,
    #[serde(default)]
    pub status: MilestoneStatus,
}

impl Week {
    pub fn new(week_num: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            week_num,
            name: name.into(),
            description: description.into(),
            tasks: Vec::new(),
            status: MilestoneStatus::NotStarted,
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<WeeklyTask>) -> Self {
        self.tasks = tasks;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Month {
    pub month_num: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weeks: Vec<Week>,
    #[serde(default)]
    pub status: MilestoneStatus,
}

impl Month {
    pub fn new(month_num: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            month_num,
            name: name.into(),
            description: description.into(),
            weeks: Vec::new(),
            status: MilestoneStatus::NotStarted,
        }
    }

    pub fn with_weeks(mut self, weeks: Vec<Week>) -> Self {
        self.weeks = weeks;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quarter {
    pub quarter_num: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub months: Vec<Month>,
    #[serde(default)]
    pub status: MilestoneStatus,
}

impl Quarter {
    pub fn new(quarter_num: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            quarter_num,
            name: name.into(),
            description: description.into(),
            focus_areas: Vec::new(),
            months: Vec::new(),
            status: MilestoneStatus::NotStarted,
        }
    }

    pub fn with_focus<S: Into<String>>(mut self, areas: impl IntoIterator<Item = S>) -> Self {
        self.focus_areas = areas.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_months(mut self, months: Vec<Month>) -> Self {
        self.months = months;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Year {
    pub year_num: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub quarters: Vec<Quarter>,
    #[serde(default)]
    pub status: MilestoneStatus,
}

impl Year {
    pub fn new(year_num: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            year_num,
            name: name.into(),
            description: description.into(),
            focus_areas: Vec::new(),
            quarters: Vec::new(),
            status: MilestoneStatus::NotStarted,
        }
    }

    pub fn with_focus<S: Into<String>>(mut self, areas: impl IntoIterator<Item = S>) -> Self {
        self.focus_areas = areas.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_quarters(mut self, quarters: Vec<Quarter>) -> Self {
        self.quarters = quarters;
        self
    }
}

/// Root of the curriculum tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub years: Vec<Year>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Roadmap {
    pub fn new(years: Vec<Year>, now: DateTime<Utc>) -> Self {
        Self {
            years,
            created_at: now,
            last_updated: now,
        }
    }
}
