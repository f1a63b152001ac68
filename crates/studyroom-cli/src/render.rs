//! Human-readable reports.

use std::fmt::Write;

use studyroom_core::coach::CoachingCapability;
use studyroom_core::flashcards::FlashcardStats;
use studyroom_core::model::{MilestoneStatus, Resource, Roadmap, WeeklyTip};
use studyroom_core::registry::{PortfolioSummary, ResourceSummary};
use studyroom_core::{Focus, Milestone, ProgressSummary, UpcomingTask, WeeklySummary};

const RULE: &str = "======================================================================";

fn marker(status: MilestoneStatus) -> &'static str {
    match status {
        MilestoneStatus::Completed => "[x]",
        MilestoneStatus::InProgress => "[~]",
        MilestoneStatus::NotStarted => "[ ]",
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{RULE}\n{title}\n{RULE}");
}

pub fn roadmap(roadmap: &Roadmap) -> String {
    let mut out = String::new();
    heading(&mut out, "LEARNING ROADMAP");
    for year in &roadmap.years {
        let _ = writeln!(
            out,
            "\n{} {} ({}%)",
            marker(year.status),
            year.name,
            year.completion_percent()
        );
        if !year.focus_areas.is_empty() {
            let _ = writeln!(out, "    Focus Areas: {}", year.focus_areas.join(", "));
        }
        for quarter in &year.quarters {
            let _ = writeln!(
                out,
                "  {} {} ({}%)",
                marker(quarter.status),
                quarter.name,
                quarter.completion_percent()
            );
            for month in &quarter.months {
                let (done, total) = month.child_progress();
                let _ = writeln!(
                    out,
                    "      {} {} ({done}/{total} weeks)",
                    marker(month.status),
                    month.name
                );
            }
        }
    }
    out.trim_end().to_string()
}

pub fn focus(focus: &Focus) -> String {
    match focus {
        Focus::Complete => "Roadmap complete. Every year is done.".to_string(),
        Focus::Unplanned { year, quarter, month } => {
            let path = [Some(year.as_str()), quarter.as_deref(), month.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" > ");
            format!("Next up: {path}\nNo weeks are planned here yet. Add them to the roadmap to get tasks.")
        }
        Focus::Active(point) => {
            let mut out = String::new();
            heading(&mut out, "CURRENT FOCUS");
            let _ = writeln!(out, "Year:    {}", point.year);
            let _ = writeln!(out, "Quarter: {}", point.quarter);
            let _ = writeln!(out, "Month:   {}", point.month);
            let _ = writeln!(out, "Week:    {}", point.week);
            if !point.tasks.is_empty() {
                let _ = writeln!(out, "\nTasks:");
                for task in &point.tasks {
                    let _ = writeln!(out, "  - {task}");
                }
            }
            out.trim_end().to_string()
        }
    }
}

pub fn upcoming(tasks: &[UpcomingTask<'_>]) -> String {
    if tasks.is_empty() {
        return "No upcoming tasks.".to_string();
    }
    let mut out = String::from("Upcoming tasks:\n");
    for (i, task) in tasks.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. [{}] {}", i + 1, task.task.task_id, task.label());
    }
    out.trim_end().to_string()
}

pub fn progress(summary: &ProgressSummary) -> String {
    let mut out = String::new();
    heading(&mut out, "PROGRESS SUMMARY");
    let _ = writeln!(out, "Current streak: {} days", summary.current_streak);
    let _ = writeln!(out, "Longest streak: {} days", summary.longest_streak);
    let _ = writeln!(out, "Total hours:    {:.1}", summary.total_hours);
    let _ = writeln!(out, "Sessions:       {}", summary.total_sessions);
    let _ = writeln!(
        out,
        "Milestones:     {}/{} tasks ({:.0}%)",
        summary.completed_milestones,
        summary.total_milestones,
        summary.completion_percent()
    );
    if let Some(last) = summary.last_session_date {
        let _ = writeln!(out, "Last session:   {last}");
    }
    if !summary.recent_sessions.is_empty() {
        let _ = writeln!(out, "\nRecent sessions:");
        for session in summary.recent_sessions.iter().rev() {
            let _ = write!(
                out,
                "  {}  {:.1}h  {}",
                session.date,
                session.duration_hours,
                session.topics_covered.join(", ")
            );
            if let Some(mood) = &session.mood {
                let _ = write!(out, "  ({mood})");
            }
            out.push('\n');
        }
    }
    out.trim_end().to_string()
}

pub fn week(summary: &WeeklySummary, target_hours: f64) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &format!("THIS WEEK ({} to {})", summary.week_start, summary.week_end),
    );
    let _ = writeln!(out, "Sessions:    {}", summary.session_count);
    let _ = writeln!(out, "Days logged: {}/7", summary.days_logged);
    let _ = writeln!(out, "Hours:       {:.1} / {:.1} target", summary.total_hours, target_hours);
    if summary.topics.is_empty() {
        let _ = writeln!(out, "Topics:      none yet");
    } else {
        let _ = writeln!(out, "Topics:      {}", summary.topics.join(", "));
    }
    out.trim_end().to_string()
}

pub fn flashcard_stats(stats: &FlashcardStats) -> String {
    if stats.decks.is_empty() {
        return "No flashcard decks yet. Create one with `studyroom create-deck <topic>`.".to_string();
    }
    let mut out = String::new();
    heading(&mut out, "FLASHCARDS");
    for deck in &stats.decks {
        let _ = writeln!(
            out,
            "[{}] {}: {} cards ({} new, {} mastered, {} due), {} reviews",
            deck.deck_id, deck.topic, deck.cards, deck.new, deck.mastered, deck.due, deck.total_reviews
        );
    }
    let _ = writeln!(
        out,
        "\nTotal: {} cards, {} due, {} mastered, {} reviews",
        stats.total_cards, stats.total_due, stats.total_mastered, stats.total_reviews
    );
    out.trim_end().to_string()
}

pub fn resources(resources: &[&Resource], summary: &ResourceSummary) -> String {
    let mut out = String::new();
    heading(&mut out, "LEARNING RESOURCES");
    let _ = writeln!(
        out,
        "Total: {} ({} todo, {} in progress, {} completed)",
        summary.total, summary.todo, summary.in_progress, summary.completed
    );
    for r in resources {
        let _ = writeln!(
            out,
            "\n[{}] {} ({}, {}) - {}",
            r.resource_id, r.title, r.resource_type, r.difficulty, r.status
        );
        let _ = writeln!(out, "    {}", r.url);
        if !r.mapped_topics.is_empty() {
            let _ = writeln!(out, "    Topics: {}", r.mapped_topics.join(", "));
        }
    }
    out.trim_end().to_string()
}

pub fn portfolio(summary: &PortfolioSummary) -> String {
    let mut out = String::new();
    heading(&mut out, "GITHUB PORTFOLIO");
    let _ = writeln!(
        out,
        "Total: {} ({} planning, {} in progress, {} completed)",
        summary.total, summary.planning, summary.in_progress, summary.completed
    );
    for project in &summary.projects {
        let _ = writeln!(out, "\n[{}] {} - {}", project.project_id, project.name, project.status);
        let checklist = project
            .features
            .iter()
            .map(|(feature, done)| format!("{} {feature}", if *done { "[x]" } else { "[ ]" }))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "    {checklist}");
        if let Some(url) = &project.blog_post_url {
            let _ = writeln!(out, "    Write-up: {url}");
        }
    }
    out.trim_end().to_string()
}

pub fn tips(tips: &[WeeklyTip]) -> String {
    if tips.is_empty() {
        return "No tips generated yet. Run `studyroom generate-tips`.".to_string();
    }
    let mut out = String::new();
    heading(&mut out, &format!("COACHING TIPS (week {})", tips[0].week));
    for tip in tips {
        let _ = writeln!(out, "\n{} [{}]", tip.title, tip.source);
        let _ = writeln!(out, "  {}", tip.content);
    }
    out.trim_end().to_string()
}

pub fn coach_status(coach: &dyn CoachingCapability) -> String {
    studyroom_core::coach::status_message(coach)
}
