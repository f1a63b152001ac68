use chrono::NaiveDate;
use clap::Subcommand;
use serde_json::json;
use studyroom_core::coach::{select_coach, CoachingCapability};
use studyroom_core::{FlashcardScheduler, SessionInput};

use super::{load_config, read_state, split_list, today, with_state, CmdResult, Output};
use crate::render;

const STATUS_RECENT: usize = 3;

#[derive(Subcommand)]
pub enum ProgressCommand {
    /// Log a study session
    Log {
        /// Duration in hours (e.g. 1.5)
        #[arg(allow_negative_numbers = true)]
        hours: f64,
        /// Comma-separated topics; use _ for spaces (e.g. Linear_Algebra,NumPy)
        topics: String,
        /// Comma-separated resources used
        resources: Option<String>,
        /// Free-text notes
        notes: Option<String>,
        /// Mood label (e.g. focused, tired)
        mood: Option<String>,
        /// Session date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Overview: focus, progress, due cards and coach availability
    Status,
    /// Streaks, totals and recent sessions
    Progress {
        /// Number of recent sessions to show
        #[arg(long, default_value_t = 5)]
        recent: usize,
    },
    /// This week's sessions and hours against the weekly target
    Week,
}

pub fn run(command: ProgressCommand, out: Output) -> CmdResult {
    match command {
        ProgressCommand::Log {
            hours,
            topics,
            resources,
            notes,
            mood,
            date,
        } => {
            let input = SessionInput::new(hours)
                .with_topics(split_list(Some(&topics)))
                .with_resources(split_list(resources.as_deref()))
                .with_notes(notes.unwrap_or_default())
                .with_mood(mood);
            let date = date.unwrap_or_else(today);
            let (session, streak) = with_state(|state, now| {
                let session = state.progress.log_session(input, date, now)?;
                Ok::<_, studyroom_core::CoreError>((session, state.progress.current_streak))
            })?;
            out.emit(&json!({ "session": session, "current_streak": streak }), || {
                format!(
                    "Logged {:.1}h on {} ({}). Current streak: {streak} days",
                    session.duration_hours,
                    session.date,
                    session.topics_covered.join(", ")
                )
            })
        }
        ProgressCommand::Status => {
            let config = load_config();
            let (state, now) = read_state()?;
            let focus = state.roadmap.current_focus();
            let progress = state.progress.progress_summary(STATUS_RECENT);
            let due = FlashcardScheduler::new().stats(&state.flashcard_decks, now).total_due;
            let coach = select_coach(&config.coach);
            let coach_line = render::coach_status(coach.as_ref());

            out.emit(
                &json!({
                    "focus": focus,
                    "progress": progress,
                    "cards_due": due,
                    "coach_available": coach.is_available(),
                }),
                || {
                    format!(
                        "{}\n\n{}\n\nFlashcards due: {due}\n{coach_line}",
                        render::focus(&focus),
                        render::progress(&progress)
                    )
                },
            )
        }
        ProgressCommand::Progress { recent } => {
            let (state, _) = read_state()?;
            let summary = state.progress.progress_summary(recent);
            out.emit(&summary, || render::progress(&summary))
        }
        ProgressCommand::Week => {
            let target = load_config().goals.weekly_hours_target;
            let (state, _) = read_state()?;
            let summary = state.progress.weekly_summary(today());
            out.emit(&json!({ "week": summary, "target_hours": target }), || {
                render::week(&summary, target)
            })
        }
    }
}
