use chrono::Datelike;
use clap::Subcommand;
use serde_json::json;
use studyroom_core::coach::{self, CoachError, CoachingCapability};
use studyroom_core::flashcards::find_deck;
use studyroom_core::model::{AppState, DifficultyLevel};
use studyroom_core::{select_coach, FlashcardScheduler, Focus, TipGenerator};

use super::{load_config, read_state, today, with_state, CmdResult, Output};
use crate::render;

/// Sessions considered when describing recent work to the coach.
const RECENT_SESSIONS: usize = 5;

#[derive(Subcommand)]
pub enum CoachCommand {
    /// Generate this week's tips (AI coach if available, templates otherwise)
    GenerateTips,
    /// Show the most recent batch of tips
    Tips,
    /// Ask the coach to review recent progress
    Analyze,
    /// Ask the coach for resources on a topic
    Suggest {
        topic: String,
        #[arg(default_value = "intermediate")]
        difficulty: DifficultyLevel,
    },
    /// Ask the coach for an interview preparation plan
    Interview {
        #[arg(long, default_value = "mid-level")]
        role: String,
        #[arg(long, default_value = "FAANG")]
        company: String,
    },
    /// Ask the coach to write cards into a deck
    GenerateCards {
        deck_id: String,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
}

fn focus_text(focus: &Focus) -> String {
    match focus {
        Focus::Active(point) => format!("{}: {}", point.month, point.week),
        Focus::Unplanned { year, quarter, .. } => match quarter {
            Some(quarter) => format!("{year}: planning {quarter}"),
            None => format!("planning {year}"),
        },
        Focus::Complete => "reviewing the completed roadmap".to_string(),
    }
}

fn recent_topics(state: &AppState) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for session in state.progress.recent_sessions(RECENT_SESSIONS).iter().rev() {
        for topic in &session.topics_covered {
            if !topics.contains(topic) {
                topics.push(topic.clone());
            }
        }
    }
    topics
}

fn sessions_text(state: &AppState) -> String {
    let sessions = state.progress.recent_sessions(RECENT_SESSIONS);
    if sessions.is_empty() {
        return "No sessions logged yet.".to_string();
    }
    sessions
        .iter()
        .map(|s| format!("- {}: {:.1}h on {}", s.date, s.duration_hours, s.topics_covered.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the coach's reply, or a hint when no coach is configured.
fn print_reply(result: Result<String, CoachError>, out: Output) -> CmdResult {
    match result {
        Ok(text) => out.emit(&json!({ "reply": text }), || text.clone()),
        Err(CoachError::NotConfigured(reason)) => {
            println!("AI coach unavailable: {reason}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run(command: CoachCommand, out: Output) -> CmdResult {
    let config = load_config();
    match command {
        CoachCommand::GenerateTips => {
            let coach = select_coach(&config.coach);
            let week = today().iso_week().week();
            let tips = with_state(|state, now| {
                let focus = focus_text(&state.roadmap.current_focus());
                let progress = state.progress.progress_summary(RECENT_SESSIONS);
                let topics = recent_topics(state);
                Ok::<_, CoachError>(TipGenerator::new().generate_with_coach(
                    coach.as_ref(),
                    &mut state.weekly_tips,
                    week,
                    &focus,
                    &progress,
                    &topics,
                    now,
                ))
            })?;
            out.emit(&tips, || render::tips(&tips))
        }
        CoachCommand::Tips => {
            let (state, _) = read_state()?;
            let tips = state.latest_tips();
            out.emit(&tips, || render::tips(tips))
        }
        CoachCommand::Analyze => {
            let coach = select_coach(&config.coach);
            let (state, _) = read_state()?;
            let focus = focus_text(&state.roadmap.current_focus());
            print_reply(coach::analyze_progress(coach.as_ref(), &sessions_text(&state), &focus), out)
        }
        CoachCommand::Suggest { topic, difficulty } => {
            let coach = select_coach(&config.coach);
            print_reply(coach::suggest_resources(coach.as_ref(), &topic, difficulty.as_str()), out)
        }
        CoachCommand::Interview { role, company } => {
            let coach = select_coach(&config.coach);
            print_reply(coach::interview_prep(coach.as_ref(), &role, &company), out)
        }
        CoachCommand::GenerateCards { deck_id, count } => {
            let coach = select_coach(&config.coach);
            if !coach.is_available() {
                println!("AI coach unavailable; add cards with `studyroom add-card {deck_id} <question> <answer>`");
                return Ok(());
            }
            let (state, _) = read_state()?;
            let topic = find_deck(&state.flashcard_decks, &deck_id)?.topic.clone();

            let cards = coach::generate_cards(coach.as_ref(), &topic, count)?;
            let scheduler = FlashcardScheduler::new();
            let added = with_state(|state, now| {
                cards
                    .into_iter()
                    .map(|card| scheduler.add_card(&mut state.flashcard_decks, &deck_id, card, now))
                    .collect::<studyroom_core::Result<Vec<_>>>()
            })?;
            out.emit(&added, || format!("Added {} generated card(s) to {topic}", added.len()))
        }
    }
}
