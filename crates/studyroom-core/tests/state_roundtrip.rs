//! Persisting and reloading a populated state document.

use chrono::{Days, NaiveDate, Utc};
use studyroom_core::coach::TipGenerator;
use studyroom_core::model::{ProjectFeature, ResourceKind, ResourceStatus, ReviewResult};
use studyroom_core::registry::{self, NewProject, NewResource};
use studyroom_core::{FlashcardScheduler, NewCard, SessionInput, StateStore, StorageError};
use tempfile::TempDir;

#[test]
fn populated_state_survives_save_and_load() {
    let temp_dir = TempDir::new().unwrap();
    let store = StateStore::with_path(temp_dir.path().join("app_state.json"));
    let now = Utc::now();
    let today = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();

    let mut state = store.load(now).unwrap();
    state.roadmap.mark_task_complete("w1_t1", now).unwrap();
    state.sync_milestones();
    state
        .progress
        .log_session(
            SessionInput::new(1.5)
                .with_topics(["Python", "NumPy"])
                .with_notes("broadcasting")
                .with_mood(Some("focused".into())),
            today,
            now,
        )
        .unwrap();

    let scheduler = FlashcardScheduler::new();
    let deck = scheduler
        .create_deck(&mut state.flashcard_decks, "Linear Algebra", "basics", now)
        .unwrap();
    let card = scheduler
        .add_card(&mut state.flashcard_decks, &deck.deck_id, NewCard::new("Rank?", "Dim of column space"), now)
        .unwrap();
    scheduler
        .mark_card_review(&mut state.flashcard_decks, &card.card_id, ReviewResult::Hard, now)
        .unwrap();

    let resource = registry::add_resource(
        &mut state.resources,
        NewResource::new(ResourceKind::Video, "3Blue1Brown", "https://youtube.com/3b1b"),
        now,
    )
    .unwrap();
    registry::set_resource_status(&mut state.resources, &resource.resource_id, ResourceStatus::Completed, now)
        .unwrap();

    let project = registry::add_project(
        &mut state.github_projects,
        NewProject::new("digits", "https://github.com/me/digits", "MNIST").with_skills(["cnn"]),
        now,
    )
    .unwrap();
    registry::set_project_feature(&mut state.github_projects, &project.project_id, ProjectFeature::Demo, true, now)
        .unwrap();

    TipGenerator::new().generate_weekly_tips(&mut state.weekly_tips, 19, "Python", now);

    store.save(&mut state, now).unwrap();
    let reloaded = store.load(now).unwrap();
    assert_eq!(reloaded, state);
    assert_eq!(reloaded.progress.completed_milestones, 1);
    assert_eq!(reloaded.latest_tips().len(), 4);

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"status\": \"completed\""));
    assert!(raw.contains("\"date\": \"2024-05-06\""));
    assert!(raw.contains("\"source\": \"template\""));
}

#[test]
fn fractional_hours_survive_repeated_saves() {
    let temp_dir = TempDir::new().unwrap();
    let store = StateStore::with_path(temp_dir.path().join("app_state.json"));
    let now = Utc::now();
    let start = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();

    let mut state = store.load(now).unwrap();
    for k in 0..20u32 {
        let hours = 0.1 + f64::from(k) * 0.37 / 7.0;
        state
            .progress
            .log_session(
                SessionInput::new(hours).with_topics(["Calculus"]),
                start + Days::new(k.into()),
                now,
            )
            .unwrap();
    }

    for _ in 0..3 {
        store.save(&mut state, now).unwrap();
        let reloaded = store.load(now).unwrap();
        assert_eq!(reloaded.progress.total_hours.to_bits(), state.progress.total_hours.to_bits());
        assert_eq!(reloaded, state);
        state = reloaded;
    }
}

#[test]
fn corrupt_document_is_reported_not_replaced() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("app_state.json");
    std::fs::write(&path, r#"{"roadmap": 42}"#).unwrap();

    let err = StateStore::with_path(&path).load(Utc::now()).unwrap_err();
    assert!(matches!(err, StorageError::Parse { .. }));
}
