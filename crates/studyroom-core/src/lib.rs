//! # Studyroom Core Library
//!
//! This library provides the core logic for the studyroom learning tracker.
//! It follows a CLI-first philosophy: every operation is a plain function or
//! method over an explicit [`AppState`], and the `studyroom` binary is a thin
//! layer that loads the state, runs one operation and saves it again.
//!
//! ## Architecture
//!
//! - **Model**: plain records for the curriculum tree, sessions, resources,
//!   flashcards, projects and tips
//! - **Curriculum**: current focus, upcoming tasks and upward status propagation
//! - **Progress**: session log with streak and weekly aggregates
//! - **Flashcards**: spaced-repetition scheduling of card reviews
//! - **Registry**: resources and portfolio projects
//! - **Coach**: template tips plus an optional language-model client
//! - **Storage**: single JSON state document and TOML configuration
//!
//! ## Key Components
//!
//! - [`AppState`]: The persisted aggregate root
//! - [`StateStore`]: Whole-document load/save
//! - [`FlashcardScheduler`]: Review selection and rescheduling
//! - [`TipGenerator`]: Weekly tips with template fallback
//! - [`CoachingCapability`]: Trait for external coaching back ends
//! - [`Config`]: Application configuration management

pub mod error;
pub mod model;
pub mod coach;
pub mod curriculum;
pub mod flashcards;
pub mod progress;
pub mod registry;
pub mod storage;

pub use coach::{select_coach, CoachError, CoachingCapability, NullCoach, OpenAiCoach, TipGenerator};
pub use curriculum::{Focus, FocusPoint, Milestone, TaskCompletion, UpcomingTask};
pub use error::{ConfigError, CoreError, EntityKind, Result, StorageError, ValidationError};
pub use flashcards::{FlashcardScheduler, NewCard, ReviewOutcome, ReviewPolicy};
pub use model::AppState;
pub use progress::{ProgressSummary, SessionInput, WeeklySummary};
pub use storage::{Config, StateStore};
