//! Optional language-model coaching.
//!
//! Everything outside this module talks to a `&dyn CoachingCapability`.
//! [`select_coach`] returns the real client when coaching is enabled and an
//! API key can be found, and a [`NullCoach`] otherwise, so callers never
//! branch on configuration themselves.

mod openai;
mod prompts;
mod tips;

pub use openai::OpenAiCoach;
pub use prompts::CoachPrompt;
pub use tips::{parse_card_reply, parse_tip_reply, TipGenerator};

use thiserror::Error;

use crate::flashcards::NewCard;
use crate::storage::CoachConfig;

/// Why a coaching request produced no text.
#[derive(Error, Debug)]
pub enum CoachError {
    /// No credential, or coaching switched off
    #[error("Coaching unavailable: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Coaching API error (HTTP {status}): {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected coaching response: {0}")]
    InvalidResponse(String),

    #[error("Failed to start async runtime: {0}")]
    Runtime(std::io::Error),
}

/// Something that turns a prompt into advice text.
pub trait CoachingCapability {
    /// Short identifier, e.g. "openai".
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    /// Blocking request; failures are returned, never retried.
    fn complete(&self, prompt: &CoachPrompt) -> Result<String, CoachError>;
}

/// Stand-in used when no external coach is configured.
#[derive(Debug, Clone)]
pub struct NullCoach {
    reason: String,
}

impl NullCoach {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl CoachingCapability for NullCoach {
    fn name(&self) -> &str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn complete(&self, _prompt: &CoachPrompt) -> Result<String, CoachError> {
        Err(CoachError::NotConfigured(self.reason.clone()))
    }
}

/// Thin wrapper around the OS keyring for the coaching API key.
pub mod credentials {
    const SERVICE: &str = "studyroom";
    pub const API_KEY_ENTRY: &str = "coach_api_key";

    pub fn get() -> Result<Option<String>, keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, API_KEY_ENTRY)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn set(value: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, API_KEY_ENTRY)?;
        entry.set_password(value)
    }

    pub fn delete() -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, API_KEY_ENTRY)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Where the API key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Env,
    Keyring,
}

/// API key from the configured environment variable, then the keyring.
/// Keyring failures count as "no key".
pub fn resolve_api_key(config: &CoachConfig) -> Option<(String, KeySource)> {
    if let Ok(key) = std::env::var(&config.api_key_env) {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Some((key, KeySource::Env));
        }
    }
    match credentials::get() {
        Ok(Some(key)) if !key.trim().is_empty() => Some((key.trim().to_string(), KeySource::Keyring)),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "keyring lookup failed");
            None
        }
    }
}

/// Pick the coaching implementation for this run.
pub fn select_coach(config: &CoachConfig) -> Box<dyn CoachingCapability> {
    if !config.enabled {
        return Box::new(NullCoach::new("coaching is disabled (coach.enabled = false)"));
    }
    let Some((key, source)) = resolve_api_key(config) else {
        return Box::new(NullCoach::new(format!(
            "no API key; set {} or run `studyroom auth set-key`",
            config.api_key_env
        )));
    };
    match OpenAiCoach::new(config, key) {
        Ok(coach) => {
            tracing::debug!(?source, "coaching enabled");
            Box::new(coach)
        }
        Err(e) => Box::new(NullCoach::new(e.to_string())),
    }
}

/// One-line status for reports.
pub fn status_message(coach: &dyn CoachingCapability) -> String {
    if coach.is_available() {
        format!("AI coach enabled ({})", coach.name())
    } else {
        "AI coach disabled; template tips in use".to_string()
    }
}

pub fn analyze_progress(
    coach: &dyn CoachingCapability,
    sessions_summary: &str,
    current_focus: &str,
) -> Result<String, CoachError> {
    coach.complete(&CoachPrompt::progress_analysis(sessions_summary, current_focus))
}

pub fn suggest_resources(
    coach: &dyn CoachingCapability,
    topic: &str,
    difficulty: &str,
) -> Result<String, CoachError> {
    coach.complete(&CoachPrompt::resource_suggestions(topic, difficulty, "mixed"))
}

pub fn interview_prep(
    coach: &dyn CoachingCapability,
    role_level: &str,
    company: &str,
) -> Result<String, CoachError> {
    coach.complete(&CoachPrompt::interview_prep(role_level, company))
}

/// Generated cards for `topic`; at most `count` are returned.
pub fn generate_cards(
    coach: &dyn CoachingCapability,
    topic: &str,
    count: usize,
) -> Result<Vec<NewCard>, CoachError> {
    let reply = coach.complete(&CoachPrompt::flashcards(topic, count))?;
    let mut cards = parse_card_reply(&reply)?;
    cards.truncate(count);
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_coach_reports_reason() {
        let coach = NullCoach::new("no key");
        assert!(!coach.is_available());
        let err = coach.complete(&CoachPrompt::new("s", "u")).unwrap_err();
        assert_eq!(err.to_string(), "Coaching unavailable: no key");
        assert_eq!(status_message(&coach), "AI coach disabled; template tips in use");
    }

    #[test]
    fn disabled_config_selects_null_coach() {
        let config = CoachConfig {
            enabled: false,
            ..CoachConfig::default()
        };
        let coach = select_coach(&config);
        assert_eq!(coach.name(), "none");
        assert!(generate_cards(coach.as_ref(), "SVD", 3).is_err());
    }
}
