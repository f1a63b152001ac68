//! Plain data records persisted in the state document.
//!
//! Behaviour lives in the component modules (`curriculum`, `progress`,
//! `flashcards`, `registry`, `coach`); this module only defines shapes,
//! status enums and the handful of invariants that are local to one record.

/// Declares a closed set of lowercase tokens backed by an enum.
///
/// Generates serde renames, `Display`, `as_str`, an `ALL` table and a
/// `FromStr` that rejects anything outside the set with a
/// [`ValidationError::UnknownVariant`](crate::error::ValidationError).
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($field:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $token)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let token = s.trim().to_ascii_lowercase().replace('-', "_");
                match token.as_str() {
                    $($token => Ok($name::$variant),)+
                    _ => Err(crate::error::ValidationError::UnknownVariant {
                        field: $field,
                        value: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }
    };
}

pub mod flashcard;
pub mod progress;
pub mod project;
pub mod resource;
pub mod roadmap;
pub mod state;
pub mod tip;

pub use flashcard::{CardStatus, Flashcard, FlashcardDeck, ReviewResult};
pub use progress::{DailySession, ProgressState};
pub use project::{GitHubProject, ProjectFeature, ProjectStatus};
pub use resource::{DifficultyLevel, Resource, ResourceKind, ResourceStatus};
pub use roadmap::{MilestoneStatus, Month, Quarter, Roadmap, WeeklyTask, Week, Year};
pub use state::AppState;
pub use tip::{TipCategory, TipSource, WeeklyTip};

use crate::error::ValidationError;

/// Short random identifier (8 hex chars) that is not yet taken.
pub(crate) fn fresh_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
        if !taken(&id) {
            return id;
        }
    }
}

/// Trimmed copy of a required text field.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value.to_string())
}

/// Trim labels, drop empties and duplicates while keeping first-seen order.
pub(crate) fn normalize_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = label.as_ref().trim();
        if !label.is_empty() && !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_id_skips_taken_ids() {
        let first = fresh_id(|_| false);
        assert_eq!(first.len(), 8);
        let second = fresh_id(|id| id == first);
        assert_ne!(first, second);
    }

    #[test]
    fn normalize_labels_dedupes_in_order() {
        let labels = normalize_labels([" Python ", "", "NumPy", "Python"]);
        assert_eq!(labels, vec!["Python".to_string(), "NumPy".to_string()]);
    }

    #[test]
    fn token_enum_parses_case_and_dashes() {
        assert_eq!("In-Progress".parse::<MilestoneStatus>().unwrap(), MilestoneStatus::InProgress);
        let err = "halfway".parse::<MilestoneStatus>().unwrap_err();
        assert!(err.to_string().contains("not_started, in_progress, completed"));
    }
}
