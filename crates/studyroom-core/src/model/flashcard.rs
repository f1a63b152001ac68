//! Flashcards and the decks that own them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::DifficultyLevel;

token_enum! {
    /// Review state of a single card.
    pub enum CardStatus("card status") {
        New => "new",
        Reviewing => "reviewing",
        Difficult => "difficult",
        Mastered => "mastered",
    }
}

impl Default for CardStatus {
    fn default() -> Self {
        CardStatus::New
    }
}

token_enum! {
    /// Self-assessed outcome of one review, ordered from least to most recall.
    pub enum ReviewResult("review result") {
        Difficult => "difficult",
        Hard => "hard",
        Easy => "easy",
        Mastered => "mastered",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub card_id: String,
    pub question: String,
    pub answer: String,
    pub topic: String,
    #[serde(default)]
    pub status: CardStatus,
    #[serde(default)]
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Unset until the first review.
    #[serde(default)]
    pub next_review: Option<DateTime<Utc>>,
    /// Interval used for the last scheduled review, in days.
    #[serde(default)]
    pub interval_days: u32,
}

impl Flashcard {
    /// A card is due when it has never been scheduled or its slot has arrived.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_review {
            None => true,
            Some(at) => at <= now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardDeck {
    pub deck_id: String,
    pub topic: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub total_reviews: u32,
}
