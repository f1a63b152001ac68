//! Flashcard scheduler.
//!
//! Decks live in [`AppState::flashcard_decks`](crate::model::AppState); the
//! scheduler holds only its [`ReviewPolicy`] and operates on the deck list
//! it is handed.

mod policy;

pub use policy::ReviewPolicy;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{CoreError, EntityKind, Result};
use crate::model::{
    fresh_id, required_text, CardStatus, DifficultyLevel, Flashcard, FlashcardDeck, ReviewResult,
};

/// Default number of cards offered per review session.
pub const DEFAULT_REVIEW_LIMIT: usize = 10;

/// Card content supplied by the user or a generator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub question: String,
    pub answer: String,
    pub difficulty: DifficultyLevel,
}

impl NewCard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            difficulty: DifficultyLevel::default(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.difficulty = difficulty;
        self
    }
}

/// What a single review changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewOutcome {
    pub card_id: String,
    pub deck_id: String,
    pub result: ReviewResult,
    pub previous_status: CardStatus,
    pub status: CardStatus,
    pub review_count: u32,
    pub interval_days: u32,
    pub next_review: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckStats {
    pub deck_id: String,
    pub topic: String,
    pub cards: usize,
    pub new: usize,
    pub reviewing: usize,
    pub difficult: usize,
    pub mastered: usize,
    pub due: usize,
    pub total_reviews: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlashcardStats {
    pub decks: Vec<DeckStats>,
    pub total_cards: usize,
    pub total_due: usize,
    pub total_mastered: usize,
    pub total_reviews: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FlashcardScheduler {
    policy: ReviewPolicy,
}

fn card_ids(decks: &[FlashcardDeck]) -> impl Iterator<Item = &str> {
    decks.iter().flat_map(|d| d.cards.iter().map(|c| c.card_id.as_str()))
}

impl FlashcardScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ReviewPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ReviewPolicy {
        &self.policy
    }

    /// Append an empty deck with a fresh identifier.
    pub fn create_deck(
        &self,
        decks: &mut Vec<FlashcardDeck>,
        topic: &str,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<FlashcardDeck> {
        let topic = required_text("topic", topic)?;
        let deck = FlashcardDeck {
            deck_id: fresh_id(|id| decks.iter().any(|d| d.deck_id == id)),
            topic,
            description: description.trim().to_string(),
            cards: Vec::new(),
            created_at: now,
            total_reviews: 0,
        };
        tracing::info!(deck_id = %deck.deck_id, topic = %deck.topic, "deck created");
        decks.push(deck.clone());
        Ok(deck)
    }

    /// Append a NEW card to `deck_id`. The card inherits the deck's topic.
    pub fn add_card(
        &self,
        decks: &mut [FlashcardDeck],
        deck_id: &str,
        card: NewCard,
        now: DateTime<Utc>,
    ) -> Result<Flashcard> {
        let question = required_text("question", &card.question)?;
        let answer = required_text("answer", &card.answer)?;
        let card_id = fresh_id(|id| card_ids(&*decks).any(|c| c == id));

        let deck = decks
            .iter_mut()
            .find(|d| d.deck_id == deck_id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Deck, deck_id))?;

        let card = Flashcard {
            card_id,
            question,
            answer,
            topic: deck.topic.clone(),
            status: CardStatus::New,
            difficulty: card.difficulty,
            review_count: 0,
            last_reviewed: None,
            created_at: now,
            next_review: None,
            interval_days: 0,
        };
        tracing::info!(deck_id, card_id = %card.card_id, "card added");
        deck.cards.push(card.clone());
        Ok(card)
    }

    /// Cards due at `now`, at most `limit`.
    ///
    /// Never-reviewed cards come first in creation order, then scheduled
    /// cards whose slot has arrived, earliest first. Ties keep deck order.
    pub fn cards_for_review<'a>(
        &self,
        decks: &'a [FlashcardDeck],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<&'a Flashcard> {
        let cards = decks.iter().flat_map(|d| &d.cards);

        let mut unscheduled: Vec<&Flashcard> =
            cards.clone().filter(|c| c.next_review.is_none()).collect();
        unscheduled.sort_by_key(|c| c.created_at);

        let mut scheduled: Vec<(DateTime<Utc>, &Flashcard)> = cards
            .filter_map(|c| c.next_review.filter(|at| *at <= now).map(|at| (at, c)))
            .collect();
        scheduled.sort_by_key(|(at, _)| *at);

        let due: Vec<&Flashcard> = unscheduled
            .into_iter()
            .chain(scheduled.into_iter().map(|(_, c)| c))
            .take(limit)
            .collect();
        tracing::debug!(due = due.len(), limit, "selected cards for review");
        due
    }

    /// Apply one review result to `card_id` and reschedule it.
    pub fn mark_card_review(
        &self,
        decks: &mut [FlashcardDeck],
        card_id: &str,
        result: ReviewResult,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome> {
        let (deck, index) = decks
            .iter_mut()
            .find_map(|deck| {
                let index = deck.cards.iter().position(|c| c.card_id == card_id)?;
                Some((deck, index))
            })
            .ok_or_else(|| CoreError::not_found(EntityKind::Card, card_id))?;

        deck.total_reviews += 1;
        let deck_id = deck.deck_id.clone();
        let card = &mut deck.cards[index];

        let previous_status = card.status;
        let interval = self.policy.next_interval(card.interval_days, result);
        let next_review = now + Duration::days(i64::from(interval));

        card.review_count += 1;
        card.last_reviewed = Some(now);
        card.status = ReviewPolicy::next_status(previous_status, result);
        card.interval_days = interval;
        card.next_review = Some(next_review);

        tracing::info!(
            card_id,
            %result,
            status = %card.status,
            interval_days = interval,
            "card reviewed"
        );
        Ok(ReviewOutcome {
            card_id: card.card_id.clone(),
            deck_id,
            result,
            previous_status,
            status: card.status,
            review_count: card.review_count,
            interval_days: interval,
            next_review,
        })
    }

    pub fn stats(&self, decks: &[FlashcardDeck], now: DateTime<Utc>) -> FlashcardStats {
        let decks: Vec<DeckStats> = decks
            .iter()
            .map(|deck| {
                let count = |status: CardStatus| deck.cards.iter().filter(|c| c.status == status).count();
                DeckStats {
                    deck_id: deck.deck_id.clone(),
                    topic: deck.topic.clone(),
                    cards: deck.cards.len(),
                    new: count(CardStatus::New),
                    reviewing: count(CardStatus::Reviewing),
                    difficult: count(CardStatus::Difficult),
                    mastered: count(CardStatus::Mastered),
                    due: deck.cards.iter().filter(|c| c.is_due(now)).count(),
                    total_reviews: deck.total_reviews,
                }
            })
            .collect();

        FlashcardStats {
            total_cards: decks.iter().map(|d| d.cards).sum(),
            total_due: decks.iter().map(|d| d.due).sum(),
            total_mastered: decks.iter().map(|d| d.mastered).sum(),
            total_reviews: decks.iter().map(|d| d.total_reviews).sum(),
            decks,
        }
    }
}

pub fn find_deck<'a>(decks: &'a [FlashcardDeck], deck_id: &str) -> Result<&'a FlashcardDeck> {
    decks
        .iter()
        .find(|d| d.deck_id == deck_id)
        .ok_or_else(|| CoreError::not_found(EntityKind::Deck, deck_id))
}
