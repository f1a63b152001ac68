use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};
use clap::Subcommand;
use studyroom_core::model::{DifficultyLevel, Flashcard, ReviewResult};
use studyroom_core::{AppState, FlashcardScheduler, NewCard, ReviewOutcome, StateStore};

use super::{load_config, read_state, with_state, CmdResult, Output};
use crate::render;

#[derive(Subcommand)]
pub enum FlashcardCommand {
    /// Show deck statistics
    Flashcards,
    /// Create a flashcard deck
    CreateDeck {
        /// Deck topic (e.g. "Linear Algebra")
        topic: String,
        /// Optional description
        description: Option<String>,
    },
    /// Add a card to a deck
    AddCard {
        /// Deck ID
        deck_id: String,
        question: String,
        answer: String,
        /// beginner, intermediate or advanced
        #[arg(long)]
        difficulty: Option<DifficultyLevel>,
    },
    /// Review due cards interactively
    Review {
        /// Maximum number of cards (default: review.default_limit)
        limit: Option<usize>,
    },
}

pub fn run(command: FlashcardCommand, out: Output) -> CmdResult {
    let scheduler = FlashcardScheduler::new();
    match command {
        FlashcardCommand::Flashcards => {
            let (state, now) = read_state()?;
            let stats = scheduler.stats(&state.flashcard_decks, now);
            out.emit(&stats, || render::flashcard_stats(&stats))
        }
        FlashcardCommand::CreateDeck { topic, description } => {
            let deck = with_state(|state, now| {
                scheduler.create_deck(
                    &mut state.flashcard_decks,
                    &topic,
                    description.as_deref().unwrap_or_default(),
                    now,
                )
            })?;
            out.emit(&deck, || format!("Deck created: {} ({})", deck.deck_id, deck.topic))
        }
        FlashcardCommand::AddCard {
            deck_id,
            question,
            answer,
            difficulty,
        } => {
            let mut card = NewCard::new(question, answer);
            if let Some(difficulty) = difficulty {
                card = card.with_difficulty(difficulty);
            }
            let card = with_state(|state, now| {
                scheduler.add_card(&mut state.flashcard_decks, &deck_id, card, now)
            })?;
            out.emit(&card, || format!("Card added: {} to deck {deck_id}", card.card_id))
        }
        FlashcardCommand::Review { limit } => {
            let limit = limit.unwrap_or_else(|| load_config().review.default_limit);
            let store = StateStore::open()?;
            let now = Utc::now();
            let mut state = store.load(now)?;

            let stdin = io::stdin();
            let outcomes = if out.json {
                review_session(&scheduler, &mut state, limit, now, stdin.lock(), io::stderr())?
            } else {
                review_session(&scheduler, &mut state, limit, now, stdin.lock(), io::stdout())?
            };

            if !outcomes.is_empty() {
                store.save(&mut state, now)?;
            }
            out.emit(&outcomes, || format!("Reviewed {} card(s).", outcomes.len()))
        }
    }
}

enum Answer {
    Result(ReviewResult),
    Quit,
}

fn parse_answer(token: &str) -> Option<Answer> {
    let token = token.trim().to_ascii_lowercase();
    let result = match token.as_str() {
        "q" | "quit" => return Some(Answer::Quit),
        "e" => ReviewResult::Easy,
        "h" => ReviewResult::Hard,
        "d" => ReviewResult::Difficult,
        "m" => ReviewResult::Mastered,
        other => other.parse().ok()?,
    };
    Some(Answer::Result(result))
}

/// Read one line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Walk the due cards, asking for a result after each answer is shown.
///
/// Stops early at end of input or on `q`; reviews recorded so far are kept
/// in `state`.
fn review_session<R: BufRead, W: Write>(
    scheduler: &FlashcardScheduler,
    state: &mut AppState,
    limit: usize,
    now: DateTime<Utc>,
    mut input: R,
    mut output: W,
) -> CmdResult<Vec<ReviewOutcome>> {
    let due: Vec<Flashcard> = scheduler
        .cards_for_review(&state.flashcard_decks, limit, now)
        .into_iter()
        .cloned()
        .collect();
    if due.is_empty() {
        writeln!(output, "No cards due for review.")?;
        return Ok(Vec::new());
    }

    let total = due.len();
    let mut outcomes = Vec::with_capacity(total);
    'cards: for (i, card) in due.iter().enumerate() {
        writeln!(output, "\n[{}/{total}] {} ({})", i + 1, card.topic, card.status)?;
        writeln!(output, "Q: {}", card.question)?;
        write!(output, "(press Enter to show the answer) ")?;
        output.flush()?;
        if read_line(&mut input)?.is_none() {
            break;
        }
        writeln!(output, "A: {}", card.answer)?;

        let result = loop {
            write!(output, "How did it go? [e]asy / [h]ard / [d]ifficult / [m]astered / [q]uit: ")?;
            output.flush()?;
            let Some(line) = read_line(&mut input)? else {
                break 'cards;
            };
            match parse_answer(&line) {
                Some(Answer::Result(result)) => break result,
                Some(Answer::Quit) => break 'cards,
                None => writeln!(output, "Unrecognized answer: {}", line.trim())?,
            }
        };

        let outcome = scheduler.mark_card_review(&mut state.flashcard_decks, &card.card_id, result, now)?;
        writeln!(
            output,
            "{} -> {}, next review in {} day(s)",
            outcome.previous_status, outcome.status, outcome.interval_days
        )?;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyroom_core::model::CardStatus;

    fn state_with_cards(n: usize) -> (AppState, FlashcardScheduler, DateTime<Utc>) {
        let now = Utc::now();
        let scheduler = FlashcardScheduler::new();
        let mut state = AppState::fresh(now);
        let deck = scheduler
            .create_deck(&mut state.flashcard_decks, "Math", "", now)
            .unwrap();
        for i in 0..n {
            scheduler
                .add_card(
                    &mut state.flashcard_decks,
                    &deck.deck_id,
                    NewCard::new(format!("q{i}"), format!("a{i}")),
                    now,
                )
                .unwrap();
        }
        (state, scheduler, now)
    }

    #[test]
    fn reprompts_on_invalid_token() {
        let (mut state, scheduler, now) = state_with_cards(1);
        let input = "\nmaybe\neasy\n".as_bytes();
        let mut output = Vec::new();

        let outcomes = review_session(&scheduler, &mut state, 10, now, input, &mut output).unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, CardStatus::Reviewing);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Unrecognized answer: maybe"));
        assert!(text.contains("A: a0"));
    }

    #[test]
    fn end_of_input_keeps_earlier_reviews() {
        let (mut state, scheduler, now) = state_with_cards(3);
        let input = "\nd\n\n".as_bytes();

        let outcomes = review_session(&scheduler, &mut state, 10, now, input, Vec::new()).unwrap();

        assert_eq!(outcomes.len(), 1);
        let cards = &state.flashcard_decks[0].cards;
        assert_eq!(cards[0].status, CardStatus::Difficult);
        assert_eq!(cards[1].review_count, 0);
        assert_eq!(state.flashcard_decks[0].total_reviews, 1);
    }

    #[test]
    fn nothing_due_reports_and_returns_empty() {
        let (mut state, scheduler, now) = state_with_cards(0);
        let mut output = Vec::new();
        let outcomes = review_session(&scheduler, &mut state, 10, now, "".as_bytes(), &mut output).unwrap();
        assert!(outcomes.is_empty());
        assert!(String::from_utf8(output).unwrap().contains("No cards due"));
    }

    #[test]
    fn short_tokens_map_to_results() {
        assert!(matches!(parse_answer("E\n"), Some(Answer::Result(ReviewResult::Easy))));
        assert!(matches!(parse_answer("mastered"), Some(Answer::Result(ReviewResult::Mastered))));
        assert!(matches!(parse_answer("q"), Some(Answer::Quit)));
        assert!(parse_answer("later").is_none());
    }
}
