//! Weekly tip generation and parsing of generated content.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::{CoachError, CoachPrompt, CoachingCapability};
use crate::flashcards::NewCard;
use crate::model::{fresh_id, TipCategory, TipSource, WeeklyTip};
use crate::progress::ProgressSummary;

/// Tips older than this are dropped whenever a new batch is stored.
pub const TIP_HISTORY_WEEKS: i64 = 12;

const LEARNING_STRATEGY: &[&str] = &[
    "Learn by doing: Don't just watch videos. Code along and build small projects.",
    "Spaced repetition: Review materials at increasing intervals (1 day, 3 days, 1 week, etc.)",
    "Active recall: Test yourself frequently with flashcards and practice problems.",
    "Mix resources: Combine courses, papers, videos, and hands-on projects for deep learning.",
    "Teach others: Explaining concepts solidifies understanding. Write blog posts or teach a friend.",
    "Deep work: Block 2-3 hour focus sessions for complex topics. Avoid context switching.",
    "Interleaving: Mix topics and problems rather than doing one thing at a time.",
];

const TIME_MANAGEMENT: &[&str] = &[
    "Schedule learning like meetings: Block 1.5-2 hour sessions 4-5 times/week (15-20h total).",
    "Morning learning: Your brain is freshest in the morning. Save admin tasks for afternoon.",
    "Use a timer: Pomodoro (25min focused + 5min break) keeps energy high.",
    "Batch similar tasks: Do all flashcard reviews at once, not spread throughout the day.",
    "Track time: Log each session. Awareness helps optimize your schedule.",
    "Weekly review: Every Sunday, plan your learning topics for the upcoming week.",
    "Protect deep focus: Turn off notifications. Use 'Do Not Disturb' during learning blocks.",
];

const PORTFOLIO: &[&str] = &[
    "Start a project early: Don't wait until you're 'ready'. Imperfect action beats perfect inaction.",
    "Deploy something: A live demo (Hugging Face Spaces, GitHub Pages, Vercel) impresses more than notebooks.",
    "Document well: Great documentation > great code. Recruiters read README first.",
    "Share your learning: Post about insights, write articles, or record short videos.",
    "Contribute to open source: Shows collaboration and real-world impact.",
    "Diverse projects: Show breadth (ML basics, NLP, MLOps) and depth (specialized domain).",
    "Polish your repos: Clean code, tests, CI/CD, licenses. Shows professionalism.",
];

const NETWORKING: &[&str] = &[
    "Join communities: Participate in online forums, Discord/Slack groups, and ML communities.",
    "Attend events: Conferences, webinars, local meetups. Network with peers and senior engineers.",
    "Engage on social media: Follow experts and share your progress thoughtfully.",
    "Find mentors: Reach out respectfully to senior engineers. Most are happy to help.",
    "Collaborate: Partner on projects with others. Strengthens skills and builds relationships.",
    "Interview prep: Practice with peers. Mock interviews reduce anxiety and improve performance.",
    "Target companies: Follow the job boards of companies you admire. Know what skills they want.",
];

fn templates(category: TipCategory) -> &'static [&'static str] {
    match category {
        TipCategory::LearningStrategy => LEARNING_STRATEGY,
        TipCategory::TimeManagement => TIME_MANAGEMENT,
        TipCategory::Portfolio => PORTFOLIO,
        TipCategory::Networking => NETWORKING,
    }
}

fn focus_line(category: TipCategory, focus: &str) -> String {
    match category {
        TipCategory::LearningStrategy => format!("Apply it to this week's focus: {focus}."),
        TipCategory::TimeManagement => format!("Reserve your longest block for {focus}."),
        TipCategory::Portfolio => format!("Look for a small demo you can build around {focus}."),
        TipCategory::Networking => format!("Share one thing you learned about {focus}."),
    }
}

/// Strip an optional Markdown code fence around a JSON reply.
fn strip_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a `{category: text}` object; every category must be present.
pub fn parse_tip_reply(reply: &str) -> Result<Vec<(TipCategory, String)>, CoachError> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(strip_fence(reply))
        .map_err(|e| CoachError::InvalidResponse(format!("tips are not a JSON object: {e}")))?;

    TipCategory::ALL
        .iter()
        .map(|category| {
            map.get(category.as_str())
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(|text| (*category, text.to_string()))
                .ok_or_else(|| CoachError::InvalidResponse(format!("no tip for {category}")))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct GeneratedCard {
    question: String,
    answer: String,
}

/// Parse a JSON list of `{question, answer}` objects, dropping blank entries.
pub fn parse_card_reply(reply: &str) -> Result<Vec<NewCard>, CoachError> {
    let cards: Vec<GeneratedCard> = serde_json::from_str(strip_fence(reply))
        .map_err(|e| CoachError::InvalidResponse(format!("cards are not a JSON list: {e}")))?;
    let cards: Vec<NewCard> = cards
        .into_iter()
        .filter(|c| !c.question.trim().is_empty() && !c.answer.trim().is_empty())
        .map(|c| NewCard::new(c.question, c.answer))
        .collect();
    if cards.is_empty() {
        return Err(CoachError::InvalidResponse("no usable cards in reply".into()));
    }
    Ok(cards)
}

/// Produces one tip per [`TipCategory`] and appends it to the tip log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TipGenerator;

impl TipGenerator {
    pub fn new() -> Self {
        Self
    }

    fn push_batch(
        tips: &mut Vec<WeeklyTip>,
        week: u32,
        source: TipSource,
        contents: Vec<(TipCategory, String)>,
        now: DateTime<Utc>,
    ) -> Vec<WeeklyTip> {
        let cutoff = now - Duration::weeks(TIP_HISTORY_WEEKS);
        tips.retain(|t| t.created_at > cutoff);
        let start = tips.len();
        for (category, content) in contents {
            let tip = WeeklyTip {
                tip_id: fresh_id(|id| tips.iter().any(|t| t.tip_id == id)),
                week,
                category,
                title: format!("{} Tip", category.title()),
                content,
                source,
                created_at: now,
            };
            tips.push(tip);
        }
        tips[start..].to_vec()
    }

    /// Template tips for `week`: entry `week % len` of each category's list,
    /// followed by a sentence about `focus` when it is not empty.
    pub fn template_contents(&self, week: u32, focus: &str) -> Vec<(TipCategory, String)> {
        let focus = focus.trim();
        TipCategory::ALL
            .iter()
            .map(|category| {
                let list = templates(*category);
                let base = list[week as usize % list.len()];
                let content = if focus.is_empty() {
                    base.to_string()
                } else {
                    format!("{base} {}", focus_line(*category, focus))
                };
                (*category, content)
            })
            .collect()
    }

    /// Deterministic template batch, tagged [`TipSource::Template`].
    pub fn generate_weekly_tips(
        &self,
        tips: &mut Vec<WeeklyTip>,
        week: u32,
        focus: &str,
        now: DateTime<Utc>,
    ) -> Vec<WeeklyTip> {
        let contents = self.template_contents(week, focus);
        tracing::info!(week, "generated template tips");
        Self::push_batch(tips, week, TipSource::Template, contents, now)
    }

    /// Ask `coach` for the batch and fall back to templates on any failure.
    pub fn generate_with_coach(
        &self,
        coach: &dyn CoachingCapability,
        tips: &mut Vec<WeeklyTip>,
        week: u32,
        focus: &str,
        progress: &ProgressSummary,
        recent_topics: &[String],
        now: DateTime<Utc>,
    ) -> Vec<WeeklyTip> {
        if !coach.is_available() {
            return self.generate_weekly_tips(tips, week, focus, now);
        }

        let prompt = CoachPrompt::weekly_tips(week, focus, progress, recent_topics);
        match coach.complete(&prompt).and_then(|reply| parse_tip_reply(&reply)) {
            Ok(contents) => {
                tracing::info!(week, coach = coach.name(), "generated coached tips");
                Self::push_batch(tips, week, TipSource::External, contents, now)
            }
            Err(e) => {
                tracing::warn!(error = %e, "coaching unavailable; using template tips");
                self.generate_weekly_tips(tips, week, focus, now)
            }
        }
    }
}
