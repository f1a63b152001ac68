//! Prompt texts sent to the coaching capability.

use indoc::{formatdoc, indoc};

use crate::model::TipCategory;
use crate::progress::ProgressSummary;

const CAREER_COACH: &str = "You are an expert AI/ML career coach.";

/// One chat request: a system role, a user message and sampling limits.
#[derive(Debug, Clone, PartialEq)]
pub struct CoachPrompt {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CoachPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens: 400,
            temperature: 0.7,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Weekly tips, answered as a JSON object keyed by category.
    pub fn weekly_tips(week: u32, focus: &str, progress: &ProgressSummary, recent_topics: &[String]) -> Self {
        let keys = TipCategory::ALL
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let topics = if recent_topics.is_empty() {
            "none yet".to_string()
        } else {
            recent_topics.join(", ")
        };
        let user = formatdoc! {"
            You are an AI/ML career coach. Write one personalized tip per category for week {week} of a
            self-study plan.

            Progress Summary:
            - Current Streak: {streak} days
            - Total Hours: {hours:.1}
            - Recent Topics: {topics}
            - Current Focus: {focus}

            Each tip should be specific, actionable and one or two sentences long.
            Return ONLY a JSON object with exactly these keys: {keys}.
            Each value is the tip text.
            ",
            streak = progress.current_streak,
            hours = progress.total_hours,
        };
        Self::new(
            "You are an expert AI/ML career coach focused on practical, actionable advice.",
            user,
        )
        .with_temperature(0.8)
    }

    pub fn progress_analysis(sessions_summary: &str, current_focus: &str) -> Self {
        let user = formatdoc! {"
            You are an expert AI/ML career coach helping someone transition into AI/ML roles at
            top companies.

            Current Learning Status:
            {sessions_summary}

            Current Focus Area: {current_focus}

            Based on this progress, provide:
            1. Specific strengths to build on
            2. Areas to focus more on
            3. 2-3 concrete next steps for this week
            4. One resource recommendation

            Keep it concise (< 150 words), actionable, and encouraging.
        "};
        Self::new(CAREER_COACH, user).with_max_tokens(300)
    }

    pub fn resource_suggestions(topic: &str, difficulty: &str, learning_style: &str) -> Self {
        let user = formatdoc! {"
            Suggest 3-4 FREE or low-cost resources for learning: {topic}

            Requirements:
            - Difficulty level: {difficulty}
            - Learning style: {learning_style} (e.g., video, article, interactive, project-based)
            - Mostly free resources (OpenCourseWare, ArXiv papers, GitHub repos, YouTube)
            - Include direct links where possible

            Format:
            1. [Title] (type) - description with direct link

            Focus on high-quality, well-reviewed resources.
        "};
        Self::new(
            "You are an expert ML educator recommending free, high-quality learning resources.",
            user,
        )
        .with_max_tokens(500)
    }

    pub fn interview_prep(role_level: &str, company: &str) -> Self {
        let user = formatdoc! {"
            Generate interview prep advice for someone moving into {role_level} AI/ML roles at
            {company} companies.

            Include:
            1. Top 5 system design topics to practice (with brief explanation)
            2. 3 common ML design interview questions they might face
            3. How to approach portfolio projects to strengthen interview candidacy
            4. Communication tips for discussing past experience

            Keep it practical and specific. Total ~300 words.
        "};
        Self::new("You are an expert AI/ML recruiting coach.", user).with_max_tokens(500)
    }

    /// Flashcards, answered as a JSON list of `{question, answer}` objects.
    pub fn flashcards(topic: &str, count: usize) -> Self {
        let format = indoc! {r#"
            Format as JSON list: [{"question": "...", "answer": "..."}]

            Return ONLY the JSON, no other text.
        "#};
        let user = formatdoc! {"
            Generate {count} flashcard questions and answers for the topic: {topic}

            Requirements:
            - Questions should be clear and specific
            - Answers should be concise but complete (2-3 sentences max)
            - Include both conceptual and practical knowledge
            - Avoid yes/no questions

            {format}"
        };
        Self::new("Generate flashcard content. Return only valid JSON.", user).with_max_tokens(800)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn weekly_tips_prompt_names_every_category() {
        let progress = crate::model::ProgressState::new(Utc::now()).progress_summary(0);
        let prompt = CoachPrompt::weekly_tips(3, "Linear Algebra", &progress, &[]);
        for category in TipCategory::ALL {
            assert!(prompt.user.contains(category.as_str()));
        }
        assert!(prompt.user.contains("week 3"));
        assert!(prompt.user.contains("none yet"));
    }

    #[test]
    fn flashcard_prompt_asks_for_json() {
        let prompt = CoachPrompt::flashcards("SVD", 4);
        assert!(prompt.user.starts_with("Generate 4 flashcard"));
        assert!(prompt.user.contains(r#"[{"question": "...", "answer": "..."}]"#));
        assert_eq!(prompt.max_tokens, 800);
    }
}
