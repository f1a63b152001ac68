//! External learning resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

token_enum! {
    /// Kind of learning resource.
    pub enum ResourceKind("resource type") {
        Course => "course",
        Article => "article",
        Video => "video",
        Repo => "repo",
        Paper => "paper",
    }
}

token_enum! {
    /// Difficulty level of resources and flashcards.
    pub enum DifficultyLevel("difficulty") {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        DifficultyLevel::Beginner
    }
}

token_enum! {
    pub enum ResourceStatus("resource status") {
        Todo => "todo",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

impl Default for ResourceStatus {
    fn default() -> Self {
        ResourceStatus::Todo
    }
}

/// A course, article, video, repository or paper being worked through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_id: String,
    pub title: String,
    pub resource_type: ResourceKind,
    pub url: String,
    #[serde(default)]
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mapped_topics: Vec<String>,
    #[serde(default)]
    pub status: ResourceStatus,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}
