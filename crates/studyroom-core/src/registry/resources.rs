use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CoreError, EntityKind, Result};
use crate::model::{
    fresh_id, normalize_labels, required_text, DifficultyLevel, Resource, ResourceKind,
    ResourceStatus,
};

/// Fields for [`add_resource`].
#[derive(Debug, Clone)]
pub struct NewResource {
    pub title: String,
    pub resource_type: ResourceKind,
    pub url: String,
    pub difficulty: DifficultyLevel,
    pub description: String,
    /// Falls back to the title when empty.
    pub topics: Vec<String>,
}

impl NewResource {
    pub fn new(resource_type: ResourceKind, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            resource_type,
            url: url.into(),
            difficulty: DifficultyLevel::default(),
            description: String::new(),
            topics: Vec::new(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyLevel) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_topics<S: AsRef<str>>(mut self, topics: impl IntoIterator<Item = S>) -> Self {
        self.topics = topics.into_iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceSummary {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

pub fn add_resource(
    resources: &mut Vec<Resource>,
    input: NewResource,
    now: DateTime<Utc>,
) -> Result<Resource> {
    let title = required_text("title", &input.title)?;
    let url = required_text("url", &input.url)?;
    let mut topics = normalize_labels(&input.topics);
    if topics.is_empty() {
        topics.push(title.clone());
    }

    let resource = Resource {
        resource_id: fresh_id(|id| resources.iter().any(|r| r.resource_id == id)),
        title,
        resource_type: input.resource_type,
        url,
        difficulty: input.difficulty,
        description: input.description.trim().to_string(),
        mapped_topics: topics,
        status: ResourceStatus::Todo,
        added_at: now,
        completed_at: None,
        notes: String::new(),
    };
    tracing::info!(
        resource_id = %resource.resource_id,
        kind = %resource.resource_type,
        "resource added"
    );
    resources.push(resource.clone());
    Ok(resource)
}

pub fn find_resource<'a>(resources: &'a [Resource], resource_id: &str) -> Result<&'a Resource> {
    resources
        .iter()
        .find(|r| r.resource_id == resource_id)
        .ok_or_else(|| CoreError::not_found(EntityKind::Resource, resource_id))
}

/// Overwrite the status. COMPLETED stamps `completed_at`, anything else clears it.
pub fn set_resource_status(
    resources: &mut [Resource],
    resource_id: &str,
    status: ResourceStatus,
    now: DateTime<Utc>,
) -> Result<Resource> {
    let resource = resources
        .iter_mut()
        .find(|r| r.resource_id == resource_id)
        .ok_or_else(|| CoreError::not_found(EntityKind::Resource, resource_id))?;

    resource.status = status;
    resource.completed_at = match status {
        ResourceStatus::Completed => Some(resource.completed_at.unwrap_or(now)),
        ResourceStatus::Todo | ResourceStatus::InProgress => None,
    };
    tracing::info!(resource_id, %status, "resource status updated");
    Ok(resource.clone())
}

/// Resources mapped to `topic`, compared case-insensitively.
pub fn resources_by_topic<'a>(
    resources: &'a [Resource],
    topic: &'a str,
) -> impl Iterator<Item = &'a Resource> + 'a {
    let topic = topic.trim();
    resources
        .iter()
        .filter(move |r| r.mapped_topics.iter().any(|t| t.eq_ignore_ascii_case(topic)))
}

pub fn resource_summary(resources: &[Resource]) -> ResourceSummary {
    resources
        .iter()
        .fold(ResourceSummary::default(), |mut summary, r| {
            summary.total += 1;
            match r.status {
                ResourceStatus::Todo => summary.todo += 1,
                ResourceStatus::InProgress => summary.in_progress += 1,
                ResourceStatus::Completed => summary.completed += 1,
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn sample(resources: &mut Vec<Resource>) -> Resource {
        add_resource(
            resources,
            NewResource::new(ResourceKind::Course, "Fast.ai", "https://course.fast.ai")
                .with_topics(["Deep Learning", "PyTorch"]),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn new_resource_starts_todo() {
        let mut resources = Vec::new();
        let resource = sample(&mut resources);
        assert_eq!(resource.status, ResourceStatus::Todo);
        assert_eq!(resource.resource_id.len(), 8);
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn topics_default_to_title() {
        let mut resources = Vec::new();
        let resource = add_resource(
            &mut resources,
            NewResource::new(ResourceKind::Paper, "Attention Is All You Need", "arxiv.org/abs/1706.03762"),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(resource.mapped_topics, vec!["Attention Is All You Need"]);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut resources = Vec::new();
        let err = add_resource(
            &mut resources,
            NewResource::new(ResourceKind::Video, " ", "https://example.com"),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyField("title"))));
        assert!(resources.is_empty());
    }

    #[test]
    fn completion_stamps_and_reopen_clears() {
        let mut resources = Vec::new();
        let id = sample(&mut resources).resource_id;

        let done = set_resource_status(&mut resources, &id, ResourceStatus::Completed, Utc::now()).unwrap();
        assert!(done.completed_at.is_some());

        let reopened =
            set_resource_status(&mut resources, &id, ResourceStatus::InProgress, Utc::now()).unwrap();
        assert!(reopened.completed_at.is_none());
        assert_eq!(resources[0].status, ResourceStatus::InProgress);
    }

    #[test]
    fn unknown_resource_is_not_found() {
        let mut resources = Vec::new();
        let err = set_resource_status(&mut resources, "zzz", ResourceStatus::Completed, Utc::now())
            .unwrap_err();
        assert_eq!(err.to_string(), "Resource not found: zzz");
    }

    #[test]
    fn unknown_type_token_is_rejected() {
        let err = "podcast".parse::<ResourceKind>().unwrap_err();
        assert!(err.to_string().contains("course, article, video, repo, paper"));
    }

    #[test]
    fn filter_by_topic_ignores_case() {
        let mut resources = Vec::new();
        sample(&mut resources);
        assert_eq!(resources_by_topic(&resources, "pytorch").count(), 1);
        assert_eq!(resources_by_topic(&resources, "NLP").count(), 0);
        assert_eq!(resource_summary(&resources).todo, 1);
    }
}
