use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CoreError, EntityKind, Result};
use crate::model::{
    fresh_id, normalize_labels, required_text, GitHubProject, ProjectFeature, ProjectStatus,
};

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub repo_url: String,
    pub description: String,
    pub skills: Vec<String>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, repo_url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            repo_url: repo_url.into(),
            description: description.into(),
            skills: Vec::new(),
        }
    }

    pub fn with_skills<S: AsRef<str>>(mut self, skills: impl IntoIterator<Item = S>) -> Self {
        self.skills = skills.into_iter().map(|s| s.as_ref().to_string()).collect();
        self
    }
}

/// Partial update; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub status: Option<ProjectStatus>,
    pub notes: Option<String>,
    pub blog_post_url: Option<String>,
}

impl ProjectUpdate {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Feature checklist for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectChecklist {
    pub project_id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub features: Vec<(ProjectFeature, bool)>,
    pub blog_post_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total: usize,
    pub planning: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub projects: Vec<ProjectChecklist>,
}

fn project_mut<'a>(projects: &'a mut [GitHubProject], project_id: &str) -> Result<&'a mut GitHubProject> {
    projects
        .iter_mut()
        .find(|p| p.project_id == project_id)
        .ok_or_else(|| CoreError::not_found(EntityKind::Project, project_id))
}

pub fn find_project<'a>(projects: &'a [GitHubProject], project_id: &str) -> Result<&'a GitHubProject> {
    projects
        .iter()
        .find(|p| p.project_id == project_id)
        .ok_or_else(|| CoreError::not_found(EntityKind::Project, project_id))
}

pub fn add_project(
    projects: &mut Vec<GitHubProject>,
    input: NewProject,
    now: DateTime<Utc>,
) -> Result<GitHubProject> {
    let name = required_text("name", &input.name)?;
    let repo_url = required_text("repo_url", &input.repo_url)?;

    let project = GitHubProject {
        project_id: fresh_id(|id| projects.iter().any(|p| p.project_id == id)),
        name,
        repo_url,
        description: input.description.trim().to_string(),
        skills_covered: normalize_labels(&input.skills),
        status: ProjectStatus::Planning,
        created_at: now,
        last_updated: now,
        notes: String::new(),
        has_readme: false,
        has_docs: false,
        has_tests: false,
        has_demo: false,
        blog_post_url: None,
    };
    tracing::info!(project_id = %project.project_id, name = %project.name, "project added");
    projects.push(project.clone());
    Ok(project)
}

/// Apply a partial update. An empty blog URL clears it.
pub fn update_project(
    projects: &mut [GitHubProject],
    project_id: &str,
    update: ProjectUpdate,
    now: DateTime<Utc>,
) -> Result<GitHubProject> {
    let project = project_mut(projects, project_id)?;

    if let Some(status) = update.status {
        project.status = status;
    }
    if let Some(notes) = update.notes {
        project.notes = notes.trim().to_string();
    }
    if let Some(url) = update.blog_post_url {
        let url = url.trim();
        project.blog_post_url = (!url.is_empty()).then(|| url.to_string());
    }
    project.last_updated = now;
    tracing::info!(project_id, status = %project.status, "project updated");
    Ok(project.clone())
}

pub fn set_project_feature(
    projects: &mut [GitHubProject],
    project_id: &str,
    feature: ProjectFeature,
    enabled: bool,
    now: DateTime<Utc>,
) -> Result<GitHubProject> {
    let project = project_mut(projects, project_id)?;
    project.set_feature(feature, enabled);
    project.last_updated = now;
    tracing::info!(project_id, %feature, enabled, "project feature set");
    Ok(project.clone())
}

pub fn portfolio_summary(projects: &[GitHubProject]) -> PortfolioSummary {
    let count = |status: ProjectStatus| projects.iter().filter(|p| p.status == status).count();
    PortfolioSummary {
        total: projects.len(),
        planning: count(ProjectStatus::Planning),
        in_progress: count(ProjectStatus::InProgress),
        completed: count(ProjectStatus::Completed),
        projects: projects
            .iter()
            .map(|p| ProjectChecklist {
                project_id: p.project_id.clone(),
                name: p.name.clone(),
                status: p.status,
                features: ProjectFeature::ALL
                    .iter()
                    .map(|f| (*f, p.has_feature(*f)))
                    .collect(),
                blog_post_url: p.blog_post_url.clone(),
            })
            .collect(),
    }
}
