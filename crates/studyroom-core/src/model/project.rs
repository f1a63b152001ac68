//! Portfolio projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

token_enum! {
    pub enum ProjectStatus("project status") {
        Planning => "planning",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Planning
    }
}

token_enum! {
    /// The four polish items tracked per project.
    pub enum ProjectFeature("project feature") {
        Readme => "readme",
        Docs => "docs",
        Tests => "tests",
        Demo => "demo",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubProject {
    pub project_id: String,
    pub name: String,
    pub repo_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills_covered: Vec<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub has_readme: bool,
    #[serde(default)]
    pub has_docs: bool,
    #[serde(default)]
    pub has_tests: bool,
    #[serde(default)]
    pub has_demo: bool,
    #[serde(default)]
    pub blog_post_url: Option<String>,
}

impl GitHubProject {
    pub fn has_feature(&self, feature: ProjectFeature) -> bool {
        match feature {
            ProjectFeature::Readme => self.has_readme,
            ProjectFeature::Docs => self.has_docs,
            ProjectFeature::Tests => self.has_tests,
            ProjectFeature::Demo => self.has_demo,
        }
    }

    fn feature_flag_mut(&mut self, feature: ProjectFeature) -> &mut bool {
        match feature {
            ProjectFeature::Readme => &mut self.has_readme,
            ProjectFeature::Docs => &mut self.has_docs,
            ProjectFeature::Tests => &mut self.has_tests,
            ProjectFeature::Demo => &mut self.has_demo,
        }
    }

    pub fn set_feature(&mut self, feature: ProjectFeature, value: bool) {
        *self.feature_flag_mut(feature) = value;
    }
}
