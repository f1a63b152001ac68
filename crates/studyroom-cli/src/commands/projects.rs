use clap::Subcommand;
use studyroom_core::model::{ProjectFeature, ProjectStatus};
use studyroom_core::registry::{
    add_project, portfolio_summary, set_project_feature, update_project, NewProject, ProjectUpdate,
};

use super::{read_state, split_list, with_state, CmdResult, Output};
use crate::render;

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Show the portfolio with feature checklists
    Projects,
    /// Register a portfolio project
    AddProject {
        name: String,
        /// Repository URL
        url: String,
        description: String,
        /// Comma-separated skills; use _ for spaces
        skills: Option<String>,
    },
    /// Change a project's status (planning, in_progress, completed)
    UpdateProject {
        project_id: String,
        status: ProjectStatus,
        #[arg(long)]
        notes: Option<String>,
        /// Write-up URL; pass an empty string to clear it
        #[arg(long)]
        blog_url: Option<String>,
    },
    /// Tick a feature (readme, docs, tests, demo)
    AddFeature {
        project_id: String,
        feature: ProjectFeature,
        /// Clear the feature instead
        #[arg(long)]
        unset: bool,
    },
}

pub fn run(command: ProjectCommand, out: Output) -> CmdResult {
    match command {
        ProjectCommand::Projects => {
            let (state, _) = read_state()?;
            let summary = portfolio_summary(&state.github_projects);
            out.emit(&summary, || render::portfolio(&summary))
        }
        ProjectCommand::AddProject {
            name,
            url,
            description,
            skills,
        } => {
            let input = NewProject::new(name, url, description).with_skills(split_list(skills.as_deref()));
            let project = with_state(|state, now| add_project(&mut state.github_projects, input, now))?;
            out.emit(&project, || {
                format!("Project added: {} ({})", project.project_id, project.name)
            })
        }
        ProjectCommand::UpdateProject {
            project_id,
            status,
            notes,
            blog_url,
        } => {
            let update = ProjectUpdate {
                notes,
                blog_post_url: blog_url,
                ..ProjectUpdate::status(status)
            };
            let project = with_state(|state, now| {
                update_project(&mut state.github_projects, &project_id, update, now)
            })?;
            out.emit(&project, || format!("{} is now {}", project.name, project.status))
        }
        ProjectCommand::AddFeature {
            project_id,
            feature,
            unset,
        } => {
            let project = with_state(|state, now| {
                set_project_feature(&mut state.github_projects, &project_id, feature, !unset, now)
            })?;
            out.emit(&project, || {
                let verb = if unset { "cleared" } else { "added" };
                format!("{}: {feature} {verb}", project.name)
            })
        }
    }
}
