//! Resource and project registries.
//!
//! Both are plain keyed collections inside [`AppState`](crate::model::AppState)
//! with validated status transitions; operations take the collection they
//! act on.

mod projects;
mod resources;

pub use projects::{
    add_project, find_project, portfolio_summary, set_project_feature, update_project,
    NewProject, PortfolioSummary, ProjectChecklist, ProjectUpdate,
};
pub use resources::{
    add_resource, find_resource, resource_summary, resources_by_topic, set_resource_status,
    NewResource, ResourceSummary,
};
