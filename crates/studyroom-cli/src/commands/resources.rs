use clap::Subcommand;
use serde_json::json;
use studyroom_core::model::{DifficultyLevel, ResourceKind, ResourceStatus};
use studyroom_core::registry::{
    add_resource, resource_summary, resources_by_topic, set_resource_status, NewResource,
};

use super::{read_state, split_list, with_state, CmdResult, Output};
use crate::render;

#[derive(Subcommand)]
pub enum ResourceCommand {
    /// List learning resources
    Resources {
        /// Only resources mapped to this topic (case-insensitive)
        #[arg(long)]
        topic: Option<String>,
    },
    /// Register a learning resource
    AddResource {
        /// course, article, video, repo or paper
        #[arg(value_name = "TYPE")]
        kind: ResourceKind,
        title: String,
        url: String,
        /// beginner, intermediate or advanced
        difficulty: Option<DifficultyLevel>,
        /// Comma-separated topics; use _ for spaces (default: the title)
        topics: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a resource's status (todo, in_progress, completed)
    ResourceStatus { resource_id: String, status: ResourceStatus },
}

pub fn run(command: ResourceCommand, out: Output) -> CmdResult {
    match command {
        ResourceCommand::Resources { topic } => {
            let (state, _) = read_state()?;
            let summary = resource_summary(&state.resources);
            let listed: Vec<_> = match topic.as_deref() {
                Some(topic) => resources_by_topic(&state.resources, topic).collect(),
                None => state.resources.iter().collect(),
            };
            out.emit(&json!({ "summary": summary, "resources": listed }), || {
                render::resources(&listed, &summary)
            })
        }
        ResourceCommand::AddResource {
            kind,
            title,
            url,
            difficulty,
            topics,
            description,
        } => {
            let input = NewResource::new(kind, title, url)
                .with_difficulty(difficulty.unwrap_or_default())
                .with_topics(split_list(topics.as_deref()))
                .with_description(description.unwrap_or_default());
            let resource = with_state(|state, now| add_resource(&mut state.resources, input, now))?;
            out.emit(&resource, || {
                format!("Resource added: {} ({})", resource.resource_id, resource.title)
            })
        }
        ResourceCommand::ResourceStatus { resource_id, status } => {
            let resource = with_state(|state, now| {
                set_resource_status(&mut state.resources, &resource_id, status, now)
            })?;
            out.emit(&resource, || format!("{} is now {}", resource.title, resource.status))
        }
    }
}
