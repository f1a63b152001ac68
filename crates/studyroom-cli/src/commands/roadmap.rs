use clap::Subcommand;
use serde_json::json;

use super::{load_config, read_state, with_state, CmdResult, Output};
use crate::render;

#[derive(Subcommand)]
pub enum RoadmapCommand {
    /// Show the whole curriculum with completion markers
    Roadmap,
    /// Show the current year, quarter, month and week
    Focus,
    /// List the next incomplete tasks
    Tasks {
        /// Maximum number of tasks (default: roadmap.upcoming_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Mark a task as completed
    MarkTask {
        /// Task ID (e.g. w1_t1)
        task_id: String,
    },
}

pub fn run(command: RoadmapCommand, out: Output) -> CmdResult {
    match command {
        RoadmapCommand::Roadmap => {
            let (state, _) = read_state()?;
            out.emit(&state.roadmap, || render::roadmap(&state.roadmap))
        }
        RoadmapCommand::Focus => {
            let (state, _) = read_state()?;
            let focus = state.roadmap.current_focus();
            out.emit(&focus, || render::focus(&focus))
        }
        RoadmapCommand::Tasks { limit } => {
            let limit = limit.unwrap_or_else(|| load_config().roadmap.upcoming_limit);
            let (state, _) = read_state()?;
            let tasks: Vec<_> = state.roadmap.upcoming_tasks(limit).collect();
            out.emit(&tasks, || render::upcoming(&tasks))
        }
        RoadmapCommand::MarkTask { task_id } => {
            let completion = with_state(|state, now| {
                let completion = state.roadmap.mark_task_complete(&task_id, now)?;
                state.sync_milestones();
                Ok::<_, studyroom_core::CoreError>((completion, state.roadmap.milestone_counts()))
            })?;
            let (completion, (done, total)) = completion;
            out.emit(
                &json!({ "task": completion, "completed_tasks": done, "total_tasks": total }),
                || {
                    if completion.already_completed {
                        format!("Task already completed: {}", completion.name)
                    } else {
                        format!("Completed: {} ({done}/{total} tasks done)", completion.name)
                    }
                },
            )
        }
    }
}
