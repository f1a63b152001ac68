//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a throwaway data directory and verify
//! outputs and the persisted state.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            dir: TempDir::new().unwrap(),
        };
        // Keep the coach offline regardless of the host environment.
        let (_, _, code) = ws.run(&["config", "set", "coach.enabled", "false"]);
        assert_eq!(code, 0, "config set failed");
        ws
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_studyroom"));
        cmd.args(args)
            .env("STUDYROOM_DATA_DIR", self.dir.path())
            .env_remove("STUDYROOM_LOG")
            .env_remove("OPENAI_API_KEY");
        cmd
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = self.command(args).output().expect("Failed to execute CLI command");
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            output.status.code().unwrap_or(-1),
        )
    }

    fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut args = args.to_vec();
        args.push("--json");
        let (stdout, stderr, code) = self.run(&args);
        assert_eq!(code, 0, "{args:?} failed: {stderr}");
        serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("bad JSON from {args:?}: {e}\n{stdout}"))
    }

    fn run_with_stdin(&self, args: &[&str], stdin: &str) -> (String, i32) {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn CLI");
        child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
        let output = child.wait_with_output().unwrap();
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            output.status.code().unwrap_or(-1),
        )
    }

    fn state(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.dir.path().join("app_state.json")).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

#[test]
fn test_focus_on_fresh_state() {
    let ws = Workspace::new();
    let (stdout, _, code) = ws.run(&["focus"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Setup & Basics"));
    assert!(stdout.contains("Python Essentials"));
}

#[test]
fn test_roadmap_and_tasks() {
    let ws = Workspace::new();
    let (stdout, _, code) = ws.run(&["roadmap"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Year 1: AI/ML Foundations"));

    let tasks = ws.run_json(&["tasks", "--limit", "3"]);
    assert_eq!(tasks.as_array().unwrap().len(), 3);
    assert_eq!(tasks[0]["task"]["task_id"], "w1_t1");
}

#[test]
fn test_mark_task_propagates() {
    let ws = Workspace::new();
    let result = ws.run_json(&["mark-task", "w1_t1"]);
    assert_eq!(result["task"]["already_completed"], false);
    assert_eq!(result["completed_tasks"], 1);

    let state = ws.state();
    let year = &state["roadmap"]["years"][0];
    assert_eq!(year["status"], "in_progress");
    assert_eq!(state["progress"]["completed_milestones"], 1);

    let again = ws.run_json(&["mark-task", "w1_t1"]);
    assert_eq!(again["task"]["already_completed"], true);
}

#[test]
fn test_unknown_task_fails_without_writing() {
    let ws = Workspace::new();
    let (_, stderr, code) = ws.run(&["mark-task", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
    assert!(!ws.dir.path().join("app_state.json").exists());
}

#[test]
fn test_log_session_json() {
    let ws = Workspace::new();
    let result = ws.run_json(&[
        "log",
        "1.5",
        "Linear_Algebra,NumPy",
        "3Blue1Brown",
        "eigenvectors",
        "focused",
        "--date",
        "2026-03-02",
    ]);
    assert_eq!(result["session"]["date"], "2026-03-02");
    assert_eq!(result["session"]["topics_covered"][0], "Linear Algebra");
    assert_eq!(result["current_streak"], 1);

    let progress = ws.run_json(&["progress"]);
    assert_eq!(progress["total_sessions"], 1);
    assert_eq!(progress["total_hours"], 1.5);
}

#[test]
fn test_log_rejects_non_positive_hours() {
    let ws = Workspace::new();
    let (_, stderr, code) = ws.run(&["log", "0", "Python"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));

    let (_, _, code) = ws.run(&["log", "-2", "Python"]);
    assert_ne!(code, 0);
}

#[test]
fn test_flashcard_review_with_piped_input() {
    let ws = Workspace::new();
    let deck = ws.run_json(&["create-deck", "Math", "Core math"]);
    let deck_id = deck["deck_id"].as_str().unwrap().to_string();
    ws.run_json(&["add-card", &deck_id, "What is 2+2?", "4"]);
    ws.run_json(&["add-card", &deck_id, "d/dx x^2?", "2x"]);

    let (stdout, code) = ws.run_with_stdin(&["review"], "\nwhatever\ne\n\nd\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Unrecognized answer: whatever"));
    assert!(stdout.contains("Reviewed 2 card(s)."));

    let state = ws.state();
    let cards = &state["flashcard_decks"][0]["cards"];
    assert_eq!(cards[0]["status"], "reviewing");
    assert_eq!(cards[1]["status"], "difficult");
    assert_eq!(state["flashcard_decks"][0]["total_reviews"], 2);

    let stats = ws.run_json(&["flashcards"]);
    assert_eq!(stats["total_reviews"], 2);
}

#[test]
fn test_add_card_to_missing_deck_fails() {
    let ws = Workspace::new();
    let (_, stderr, code) = ws.run(&["add-card", "missing", "q", "a"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("missing"));
}

#[test]
fn test_generate_tips_uses_templates_offline() {
    let ws = Workspace::new();
    let tips = ws.run_json(&["generate-tips"]);
    let tips = tips.as_array().unwrap();
    assert_eq!(tips.len(), 4);
    assert!(tips.iter().all(|t| t["source"] == "template"));

    let latest = ws.run_json(&["tips"]);
    assert_eq!(latest.as_array().unwrap().len(), 4);
}

#[test]
fn test_coach_commands_hint_when_unavailable() {
    let ws = Workspace::new();
    let (stdout, _, code) = ws.run(&["suggest", "Transformers"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("AI coach unavailable"));
}

#[test]
fn test_resources_and_projects() {
    let ws = Workspace::new();
    let resource = ws.run_json(&[
        "add-resource",
        "course",
        "Deep Learning Specialization",
        "https://example.com/dl",
        "intermediate",
        "Neural_Networks",
    ]);
    let id = resource["resource_id"].as_str().unwrap().to_string();
    let updated = ws.run_json(&["resource-status", &id, "completed"]);
    assert!(updated["completed_at"].is_string());

    let listed = ws.run_json(&["resources", "--topic", "neural networks"]);
    assert_eq!(listed["resources"].as_array().unwrap().len(), 1);

    let (_, _, code) = ws.run(&["add-resource", "podcast", "x", "https://example.com"]);
    assert_ne!(code, 0);

    let project = ws.run_json(&["add-project", "ml-from-scratch", "https://github.com/me/ml", "NumPy ML"]);
    let pid = project["project_id"].as_str().unwrap().to_string();
    ws.run_json(&["add-feature", &pid, "readme"]);
    let updated = ws.run_json(&["update-project", &pid, "in_progress"]);
    assert_eq!(updated["status"], "in_progress");
    assert_eq!(updated["has_readme"], true);
}

#[test]
fn test_config_get_set() {
    let ws = Workspace::new();
    let (stdout, _, code) = ws.run(&["config", "get", "review.default_limit"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "10");

    let (_, _, code) = ws.run(&["config", "set", "review.default_limit", "3"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = ws.run(&["config", "get", "review.default_limit"]);
    assert_eq!(stdout.trim(), "3");

    let (_, _, code) = ws.run(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
}
