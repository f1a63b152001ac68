pub mod auth;
pub mod coach;
pub mod config;
pub mod flashcards;
pub mod progress;
pub mod projects;
pub mod resources;
pub mod roadmap;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use studyroom_core::{AppState, Config, StateStore};

pub type CmdResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// How results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    /// Pretty JSON of `value` with `--json`, otherwise the rendered text.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> CmdResult {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

/// Load the state, run `op`, and save only if `op` succeeded.
pub fn with_state<T, E>(op: impl FnOnce(&mut AppState, DateTime<Utc>) -> Result<T, E>) -> CmdResult<T>
where
    E: Into<Box<dyn std::error::Error>>,
{
    let store = StateStore::open()?;
    let now = Utc::now();
    let mut state = store.load(now)?;
    let value = op(&mut state, now).map_err(Into::into)?;
    store.save(&mut state, now)?;
    Ok(value)
}

/// Load the state for a read-only report.
pub fn read_state() -> CmdResult<(AppState, DateTime<Utc>)> {
    let now = Utc::now();
    let state = StateStore::open()?.load(now)?;
    Ok((state, now))
}

pub fn load_config() -> Config {
    Config::load_or_default()
}

/// Local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Split a comma-separated argument; `_` stands for a space.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(|item| item.trim().replace('_', " "))
            .filter(|item| !item.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_handles_underscores_and_blanks() {
        assert_eq!(
            split_list(Some("Linear_Algebra, NumPy,,")),
            vec!["Linear Algebra".to_string(), "NumPy".to_string()]
        );
        assert!(split_list(None).is_empty());
    }
}
