mod config;

pub use config::{CoachConfig, Config, GoalsConfig, ReviewConfig, RoadmapConfig, CONFIG_FILE};

use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::model::AppState;

pub const STATE_FILE: &str = "app_state.json";

/// Returns the data directory, creating it if needed.
///
/// `STUDYROOM_DATA_DIR` wins when set. Otherwise `~/.config/studyroom[-dev]/`,
/// with `STUDYROOM_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("STUDYROOM_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("STUDYROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("studyroom-dev")
            } else {
                base_dir.join("studyroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Whole-document JSON store for [`AppState`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store at `<data_dir>/app_state.json`.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self::with_path(data_dir()?.join(STATE_FILE)))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the stored state, or a freshly seeded one if nothing is stored yet.
    ///
    /// The loaded tree is normalized before it is returned.
    ///
    /// # Errors
    /// [`StorageError::Parse`] if the file exists but is not a valid state.
    pub fn load(&self, now: DateTime<Utc>) -> Result<AppState, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved state; seeding default roadmap");
                return Ok(AppState::fresh(now));
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut state: AppState =
            serde_json::from_str(&content).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;
        state.normalize();
        tracing::debug!(path = %self.path.display(), "state loaded");
        Ok(state)
    }

    /// Stamp `last_updated` and atomically replace the stored document.
    pub fn save(&self, state: &mut AppState, now: DateTime<Utc>) -> Result<(), StorageError> {
        state.last_updated = now;
        self.write(state)
    }

    /// Write `state` as-is via a temp sibling and rename.
    pub fn write(&self, state: &AppState) -> Result<(), StorageError> {
        let write_err = |source: std::io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = std::fs::File::create(&tmp).map_err(write_err)?;
        file.write_all(&json).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "state saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_fresh_state() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::with_path(temp_dir.path().join(STATE_FILE));

        let state = store.load(Utc::now()).unwrap();
        assert!(!store.exists());
        assert_eq!(state.roadmap.years.len(), 2);
    }

    #[test]
    fn save_then_load_roundtrips() {
        let temp_dir = TempDir::new().unwrap();
        let store = StateStore::with_path(temp_dir.path().join("nested").join(STATE_FILE));
        let now = Utc::now();

        let mut state = store.load(now).unwrap();
        state.roadmap.mark_task_complete("w1_t1", now).unwrap();
        state.sync_milestones();
        store.save(&mut state, now).unwrap();

        let reloaded = store.load(now).unwrap();
        assert_eq!(reloaded, state);
        assert!(!temp_dir.path().join("nested").join("app_state.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(STATE_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = StateStore::with_path(&path).load(Utc::now()).unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
