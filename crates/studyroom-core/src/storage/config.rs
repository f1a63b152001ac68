//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Coaching endpoint, model and timeout
//! - Review session size
//! - Roadmap listing length
//! - Weekly study-hours goal
//!
//! Configuration is stored at `~/.config/studyroom/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "config.toml";

/// Language-model coaching settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Environment variable consulted before the keyring.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default = "default_review_limit")]
    pub default_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapConfig {
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalsConfig {
    #[serde(default = "default_weekly_hours_target")]
    pub weekly_hours_target: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyroom/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub coach: CoachConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub roadmap: RoadmapConfig,
    #[serde(default)]
    pub goals: GoalsConfig,
}

fn default_true() -> bool {
    true
}
fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".into()
}
fn default_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn default_review_limit() -> usize {
    crate::flashcards::DEFAULT_REVIEW_LIMIT
}
fn default_upcoming_limit() -> usize {
    crate::curriculum::DEFAULT_UPCOMING_LIMIT
}
fn default_weekly_hours_target() -> f64 {
    15.0
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            default_limit: default_review_limit(),
        }
    }
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            upcoming_limit: default_upcoming_limit(),
        }
    }
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            weekly_hours_target: default_weekly_hours_target(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            coach: CoachConfig::default(),
            review: ReviewConfig::default(),
            roadmap: RoadmapConfig::default(),
            goals: GoalsConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("expected true or false, got '{value}'")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            value
                                .parse::<f64>()
                                .ok()
                                .and_then(serde_json::Number::from_f64)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn flatten_into(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
        match value {
            serde_json::Value::Object(map) => {
                for (k, v) in map {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    Self::flatten_into(&key, v, out);
                }
            }
            serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
            other => out.push((prefix.to_string(), other.to_string())),
        }
    }

    /// `~/.config/studyroom/config.toml`
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from(CONFIG_FILE),
            message: e.to_string(),
        })?;
        Ok(dir.join(CONFIG_FILE))
    }

    /// Load from the data directory, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load `path`, creating it with defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                tracing::debug!(path = %path.display(), "config loaded");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a leaf value by dot-separated key. The caller persists.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type or constraints; `self` is left unchanged then.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Every leaf as `(dot.key, value)`, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            Self::flatten_into("", &json, &mut out);
        }
        out
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let endpoint = url::Url::parse(&self.coach.endpoint)
            .map_err(|e| invalid("coach.endpoint", e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(invalid(
                "coach.endpoint",
                format!("unsupported scheme '{}'", endpoint.scheme()),
            ));
        }
        if self.coach.timeout_secs == 0 {
            return Err(invalid("coach.timeout_secs", "must be at least 1".into()));
        }
        if self.review.default_limit == 0 {
            return Err(invalid("review.default_limit", "must be at least 1".into()));
        }
        if self.roadmap.upcoming_limit == 0 {
            return Err(invalid("roadmap.upcoming_limit", "must be at least 1".into()));
        }
        if !self.goals.weekly_hours_target.is_finite() || self.goals.weekly_hours_target < 0.0 {
            return Err(invalid(
                "goals.weekly_hours_target",
                "must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let parsed: Config = toml::from_str("[coach]\nmodel = \"gpt-4o-mini\"\n").unwrap();
        assert_eq!(parsed.coach.model, "gpt-4o-mini");
        assert_eq!(parsed.coach.timeout_secs, 30);
        assert_eq!(parsed.review.default_limit, 10);
        assert_eq!(parsed.roadmap.upcoming_limit, 5);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("coach.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("review.default_limit").as_deref(), Some("10"));
        assert_eq!(cfg.get("coach.model").as_deref(), Some("gpt-3.5-turbo"));
        assert!(cfg.get("coach.missing_key").is_none());
        assert!(cfg.get("coach").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.set("coach.enabled", "false").unwrap();
        cfg.set("review.default_limit", "25").unwrap();
        cfg.set("goals.weekly_hours_target", "12.5").unwrap();
        cfg.set("goals.weekly_hours_target", "20").unwrap();
        assert!(!cfg.coach.enabled);
        assert_eq!(cfg.review.default_limit, 25);
        assert_eq!(cfg.goals.weekly_hours_target, 20.0);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.set("coach.nonexistent_key", "value").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
        assert!(matches!(cfg.set("coach", "x").unwrap_err(), ConfigError::UnknownKey(_)));
    }

    #[test]
    fn set_rejects_invalid_type_and_leaves_config_unchanged() {
        let mut cfg = Config::default();
        assert!(cfg.set("coach.enabled", "not_a_bool").is_err());
        assert!(cfg.set("review.default_limit", "1.5").is_err());
        assert!(cfg.set("review.default_limit", "0").is_err());
        assert!(cfg.set("coach.endpoint", "not a url").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn entries_list_every_leaf() {
        let keys: Vec<String> = Config::default().entries().into_iter().map(|(k, _)| k).collect();
        assert!(keys.contains(&"coach.endpoint".to_string()));
        assert!(keys.contains(&"goals.weekly_hours_target".to_string()));
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn load_from_creates_defaults_then_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);

        let first = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let mut changed = first.clone();
        changed.set("roadmap.upcoming_limit", "8").unwrap();
        changed.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.roadmap.upcoming_limit, 8);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[coach\nenabled = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
    }
}
