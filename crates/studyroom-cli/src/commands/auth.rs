use clap::Subcommand;
use studyroom_core::coach::{credentials, resolve_api_key, KeySource};

use super::{load_config, CmdResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the coaching API key in the OS keyring
    SetKey {
        /// API key
        key: String,
    },
    /// Remove the stored API key
    Clear,
    /// Show where the API key comes from
    Status,
}

pub fn run(action: AuthAction) -> CmdResult {
    match action {
        AuthAction::SetKey { key } => {
            let key = key.trim();
            if key.is_empty() {
                return Err("API key must not be empty".into());
            }
            credentials::set(key)?;
            println!("API key stored in keyring");
        }
        AuthAction::Clear => {
            credentials::delete()?;
            println!("API key removed from keyring");
        }
        AuthAction::Status => {
            let config = load_config();
            let status = match resolve_api_key(&config.coach) {
                Some((_, KeySource::Env)) => format!("API key from ${}", config.coach.api_key_env),
                Some((_, KeySource::Keyring)) => "API key from keyring".to_string(),
                None => "no API key configured".to_string(),
            };
            println!("{status}");
            if !config.coach.enabled {
                println!("coaching is disabled (coach.enabled = false)");
            }
        }
    }
    Ok(())
}
