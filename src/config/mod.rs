mod types;

pub use types::*;

use crate::Result;
use std::{env, io::ErrorKind};
use tracing::debug;

/// Environment variable holding the chat API credential.
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
/// Environment variable overriding `model.path`.
pub const MODEL_PATH_ENV: &str = "MODEL_PATH";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path, |key| env::var(key).ok()).await
}

/// Reads `config_path` (defaults when the file is absent) and applies overrides from `lookup`.
pub async fn load_from<F>(config_path: &str, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    debug!("Loading configuration from: {}", config_path);

    let mut config = match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => Config::from_yaml_str(&config_str)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", config_path);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    config.apply_overrides(lookup);

    Ok(config)
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Applies environment-style overrides. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = lookup(API_KEY_ENV) {
            self.llm.api_key = api_key;
        }
        if let Some(path) = lookup(MODEL_PATH_ENV) {
            self.model.path = path;
        }
    }
}
