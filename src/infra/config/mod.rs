pub mod env_store;
pub mod json_store;

pub use env_store::{EnvConfigStore, EnvValues};
pub use json_store::JsonConfigStore;

use crate::core::config::{BotConfig, ConfigError, ConfigStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// The persistence strategy picked at startup.
pub enum ConfigBackend {
    Json(JsonConfigStore),
    Env(EnvConfigStore),
}

impl ConfigBackend {
    /// Use the JSON file when `CONFIG_PATH` is set or `config.json` exists,
    /// otherwise read everything from the environment.
    pub fn from_env() -> Self {
        let env = EnvValues::from_process();
        match std::env::var("CONFIG_PATH").ok().filter(|p| !p.trim().is_empty()) {
            Some(path) => ConfigBackend::Json(JsonConfigStore::new(PathBuf::from(path), env)),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                ConfigBackend::Json(JsonConfigStore::new(DEFAULT_CONFIG_PATH, env))
            }
            None => ConfigBackend::Env(EnvConfigStore::new(env)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ConfigBackend::Json(store) => format!("json file {}", store.path().display()),
            ConfigBackend::Env(_) => "environment (read-only)".to_string(),
        }
    }
}

#[async_trait]
impl ConfigStore for ConfigBackend {
    async fn load(&self) -> Result<BotConfig, ConfigError> {
        match self {
            ConfigBackend::Json(store) => store.load().await,
            ConfigBackend::Env(store) => store.load().await,
        }
    }

    async fn save_log_channel(&self, channel_id: Option<u64>) -> Result<(), ConfigError> {
        match self {
            ConfigBackend::Json(store) => store.save_log_channel(channel_id).await,
            ConfigBackend::Env(store) => store.save_log_channel(channel_id).await,
        }
    }
}
