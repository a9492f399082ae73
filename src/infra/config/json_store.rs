use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;

use super::env_store::EnvValues;
use crate::core::config::config_models::parse_channel_id;
use crate::core::config::{
    BotConfig, ConfigError, ConfigStore, DEFAULT_PREFIX, TOKEN_PLACEHOLDER,
};

/// On-disk layout of `config.json`. Keys we don't know about are kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    // Older files stored the id as a string, newer ones as a number.
    #[serde(default)]
    log_channel: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ConfigFile {
    fn token(&self) -> Option<String> {
        non_empty(self.token.as_deref()).filter(|t| t != TOKEN_PLACEHOLDER)
    }

    fn prefix(&self) -> Option<String> {
        non_empty(self.prefix.as_deref())
    }

    fn log_channel_id(&self) -> Option<u64> {
        match &self.log_channel {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_u64().filter(|id| *id != 0),
            Some(Value::String(s)) => parse_channel_id(s),
            Some(other) => {
                tracing::warn!("Ignoring log_channel={}: not a channel id", other);
                None
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// JSON file store (`token`, `prefix`, `log_channel`).
///
/// `DISCORD_BOT_TOKEN` overrides the file's token, and the file only ever gets
/// the placeholder written back.
pub struct JsonConfigStore {
    path: PathBuf,
    env: EnvValues,
    file: Mutex<ConfigFile>,
}

impl JsonConfigStore {
    pub fn new(path: impl AsRef<Path>, env: EnvValues) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            env,
            file: Mutex::new(ConfigFile::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<ConfigFile, ConfigError> {
        let text = fs::read_to_string(&self.path).await.map_err(|e| {
            ConfigError::Invalid(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&text).map_err(|e| {
            ConfigError::Invalid(format!("invalid JSON in {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn load(&self) -> Result<BotConfig, ConfigError> {
        let file = match self.read_file().await {
            Ok(file) => file,
            // A broken file only matters when the token can't come from the environment.
            Err(err) if self.env.token.is_some() => {
                tracing::warn!("{}; using environment values instead", err);
                ConfigFile::default()
            }
            Err(err) => {
                tracing::error!("{}", err);
                return Err(err);
            }
        };

        let token = self
            .env
            .token
            .clone()
            .or_else(|| file.token())
            .ok_or(ConfigError::Missing("token"))?;

        let prefix = file
            .prefix()
            .or_else(|| self.env.prefix.clone())
            .unwrap_or_else(|| {
                tracing::warn!("No prefix configured, defaulting to {:?}", DEFAULT_PREFIX);
                DEFAULT_PREFIX.to_string()
            });

        let log_channel_id = file.log_channel_id().or_else(|| self.env.log_channel_id());
        if log_channel_id.is_none() {
            tracing::warn!("No log channel configured; notifications are disabled until setlogchannel is used");
        }

        // Keep the file as read; only token and log_channel are ever written back.
        *self.file.lock().await = file;

        Ok(BotConfig {
            prefix,
            log_channel_id,
            ..BotConfig::new(token)
        })
    }

    async fn save_log_channel(&self, channel_id: Option<u64>) -> Result<(), ConfigError> {
        let mut file = self.file.lock().await;

        let redacted = ConfigFile {
            token: Some(TOKEN_PLACEHOLDER.to_string()),
            log_channel: Some(channel_id.map(Value::from).unwrap_or(Value::Null)),
            ..file.clone()
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::PersistFailed(e.to_string()))?;
        }

        let text = serde_json::to_string_pretty(&redacted)
            .map_err(|e| ConfigError::PersistFailed(e.to_string()))?;
        fs::write(&self.path, text)
            .await
            .map_err(|e| ConfigError::PersistFailed(e.to_string()))?;

        *file = redacted;
        Ok(())
    }
}
