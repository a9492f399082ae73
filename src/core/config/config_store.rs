use super::config_models::BotConfig;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),
    #[error("Invalid configuration source: {0}")]
    Invalid(String),
    #[error("Failed to persist configuration: {0}")]
    PersistFailed(String),
}

/// Where the bot's configuration comes from and goes back to.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read token, prefix and log channel. A missing token is the only hard error.
    async fn load(&self) -> Result<BotConfig, ConfigError>;

    /// Persist a new log channel id. Read-only backends accept and ignore it.
    async fn save_log_channel(&self, channel_id: Option<u64>) -> Result<(), ConfigError>;
}
