use crate::core::config::config_models::parse_channel_id;
use crate::core::config::{BotConfig, ConfigError, ConfigStore, DEFAULT_PREFIX};
use async_trait::async_trait;

/// Snapshot of the environment variables the bot reads.
///
/// Captured once so stores (and their tests) never race on the process env.
#[derive(Debug, Clone, Default)]
pub struct EnvValues {
    pub token: Option<String>,
    pub prefix: Option<String>,
    pub log_channel: Option<String>,
}

impl EnvValues {
    pub fn from_process() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            token: read("DISCORD_BOT_TOKEN"),
            prefix: read("prefix"),
            log_channel: read("log_channel"),
        }
    }

    pub(crate) fn log_channel_id(&self) -> Option<u64> {
        let raw = self.log_channel.as_deref()?;
        let parsed = parse_channel_id(raw);
        if parsed.is_none() {
            tracing::warn!("Ignoring log_channel={:?}: not a channel id", raw);
        }
        parsed
    }
}

/// Environment-only configuration. `setlogchannel` changes last until restart.
pub struct EnvConfigStore {
    env: EnvValues,
}

impl EnvConfigStore {
    pub fn new(env: EnvValues) -> Self {
        Self { env }
    }
}

#[async_trait]
impl ConfigStore for EnvConfigStore {
    async fn load(&self) -> Result<BotConfig, ConfigError> {
        let token = self.env.token.clone().ok_or(ConfigError::Missing("token"))?;

        let prefix = self.env.prefix.clone().unwrap_or_else(|| {
            tracing::warn!("No prefix configured, defaulting to {:?}", DEFAULT_PREFIX);
            DEFAULT_PREFIX.to_string()
        });

        let log_channel_id = self.env.log_channel_id();
        if log_channel_id.is_none() {
            tracing::warn!("No log channel configured; notifications are disabled until setlogchannel is used");
        }

        Ok(BotConfig {
            prefix,
            log_channel_id,
            ..BotConfig::new(token)
        })
    }

    async fn save_log_channel(&self, channel_id: Option<u64>) -> Result<(), ConfigError> {
        tracing::info!(
            ?channel_id,
            "Environment configuration is read-only; log channel change lasts until restart"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_is_fatal() {
        let store = EnvConfigStore::new(EnvValues::default());
        assert!(matches!(
            store.load().await,
            Err(ConfigError::Missing("token"))
        ));
    }

    #[tokio::test]
    async fn test_defaults_for_optional_values() {
        let store = EnvConfigStore::new(EnvValues {
            token: Some("secret".to_string()),
            ..Default::default()
        });
        let config = store.load().await.unwrap();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.log_channel_id, None);
    }

    #[tokio::test]
    async fn test_reads_all_values() {
        let store = EnvConfigStore::new(EnvValues {
            token: Some("secret".to_string()),
            prefix: Some("?".to_string()),
            log_channel: Some("1234".to_string()),
        });
        let config = store.load().await.unwrap();
        assert_eq!(config.token, "secret");
        assert_eq!(config.prefix, "?");
        assert_eq!(config.log_channel_id, Some(1234));
    }

    #[tokio::test]
    async fn test_invalid_log_channel_is_ignored() {
        let store = EnvConfigStore::new(EnvValues {
            token: Some("secret".to_string()),
            log_channel: Some("not-a-number".to_string()),
            ..Default::default()
        });
        assert_eq!(store.load().await.unwrap().log_channel_id, None);
    }

    #[tokio::test]
    async fn test_save_is_accepted_without_persisting() {
        let store = EnvConfigStore::new(EnvValues {
            token: Some("secret".to_string()),
            ..Default::default()
        });
        store.save_log_channel(Some(5)).await.unwrap();
        assert_eq!(store.load().await.unwrap().log_channel_id, None);
    }
}
