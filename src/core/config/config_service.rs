use super::config_models::BotConfig;
use super::config_store::{ConfigError, ConfigStore};
use tokio::sync::RwLock;

/// Holds the live configuration snapshot and writes changes through to the store.
pub struct ConfigService<S: ConfigStore> {
    store: S,
    current: RwLock<BotConfig>,
}

impl<S: ConfigStore> ConfigService<S> {
    /// Load the configuration once. Fails only when the token cannot be found.
    pub async fn load(store: S) -> Result<Self, ConfigError> {
        let config = store.load().await?;
        Ok(Self {
            store,
            current: RwLock::new(config),
        })
    }

    pub async fn get(&self) -> BotConfig {
        self.current.read().await.clone()
    }

    pub async fn log_channel_id(&self) -> Option<u64> {
        self.current.read().await.log_channel_id
    }

    /// Persist first, then update the snapshot, so a failed write leaves both untouched.
    pub async fn set_log_channel(&self, channel_id: u64) -> Result<(), ConfigError> {
        self.write_log_channel(Some(channel_id)).await
    }

    /// Put back a previous value after a `setlogchannel` that failed halfway.
    pub async fn restore_log_channel(&self, previous: Option<u64>) -> Result<(), ConfigError> {
        self.write_log_channel(previous).await
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn write_log_channel(&self, channel_id: Option<u64>) -> Result<(), ConfigError> {
        let mut current = self.current.write().await;
        self.store.save_log_channel(channel_id).await?;
        current.log_channel_id = channel_id;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::mock_store::MockStore;
    use async_trait::async_trait;

    struct MissingTokenStore;

    #[async_trait]
    impl ConfigStore for MissingTokenStore {
        async fn load(&self) -> Result<BotConfig, ConfigError> {
            Err(ConfigError::Missing("token"))
        }

        async fn save_log_channel(&self, _channel_id: Option<u64>) -> Result<(), ConfigError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_set_log_channel_updates_snapshot_and_store() {
        let service = ConfigService::load(MockStore::new(BotConfig::new("t")))
            .await
            .unwrap();

        service.set_log_channel(99).await.unwrap();

        assert_eq!(service.log_channel_id().await, Some(99));
        assert_eq!(service.store().saved(), vec![Some(99)]);
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_snapshot_unchanged() {
        let mut initial = BotConfig::new("t");
        initial.log_channel_id = Some(5);
        let mut store = MockStore::new(initial);
        store.fail_saves = true;
        let service = ConfigService::load(store).await.unwrap();

        let result = service.set_log_channel(6).await;

        assert!(matches!(result, Err(ConfigError::PersistFailed(_))));
        assert_eq!(service.log_channel_id().await, Some(5));
    }

    #[tokio::test]
    async fn test_restore_log_channel() {
        let service = ConfigService::load(MockStore::new(BotConfig::new("t")))
            .await
            .unwrap();

        service.set_log_channel(10).await.unwrap();
        service.restore_log_channel(None).await.unwrap();

        assert_eq!(service.get().await.log_channel_id, None);
    }

    #[tokio::test]
    async fn test_missing_token_is_reported() {
        let result = ConfigService::load(MissingTokenStore).await;
        assert!(matches!(result, Err(ConfigError::Missing("token"))));
    }
}
