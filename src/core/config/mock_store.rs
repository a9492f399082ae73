// In-memory store shared by the config and setup tests.

use super::config_models::BotConfig;
use super::config_store::{ConfigError, ConfigStore};
use async_trait::async_trait;
use std::sync::Mutex;

pub struct MockStore {
    pub initial: BotConfig,
    pub saved: Mutex<Vec<Option<u64>>>,
    pub fail_saves: bool,
}

impl MockStore {
    pub fn new(initial: BotConfig) -> Self {
        Self {
            initial,
            saved: Mutex::new(Vec::new()),
            fail_saves: false,
        }
    }

    pub fn saved(&self) -> Vec<Option<u64>> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConfigStore for MockStore {
    async fn load(&self) -> Result<BotConfig, ConfigError> {
        Ok(self.initial.clone())
    }

    async fn save_log_channel(&self, channel_id: Option<u64>) -> Result<(), ConfigError> {
        if self.fail_saves {
            return Err(ConfigError::PersistFailed("disk full".to_string()));
        }
        self.saved.lock().unwrap().push(channel_id);
        Ok(())
    }
}
