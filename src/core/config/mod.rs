pub mod config_models;
pub mod config_service;
pub mod config_store;
#[cfg(test)]
pub mod mock_store;

pub use config_models::{BotConfig, DEFAULT_PREFIX, TOKEN_PLACEHOLDER};
pub use config_service::ConfigService;
pub use config_store::{ConfigError, ConfigStore};
