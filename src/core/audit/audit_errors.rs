use crate::core::config::ConfigError;

/// Everything that can go wrong between an event (or command) arriving and a card being sent.
///
/// Only the command-facing variants ever reach a user, through [`AuditError::user_reply`].
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Configuration unavailable: {0}")]
    ConfigMissing(String),
    #[error("Configuration invalid: {0}")]
    ConfigInvalid(String),
    #[error("Log channel {0} could not be resolved")]
    ChannelUnresolvable(u64),
    #[error("Missing permissions: {}", .0.join(", "))]
    InsufficientPermission(Vec<&'static str>),
    #[error("Command not found")]
    CommandNotFound,
    #[error("Command failed: {0}")]
    UnexpectedCommandFailure(String),
    #[error("Failed to send to channel {channel_id}: {reason}")]
    SendFailure { channel_id: u64, reason: String },
}

impl From<ConfigError> for AuditError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing(field) => AuditError::ConfigMissing(field.to_string()),
            ConfigError::Invalid(reason) => AuditError::ConfigInvalid(reason),
            ConfigError::PersistFailed(reason) => AuditError::UnexpectedCommandFailure(reason),
        }
    }
}

impl AuditError {
    pub fn user_reply(&self) -> &'static str {
        match self {
            AuditError::CommandNotFound => "Command not found!",
            AuditError::InsufficientPermission(_) => {
                "You don't have permission to use this command!"
            }
            _ => "An error occurred while executing the command.",
        }
    }
}
