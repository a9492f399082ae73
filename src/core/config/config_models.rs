/// Prefix used when neither the config file nor the environment sets one.
pub const DEFAULT_PREFIX: &str = "!";

/// Written in place of the real token whenever the config file is saved.
pub const TOKEN_PLACEHOLDER: &str = "YOUR_BOT_TOKEN_HERE";

/// Everything the bot needs to know at runtime.
///
/// Only `log_channel_id` changes after startup (through `setlogchannel`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub token: String,
    pub prefix: String,
    pub log_channel_id: Option<u64>,
}

impl BotConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            log_channel_id: None,
        }
    }
}

/// Parse a channel id the way it shows up in env vars and older config files.
pub fn parse_channel_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<u64>().ok().filter(|id| *id != 0)
}
