//! Deciding whether the configured log channel can actually receive cards.

use super::audit_errors::AuditError;
use crate::core::config::{ConfigError, ConfigService, ConfigStore};

/// The handful of permission bits this bot cares about in a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelPermissions {
    pub view_channel: bool,
    pub send_messages: bool,
    pub embed_links: bool,
}

impl ChannelPermissions {
    /// Permissions `setlogchannel` insists on, in display order.
    pub fn missing_for_setup(&self) -> Vec<&'static str> {
        let required = [
            (self.view_channel, "View Channel"),
            (self.send_messages, "Send Messages"),
            (self.embed_links, "Embed Links"),
        ];
        required
            .into_iter()
            .filter(|(held, _)| !*held)
            .map(|(_, name)| name)
            .collect()
    }

    /// Posting a card only needs send + embed.
    pub fn missing_for_notifications(&self) -> Vec<&'static str> {
        let required = [
            (self.send_messages, "Send Messages"),
            (self.embed_links, "Embed Links"),
        ];
        required
            .into_iter()
            .filter(|(held, _)| !*held)
            .map(|(_, name)| name)
            .collect()
    }
}

/// Read-only view of a guild, as far as log channel lookup needs it.
pub trait GuildChannels {
    /// The bot's effective permissions in `channel_id`, or `None` when the
    /// channel does not exist in this guild.
    fn bot_permissions_in(&self, channel_id: u64) -> Option<ChannelPermissions>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogChannelLookup {
    Ready(u64),
    Unset,
    NotFound(u64),
    MissingPermissions {
        channel_id: u64,
        missing: Vec<&'static str>,
    },
}

impl LogChannelLookup {
    pub fn into_result(self) -> Result<u64, AuditError> {
        match self {
            LogChannelLookup::Ready(id) => Ok(id),
            LogChannelLookup::Unset => Err(AuditError::ConfigMissing("log_channel".to_string())),
            LogChannelLookup::NotFound(id) => Err(AuditError::ChannelUnresolvable(id)),
            LogChannelLookup::MissingPermissions { missing, .. } => {
                Err(AuditError::InsufficientPermission(missing))
            }
        }
    }
}

pub fn resolve_log_channel(
    log_channel_id: Option<u64>,
    guild: &impl GuildChannels,
) -> LogChannelLookup {
    let channel_id = match log_channel_id {
        Some(id) => id,
        None => return LogChannelLookup::Unset,
    };

    let permissions = match guild.bot_permissions_in(channel_id) {
        Some(p) => p,
        None => return LogChannelLookup::NotFound(channel_id),
    };

    let missing = permissions.missing_for_notifications();
    if !missing.is_empty() {
        return LogChannelLookup::MissingPermissions {
            channel_id,
            missing,
        };
    }

    LogChannelLookup::Ready(channel_id)
}

/// Outcome of pointing the log channel somewhere new.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogChannelClaim {
    /// Persisted; `previous` is what to restore if the announcement fails.
    Saved { previous: Option<u64> },
    /// Nothing was written.
    MissingPermissions(Vec<&'static str>),
}

/// Check setup permissions, then persist. Configuration is untouched unless
/// every permission `setlogchannel` needs is held.
pub async fn claim_log_channel<S: ConfigStore>(
    config: &ConfigService<S>,
    channel_id: u64,
    permissions: ChannelPermissions,
) -> Result<LogChannelClaim, ConfigError> {
    let missing = permissions.missing_for_setup();
    if !missing.is_empty() {
        return Ok(LogChannelClaim::MissingPermissions(missing));
    }

    let previous = config.log_channel_id().await;
    config.set_log_channel(channel_id).await?;
    Ok(LogChannelClaim::Saved { previous })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::mock_store::MockStore;
    use crate::core::config::BotConfig;
    use std::collections::HashMap;

    struct FakeGuild {
        channels: HashMap<u64, ChannelPermissions>,
    }

    impl GuildChannels for FakeGuild {
        fn bot_permissions_in(&self, channel_id: u64) -> Option<ChannelPermissions> {
            self.channels.get(&channel_id).copied()
        }
    }

    fn all() -> ChannelPermissions {
        ChannelPermissions {
            view_channel: true,
            send_messages: true,
            embed_links: true,
        }
    }

    fn guild_with(channel_id: u64, permissions: ChannelPermissions) -> FakeGuild {
        FakeGuild {
            channels: HashMap::from([(channel_id, permissions)]),
        }
    }

    #[test]
    fn test_unset_channel_resolves_to_nothing() {
        let guild = guild_with(1, all());
        let lookup = resolve_log_channel(None, &guild);
        assert_eq!(lookup, LogChannelLookup::Unset);
        assert!(matches!(
            lookup.into_result(),
            Err(AuditError::ConfigMissing(_))
        ));
    }

    #[test]
    fn test_unknown_channel_resolves_to_nothing() {
        let guild = guild_with(1, all());
        let lookup = resolve_log_channel(Some(2), &guild);
        assert_eq!(lookup, LogChannelLookup::NotFound(2));
        assert!(matches!(
            lookup.into_result(),
            Err(AuditError::ChannelUnresolvable(2))
        ));
    }

    #[test]
    fn test_missing_embed_links_blocks_notifications() {
        let guild = guild_with(
            1,
            ChannelPermissions {
                embed_links: false,
                ..all()
            },
        );
        let lookup = resolve_log_channel(Some(1), &guild);
        assert_eq!(
            lookup,
            LogChannelLookup::MissingPermissions {
                channel_id: 1,
                missing: vec!["Embed Links"],
            }
        );
    }

    #[test]
    fn test_view_channel_is_not_needed_for_notifications() {
        let guild = guild_with(
            1,
            ChannelPermissions {
                view_channel: false,
                ..all()
            },
        );
        assert_eq!(resolve_log_channel(Some(1), &guild), LogChannelLookup::Ready(1));
    }

    #[test]
    fn test_setup_lists_exactly_the_missing_permissions() {
        assert!(all().missing_for_setup().is_empty());
        assert_eq!(
            ChannelPermissions::default().missing_for_setup(),
            vec!["View Channel", "Send Messages", "Embed Links"]
        );
        assert_eq!(
            ChannelPermissions {
                send_messages: false,
                ..all()
            }
            .missing_for_setup(),
            vec!["Send Messages"]
        );
    }

    async fn config_with(log_channel_id: Option<u64>) -> ConfigService<MockStore> {
        let initial = BotConfig {
            log_channel_id,
            ..BotConfig::new("t")
        };
        ConfigService::load(MockStore::new(initial)).await.unwrap()
    }

    #[tokio::test]
    async fn test_claim_with_missing_permissions_leaves_config_unchanged() {
        let config = config_with(Some(3)).await;
        let permissions = ChannelPermissions {
            view_channel: true,
            ..Default::default()
        };

        let claim = claim_log_channel(&config, 7, permissions).await.unwrap();

        assert_eq!(
            claim,
            LogChannelClaim::MissingPermissions(vec!["Send Messages", "Embed Links"])
        );
        assert!(config.store().saved().is_empty());
        assert_eq!(config.log_channel_id().await, Some(3));
    }

    #[tokio::test]
    async fn test_claim_persists_and_remembers_previous() {
        let config = config_with(Some(3)).await;

        let claim = claim_log_channel(&config, 7, all()).await.unwrap();

        assert_eq!(claim, LogChannelClaim::Saved { previous: Some(3) });
        assert_eq!(config.store().saved(), vec![Some(7)]);
        assert_eq!(config.log_channel_id().await, Some(7));
    }
}
