// Resolving the configured log channel against the live guild cache.

use crate::core::audit::{
    resolve_log_channel, AuditError, ChannelPermissions, GuildChannels, LogChannelLookup,
    Notification,
};
use crate::discord::audit::formatter::format_notification;
use crate::discord::Data;
use poise::serenity_prelude::{self as serenity, Context};

pub fn channel_permissions(permissions: serenity::Permissions) -> ChannelPermissions {
    ChannelPermissions {
        view_channel: permissions.view_channel(),
        send_messages: permissions.send_messages(),
        embed_links: permissions.embed_links(),
    }
}

/// The bot's effective permissions in `channel`, computed from the cached guild.
/// `None` when the guild or the bot's member entry isn't cached.
pub fn bot_permissions_in(
    ctx: &Context,
    channel: &serenity::GuildChannel,
) -> Option<ChannelPermissions> {
    let bot_id = ctx.cache.current_user().id;
    let guild = ctx.cache.guild(channel.guild_id)?;
    let member = guild.members.get(&bot_id)?;
    Some(channel_permissions(guild.user_permissions_in(channel, member)))
}

struct CachedGuild<'a> {
    ctx: &'a Context,
    guild_id: serenity::GuildId,
}

impl GuildChannels for CachedGuild<'_> {
    fn bot_permissions_in(&self, channel_id: u64) -> Option<ChannelPermissions> {
        let bot_id = self.ctx.cache.current_user().id;
        let guild = self.ctx.cache.guild(self.guild_id)?;
        let channel = guild.channels.get(&serenity::ChannelId::new(channel_id))?;

        match guild.members.get(&bot_id) {
            Some(member) => Some(channel_permissions(guild.user_permissions_in(channel, member))),
            None => {
                tracing::warn!(
                    "Bot member not cached in guild {}; treating log channel {} as unusable",
                    self.guild_id,
                    channel.name
                );
                Some(ChannelPermissions::default())
            }
        }
    }
}

/// Get the logging channel for the guild, or `None` if notifications should be skipped.
pub async fn get_log_channel(
    ctx: &Context,
    data: &Data,
    guild_id: serenity::GuildId,
) -> Option<serenity::ChannelId> {
    let configured = data.config.log_channel_id().await;

    let lookup = resolve_log_channel(configured, &CachedGuild { ctx, guild_id });
    if lookup == LogChannelLookup::Unset {
        return None;
    }

    match lookup.into_result() {
        Ok(id) => Some(serenity::ChannelId::new(id)),
        Err(e) => {
            tracing::warn!("Log channel unusable in guild {}: {}", guild_id, e);
            None
        }
    }
}

/// Send a card, logging (never retrying) a failed send.
pub async fn send_notification(
    ctx: &Context,
    channel_id: serenity::ChannelId,
    notification: &Notification,
) {
    let message = serenity::CreateMessage::new().embed(format_notification(notification));

    if let Err(e) = channel_id.send_message(&ctx.http, message).await {
        let failure = AuditError::SendFailure {
            channel_id: channel_id.get(),
            reason: e.to_string(),
        };
        tracing::error!("{}", failure);
    }
}
