// Admin-only configuration commands.
//
// The pattern matches the rest of the Discord layer:
// 1. Extract primitive data from Discord types
// 2. Ask core what to do
// 3. Reply based on the result

use crate::core::audit::{
    claim_log_channel, AuditError, LogChannelClaim, Notification, NotificationColor,
};
use crate::discord::audit::formatter::format_notification;
use crate::discord::audit::log_channel::bot_permissions_in;
use crate::discord::{Context, Error};
use poise::serenity_prelude::{self as serenity, Mentionable};

pub fn log_channel_set_notification(channel_id: u64) -> Notification {
    Notification::new("✅ Log Channel Set", NotificationColor::Success)
        .description(format!(
            "Successfully set <#{}> as the log channel.",
            channel_id
        ))
        .field(
            "Next Steps",
            "The bot will now log all server events to this channel.\n\
             Make sure to keep the bot's permissions unchanged for proper logging.",
            false,
        )
}

pub fn log_channel_test_notification() -> Notification {
    Notification::new("🎉 Audit Log Channel Setup", NotificationColor::Info).description(
        "This channel has been set as the audit log channel.\n\
         You will see server events logged here.",
    )
}

pub fn missing_permissions_message(channel_mention: &str, missing: &[&str]) -> String {
    format!(
        "⚠️ I need the following permissions in {}: {}\nPlease grant these permissions and try again.",
        channel_mention,
        missing.join(", ")
    )
}

fn is_text_capable(kind: serenity::ChannelType) -> bool {
    matches!(kind, serenity::ChannelType::Text | serenity::ChannelType::News)
}

/// Set the channel for logging events.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "ADMINISTRATOR"
)]
pub async fn setlogchannel(
    ctx: Context<'_>,
    #[description = "Text channel to send audit logs to"] channel: serenity::Channel,
) -> Result<(), Error> {
    if let Err(e) = apply_log_channel(ctx, channel).await {
        tracing::error!("Error setting log channel: {}", e);
        ctx.say("❌ An error occurred while setting the log channel. Please try again.")
            .await?;
    }
    Ok(())
}

async fn apply_log_channel(ctx: Context<'_>, channel: serenity::Channel) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("Must be in a guild")?;

    let channel = match channel.guild() {
        Some(c) if c.guild_id == guild_id && is_text_capable(c.kind) => c,
        _ => {
            ctx.say("❌ The specified channel must be a text channel in this server!")
                .await?;
            return Ok(());
        }
    };

    let permissions = bot_permissions_in(ctx.serenity_context(), &channel)
        .ok_or("Could not determine bot permissions in the channel")?;
    let config = &ctx.data().config;
    let previous = match claim_log_channel(&**config, channel.id.get(), permissions)
        .await
        .map_err(AuditError::from)?
    {
        LogChannelClaim::Saved { previous } => previous,
        LogChannelClaim::MissingPermissions(missing) => {
            ctx.say(missing_permissions_message(
                &channel.mention().to_string(),
                &missing,
            ))
            .await?;
            return Ok(());
        }
    };
    tracing::info!("Log channel set to: {}", channel.name);

    if let Err(e) = announce_log_channel(ctx, &channel).await {
        // Don't leave a log channel configured that we just failed to talk to.
        if let Err(restore_err) = config.restore_log_channel(previous).await {
            tracing::error!("Failed to restore previous log channel: {}", restore_err);
        }
        return Err(e);
    }

    Ok(())
}

async fn announce_log_channel(
    ctx: Context<'_>,
    channel: &serenity::GuildChannel,
) -> Result<(), Error> {
    let confirmation = log_channel_set_notification(channel.id.get());
    ctx.send(poise::CreateReply::default().embed(format_notification(&confirmation)))
        .await?;

    let test_card = log_channel_test_notification();
    channel
        .id
        .send_message(
            ctx.http(),
            serenity::CreateMessage::new().embed(format_notification(&test_card)),
        )
        .await?;
    Ok(())
}
