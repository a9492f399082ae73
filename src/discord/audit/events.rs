// Translate serenity events into core audit events and post them.
//
// Each handler only extracts primitives from the Discord types; whether an
// event is reported, and how it looks, is decided in core.

use crate::core::audit::{build_notification, AuditEvent, RoleSnapshot, TrackedMessage};
use crate::discord::audit::log_channel::{get_log_channel, send_notification};
use crate::discord::Data;
use anyhow::Result;
use chrono::{DateTime, Utc};
use poise::serenity_prelude::{self as serenity, Context};

fn to_utc(timestamp: serenity::Timestamp) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(timestamp.unix_timestamp(), 0).unwrap_or_default()
}

/// Cache the message for logging so delete events are reliable even when
/// Serenity's cache misses it.
pub fn remember_message(data: &Data, message: &serenity::Message) {
    let guild_id = match message.guild_id {
        Some(id) => id.get(),
        None => return,
    };

    data.audit.remember_message(TrackedMessage {
        message_id: message.id.get(),
        guild_id,
        channel_id: message.channel_id.get(),
        author_id: message.author.id.get(),
        author_is_bot: message.author.bot,
        content: message.content.clone(),
    });
}

/// Refresh the snapshot's content after an edit. Edits themselves are not reported.
pub fn handle_message_update(data: &Data, event: &serenity::MessageUpdateEvent) {
    if event.guild_id.is_none() {
        return;
    }

    if let Some(content) = &event.content {
        if data.audit.update_tracked_content(event.id.get(), content) {
            tracing::debug!("Refreshed snapshot for edited message {}", event.id);
        }
    }
}

pub async fn handle_member_join(
    ctx: &Context,
    data: &Data,
    member: &serenity::Member,
) -> Result<()> {
    tracing::info!("Member joined: {} ({})", member.user.name, member.user.id);

    let event = AuditEvent::MemberJoined {
        user_id: member.user.id.get(),
        avatar_url: Some(member.face()),
        created_at: to_utc(member.user.created_at()),
    };

    send_log(ctx, data, member.guild_id, event).await
}

pub async fn handle_member_remove(
    ctx: &Context,
    data: &Data,
    guild_id: serenity::GuildId,
    user: &serenity::User,
    member_data: Option<&serenity::Member>,
) -> Result<()> {
    tracing::info!("Member left: {} ({})", user.name, user.id);

    let event = AuditEvent::MemberLeft {
        user_id: user.id.get(),
        user_name: user.tag(),
        avatar_url: Some(user.face()),
        joined_at: member_data.and_then(|m| m.joined_at).map(to_utc),
    };

    send_log(ctx, data, guild_id, event).await
}

pub async fn handle_message_delete(
    ctx: &Context,
    data: &Data,
    channel_id: serenity::ChannelId,
    message_id: serenity::MessageId,
    guild_id: Option<serenity::GuildId>,
) -> Result<()> {
    let guild_id = match guild_id {
        Some(id) => id,
        None => return Ok(()),
    };

    // Prefer our own snapshot over the Serenity cache so we never miss deletes.
    let snapshot = data
        .audit
        .take_tracked_message(message_id.get())
        .or_else(|| {
            ctx.cache
                .message(channel_id, message_id)
                .map(|message| TrackedMessage {
                    message_id: message.id.get(),
                    guild_id: guild_id.get(),
                    channel_id: message.channel_id.get(),
                    author_id: message.author.id.get(),
                    author_is_bot: message.author.bot,
                    content: message.content.clone(),
                })
        });

    let snapshot = match snapshot {
        Some(msg) if msg.guild_id == guild_id.get() => msg,
        _ => {
            tracing::debug!("No snapshot for deleted message {}", message_id);
            return Ok(());
        }
    };

    let event = match data.audit.message_deleted_event(&snapshot) {
        Some(event) => event,
        None => return Ok(()),
    };

    tracing::info!("Message deleted in channel {}", snapshot.channel_id);
    send_log(ctx, data, guild_id, event).await
}

pub async fn handle_channel_create(
    ctx: &Context,
    data: &Data,
    channel: &serenity::GuildChannel,
) -> Result<()> {
    tracing::info!("Channel created: {}", channel.name);

    let event = AuditEvent::ChannelCreated {
        channel_id: channel.id.get(),
        channel_name: channel.name.clone(),
        kind: channel.kind.name().to_string(),
    };

    send_log(ctx, data, channel.guild_id, event).await
}

pub async fn handle_channel_delete(
    ctx: &Context,
    data: &Data,
    channel: &serenity::GuildChannel,
) -> Result<()> {
    tracing::info!("Channel deleted: {}", channel.name);

    let event = AuditEvent::ChannelDeleted {
        channel_id: channel.id.get(),
        channel_name: channel.name.clone(),
        kind: channel.kind.name().to_string(),
    };

    send_log(ctx, data, channel.guild_id, event).await
}

fn role_snapshot(role: &serenity::Role) -> RoleSnapshot {
    RoleSnapshot {
        role_id: role.id.get(),
        name: role.name.clone(),
        colour: role.colour.0,
        hoisted: role.hoist,
        mentionable: role.mentionable,
    }
}

pub async fn handle_role_create(ctx: &Context, data: &Data, role: &serenity::Role) -> Result<()> {
    tracing::info!("Role created: {}", role.name);

    let event = AuditEvent::RoleCreated(role_snapshot(role));
    send_log(ctx, data, role.guild_id, event).await
}

pub async fn handle_role_delete(
    ctx: &Context,
    data: &Data,
    guild_id: serenity::GuildId,
    role_id: serenity::RoleId,
    role: Option<&serenity::Role>,
) -> Result<()> {
    match role {
        Some(r) => tracing::info!("Role deleted: {}", r.name),
        None => tracing::info!("Role deleted: {}", role_id),
    }

    let event = AuditEvent::RoleDeleted {
        role_id: role_id.get(),
        role: role.map(role_snapshot),
    };
    send_log(ctx, data, guild_id, event).await
}

pub async fn handle_voice_state_update(
    ctx: &Context,
    data: &Data,
    old: Option<&serenity::VoiceState>,
    new: &serenity::VoiceState,
) -> Result<()> {
    let guild_id = match new.guild_id {
        Some(id) => id,
        None => return Ok(()),
    };

    tracing::info!("Voice state update for {}", new.user_id);

    let old_channel_id = old.and_then(|s| s.channel_id).map(|id| id.get());
    let new_channel_id = new.channel_id.map(|id| id.get());
    let avatar_url = new.member.as_ref().map(|m| m.face());

    let event = match data.audit.voice_event(
        new.user_id.get(),
        avatar_url,
        old_channel_id,
        new_channel_id,
    ) {
        Some(event) => event,
        None => return Ok(()),
    };

    send_log(ctx, data, guild_id, event).await
}

async fn send_log(
    ctx: &Context,
    data: &Data,
    guild_id: serenity::GuildId,
    event: AuditEvent,
) -> Result<()> {
    let channel_id = match get_log_channel(ctx, data, guild_id).await {
        Some(id) => id,
        None => {
            tracing::debug!("Skipping {} notification: no usable log channel", event.kind());
            return Ok(());
        }
    };

    let notification = build_notification(&event, Utc::now());
    send_notification(ctx, channel_id, &notification).await;
    Ok(())
}
