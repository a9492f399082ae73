// This module handles bot presence and lifecycle events.
//
// Everything here is Discord-layer glue: we only work with Discord SDK types
// (Context, ActivityData, OnlineStatus) and keep the logic short.

use poise::serenity_prelude as serenity;

const WATCHING_STATUS: &str = "the audit log 👀";

/// Resets the bot's status to the default message.
pub fn reset_status(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::watching(WATCHING_STATUS);
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

/// Called once the bot is ready so we can announce a default presence message.
pub fn on_ready(ctx: &serenity::Context) {
    reset_status(ctx);
}
