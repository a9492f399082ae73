// Framework-level error handling: every command failure ends here and is
// turned into a short reply plus a log entry.

use crate::core::audit::AuditError;
use crate::discord::{Context, Data, Error};
use poise::serenity_prelude as serenity;

async fn reply(ctx: Context<'_>, failure: &AuditError) {
    if let Err(e) = ctx.say(failure.user_reply()).await {
        tracing::error!("Failed to send error reply: {}", e);
    }
}

pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start bot: {}", error);
        }
        poise::FrameworkError::EventHandler { error, .. } => {
            tracing::error!("Error in event handler: {}", error);
        }
        poise::FrameworkError::UnknownCommand {
            ctx,
            msg,
            msg_content,
            ..
        } => {
            tracing::debug!("Unknown command: {}", msg_content);
            let failure = AuditError::CommandNotFound;
            if let Err(e) = msg.channel_id.say(&ctx.http, failure.user_reply()).await {
                tracing::error!("Failed to send error reply: {}", e);
            }
        }
        poise::FrameworkError::MissingUserPermissions {
            missing_permissions,
            ctx,
            ..
        } => {
            let missing = missing_permissions
                .map(|p: serenity::Permissions| p.get_permission_names())
                .unwrap_or_default();
            let failure = AuditError::InsufficientPermission(missing);
            tracing::info!(
                command = %ctx.command().qualified_name,
                user = %ctx.author().id,
                "{}",
                failure
            );
            reply(ctx, &failure).await;
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let failure = AuditError::UnexpectedCommandFailure(error.to_string());
            tracing::error!(command = %ctx.command().qualified_name, "{}", failure);
            reply(ctx, &failure).await;
        }
        other => match other.ctx() {
            Some(ctx) => {
                let failure = AuditError::UnexpectedCommandFailure(format!(
                    "framework rejected `{}`",
                    ctx.command().qualified_name
                ));
                tracing::error!("{}", failure);
                reply(ctx, &failure).await;
            }
            None => tracing::error!("Unhandled framework error outside of a command"),
        },
    }
}
