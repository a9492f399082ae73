// This is the entry point of the audit log bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (config file, environment)
// - `discord/` = Discord-specific adapters (commands, events, error dispatch)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::audit::AuditService;
use crate::core::config::{ConfigError, ConfigService};
use crate::discord::audit::events as audit_events;
use crate::discord::commands::presence;
use crate::discord::dispatcher::on_error;
use crate::discord::{Data, Error};
use crate::infra::config::ConfigBackend;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Event handler for non-command Discord events.
/// Every audited event kind is routed to its handler here; a failing handler
/// is logged and never takes the event loop down.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    let result = match event {
        serenity::FullEvent::Message { new_message } => {
            audit_events::remember_message(data, new_message);
            Ok(())
        }
        serenity::FullEvent::MessageUpdate { event, .. } => {
            audit_events::handle_message_update(data, event);
            Ok(())
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            audit_events::handle_member_join(ctx, data, new_member).await
        }
        serenity::FullEvent::GuildMemberRemoval {
            guild_id,
            user,
            member_data_if_available,
        } => {
            audit_events::handle_member_remove(
                ctx,
                data,
                *guild_id,
                user,
                member_data_if_available.as_ref(),
            )
            .await
        }
        serenity::FullEvent::MessageDelete {
            channel_id,
            deleted_message_id,
            guild_id,
        } => {
            audit_events::handle_message_delete(
                ctx,
                data,
                *channel_id,
                *deleted_message_id,
                *guild_id,
            )
            .await
        }
        serenity::FullEvent::ChannelCreate { channel } => {
            audit_events::handle_channel_create(ctx, data, channel).await
        }
        serenity::FullEvent::ChannelDelete { channel, .. } => {
            audit_events::handle_channel_delete(ctx, data, channel).await
        }
        serenity::FullEvent::GuildRoleCreate { new } => {
            audit_events::handle_role_create(ctx, data, new).await
        }
        serenity::FullEvent::GuildRoleDelete {
            guild_id,
            removed_role_id,
            removed_role_data_if_available,
        } => {
            audit_events::handle_role_delete(
                ctx,
                data,
                *guild_id,
                *removed_role_id,
                removed_role_data_if_available.as_ref(),
            )
            .await
        }
        serenity::FullEvent::VoiceStateUpdate { old, new } => {
            audit_events::handle_voice_state_update(ctx, data, old.as_ref(), new).await
        }

        _ => Ok(()),
    };

    if let Err(e) = result {
        tracing::error!("Error handling {} event: {}", event.snake_case_name(), e);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    let backend = ConfigBackend::from_env();
    tracing::info!("Loading configuration from {}", backend.describe());

    let config_service = match ConfigService::load(backend).await {
        Ok(service) => Arc::new(service),
        Err(ConfigError::Missing("token")) => {
            tracing::error!("No Discord bot token found! Set the DISCORD_BOT_TOKEN environment variable.");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let config = config_service.get().await;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let audit_service = Arc::new(AuditService::new());

    let data = Data {
        config: Arc::clone(&config_service),
        audit: Arc::clone(&audit_service),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read message content
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                discord::commands::admin::setlogchannel(),
                discord::commands::ping::ping(),
                discord::commands::help::list_commands(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(config.prefix.clone()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                tracing::info!("Bot is ready! Logged in as {}", ready.user.name);

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                presence::on_ready(ctx);

                Ok(data)
            })
        })
        .build();

    // Keep enough messages cached for deletes that happen before we tracked them.
    let mut settings = serenity::cache::Settings::default();
    settings.max_messages = 1000;

    let client = serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .cache_settings(settings)
        .await;

    let mut client = match client {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Error creating client: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = client.start().await {
        tracing::error!("Connection to Discord ended: {}", e);
        std::process::exit(1);
    }
}
