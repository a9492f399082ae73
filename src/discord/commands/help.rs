use crate::core::audit::{Notification, NotificationColor};
use crate::discord::audit::formatter::format_notification;
use crate::discord::{Context, Error};

struct CommandEntry {
    usage: &'static str,
    description: &'static str,
}

const COMMAND_CATALOG: &[CommandEntry] = &[
    CommandEntry {
        usage: "setlogchannel #channel",
        description: "Set the channel for logging events (Admin only)",
    },
    CommandEntry {
        usage: "ping",
        description: "Check bot's latency",
    },
    CommandEntry {
        usage: "commands",
        description: "Show this help message",
    },
];

pub fn help_notification(prefix: &str) -> Notification {
    COMMAND_CATALOG.iter().fold(
        Notification::new("Audit Log Bot Commands", NotificationColor::Info)
            .description("Here are the available commands:"),
        |card, entry| card.field(format!("`{}{}`", prefix, entry.usage), entry.description, false),
    )
}

/// Show available commands.
#[poise::command(prefix_command, slash_command, rename = "commands")]
pub async fn list_commands(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = ctx.data().config.get().await.prefix;
    let card = help_notification(&prefix);

    ctx.send(poise::CreateReply::default().embed(format_notification(&card)))
        .await?;
    Ok(())
}
