use crate::core::diagnostics::ping_notification;
use crate::discord::audit::formatter::format_notification;
use crate::discord::{Context, Error};

/// Check bot's latency.
#[poise::command(prefix_command, slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    let card = ping_notification(latency);

    ctx.send(poise::CreateReply::default().embed(format_notification(&card)))
        .await?;
    Ok(())
}
