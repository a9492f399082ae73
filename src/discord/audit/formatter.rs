use crate::core::audit::Notification;
use poise::serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter};

/// Turn a core notification card into a Discord embed.
pub fn format_notification(notification: &Notification) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(notification.title.as_str())
        .color(notification.color.rgb());

    if let Some(description) = &notification.description {
        embed = embed.description(description.as_str());
    }

    for field in &notification.fields {
        embed = embed.field(field.name.as_str(), field.value.as_str(), field.inline);
    }

    if let Some(footer) = &notification.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer.as_str()));
    }

    if let Some(url) = &notification.thumbnail {
        embed = embed.thumbnail(url.as_str());
    }

    if let Some(timestamp) = notification.timestamp {
        let timestamp = serenity::Timestamp::from_unix_timestamp(timestamp.timestamp())
            .unwrap_or_else(|_| serenity::Timestamp::now());
        embed = embed.timestamp(timestamp);
    }

    embed
}
