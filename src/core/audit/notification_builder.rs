//! Fixed card templates for every audited event kind.

use super::audit_models::{AuditEvent, Notification, NotificationColor, RoleSnapshot};
use chrono::{DateTime, Utc};

/// Discord rejects embed field values longer than this.
pub const FIELD_VALUE_LIMIT: usize = 1024;
pub const EMPTY_CONTENT_PLACEHOLDER: &str = "*No content*";
const ELLIPSIS: &str = "...";

pub fn build_notification(event: &AuditEvent, now: DateTime<Utc>) -> Notification {
    match event {
        AuditEvent::MemberJoined {
            user_id,
            avatar_url,
            created_at,
        } => Notification::new("Member Joined", NotificationColor::Success)
            .description(format!("<@{}> joined the server", user_id))
            .field("Account Created", format_timestamp(created_at), true)
            .footer(format!("Member ID: {}", user_id))
            .thumbnail(avatar_url.clone())
            .timestamp(now),

        AuditEvent::MemberLeft {
            user_id,
            user_name,
            avatar_url,
            joined_at,
        } => {
            let joined = joined_at
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_else(|| "Unknown".to_string());

            Notification::new("Member Left", NotificationColor::Failure)
                .description(format!("{} left the server", user_name))
                .field("Joined At", joined, true)
                .footer(format!("Member ID: {}", user_id))
                .thumbnail(avatar_url.clone())
                .timestamp(now)
        }

        AuditEvent::MessageDeleted {
            message_id,
            channel_id,
            author_id,
            content,
        } => Notification::new("Message Deleted", NotificationColor::Warning)
            .field("Channel", format!("<#{}>", channel_id), true)
            .field("Author", format!("<@{}>", author_id), true)
            .field("Content", display_content(content), false)
            .footer(format!("Message ID: {}", message_id))
            .timestamp(now),

        AuditEvent::ChannelCreated {
            channel_id,
            channel_name,
            kind,
        } => Notification::new("Channel Created", NotificationColor::Success)
            .description(format!(
                "Channel <#{}> (**{}**) was created",
                channel_id, channel_name
            ))
            .field("Type", title_case(kind), true)
            .footer(format!("Channel ID: {}", channel_id))
            .timestamp(now),

        AuditEvent::ChannelDeleted {
            channel_id,
            channel_name,
            kind,
        } => Notification::new("Channel Deleted", NotificationColor::Failure)
            .description(format!("Channel **{}** was deleted", channel_name))
            .field("Type", title_case(kind), true)
            .footer(format!("Channel ID: {}", channel_id))
            .timestamp(now),

        AuditEvent::RoleCreated(role) => role_fields(
            Notification::new("Role Created", NotificationColor::Success)
                .description(format!("Role **{}** was created", role.name)),
            role,
        )
        .footer(format!("Role ID: {}", role.role_id))
        .timestamp(now),

        AuditEvent::RoleDeleted { role_id, role } => {
            let notification = Notification::new("Role Deleted", NotificationColor::Failure);
            let notification = match role {
                Some(role) => role_fields(
                    notification.description(format!("Role **{}** was deleted", role.name)),
                    role,
                ),
                None => notification.description("An uncached role was deleted"),
            };
            notification
                .footer(format!("Role ID: {}", role_id))
                .timestamp(now)
        }

        AuditEvent::VoiceJoined {
            user_id,
            avatar_url,
            channel_id,
            previous_channel_id,
        } => {
            let mut notification =
                Notification::new("Voice Channel Joined", NotificationColor::Success).description(
                    format!("<@{}> joined voice channel <#{}>", user_id, channel_id),
                );
            if let Some(previous) = previous_channel_id {
                notification = notification.field("Moved From", format!("<#{}>", previous), true);
            }
            notification
                .footer(format!("Member ID: {}", user_id))
                .thumbnail(avatar_url.clone())
                .timestamp(now)
        }

        AuditEvent::VoiceLeft {
            user_id,
            avatar_url,
            channel_id,
        } => Notification::new("Voice Channel Left", NotificationColor::Warning)
            .description(format!("<@{}> left voice channel <#{}>", user_id, channel_id))
            .footer(format!("Member ID: {}", user_id))
            .thumbnail(avatar_url.clone())
            .timestamp(now),
    }
}

fn role_fields(notification: Notification, role: &RoleSnapshot) -> Notification {
    notification
        .field("Color", format!("#{:06x}", role.colour & 0xFF_FFFF), true)
        .field("Hoisted", yes_no(role.hoisted), true)
        .field("Mentionable", yes_no(role.mentionable), true)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Fit deleted-message content into a single embed field.
///
/// Counts characters rather than bytes so a multi-byte code point is never split.
pub fn display_content(content: &str) -> String {
    if content.is_empty() {
        return EMPTY_CONTENT_PLACEHOLDER.to_string();
    }

    if content.chars().count() <= FIELD_VALUE_LIMIT {
        return content.to_string();
    }

    let keep = FIELD_VALUE_LIMIT - ELLIPSIS.len();
    let mut truncated: String = content.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// `"news"` -> `"News"`, `"private_thread"` -> `"Private_Thread"`.
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for c in raw.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use poise::serenity_prelude::ChannelType;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn deleted(content: &str) -> AuditEvent {
        AuditEvent::MessageDeleted {
            message_id: 3,
            channel_id: 2,
            author_id: 1,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_long_content_is_truncated_with_ellipsis() {
        let content = "a".repeat(2000);
        let notification = build_notification(&deleted(&content), now());
        let value = notification.field_value("Content").unwrap();

        assert_eq!(value.chars().count(), 1024);
        assert!(value.ends_with("..."));
    }

    #[test]
    fn test_short_content_passes_through() {
        let content = "b".repeat(1024);
        assert_eq!(display_content(&content), content);
        assert_eq!(display_content("hello"), "hello");
    }

    #[test]
    fn test_empty_content_uses_placeholder() {
        let notification = build_notification(&deleted(""), now());
        assert_eq!(notification.field_value("Content"), Some("*No content*"));
    }

    #[test]
    fn test_truncation_respects_multibyte_characters() {
        let content = "é".repeat(1500);
        let value = display_content(&content);
        assert_eq!(value.chars().count(), 1024);
        assert!(value.starts_with("éé"));
    }

    #[test]
    fn test_message_delete_template() {
        let notification = build_notification(&deleted("hi"), now());
        assert_eq!(notification.title, "Message Deleted");
        assert_eq!(notification.color, NotificationColor::Warning);
        assert_eq!(notification.field_value("Channel"), Some("<#2>"));
        assert_eq!(notification.field_value("Author"), Some("<@1>"));
        assert_eq!(notification.footer.as_deref(), Some("Message ID: 3"));
        assert_eq!(notification.timestamp, Some(now()));
    }

    #[test]
    fn test_member_join_template() {
        let created_at = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let event = AuditEvent::MemberJoined {
            user_id: 77,
            avatar_url: Some("https://cdn.example/a.png".to_string()),
            created_at,
        };
        let notification = build_notification(&event, now());

        assert_eq!(notification.color, NotificationColor::Success);
        assert_eq!(
            notification.field_value("Account Created"),
            Some("2020-01-02 03:04:05 UTC")
        );
        assert_eq!(notification.footer.as_deref(), Some("Member ID: 77"));
        assert!(notification.thumbnail.is_some());
    }

    #[test]
    fn test_member_leave_without_join_date() {
        let event = AuditEvent::MemberLeft {
            user_id: 8,
            user_name: "ghost".to_string(),
            avatar_url: None,
            joined_at: None,
        };
        let notification = build_notification(&event, now());

        assert_eq!(notification.color, NotificationColor::Failure);
        assert_eq!(notification.field_value("Joined At"), Some("Unknown"));
        assert_eq!(notification.description.as_deref(), Some("ghost left the server"));
    }

    #[test]
    fn test_channel_templates() {
        let created = AuditEvent::ChannelCreated {
            channel_id: 10,
            channel_name: "general".to_string(),
            kind: ChannelType::News.name().to_string(),
        };
        let deleted = AuditEvent::ChannelDeleted {
            channel_id: 10,
            channel_name: "general".to_string(),
            kind: ChannelType::Stage.name().to_string(),
        };

        let created = build_notification(&created, now());
        let deleted = build_notification(&deleted, now());

        assert_eq!(created.color, NotificationColor::Success);
        assert_eq!(created.field_value("Type"), Some("News"));
        assert_eq!(
            created.description.as_deref(),
            Some("Channel <#10> (**general**) was created")
        );
        assert_eq!(deleted.color, NotificationColor::Failure);
        assert_eq!(deleted.field_value("Type"), Some("Stage"));
        assert_eq!(
            deleted.description.as_deref(),
            Some("Channel **general** was deleted")
        );
    }

    #[test]
    fn test_role_templates() {
        let role = RoleSnapshot {
            role_id: 4,
            name: "Mods".to_string(),
            colour: 0x3498db,
            hoisted: true,
            mentionable: false,
        };
        let created = build_notification(&AuditEvent::RoleCreated(role.clone()), now());

        assert_eq!(created.field_value("Color"), Some("#3498db"));
        assert_eq!(created.field_value("Hoisted"), Some("Yes"));
        assert_eq!(created.field_value("Mentionable"), Some("No"));

        let deleted = build_notification(
            &AuditEvent::RoleDeleted {
                role_id: 4,
                role: None,
            },
            now(),
        );
        assert_eq!(deleted.color, NotificationColor::Failure);
        assert!(deleted.fields.is_empty());
        assert_eq!(deleted.footer.as_deref(), Some("Role ID: 4"));
    }

    #[test]
    fn test_voice_templates() {
        let moved = AuditEvent::VoiceJoined {
            user_id: 1,
            avatar_url: None,
            channel_id: 20,
            previous_channel_id: Some(21),
        };
        let left = AuditEvent::VoiceLeft {
            user_id: 1,
            avatar_url: None,
            channel_id: 21,
        };

        let moved = build_notification(&moved, now());
        let left = build_notification(&left, now());

        assert_eq!(moved.color, NotificationColor::Success);
        assert_eq!(moved.field_value("Moved From"), Some("<#21>"));
        assert_eq!(left.color, NotificationColor::Warning);
        assert_eq!(
            left.description.as_deref(),
            Some("<@1> left voice channel <#21>")
        );
    }
}
