use chrono::{DateTime, Utc};

/// One server event worth reporting, already stripped of Discord SDK types.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditEvent {
    MemberJoined {
        user_id: u64,
        avatar_url: Option<String>,
        created_at: DateTime<Utc>,
    },
    MemberLeft {
        user_id: u64,
        user_name: String,
        avatar_url: Option<String>,
        joined_at: Option<DateTime<Utc>>,
    },
    MessageDeleted {
        message_id: u64,
        channel_id: u64,
        author_id: u64,
        content: String,
    },
    ChannelCreated {
        channel_id: u64,
        channel_name: String,
        kind: String,
    },
    ChannelDeleted {
        channel_id: u64,
        channel_name: String,
        kind: String,
    },
    RoleCreated(RoleSnapshot),
    RoleDeleted {
        role_id: u64,
        // Serenity only has the old role data when it was cached.
        role: Option<RoleSnapshot>,
    },
    VoiceJoined {
        user_id: u64,
        avatar_url: Option<String>,
        channel_id: u64,
        previous_channel_id: Option<u64>,
    },
    VoiceLeft {
        user_id: u64,
        avatar_url: Option<String>,
        channel_id: u64,
    },
}

impl AuditEvent {
    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            AuditEvent::MemberJoined { .. } => "member-join",
            AuditEvent::MemberLeft { .. } => "member-leave",
            AuditEvent::MessageDeleted { .. } => "message-delete",
            AuditEvent::ChannelCreated { .. } => "channel-create",
            AuditEvent::ChannelDeleted { .. } => "channel-delete",
            AuditEvent::RoleCreated(_) => "role-create",
            AuditEvent::RoleDeleted { .. } => "role-delete",
            AuditEvent::VoiceJoined { .. } => "voice-join",
            AuditEvent::VoiceLeft { .. } => "voice-leave",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSnapshot {
    pub role_id: u64,
    pub name: String,
    pub colour: u32,
    pub hoisted: bool,
    pub mentionable: bool,
}

/// Result of comparing a member's voice channel before and after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTransition {
    Joined {
        channel_id: u64,
        from: Option<u64>,
    },
    Left {
        channel_id: u64,
    },
}

/// Minimal snapshot of a message that we keep in-memory so
/// deletions can be logged even if Serenity's cache
/// has already evicted the original message.
#[derive(Debug, Clone)]
pub struct TrackedMessage {
    pub message_id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub author_id: u64,
    pub author_is_bot: bool,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationColor {
    Success,
    Failure,
    Warning,
    Info,
}

impl NotificationColor {
    pub fn rgb(&self) -> u32 {
        match self {
            NotificationColor::Success => 0x2ecc71, // Green
            NotificationColor::Failure => 0xe74c3c, // Red
            NotificationColor::Warning => 0xe67e22, // Orange
            NotificationColor::Info => 0x3498db,    // Blue
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A rendered notification card, independent of the Discord embed builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub color: NotificationColor,
    pub timestamp: Option<DateTime<Utc>>,
    pub fields: Vec<NotificationField>,
    pub footer: Option<String>,
    pub thumbnail: Option<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, color: NotificationColor) -> Self {
        Self {
            title: title.into(),
            description: None,
            color,
            timestamp: None,
            fields: Vec::new(),
            footer: None,
            thumbnail: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(NotificationField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn thumbnail(mut self, url: Option<String>) -> Self {
        self.thumbnail = url;
        self
    }

    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}
