use super::audit_models::{AuditEvent, TrackedMessage, VoiceTransition};
use dashmap::DashMap;

// Cap how many messages we keep in memory for logging so we don't grow unbounded.
const MAX_TRACKED_MESSAGES: usize = 5_000;

/// Event-side policy: which events become notifications, and the message
/// snapshots needed to describe a deletion after the fact.
pub struct AuditService {
    // Message ID -> Snapshot for logging deletes even if Serenity's cache evicts them
    message_cache: DashMap<u64, TrackedMessage>,
}

impl Default for AuditService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditService {
    pub fn new() -> Self {
        Self {
            message_cache: DashMap::new(),
        }
    }

    /// Store a message snapshot so we can later log deletes reliably.
    pub fn remember_message(&self, message: TrackedMessage) {
        self.message_cache.insert(message.message_id, message);

        // Simple eviction: drop an arbitrary entry once we cross the cap.
        // The iterator's shard guard must be gone before `remove` takes the write lock.
        if self.message_cache.len() > MAX_TRACKED_MESSAGES {
            let first_key = self.message_cache.iter().next().map(|entry| *entry.key());
            if let Some(key) = first_key {
                self.message_cache.remove(&key);
            }
        }
    }

    /// Remove a tracked message (used for deletions).
    pub fn take_tracked_message(&self, message_id: u64) -> Option<TrackedMessage> {
        self.message_cache.remove(&message_id).map(|(_, msg)| msg)
    }

    /// Keep the snapshot in step with edits, so a later delete shows the final text.
    /// Returns whether a snapshot was updated.
    pub fn update_tracked_content(&self, message_id: u64, content: &str) -> bool {
        match self.message_cache.get_mut(&message_id) {
            Some(mut tracked) => {
                tracked.content = content.to_string();
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn tracked_count(&self) -> usize {
        self.message_cache.len()
    }

    /// Bot-authored messages never produce a deletion notification.
    pub fn message_deleted_event(&self, snapshot: &TrackedMessage) -> Option<AuditEvent> {
        if snapshot.author_is_bot {
            return None;
        }

        Some(AuditEvent::MessageDeleted {
            message_id: snapshot.message_id,
            channel_id: snapshot.channel_id,
            author_id: snapshot.author_id,
            content: snapshot.content.clone(),
        })
    }

    pub fn voice_event(
        &self,
        user_id: u64,
        avatar_url: Option<String>,
        old_channel_id: Option<u64>,
        new_channel_id: Option<u64>,
    ) -> Option<AuditEvent> {
        match voice_transition(old_channel_id, new_channel_id)? {
            VoiceTransition::Joined { channel_id, from } => Some(AuditEvent::VoiceJoined {
                user_id,
                avatar_url,
                channel_id,
                previous_channel_id: from,
            }),
            VoiceTransition::Left { channel_id } => Some(AuditEvent::VoiceLeft {
                user_id,
                avatar_url,
                channel_id,
            }),
        }
    }
}

/// Mute/deafen/stream toggles keep the channel and yield nothing.
/// A move between channels counts as a join of the destination.
pub fn voice_transition(old: Option<u64>, new: Option<u64>) -> Option<VoiceTransition> {
    if old == new {
        return None;
    }

    match (old, new) {
        (from, Some(channel_id)) => Some(VoiceTransition::Joined { channel_id, from }),
        (Some(channel_id), None) => Some(VoiceTransition::Left { channel_id }),
        (None, None) => None,
    }
}
