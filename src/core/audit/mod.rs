pub mod audit_errors;
pub mod audit_models;
pub mod audit_service;
pub mod channel_resolution;
pub mod notification_builder;

pub use audit_errors::AuditError;
pub use audit_models::{AuditEvent, Notification, NotificationColor, RoleSnapshot, TrackedMessage};
pub use audit_service::AuditService;
pub use channel_resolution::{
    claim_log_channel, resolve_log_channel, ChannelPermissions, GuildChannels, LogChannelClaim,
    LogChannelLookup,
};
pub use notification_builder::build_notification;
