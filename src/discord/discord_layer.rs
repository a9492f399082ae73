// Discord layer - commands, event handlers and the error dispatcher.

use crate::core::audit::AuditService;
use crate::core::config::ConfigService;
use crate::infra::config::ConfigBackend;
use std::sync::Arc;

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "audit/mod.rs"]
pub mod audit;

#[path = "dispatcher.rs"]
pub mod dispatcher;

// Types used by all command functions
pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Shared state handed to every command and event handler.
pub struct Data {
    pub config: Arc<ConfigService<ConfigBackend>>,
    pub audit: Arc<AuditService>,
}
