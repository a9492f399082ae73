pub mod events;
pub mod formatter;
pub mod log_channel;
