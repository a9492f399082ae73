// Discord commands module.
// Each command gets its own file.

pub mod admin;

pub mod help;

pub mod ping;

// Bot presence management
pub mod presence;
