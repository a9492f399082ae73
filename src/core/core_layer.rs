// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "audit/mod.rs"]
pub mod audit;

#[path = "config/mod.rs"]
pub mod config;

#[path = "diagnostics/latency.rs"]
pub mod diagnostics;
