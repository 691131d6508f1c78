//! Tag Keeper - A state-managed HTTP server running a game of tag
//!
//! This library tracks who is "it", enforces a tagback cooldown with a
//! background countdown timer, and exposes the game's commands over HTTP.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, CountdownTimer, TagGame};
pub use api::create_router;
pub use utils::{format_duration, signals::shutdown_signal};
