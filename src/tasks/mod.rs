//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown_updater;
pub mod notification_log;

// Re-export main functions
pub use countdown_updater::countdown_updater_task;
pub use notification_log::notification_log_task;
