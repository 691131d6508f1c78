//! External collaborator module
//!
//! This module contains the member directory, the record store and the
//! notifications sent after each tag attempt.

pub mod members;
pub mod notifications;
pub mod persistence;

// Re-export main types
pub use members::{display_name_or_id, Member, MemberDirectory, Roster};
pub use notifications::{Notification, NotificationKind};
pub use persistence::{JsonFileStore, MemoryStore, RecordStore};
