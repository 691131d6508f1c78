//! State management module
//!
//! This module contains the countdown timer, the tag game and the
//! application context shared by handlers.

pub mod app_state;
pub mod countdown;
pub mod tag_game;
pub mod tag_record;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, TagError, TagReport};
pub use countdown::CountdownTimer;
pub use tag_game::{TagGame, TagOutcome, TAGBACK_COOLDOWN};
pub use tag_record::{MemberId, PersistedRecord, TagRecord};
pub use timer_state::CountdownState;
