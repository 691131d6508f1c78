//! Main application state management

use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use super::{MemberId, PersistedRecord, TagGame, TagOutcome, TagRecord};
use crate::services::{display_name_or_id, Member, MemberDirectory, Notification, RecordStore};

/// Why a tag request could not be carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The selected target is not in the member directory
    UnknownMember(MemberId),
    State(String),
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagError::UnknownMember(id) => write!(f, "Unknown member: {}", id),
            TagError::State(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TagError {}

/// A handled tag attempt and its rendered announcement
#[derive(Debug, Clone)]
pub struct TagReport {
    pub outcome: TagOutcome,
    pub notification: Notification,
}

/// Main application state shared by every handler
pub struct AppState {
    pub game: TagGame,
    pub store: Arc<dyn RecordStore>,
    pub directory: Arc<dyn MemberDirectory>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel announcing every tag attempt
    pub notification_tx: broadcast::Sender<Notification>,
}

impl AppState {
    /// Create a new AppState around a fresh game
    pub fn new(
        port: u16,
        host: String,
        store: Arc<dyn RecordStore>,
        directory: Arc<dyn MemberDirectory>,
    ) -> Self {
        let (notification_tx, _) = broadcast::channel(100);

        Self {
            game: TagGame::new(),
            store,
            directory,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            notification_tx,
        }
    }

    /// Restore the game from the store. Missing or unreadable data is not fatal.
    pub fn load_persisted(&self) {
        let persisted = match self.store.load() {
            Ok(Some(persisted)) => persisted,
            Ok(None) => {
                info!("No saved tag data found, starting fresh");
                return;
            }
            Err(e) => {
                warn!("Failed to load saved tag data, starting fresh: {:#}", e);
                return;
            }
        };

        match TagRecord::try_from(persisted) {
            Ok(record) => {
                info!("Restored tag state: holder={:?}, previous={:?}",
                      record.current_holder, record.previous_holder);
                if let Err(e) = self.game.restore(record) {
                    warn!("Failed to restore tag state: {}", e);
                }
            }
            Err(e) => warn!("Saved tag data is invalid, starting fresh: {:#}", e),
        }
    }

    /// Handle a tag of `target` by `tagger`: run the game, save, announce
    pub fn handle_tag(&self, tagger: MemberId, target: MemberId) -> Result<TagReport, TagError> {
        if !self.directory.is_empty() && !self.directory.contains(target) {
            error!("Failed to tag member with id {}", target);
            return Err(TagError::UnknownMember(target));
        }

        // Saved while the record is still locked, so the data file follows
        // transition order.
        let outcome = self.game
            .tag_then(tagger, target, |record| self.save(record))
            .map_err(TagError::State)?;

        if !outcome.success {
            info!("Tagback cooldown in effect, {} could not tag {}", tagger, target);
        }

        let notification = Notification::for_outcome(&outcome, self.directory.as_ref());
        if let Err(e) = self.notification_tx.send(notification.clone()) {
            // No subscribers is fine; the caller still gets the notification.
            debug!("Notification not delivered: {}", e);
        }

        self.record_action(if outcome.success { "tag" } else { "tag-refused" });

        Ok(TagReport { outcome, notification })
    }

    /// Best effort save of a record
    fn save(&self, record: &TagRecord) {
        if let Err(e) = self.store.save(&PersistedRecord::from(record)) {
            error!("Failed to save tag data: {:#}", e);
        }
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Members that may be picked as a target, leaving out `exclude`
    pub fn tag_options(&self, exclude: Option<MemberId>) -> Vec<Member> {
        self.directory
            .members()
            .into_iter()
            .filter(|member| Some(member.id) != exclude)
            .collect()
    }

    /// Display name of the current holder, if anyone is it
    pub fn current_holder_name(&self) -> Option<String> {
        self.game
            .current_holder()
            .map(|id| display_name_or_id(self.directory.as_ref(), id))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
