//! Notifications announcing tag results

use serde::{Deserialize, Serialize};

use super::members::{display_name_or_id, MemberDirectory};
use crate::{state::TagOutcome, utils::format_duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Tagged,
    Cooldown,
}

/// Embed-style message: a title plus one named field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub field_name: String,
    pub field_value: String,
}

impl Notification {
    /// Render the announcement for a tag attempt
    pub fn for_outcome(outcome: &TagOutcome, directory: &dyn MemberDirectory) -> Self {
        let tagger = display_name_or_id(directory, outcome.tagger);
        let target = display_name_or_id(directory, outcome.target);

        if outcome.success {
            let was_it = outcome
                .previous_holder
                .map(|id| display_name_or_id(directory, id))
                .unwrap_or_else(|| tagger.clone());
            Self {
                kind: NotificationKind::Tagged,
                title: format!("{} has been tagged!", target),
                field_name: format!("Tagged by {}", tagger),
                field_value: format!("{} was it for {}", was_it, format_duration(outcome.previous_hold_seconds)),
            }
        } else {
            let remaining = outcome.cooldown_remaining_seconds.unwrap_or(0) as i64;
            Self {
                kind: NotificationKind::Cooldown,
                title: "Tagback Cooldown in Effect".to_string(),
                field_name: format!("{} remaining", format_duration(remaining)),
                field_value: format!("{} tried to tag {}", tagger, target),
            }
        }
    }
}
