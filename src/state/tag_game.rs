//! Tag state machine guarded by the tagback cooldown

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{CountdownTimer, MemberId, TagRecord};
use crate::utils::format_duration;

/// How long the same member is protected from being tagged again
pub const TAGBACK_COOLDOWN: Duration = Duration::from_secs(300);

/// Result of a tag attempt, with what the caller needs to announce it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutcome {
    pub success: bool,
    pub tagger: MemberId,
    pub target: MemberId,
    pub previous_holder: Option<MemberId>,
    pub previous_hold_seconds: i64,
    /// Cooldown left when the tag was refused
    pub cooldown_remaining_seconds: Option<u64>,
}

/// The game: current holder record plus the tagback timer
#[derive(Debug)]
pub struct TagGame {
    record: Arc<Mutex<TagRecord>>,
    timer: CountdownTimer,
}

impl TagGame {
    /// Create a game where nobody is it yet
    pub fn new() -> Self {
        Self {
            record: Arc::new(Mutex::new(TagRecord::default())),
            timer: CountdownTimer::new(),
        }
    }

    /// Replace the record, e.g. with state loaded at startup
    pub fn restore(&self, record: TagRecord) -> Result<(), String> {
        let mut guard = self.record.lock()
            .map_err(|e| format!("Failed to lock tag record: {}", e))?;
        *guard = record;
        Ok(())
    }

    /// Get a copy of the current record
    pub fn record(&self) -> Result<TagRecord, String> {
        self.record.lock()
            .map(|record| record.clone())
            .map_err(|e| format!("Failed to lock tag record: {}", e))
    }

    /// Attempt to make `target` it
    pub fn tag(&self, tagger: MemberId, target: MemberId) -> Result<TagOutcome, String> {
        self.tag_then(tagger, target, |_| {})
    }

    /// Like `tag`, but runs `on_success` with the new record before the record
    /// lock is released, so successive transitions are observed in order.
    pub fn tag_then<F>(&self, tagger: MemberId, target: MemberId, on_success: F) -> Result<TagOutcome, String>
    where
        F: FnOnce(&TagRecord),
    {
        self.tag_at(tagger, target, Utc::now(), on_success)
    }

    pub(crate) fn tag_at<F>(
        &self,
        tagger: MemberId,
        target: MemberId,
        now: DateTime<Utc>,
        on_success: F,
    ) -> Result<TagOutcome, String>
    where
        F: FnOnce(&TagRecord),
    {
        let mut record = self.record.lock()
            .map_err(|e| format!("Failed to lock tag record: {}", e))?;

        let eligible = match record.current_holder {
            None => true,
            Some(holder) => holder != target || self.timer.is_finished(),
        };

        if !eligible {
            let remaining = self.timer.remaining().as_secs();
            debug!("Tag of {} by {} refused, cooldown has {}s left", target, tagger, remaining);
            return Ok(TagOutcome {
                success: false,
                tagger,
                target,
                previous_holder: record.previous_holder,
                previous_hold_seconds: record.previous_hold_seconds,
                cooldown_remaining_seconds: Some(remaining),
            });
        }

        record.previous_hold_seconds = record.held_for(now);
        record.previous_holder = record.current_holder;
        record.current_holder = Some(target);
        record.held_since = Some(now);
        self.timer.start(TAGBACK_COOLDOWN);

        info!("{} tagged {} (previous holder: {:?}, held {}s)",
              tagger, target, record.previous_holder, record.previous_hold_seconds);
        on_success(&*record);

        Ok(TagOutcome {
            success: true,
            tagger,
            target,
            previous_holder: record.previous_holder,
            previous_hold_seconds: record.previous_hold_seconds,
            cooldown_remaining_seconds: None,
        })
    }

    pub fn current_holder(&self) -> Option<MemberId> {
        self.record().ok().and_then(|record| record.current_holder)
    }

    /// How long the current holder has been it, formatted
    pub fn time_since_tagged(&self) -> String {
        let held = self.record().map(|record| record.held_for(Utc::now())).unwrap_or(0);
        format_duration(held)
    }

    /// Cooldown left before the current holder can be tagged again, formatted
    pub fn cooldown_remaining(&self) -> String {
        format_duration(self.cooldown_remaining_seconds() as i64)
    }

    pub fn cooldown_remaining_seconds(&self) -> u64 {
        self.timer.remaining().as_secs()
    }

    pub fn cooldown_active(&self) -> bool {
        !self.timer.is_finished()
    }
}

impl Default for TagGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::countdown_updater::POLL_INTERVAL;
    use tokio::time::sleep;

    const ALICE: MemberId = 1;
    const BOB: MemberId = 2;
    const CAROL: MemberId = 3;

    #[tokio::test(start_paused = true)]
    async fn first_tag_always_succeeds() {
        let game = TagGame::new();
        let outcome = game.tag(ALICE, BOB).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.previous_holder, None);
        assert_eq!(outcome.previous_hold_seconds, 0);
        assert_eq!(game.current_holder(), Some(BOB));
        assert!(game.cooldown_active());
    }

    #[tokio::test(start_paused = true)]
    async fn same_target_refused_during_cooldown() {
        let game = TagGame::new();
        assert!(game.tag(ALICE, BOB).unwrap().success);
        let before = game.record().unwrap();

        let outcome = game.tag(CAROL, BOB).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.cooldown_remaining_seconds, Some(300));
        assert_eq!(game.record().unwrap(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn same_target_allowed_after_cooldown() {
        let game = TagGame::new();
        assert!(game.tag(ALICE, BOB).unwrap().success);

        sleep(TAGBACK_COOLDOWN + POLL_INTERVAL * 2).await;
        assert!(!game.cooldown_active());

        let outcome = game.tag(CAROL, BOB).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.previous_holder, Some(BOB));
        assert!(game.cooldown_active());
    }

    #[tokio::test(start_paused = true)]
    async fn different_target_ignores_cooldown() {
        let game = TagGame::new();
        assert!(game.tag(ALICE, BOB).unwrap().success);
        assert!(game.cooldown_active());

        let outcome = game.tag(BOB, ALICE).unwrap();
        assert!(outcome.success);
        assert_eq!(game.current_holder(), Some(ALICE));
    }

    #[tokio::test(start_paused = true)]
    async fn previous_hold_is_frozen_at_transition() {
        let game = TagGame::new();
        let t0 = Utc::now();
        game.tag_at(ALICE, BOB, t0, |_| {}).unwrap();

        let t1 = t0 + chrono::Duration::seconds(125);
        let outcome = game.tag_at(BOB, CAROL, t1, |_| {}).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.previous_holder, Some(BOB));
        assert_eq!(outcome.previous_hold_seconds, 125);

        let record = game.record().unwrap();
        assert_eq!(record.previous_holder, Some(BOB));
        assert_eq!(record.previous_hold_seconds, 125);
        assert_eq!(record.held_since, Some(t1));

        // A refused tag later on does not recompute it.
        game.tag_at(ALICE, CAROL, t1 + chrono::Duration::seconds(10), |_| {}).unwrap();
        assert_eq!(game.record().unwrap().previous_hold_seconds, 125);
    }

    #[tokio::test(start_paused = true)]
    async fn restored_holder_is_taggable_without_cooldown() {
        let game = TagGame::new();
        game.restore(TagRecord {
            current_holder: Some(BOB),
            previous_holder: Some(ALICE),
            held_since: Some(Utc::now()),
            previous_hold_seconds: 60,
        }).unwrap();

        assert_eq!(game.current_holder(), Some(BOB));
        assert!(!game.cooldown_active());
        assert!(game.tag(ALICE, BOB).unwrap().success);
    }

    #[tokio::test(start_paused = true)]
    async fn formatted_accessors() {
        let game = TagGame::new();
        assert_eq!(game.time_since_tagged(), "0 minutes, 0 seconds");
        assert_eq!(game.cooldown_remaining(), "0 minutes, 0 seconds");

        game.tag(ALICE, BOB).unwrap();
        assert_eq!(game.cooldown_remaining(), "5 minutes");
    }

    #[tokio::test(start_paused = true)]
    async fn tag_then_sees_new_record_only_on_success() {
        let game = TagGame::new();
        let mut seen = Vec::new();

        game.tag_then(ALICE, BOB, |record| seen.push(record.clone())).unwrap();
        game.tag_then(CAROL, BOB, |record| seen.push(record.clone())).unwrap();

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].current_holder, Some(BOB));
        assert_eq!(seen[0], game.record().unwrap());
    }
}
