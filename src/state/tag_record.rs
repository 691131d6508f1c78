//! Tag record structure and its persisted form

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Member identifier as used by the chat platform
pub type MemberId = u64;

/// Who is it, who was it before, and for how long
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRecord {
    pub current_holder: Option<MemberId>,
    pub previous_holder: Option<MemberId>,
    pub held_since: Option<DateTime<Utc>>,
    /// Frozen when the tag changed hands
    pub previous_hold_seconds: i64,
}

impl TagRecord {
    /// Seconds the current holder has been it, measured at `now`
    pub fn held_for(&self, now: DateTime<Utc>) -> i64 {
        self.held_since
            .map(|since| (now - since).num_seconds())
            .unwrap_or(0)
    }
}

/// Flat record written to the data file. Id `0` means nobody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub tagged_id: MemberId,
    pub prev_tagged_id: MemberId,
    #[serde(default)]
    pub tagged_datetime: String,
    pub prev_tagged_time_seconds: i64,
}

fn id_to_field(id: Option<MemberId>) -> MemberId {
    id.unwrap_or(0)
}

fn field_to_id(id: MemberId) -> Option<MemberId> {
    (id != 0).then_some(id)
}

/// Parse an ISO-8601 timestamp, with or without an offset (naive values are UTC)
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .with_context(|| format!("Invalid timestamp: {}", value))
}

impl From<&TagRecord> for PersistedRecord {
    fn from(record: &TagRecord) -> Self {
        Self {
            tagged_id: id_to_field(record.current_holder),
            prev_tagged_id: id_to_field(record.previous_holder),
            tagged_datetime: record
                .held_since
                .map(|since| since.to_rfc3339())
                .unwrap_or_default(),
            prev_tagged_time_seconds: record.previous_hold_seconds,
        }
    }
}

impl TryFrom<PersistedRecord> for TagRecord {
    type Error = anyhow::Error;

    fn try_from(persisted: PersistedRecord) -> Result<Self> {
        let held_since = if persisted.tagged_datetime.is_empty() {
            None
        } else {
            Some(parse_timestamp(&persisted.tagged_datetime)?)
        };

        Ok(Self {
            current_holder: field_to_id(persisted.tagged_id),
            previous_holder: field_to_id(persisted.prev_tagged_id),
            held_since,
            previous_hold_seconds: persisted.prev_tagged_time_seconds,
        })
    }
}
