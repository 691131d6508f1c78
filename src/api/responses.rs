//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::{Member, Notification},
    state::{MemberId, TagReport},
};

/// Body of POST /tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRequest {
    pub tagger_id: MemberId,
    pub target_id: MemberId,
}

/// Result of a tag attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    /// "tagged" or "cooldown"
    pub status: String,
    pub notification: Notification,
    pub holder: Option<MemberId>,
    pub previous_holder: Option<MemberId>,
    pub previous_hold_seconds: i64,
    pub cooldown_remaining_seconds: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl TagResponse {
    pub fn from_report(report: TagReport, holder: Option<MemberId>) -> Self {
        let status = if report.outcome.success { "tagged" } else { "cooldown" };
        Self {
            status: status.to_string(),
            notification: report.notification,
            holder,
            previous_holder: report.outcome.previous_holder,
            previous_hold_seconds: report.outcome.previous_hold_seconds,
            cooldown_remaining_seconds: report.outcome.cooldown_remaining_seconds,
            timestamp: Utc::now(),
        }
    }
}

/// Visible, non-fatal failure message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Members selectable as a tag target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagOptionsResponse {
    pub options: Vec<Member>,
}

/// Reply to GET /timetagged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeTaggedResponse {
    pub holder: Option<MemberId>,
    pub message: String,
}

/// Reply to GET /cooldown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownResponse {
    pub active: bool,
    pub remaining_seconds: u64,
    pub message: String,
}

/// Status response with holder and cooldown information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub holder: Option<MemberId>,
    pub holder_name: Option<String>,
    pub previous_holder: Option<MemberId>,
    pub previous_hold_seconds: i64,
    pub held_since: Option<DateTime<Utc>>,
    pub cooldown_active: bool,
    pub cooldown_remaining_seconds: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
