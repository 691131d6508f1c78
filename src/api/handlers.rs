//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, TagError};
use super::responses::{
    CooldownResponse, ErrorResponse, HealthResponse, StatusResponse, TagOptionsResponse,
    TagRequest, TagResponse, TimeTaggedResponse,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Handle POST /tag - Tag a member
pub async fn tag_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TagRequest>,
) -> Result<Json<TagResponse>, ApiError> {
    info!("{} is tagging {}", request.tagger_id, request.target_id);

    match state.handle_tag(request.tagger_id, request.target_id) {
        Ok(report) => Ok(Json(TagResponse::from_report(report, state.game.current_holder()))),
        Err(TagError::UnknownMember(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("There was an internal error while tagging this person.")),
        )),
        Err(e) => {
            error!("Failed to handle tag: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(e.to_string()))))
        }
    }
}

/// Handle GET /tag/options - Members that can be tagged
pub async fn tag_options_handler(State(state): State<Arc<AppState>>) -> Json<TagOptionsResponse> {
    let options = state.tag_options(state.game.current_holder());
    Json(TagOptionsResponse { options })
}

/// Handle GET /timetagged - How long the current holder has been it
pub async fn time_tagged_handler(State(state): State<Arc<AppState>>) -> Json<TimeTaggedResponse> {
    let message = match state.current_holder_name() {
        Some(name) => format!("{} has been it for {}.", name, state.game.time_since_tagged()),
        None => "Nobody is it yet.".to_string(),
    };

    Json(TimeTaggedResponse {
        holder: state.game.current_holder(),
        message,
    })
}

/// Handle GET /cooldown - How much longer the tagback cooldown lasts
pub async fn cooldown_handler(State(state): State<Arc<AppState>>) -> Json<CooldownResponse> {
    let active = state.game.cooldown_active();
    let message = if active {
        format!("The cooldown has {} remaining.", state.game.cooldown_remaining())
    } else {
        "The cooldown has expired.".to_string()
    };

    Json(CooldownResponse {
        active,
        remaining_seconds: state.game.cooldown_remaining_seconds(),
        message,
    })
}

/// Handle GET /status - Return current game status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let record = match state.game.record() {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to get tag record: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        holder: record.current_holder,
        holder_name: state.current_holder_name(),
        previous_holder: record.previous_holder,
        previous_hold_seconds: record.previous_hold_seconds,
        held_since: record.held_since,
        cooldown_active: state.game.cooldown_active(),
        cooldown_remaining_seconds: state.game.cooldown_remaining_seconds(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
