//! Match API handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use match_core::{CreateMatchPayload, Issue, ListMatchesParams, Match, ValidationIssues};

use super::{ApiError, DataResponse};
use crate::AppState;

/// List matches, newest first.
///
/// # Endpoint
///
/// `GET /matches`
///
/// # Query Parameters
///
/// - `limit`: Positive integer (default: 50, capped at 100)
///
/// # Response
///
/// - `200 OK`: `{ "data": [Match] }`
/// - `400 Bad Request`: `{ "error", "details" }` when `limit` is not a positive integer
/// - `500 Internal Server Error`: Database error
pub async fn list_matches(
    State(state): State<AppState>,
    params: Result<Query<ListMatchesParams>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<Match>>>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        ApiError::InvalidQuery(ValidationIssues::single(Issue::malformed(
            rejection.body_text(),
        )))
    })?;
    let query = params.parse().map_err(ApiError::InvalidQuery)?;

    let matches = state
        .repo
        .list_matches(query.effective_limit())
        .await
        .map_err(ApiError::FetchFailed)?;

    Ok(Json(DataResponse::new(matches)))
}

/// Create a match.
///
/// # Endpoint
///
/// `POST /matches`
///
/// # Body
///
/// `{ "startTime", "endTime", "homeScore"?, "awayScore"? }` with RFC 3339
/// timestamps. Scores default to 0; the status is derived from the window at
/// the time of the request.
///
/// # Response
///
/// - `201 Created`: `{ "data": Match }`
/// - `400 Bad Request`: `{ "error", "details" }` for a malformed payload
/// - `500 Internal Server Error`: Database error
pub async fn create_match(
    State(state): State<AppState>,
    payload: Result<Json<CreateMatchPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Match>>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        ApiError::InvalidPayload(ValidationIssues::single(Issue::malformed(
            rejection.body_text(),
        )))
    })?;
    let new_match = payload.parse(Utc::now()).map_err(ApiError::InvalidPayload)?;

    let created = state
        .repo
        .create_match(new_match)
        .await
        .map_err(ApiError::CreateFailed)?;

    tracing::info!(match_id = created.id, status = %created.status, "Match created");

    if let Err(e) = state.notifier.match_created(&created) {
        tracing::warn!(match_id = created.id, "Match notifier failed: {}", e);
    }

    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}
