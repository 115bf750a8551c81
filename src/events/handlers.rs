use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{error::ApiError, extract::ApiJson, response::CreatedResponse, state::AppState};

use super::{
    dto::{parse_event_date, JoinEventRequest, NewEvent},
    repo::{self, Event, EventPopularity},
};

pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/join-event", post(join_event))
        .route("/popular-events", get(popular_events))
}

#[instrument(skip(state))]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let rows = repo::list(&state.db)
        .await
        .map_err(|e| ApiError::internal("Error fetching events", e))?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewEvent>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let name = payload
        .name()
        .ok_or_else(|| ApiError::Validation("Event name is required".into()))?;

    let id = repo::insert(&state.db, name, &payload)
        .await
        .map_err(|e| ApiError::internal("Error adding event", e))?;
    info!(id, "event created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Event added successfully", id)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn join_event(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<JoinEventRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let date = payload
        .date
        .as_deref()
        .and_then(parse_event_date)
        .ok_or_else(|| ApiError::Validation("A valid date is required".into()))?;

    let id = repo::insert_booking(&state.db, date, &payload)
        .await
        .map_err(|e| ApiError::internal("Error booking event", e))?;
    info!(id, %date, "event booking created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Event booked successfully", id)),
    ))
}

#[instrument(skip(state))]
pub async fn popular_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventPopularity>>, ApiError> {
    let rows = repo::popularity(&state.db)
        .await
        .map_err(|e| ApiError::internal("Error fetching popular events", e))?;
    Ok(Json(rows))
}
