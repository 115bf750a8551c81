use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{error::ApiError, extract::ApiJson, state::AppState};

use super::{
    dto::{
        parse_booking_datetime, BookingCreated, BookingFilter, BookingStatus, NewBooking,
        StatusUpdate, StatusUpdated,
    },
    repo::{self, Booking, RestaurantPopularity},
};

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/status/:id", get(booking_status).put(update_status))
        .route("/bookings/popular", get(popular_bookings))
}

#[instrument(skip(state))]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(filter): Query<BookingFilter>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let rows = repo::list(&state.db, filter.user_id)
        .await
        .map_err(|e| ApiError::internal("Error fetching bookings", e))?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_booking(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewBooking>,
) -> Result<(StatusCode, Json<BookingCreated>), ApiError> {
    let user_id = payload
        .user_id
        .ok_or_else(|| ApiError::Validation("User ID is required".into()))?;

    let booking_datetime = match payload.booking_datetime.as_deref() {
        None => None,
        Some(raw) => Some(
            parse_booking_datetime(raw)
                .ok_or_else(|| ApiError::Validation("Invalid booking_datetime".into()))?,
        ),
    };

    let booking_id = repo::insert(&state.db, user_id, booking_datetime, &payload)
        .await
        .map_err(|e| ApiError::internal("Error inserting booking", e))?;
    info!(booking_id, user_id, "booking created");

    Ok((StatusCode::CREATED, Json(BookingCreated { booking_id })))
}

#[instrument(skip(state))]
pub async fn booking_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookingStatus>, ApiError> {
    let status = repo::status(&state.db, id)
        .await
        .map_err(|e| ApiError::internal("Error fetching booking status", e))?
        .ok_or_else(|| ApiError::NotFound("Booking not found".into()))?;
    Ok(Json(BookingStatus { status }))
}

#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<StatusUpdate>,
) -> Result<Json<StatusUpdated>, ApiError> {
    let status = payload
        .status
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("Status is required".into()))?;

    let found = repo::set_status(&state.db, id, &status)
        .await
        .map_err(|e| ApiError::internal("Failed to update status", e))?;
    if !found {
        return Err(ApiError::NotFound("Booking not found".into()));
    }
    info!(id, %status, "booking status updated");

    Ok(Json(StatusUpdated {
        message: "Status updated successfully",
        status,
    }))
}

#[instrument(skip(state))]
pub async fn popular_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantPopularity>>, ApiError> {
    let rows = repo::popular(&state.db)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch popular restaurants", e))?;
    Ok(Json(rows))
}
