use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

use super::repo::{self, EventBookings, MonthlyCount, RestaurantBookings};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBookings {
    pub bookings_by_month: Vec<MonthlyCount>,
}

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/monthly", get(monthly))
        .route("/analytics/popular-restaurants", get(popular_restaurants))
        .route("/analytics/popular-events", get(popular_events))
}

#[instrument(skip(state))]
pub async fn monthly(State(state): State<AppState>) -> Result<Json<MonthlyBookings>, ApiError> {
    let bookings_by_month = repo::bookings_by_month(&state.db)
        .await
        .map_err(|e| ApiError::internal("Error fetching monthly bookings", e))?;
    Ok(Json(MonthlyBookings { bookings_by_month }))
}

#[instrument(skip(state))]
pub async fn popular_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantBookings>>, ApiError> {
    let rows = repo::popular_restaurants(&state.db)
        .await
        .map_err(|e| ApiError::internal("Error fetching popular restaurants", e))?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn popular_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventBookings>>, ApiError> {
    let rows = repo::popular_events(&state.db)
        .await
        .map_err(|e| ApiError::internal("Error fetching popular events", e))?;
    Ok(Json(rows))
}
