use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::ApiError,
    extract::ApiJson,
    response::{CreatedResponse, MessageResponse},
    state::AppState,
};

use super::{
    dto::RestaurantInput,
    repo::{self, Restaurant},
};

pub fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants).post(create_restaurant))
        .route("/restaurants/:id", put(update_restaurant).delete(delete_restaurant))
}

#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let rows = repo::list(&state.db)
        .await
        .map_err(|e| ApiError::internal("Error fetching restaurants", e))?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RestaurantInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let name = payload
        .name()
        .ok_or_else(|| ApiError::Validation("Restaurant name is required".into()))?;

    let id = repo::insert(&state.db, name, &payload)
        .await
        .map_err(|e| ApiError::internal("Error adding restaurant", e))?;
    info!(id, "restaurant created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Restaurant added successfully", id)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<RestaurantInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    let name = payload
        .name()
        .ok_or_else(|| ApiError::Validation("Restaurant name is required".into()))?;

    let found = repo::update(&state.db, id, name, &payload)
        .await
        .map_err(|e| ApiError::internal("Error updating restaurant", e))?;
    if !found {
        return Err(ApiError::NotFound("Restaurant not found".into()));
    }
    Ok(Json(MessageResponse::new("Restaurant updated successfully")))
}

#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let found = repo::delete(&state.db, id)
        .await
        .map_err(|e| ApiError::internal("Error deleting restaurant", e))?;
    if !found {
        return Err(ApiError::NotFound("Restaurant not found".into()));
    }
    info!(id, "restaurant deleted");
    Ok(Json(MessageResponse::new("Restaurant deleted successfully")))
}
