use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
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
    dto::{MenuItemUpdate, NewMenuItem},
    repo::{self, MenuItem},
};

pub fn menu_routes() -> Router<AppState> {
    // GET reads the segment as a restaurant id, PUT/DELETE as a menu item id.
    Router::new()
        .route("/menu", get(list_menu).post(create_menu_item))
        .route(
            "/menu/:id",
            get(menu_for_restaurant)
                .put(update_menu_item)
                .delete(delete_menu_item),
        )
}

#[instrument(skip(state))]
pub async fn list_menu(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let rows = repo::list(&state.db)
        .await
        .map_err(|e| ApiError::internal("Error fetching menu", e))?;
    Ok(Json(rows))
}

#[instrument(skip(state))]
pub async fn menu_for_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let rows = repo::list_for_restaurant(&state.db, restaurant_id)
        .await
        .map_err(|e| ApiError::internal("Error fetching menu", e))?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn create_menu_item(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewMenuItem>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let (Some(restaurant_id), Some(name)) = (payload.restaurant_id, payload.name()) else {
        return Err(ApiError::Validation(
            "Restaurant ID and name are required".into(),
        ));
    };

    let id = repo::insert(&state.db, restaurant_id, name, &payload)
        .await
        .map_err(|e| ApiError::internal("Error adding menu item", e))?
        .ok_or_else(|| ApiError::NotFound("Restaurant not found".into()))?;
    info!(id, restaurant_id, "menu item created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Menu item added successfully", id)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<MenuItemUpdate>,
) -> Result<Json<MessageResponse>, ApiError> {
    let name = payload
        .name()
        .ok_or_else(|| ApiError::Validation("Menu item name is required".into()))?;

    let found = repo::update(&state.db, id, name, &payload)
        .await
        .map_err(|e| ApiError::internal("Error updating menu item", e))?;
    if !found {
        return Err(ApiError::NotFound("Menu item not found".into()));
    }
    Ok(Json(MessageResponse::new("Menu item updated successfully")))
}

#[instrument(skip(state))]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let found = repo::delete(&state.db, id)
        .await
        .map_err(|e| ApiError::internal("Error deleting menu item", e))?;
    if !found {
        return Err(ApiError::NotFound("Menu item not found".into()));
    }
    Ok(Json(MessageResponse::new("Menu item deleted successfully")))
}
