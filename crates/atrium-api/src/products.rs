use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use atrium_types::api::{NewProduct, ProductPatch};
use atrium_types::models::Product;

use crate::auth::AppState;
use crate::error::{ApiError, join_error};

/// Public listing for the marketing site, ordered by `display_order`.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let db = state.clone();
    let products = tokio::task::spawn_blocking(move || db.db.list_products())
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    if req.name.is_empty() || req.icon_class.is_empty() {
        return Err(ApiError::BadRequest("Name and Icon Class are required.".into()));
    }

    let db = state.clone();
    let product = tokio::task::spawn_blocking(move || db.db.create_product(&req))
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No fields to update provided.".into()));
    }

    let db = state.clone();
    let updated = tokio::task::spawn_blocking(move || db.db.update_product(id, &patch))
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    updated.map(Json).ok_or(ApiError::NotFound("Product"))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let db = state.clone();
    let removed = tokio::task::spawn_blocking(move || db.db.delete_product(id))
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    if !removed {
        return Err(ApiError::NotFound("Product"));
    }
    Ok(StatusCode::NO_CONTENT)
}
