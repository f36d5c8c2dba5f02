use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use atrium_types::api::{NewPartner, PartnerPatch};
use atrium_types::models::Partner;

use crate::auth::AppState;
use crate::error::{ApiError, join_error};

pub async fn list_partners(State(state): State<AppState>) -> Result<Json<Vec<Partner>>, ApiError> {
    let db = state.clone();
    let partners = tokio::task::spawn_blocking(move || db.db.list_partners())
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    Ok(Json(partners))
}

pub async fn create_partner(
    State(state): State<AppState>,
    Json(req): Json<NewPartner>,
) -> Result<(StatusCode, Json<Partner>), ApiError> {
    if req.name.is_empty() || req.logo_url.is_empty() {
        return Err(ApiError::BadRequest("Name and logo URL are required.".into()));
    }

    let db = state.clone();
    let partner = tokio::task::spawn_blocking(move || db.db.create_partner(&req.name, &req.logo_url))
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    Ok((StatusCode::CREATED, Json(partner)))
}

pub async fn update_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<PartnerPatch>,
) -> Result<Json<Partner>, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No fields to update provided.".into()));
    }

    let db = state.clone();
    let updated = tokio::task::spawn_blocking(move || db.db.update_partner(id, &patch))
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    updated.map(Json).ok_or(ApiError::NotFound("Partner"))
}

pub async fn delete_partner(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let db = state.clone();
    let removed = tokio::task::spawn_blocking(move || db.db.delete_partner(id))
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    if !removed {
        return Err(ApiError::NotFound("Partner"));
    }
    Ok(StatusCode::NO_CONTENT)
}
