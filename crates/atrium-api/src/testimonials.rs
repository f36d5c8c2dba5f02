use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use atrium_types::api::{NewTestimonial, TestimonialPatch};
use atrium_types::models::Testimonial;

use crate::auth::AppState;
use crate::error::{ApiError, join_error};

pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let db = state.clone();
    let testimonials = tokio::task::spawn_blocking(move || db.db.list_testimonials())
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    Ok(Json(testimonials))
}

pub async fn create_testimonial(
    State(state): State<AppState>,
    Json(req): Json<NewTestimonial>,
) -> Result<(StatusCode, Json<Testimonial>), ApiError> {
    if req.quote.is_empty() || req.client_name.is_empty() {
        return Err(ApiError::BadRequest("Quote and Client Name are required.".into()));
    }

    let db = state.clone();
    let testimonial = tokio::task::spawn_blocking(move || db.db.create_testimonial(&req))
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    Ok((StatusCode::CREATED, Json(testimonial)))
}

pub async fn update_testimonial(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<TestimonialPatch>,
) -> Result<Json<Testimonial>, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No fields to update provided.".into()));
    }

    let db = state.clone();
    let updated = tokio::task::spawn_blocking(move || db.db.update_testimonial(id, &patch))
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    updated.map(Json).ok_or(ApiError::NotFound("Testimonial"))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let db = state.clone();
    let removed = tokio::task::spawn_blocking(move || db.db.delete_testimonial(id))
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    if !removed {
        return Err(ApiError::NotFound("Testimonial"));
    }
    Ok(StatusCode::NO_CONTENT)
}
