use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use atrium_db::models::UserRow;
use atrium_types::api::{NewUser, UserUpdate};
use atrium_types::models::{Role, UserInfo};

use crate::auth::{AppState, hash_password};
use crate::error::{ApiError, join_error};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserInfo>>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_users())
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    let users = rows
        .into_iter()
        .map(user_info)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<UserInfo>), ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("Username and password are required.".into()));
    }

    let username = req.username.clone();
    let role = req.role.unwrap_or(Role::Admin);

    // Argon2 hashing is CPU-bound, keep it off the async runtime too.
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || {
        let password_hash = hash_password(&req.password)?;
        db.db.create_user(&req.username, &password_hash, role.as_str())
    })
    .await
    .map_err(join_error)?
    .map_err(|e| map_username_conflict(&username, e))?;

    Ok((StatusCode::CREATED, Json(user_info(row)?)))
}

/// Two fixed branches rather than the generic patch path: a supplied
/// password has to be re-hashed before it can touch the row.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UserUpdate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if req.username.is_empty() {
        return Err(ApiError::BadRequest("Username is required.".into()));
    }

    let username = req.username.clone();
    let db = state.clone();
    let updated = tokio::task::spawn_blocking(move || {
        let password_hash = match req.password.as_deref() {
            Some(password) if !password.is_empty() => Some(hash_password(password)?),
            _ => None,
        };
        db.db.update_user(id, &req.username, password_hash.as_deref())
    })
    .await
    .map_err(join_error)?
    .map_err(|e| map_username_conflict(&username, e))?;

    if !updated {
        return Err(ApiError::NotFound("User"));
    }
    Ok(Json(json!({ "message": "User updated successfully." })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let db = state.clone();
    let removed = tokio::task::spawn_blocking(move || db.db.delete_user(id))
        .await
        .map_err(join_error)?
        .map_err(ApiError::Internal)?;

    if !removed {
        return Err(ApiError::NotFound("User"));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn user_info(row: UserRow) -> Result<UserInfo, ApiError> {
    let role = Role::parse(&row.role).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown role '{}' for user {}", row.role, row.id))
    })?;

    Ok(UserInfo {
        id: row.id,
        username: row.username,
        role,
        created_at: row.created_at,
    })
}

fn map_username_conflict(username: &str, err: anyhow::Error) -> ApiError {
    if atrium_db::is_unique_violation(&err) {
        ApiError::Conflict(format!("A user with the username \"{}\" already exists.", username))
    } else {
        ApiError::Internal(err)
    }
}
