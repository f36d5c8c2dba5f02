use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State};

use atrium_db::Database;
use atrium_types::api::{Claims, LoginRequest, LoginResponse, VerifyTokenResponse};
use atrium_types::models::Role;

use crate::error::ApiError;
use crate::token::TokenService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenService,
}

/// Exchange a username/password pair for a signed session token. Unknown
/// usernames and wrong passwords are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::MissingCredentials);
    }

    let user = state
        .db
        .get_user_by_username(&req.username)
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::InvalidCredentials)?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| ApiError::Internal(anyhow!("corrupt password hash for user {}: {}", user.id, e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::InvalidCredentials)?;

    let role = Role::parse(&user.role)
        .ok_or_else(|| ApiError::Internal(anyhow!("unknown role '{}' for user {}", user.role, user.id)))?;

    let token = state
        .tokens
        .issue(user.id, &user.username, role)
        .map_err(ApiError::Internal)?;

    Ok(Json(LoginResponse { token }))
}

/// Reaching this handler at all means the guard accepted the token; echo
/// the verified claims back so the admin panel can restore its session.
pub async fn verify_token(Extension(claims): Extension<Claims>) -> Json<VerifyTokenResponse> {
    Json(VerifyTokenResponse {
        valid: true,
        user: claims,
    })
}

/// Argon2id with a fresh random salt. Shared by the user routes and the
/// create-admin binary so every stored hash has the same shape.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {}", e))?;
    Ok(hash.to_string())
}
