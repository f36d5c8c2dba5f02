use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::auth::AppState;
use crate::error::ApiError;

/// Gate for mutating and privileged routes. Two-tier rejection: no
/// credential presented at all is 401, a presented credential that fails
/// verification (bad signature, malformed, expired alike) is 403.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)?;

    let claims = state.tokens.verify(token).map_err(|_| ApiError::Forbidden)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
