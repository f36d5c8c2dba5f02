use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Every failure the API can hand back to a client, with one explicit
/// mapping to status codes and bodies. Handlers construct variants; nothing
/// downstream inspects message text to decide a status.
///
/// The two credential variants keep the exact body shape (`message` key and
/// wording) the admin panel already parses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("username and password are required")]
    MissingCredentials,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("no bearer credential presented")]
    Unauthenticated,

    #[error("credential failed verification")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Username and password are required." })),
            )
                .into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid username or password" })),
            )
                .into_response(),
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED.into_response(),
            ApiError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{} not found.", entity) })),
            )
                .into_response(),
            ApiError::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Internal(err) => {
                // Full detail stays server-side; clients get a fixed message.
                tracing::error!("internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Server error. Please try again later." })),
                )
                    .into_response()
            }
        }
    }
}

pub(crate) fn join_error(err: tokio::task::JoinError) -> ApiError {
    ApiError::Internal(anyhow::anyhow!("blocking task failed: {}", err))
}
