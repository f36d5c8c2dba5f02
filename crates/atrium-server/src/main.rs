use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use atrium_api::auth::{AppState, AppStateInner};
use atrium_api::token::TokenService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atrium=debug,tower_http=debug".into()),
        )
        .init();

    // Config. A missing or empty signing secret is a fatal startup error.
    let jwt_secret = std::env::var("ATRIUM_JWT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .context("FATAL: ATRIUM_JWT_SECRET must be set to a non-empty value")?;
    let db_path = std::env::var("ATRIUM_DB_PATH").unwrap_or_else(|_| "atrium.db".into());
    let host = std::env::var("ATRIUM_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("ATRIUM_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = atrium_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        tokens: TokenService::new(&jwt_secret),
    });

    let app = atrium_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Atrium server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
