pub mod auth;
pub mod error;
pub mod middleware;
pub mod partners;
pub mod products;
pub mod testimonials;
pub mod token;
pub mod users;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::auth::AppState;

/// Build the full route table over the given state. Living in the library
/// (rather than the server binary) lets tests drive the app in-process
/// against an in-memory database.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/login", post(auth::login))
        .route("/api/partners", get(partners::list_partners))
        .route("/api/products", get(products::list_products))
        .route("/api/testimonials", get(testimonials::list_testimonials));

    let protected = Router::new()
        .route("/api/partners", post(partners::create_partner))
        .route(
            "/api/partners/{id}",
            put(partners::update_partner).delete(partners::delete_partner),
        )
        .route("/api/products", post(products::create_product))
        .route(
            "/api/products/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        .route("/api/testimonials", post(testimonials::create_testimonial))
        .route(
            "/api/testimonials/{id}",
            put(testimonials::update_testimonial).delete(testimonials::delete_testimonial),
        )
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/{id}",
            put(users::update_user).delete(users::delete_user),
        )
        .route("/api/verify-token", get(auth::verify_token))
        .layer(from_fn_with_state(state.clone(), middleware::require_auth));

    Router::new().merge(public).merge(protected).with_state(state)
}
