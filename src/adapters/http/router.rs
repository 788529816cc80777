//! Top-level router assembly.

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Serialize;

use super::auth::auth_routes;
use super::error::ApiError;
use super::middleware::{auth_middleware, bot_filter_middleware, rate_limit_middleware};
use super::response::{ApiResponse, Envelope};
use super::state::AppState;
use super::subscription::subscription_routes;
use super::user::user_routes;

pub const WELCOME_TEXT: &str = "Welcome to the subscription tracker api";

/// Builds the full application router.
///
/// Request flow: rate limit → bot filter → auth (protected routes only)
/// → handler. Transport layers such as tracing and CORS are added by the
/// binary.
pub fn app_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/subscriptions", subscription_routes())
        .nest("/users", user_routes())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new().nest("/auth", auth_routes()).merge(protected);

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .nest("/api/v1", api)
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), bot_filter_middleware))
        .layer(from_fn_with_state(state.clone(), rate_limit_middleware))
        .with_state(state)
}

async fn welcome() -> &'static str {
    WELCOME_TEXT
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

async fn health() -> impl IntoResponse {
    ApiResponse::ok(Envelope::data(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found")
}
