//! Router for authentication endpoints.

use axum::{routing::post, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{create_admin, sign_in, sign_out, sign_up};

/// Public routes, mounted at `/api/v1/auth` without the auth middleware.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
        .route("/create-admin", post(create_admin))
}
