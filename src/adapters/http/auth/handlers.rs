//! HTTP handlers for authentication endpoints.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;

use crate::adapters::http::cookie::{clear_session_cookie, session_cookie};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::response::{ApiResponse, Envelope};
use crate::adapters::http::state::AppState;
use crate::application::AuthSession;

use super::dto::{
    AdminResponse, CreateAdminRequest, SessionResponse, SignInRequest, SignUpRequest,
};

/// POST /api/v1/auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.sign_up_handler().handle(request.into()).await?;
    let cookie = session_cookie(
        &session.token.token,
        session.token.expires_in_secs,
        state.secure_cookies,
    );
    let body = Envelope::data(session_response(session)).with_message("User created successfully");

    Ok(([(SET_COOKIE, cookie)], ApiResponse::created(body)))
}

/// POST /api/v1/auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.sign_in_handler().handle(request.into()).await?;
    let cookie = session_cookie(
        &session.token.token,
        session.token.expires_in_secs,
        state.secure_cookies,
    );
    let body =
        Envelope::data(session_response(session)).with_message("User signed in successfully");

    Ok(([(SET_COOKIE, cookie)], ApiResponse::ok(body)))
}

/// POST /api/v1/auth/sign-out
///
/// Tokens are stateless; signing out only drops the cookie.
pub async fn sign_out(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie(state.secure_cookies))],
        ApiResponse::ok(Envelope::message("User signed out successfully")),
    )
}

/// POST /api/v1/auth/create-admin
pub async fn create_admin(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateAdminRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = state.create_admin_handler().handle(request.into()).await?;
    let body = Envelope::data(AdminResponse::from(&admin))
        .with_message("Admin account created successfully");
    Ok(ApiResponse::created(body))
}

fn session_response(session: AuthSession) -> SessionResponse {
    SessionResponse {
        user: (&session.user).into(),
        token: session.token.token,
    }
}
