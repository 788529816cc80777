//! HTTP handlers for account endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{parse_id, ApiJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiResponse, Envelope};
use crate::adapters::http::state::AppState;
use crate::application::{DeleteAccountCommand, GetUserQuery, ListUsersQuery, UpdateUserCommand};
use crate::domain::foundation::UserId;

use super::dto::{UpdateUserRequest, UserResponse};

/// GET /api/v1/users - admin only
pub async fn list_users(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let users = state
        .list_users_handler()
        .handle(ListUsersQuery { requester: user })
        .await?;

    let rows = users.iter().map(UserResponse::from).collect();
    Ok(ApiResponse::ok(Envelope::list(rows)))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id: UserId = parse_id(&id, "user")?;
    let user = state
        .get_user_handler()
        .handle(GetUserQuery { user_id })
        .await?;

    Ok(ApiResponse::ok(Envelope::data(UserResponse::from(&user))))
}

/// PUT /api/v1/users/:id - 204 on success
pub async fn update_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateUserCommand {
        user_id: parse_id(&id, "user")?,
        requester: user,
        name: request.name,
        old_password: request.old_password,
        new_password: request.new_password,
        new_password_confirm: request.new_password_confirm,
    };
    state.update_user_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteAccountCommand {
        user_id: parse_id(&id, "user")?,
        requester: user,
    };
    state.delete_account_handler().handle(cmd).await?;

    Ok(ApiResponse::ok(Envelope::message(
        "Account and related subscriptions deleted successfully",
    )))
}
