//! HTTP handlers for subscription endpoints.
//!
//! Each handler parses the request, builds the application command and maps
//! the result into the response envelope. Authorization lives in the
//! application layer.

use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::{parse_id, ApiJson};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiResponse, Envelope};
use crate::adapters::http::state::AppState;
use crate::application::{
    CancelSubscriptionCommand, CreateSubscriptionCommand, DeleteSubscriptionCommand,
    GetSubscriptionQuery, ListAllSubscriptionsQuery, ListUserSubscriptionsQuery,
    UpcomingRenewalsQuery, UpdateSubscriptionCommand,
};
use crate::domain::foundation::SubscriptionId;

use super::dto::{
    CreateSubscriptionRequest, CreatedSubscriptionResponse, SubscriptionResponse,
    SubscriptionWithOwnerResponse, UpdateSubscriptionRequest,
};

fn subscription_id(raw: &str) -> Result<SubscriptionId, ApiError> {
    parse_id(raw, "subscription")
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/subscriptions - admin only
pub async fn list_all_subscriptions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .list_all_subscriptions_handler()
        .handle(ListAllSubscriptionsQuery { requester: user })
        .await?;

    let data = rows.iter().map(SubscriptionWithOwnerResponse::from).collect();
    Ok(ApiResponse::ok(Envelope::list(data)))
}

/// GET /api/v1/subscriptions/:id
pub async fn get_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetSubscriptionQuery {
        subscription_id: subscription_id(&id)?,
        requester: user,
    };
    let subscription = state.get_subscription_handler().handle(query).await?;

    Ok(ApiResponse::ok(Envelope::data(SubscriptionResponse::from(
        &subscription,
    ))))
}

/// GET /api/v1/subscriptions/user/:id
pub async fn list_user_subscriptions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListUserSubscriptionsQuery {
        user_id: parse_id(&id, "user")?,
        requester: user,
    };
    let subscriptions = state.list_user_subscriptions_handler().handle(query).await?;

    let data = subscriptions.iter().map(SubscriptionResponse::from).collect();
    Ok(ApiResponse::ok(Envelope::list(data)))
}

/// GET /api/v1/subscriptions/upcoming-renewals
pub async fn upcoming_renewals(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let renewals = state
        .upcoming_renewals_handler()
        .handle(UpcomingRenewalsQuery { requester: user })
        .await?;

    Ok(ApiResponse::ok(Envelope::list(renewals)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/subscriptions
pub async fn create_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CreateSubscriptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateSubscriptionCommand {
        owner: user.id,
        draft: request.into_draft()?,
    };
    let result = state.create_subscription_handler().handle(cmd).await?;

    let body = CreatedSubscriptionResponse {
        subscription: (&result.subscription).into(),
        workflow_run_id: result.workflow_run_id.map(|id| id.to_string()),
    };
    Ok(ApiResponse::created(Envelope::data(body)))
}

/// PUT /api/v1/subscriptions/:id
pub async fn update_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateSubscriptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateSubscriptionCommand {
        subscription_id: subscription_id(&id)?,
        requester: user,
        patch: request.into_patch()?,
    };
    let updated = state.update_subscription_handler().handle(cmd).await?;

    Ok(ApiResponse::ok(
        Envelope::data(SubscriptionResponse::from(&updated))
            .with_message("Subscription updated successfully"),
    ))
}

/// DELETE /api/v1/subscriptions/:id
pub async fn delete_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteSubscriptionCommand {
        subscription_id: subscription_id(&id)?,
        requester: user,
    };
    state.delete_subscription_handler().handle(cmd).await?;

    Ok(ApiResponse::ok(Envelope::message(
        "Subscription deleted successfully",
    )))
}

/// PUT /api/v1/subscriptions/:id/cancel
pub async fn cancel_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CancelSubscriptionCommand {
        subscription_id: subscription_id(&id)?,
        requester: user,
    };
    let cancelled = state.cancel_subscription_handler().handle(cmd).await?;

    Ok(ApiResponse::ok(
        Envelope::data(SubscriptionResponse::from(&cancelled))
            .with_message("Subscription cancelled successfully"),
    ))
}
