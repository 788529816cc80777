//! Router for subscription endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    cancel_subscription, create_subscription, delete_subscription, get_subscription,
    list_all_subscriptions, list_user_subscriptions, upcoming_renewals, update_subscription,
};

/// Authenticated routes, mounted at `/api/v1/subscriptions`.
///
/// Static segments (`upcoming-renewals`, `user`) take precedence over `:id`.
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all_subscriptions).post(create_subscription))
        .route("/upcoming-renewals", get(upcoming_renewals))
        .route("/user/:id", get(list_user_subscriptions))
        .route(
            "/:id",
            get(get_subscription)
                .put(update_subscription)
                .delete(delete_subscription),
        )
        .route("/:id/cancel", put(cancel_subscription))
}
