//! Subscription command and query handlers.

mod cancel_subscription;
mod create_subscription;
mod delete_subscription;
mod get_subscription;
mod list_all_subscriptions;
mod list_user_subscriptions;
mod update_subscription;
mod upcoming_renewals;

pub use cancel_subscription::{CancelSubscriptionCommand, CancelSubscriptionHandler};
pub use create_subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
};
pub use delete_subscription::{DeleteSubscriptionCommand, DeleteSubscriptionHandler};
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery};
pub use list_all_subscriptions::{ListAllSubscriptionsHandler, ListAllSubscriptionsQuery};
pub use list_user_subscriptions::{ListUserSubscriptionsHandler, ListUserSubscriptionsQuery};
pub use update_subscription::{UpdateSubscriptionCommand, UpdateSubscriptionHandler};
pub use upcoming_renewals::{UpcomingRenewalsHandler, UpcomingRenewalsQuery};

use crate::domain::foundation::{
    require_access, AuthenticatedUser, DomainError, ErrorCode, SubscriptionId,
};
use crate::domain::subscription::Subscription;
use crate::ports::SubscriptionRepository;

/// Loads a subscription and runs the access policy on it.
///
/// A missing subscription is reported before access is checked.
pub(crate) async fn load_authorized(
    repository: &dyn SubscriptionRepository,
    id: &SubscriptionId,
    requester: &AuthenticatedUser,
) -> Result<Subscription, DomainError> {
    let subscription = repository.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::SubscriptionNotFound, "Subscription not found")
            .with_detail("subscription_id", id.to_string())
    })?;

    if let Err(denied) = require_access(&subscription, requester) {
        tracing::warn!(
            subscription_id = %id,
            owner_id = %subscription.user_id(),
            requester_id = %requester.id,
            "subscription access denied"
        );
        return Err(denied);
    }
    Ok(subscription)
}
