//! ListUserSubscriptionsHandler - Query for one user's subscriptions.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, UserId};
use crate::domain::subscription::Subscription;
use crate::ports::SubscriptionRepository;

#[derive(Debug, Clone)]
pub struct ListUserSubscriptionsQuery {
    pub user_id: UserId,
    pub requester: AuthenticatedUser,
}

pub struct ListUserSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl ListUserSubscriptionsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    /// Lists subscriptions of `user_id`.
    ///
    /// # Errors
    ///
    /// - `Forbidden` unless the requester is that user or an admin
    pub async fn handle(
        &self,
        query: ListUserSubscriptionsQuery,
    ) -> Result<Vec<Subscription>, DomainError> {
        if !query.requester.is_user(&query.user_id) && !query.requester.is_admin {
            tracing::warn!(
                requester_id = %query.requester.id,
                target_user_id = %query.user_id,
                "listing another user's subscriptions denied"
            );
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "You are not the owner of this account",
            ));
        }

        self.repository.list_by_owner(&query.user_id).await
    }
}
