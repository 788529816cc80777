//! ListAllSubscriptionsHandler - Admin query over every subscription.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::ports::{SubscriptionRepository, SubscriptionWithOwner};

#[derive(Debug, Clone)]
pub struct ListAllSubscriptionsQuery {
    pub requester: AuthenticatedUser,
}

pub struct ListAllSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl ListAllSubscriptionsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// - `AdminRequired` if the requester is not an admin
    pub async fn handle(
        &self,
        query: ListAllSubscriptionsQuery,
    ) -> Result<Vec<SubscriptionWithOwner>, DomainError> {
        if !query.requester.is_admin {
            return Err(DomainError::new(
                ErrorCode::AdminRequired,
                "Admin access required",
            ));
        }
        self.repository.list_all_with_owner().await
    }
}
