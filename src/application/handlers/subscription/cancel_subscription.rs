//! CancelSubscriptionHandler - Command handler for `active -> cancelled`.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, SubscriptionId, Timestamp};
use crate::domain::subscription::Subscription;
use crate::ports::SubscriptionRepository;

use super::load_authorized;

#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub requester: AuthenticatedUser,
}

pub struct CancelSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl CancelSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    /// The status change is a conditional write in the repository, so of
    /// two concurrent cancels exactly one succeeds.
    ///
    /// # Errors
    ///
    /// - `AlreadyCancelled` if the subscription was cancelled before
    pub async fn handle(&self, cmd: CancelSubscriptionCommand) -> Result<Subscription, DomainError> {
        load_authorized(self.repository.as_ref(), &cmd.subscription_id, &cmd.requester).await?;

        let cancelled = self
            .repository
            .mark_cancelled(&cmd.subscription_id, &Timestamp::now())
            .await?;

        tracing::info!(subscription_id = %cancelled.id(), "subscription cancelled");
        Ok(cancelled)
    }
}
