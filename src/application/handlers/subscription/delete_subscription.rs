//! DeleteSubscriptionHandler - Command handler for removing a subscription.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, SubscriptionId};
use crate::ports::SubscriptionRepository;

use super::load_authorized;

#[derive(Debug, Clone)]
pub struct DeleteSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub requester: AuthenticatedUser,
}

pub struct DeleteSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl DeleteSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteSubscriptionCommand) -> Result<(), DomainError> {
        let subscription =
            load_authorized(self.repository.as_ref(), &cmd.subscription_id, &cmd.requester)
                .await?;

        self.repository.delete(subscription.id()).await?;

        tracing::info!(
            subscription_id = %subscription.id(),
            deleted_by = %cmd.requester.id,
            "subscription deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        add_subscription, draft, requester, seeded_store, user,
    };
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn owner_deletes_and_repeat_is_not_found() {
        let (store, alice, _) = seeded_store().await;
        let sub = add_subscription(&store, alice.id(), draft()).await;
        let handler = DeleteSubscriptionHandler::new(Arc::new(store.clone()));
        let cmd = DeleteSubscriptionCommand {
            subscription_id: *sub.id(),
            requester: requester(&alice),
        };

        handler.handle(cmd.clone()).await.unwrap();
        assert_eq!(store.subscription_count().await, 0);

        let err = handler.handle(cmd).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubscriptionNotFound);
    }

    #[tokio::test]
    async fn stranger_cannot_delete() {
        let (store, alice, _) = seeded_store().await;
        let sub = add_subscription(&store, alice.id(), draft()).await;
        let bob = user("Bob", "bob@example.com", false);
        let handler = DeleteSubscriptionHandler::new(Arc::new(store.clone()));

        let err = handler
            .handle(DeleteSubscriptionCommand {
                subscription_id: *sub.id(),
                requester: requester(&bob),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(store.subscription_count().await, 1);
    }
}
