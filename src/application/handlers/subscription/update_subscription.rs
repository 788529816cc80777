//! UpdateSubscriptionHandler - Command handler for partial updates.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, SubscriptionId, Timestamp};
use crate::domain::subscription::{Subscription, SubscriptionPatch};
use crate::ports::SubscriptionRepository;

use super::load_authorized;

/// Command carrying only the fields the client sent.
#[derive(Debug, Clone)]
pub struct UpdateSubscriptionCommand {
    pub subscription_id: SubscriptionId,
    pub requester: AuthenticatedUser,
    pub patch: SubscriptionPatch,
}

pub struct UpdateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl UpdateSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateSubscriptionCommand) -> Result<Subscription, DomainError> {
        let mut subscription =
            load_authorized(self.repository.as_ref(), &cmd.subscription_id, &cmd.requester)
                .await?;

        subscription.apply(cmd.patch, Timestamp::now())?;
        let updated = self.repository.update(&subscription).await?;

        tracing::info!(subscription_id = %updated.id(), "subscription updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        add_subscription, draft, requester, seeded_store, user,
    };
    use crate::domain::foundation::ErrorCode;
    use crate::domain::subscription::{Currency, Price, SubscriptionStatus};

    #[tokio::test]
    async fn price_only_patch_changes_only_price() {
        let (store, alice, _) = seeded_store().await;
        let original = add_subscription(&store, alice.id(), draft()).await;
        let handler = UpdateSubscriptionHandler::new(Arc::new(store.clone()));

        let updated = handler
            .handle(UpdateSubscriptionCommand {
                subscription_id: *original.id(),
                requester: requester(&alice),
                patch: SubscriptionPatch {
                    price: Some(Price::new(9.99).unwrap()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.price().amount(), 9.99);
        assert_eq!(updated.name(), original.name());
        assert_eq!(updated.category(), original.category());
        assert_eq!(updated.payment_method(), original.payment_method());
        assert_eq!(updated.user_id(), original.user_id());

        let stored = store.find_by_id(original.id()).await.unwrap().unwrap();
        assert_eq!(stored.price().amount(), 9.99);
    }

    #[tokio::test]
    async fn admin_can_update_any_subscription() {
        let (store, alice, admin) = seeded_store().await;
        let sub = add_subscription(&store, alice.id(), draft()).await;
        let handler = UpdateSubscriptionHandler::new(Arc::new(store));

        let updated = handler
            .handle(UpdateSubscriptionCommand {
                subscription_id: *sub.id(),
                requester: requester(&admin),
                patch: SubscriptionPatch {
                    currency: Some(Currency::Eur),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.currency(), Currency::Eur);
        assert_eq!(updated.user_id(), alice.id());
    }

    #[tokio::test]
    async fn update_after_cancel_reports_cancelled_status() {
        let (store, alice, _) = seeded_store().await;
        let sub = add_subscription(&store, alice.id(), draft()).await;
        store.mark_cancelled(sub.id(), &Timestamp::now()).await.unwrap();
        let handler = UpdateSubscriptionHandler::new(Arc::new(store.clone()));

        let updated = handler
            .handle(UpdateSubscriptionCommand {
                subscription_id: *sub.id(),
                requester: requester(&alice),
                patch: SubscriptionPatch {
                    price: Some(Price::new(0.0).unwrap()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.status(), SubscriptionStatus::Cancelled);
        assert_eq!(updated.price().amount(), 0.0);
    }

    #[tokio::test]
    async fn stranger_cannot_update() {
        let (store, alice, _) = seeded_store().await;
        let sub = add_subscription(&store, alice.id(), draft()).await;
        let bob = user("Bob", "bob@example.com", false);
        let handler = UpdateSubscriptionHandler::new(Arc::new(store.clone()));

        let err = handler
            .handle(UpdateSubscriptionCommand {
                subscription_id: *sub.id(),
                requester: requester(&bob),
                patch: SubscriptionPatch {
                    price: Some(Price::new(1.0).unwrap()),
                    ..Default::default()
                },
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        let stored = store.find_by_id(sub.id()).await.unwrap().unwrap();
        assert_eq!(stored.price(), sub.price());
    }
}
