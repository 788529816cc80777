//! DeleteAccountHandler - Removes a user and everything they own.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, UserId};
use crate::ports::{UnitOfWork, UserRepository};

use super::get_user::user_not_found;

#[derive(Debug, Clone)]
pub struct DeleteAccountCommand {
    pub user_id: UserId,
    pub requester: AuthenticatedUser,
}

pub struct DeleteAccountHandler {
    users: Arc<dyn UserRepository>,
    uow: Arc<dyn UnitOfWork>,
}

impl DeleteAccountHandler {
    pub fn new(users: Arc<dyn UserRepository>, uow: Arc<dyn UnitOfWork>) -> Self {
        Self { users, uow }
    }

    /// Deletes the account and its subscriptions in one unit of work.
    ///
    /// If any step fails the scope is dropped and nothing is removed.
    pub async fn handle(&self, cmd: DeleteAccountCommand) -> Result<(), DomainError> {
        if !cmd.requester.is_user(&cmd.user_id) {
            tracing::warn!(
                requester_id = %cmd.requester.id,
                target_user_id = %cmd.user_id,
                "account deletion denied"
            );
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "You can only delete your own account",
            ));
        }

        if self.users.find_by_id(&cmd.user_id).await?.is_none() {
            return Err(user_not_found(&cmd.user_id));
        }

        let mut tx = self.uow.begin().await?;
        let purged = tx.delete_subscriptions_by_owner(&cmd.user_id).await?;
        tx.delete_user(&cmd.user_id).await?;
        tx.commit().await?;

        tracing::info!(
            user_id = %cmd.user_id,
            subscriptions_deleted = purged,
            "account deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FailurePoint, InMemoryStore};
    use crate::application::handlers::test_support::{
        add_subscription, draft, requester, seeded_store, user,
    };
    use crate::domain::foundation::ErrorKind;

    #[tokio::test]
    async fn removes_user_and_their_subscriptions_only() {
        let (store, alice, admin) = seeded_store().await;
        add_subscription(&store, alice.id(), draft()).await;
        add_subscription(&store, alice.id(), draft()).await;
        add_subscription(&store, admin.id(), draft()).await;
        let handler = DeleteAccountHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));

        handler
            .handle(DeleteAccountCommand {
                user_id: *alice.id(),
                requester: requester(&alice),
            })
            .await
            .unwrap();

        assert_eq!(store.user_count().await, 1);
        assert_eq!(store.subscription_count().await, 1);
    }

    #[tokio::test]
    async fn failure_mid_way_rolls_back_both_steps() {
        for point in [
            FailurePoint::PurgeSubscriptions,
            FailurePoint::DeleteUser,
            FailurePoint::Commit,
        ] {
            let (store, alice, _) = seeded_store().await;
            add_subscription(&store, alice.id(), draft()).await;
            let failing = store.clone().with_failure(point);
            let handler = DeleteAccountHandler::new(Arc::new(failing.clone()), Arc::new(failing));

            let err = handler
                .handle(DeleteAccountCommand {
                    user_id: *alice.id(),
                    requester: requester(&alice),
                })
                .await
                .unwrap_err();

            assert_eq!(err.kind(), ErrorKind::Internal);
            assert_eq!(store.user_count().await, 2);
            assert_eq!(store.subscription_count().await, 1);
        }
    }

    #[tokio::test]
    async fn admin_cannot_delete_someone_else() {
        let (store, alice, admin) = seeded_store().await;
        let handler = DeleteAccountHandler::new(Arc::new(store.clone()), Arc::new(store.clone()));

        let err = handler
            .handle(DeleteAccountCommand {
                user_id: *alice.id(),
                requester: requester(&admin),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(store.user_count().await, 2);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let store = InMemoryStore::new();
        let ghost = user("Ghost", "g@example.com", false);
        let handler = DeleteAccountHandler::new(Arc::new(store.clone()), Arc::new(store));

        let err = handler
            .handle(DeleteAccountCommand {
                user_id: *ghost.id(),
                requester: requester(&ghost),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
