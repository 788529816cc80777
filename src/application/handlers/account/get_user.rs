//! GetUserHandler - Query handler for a single account.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub user_id: UserId,
}

pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<User, DomainError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| user_not_found(&query.user_id))
    }
}

pub(super) fn user_not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, "User not found").with_detail("user_id", id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::seeded_store;

    #[tokio::test]
    async fn finds_existing_user() {
        let (store, alice, _) = seeded_store().await;
        let handler = GetUserHandler::new(Arc::new(store));
        let found = handler
            .handle(GetUserQuery {
                user_id: *alice.id(),
            })
            .await
            .unwrap();
        assert_eq!(found.email(), alice.email());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (store, _, _) = seeded_store().await;
        let handler = GetUserHandler::new(Arc::new(store));
        let err = handler
            .handle(GetUserQuery {
                user_id: UserId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
