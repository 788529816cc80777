//! ListUsersHandler - Admin query over all accounts.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode};
use crate::domain::user::User;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct ListUsersQuery {
    pub requester: AuthenticatedUser,
}

pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Vec<User>, DomainError> {
        if !query.requester.is_admin {
            return Err(DomainError::new(
                ErrorCode::AdminRequired,
                "Admin access required",
            ));
        }
        self.users.list().await
    }
}
