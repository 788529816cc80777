//! User repository port.
//!
//! Single-record reads and updates for accounts. Inserting and deleting
//! accounts happens inside a [`super::TransactionScope`] because both are
//! tied to other writes.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{Email, User};
use async_trait::async_trait;

/// Repository port for User aggregate persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized email. Returns `None` if not found.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// List every account, oldest first.
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Update name, password hash and admin flag of an existing user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, user: &User) -> Result<(), DomainError>;
}
