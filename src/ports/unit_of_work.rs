//! Unit of work port for multi-record writes.
//!
//! A [`TransactionScope`] is a live transaction. Writes made through it
//! become visible only after [`TransactionScope::commit`]. Dropping the
//! scope on any other path (early return, `?`, panic) rolls everything back.
//!
//! # Example
//!
//! ```ignore
//! let mut tx = self.uow.begin().await?;
//! tx.delete_subscriptions_by_owner(&user_id).await?;
//! tx.delete_user(&user_id).await?;
//! tx.commit().await?;
//! ```

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;
use async_trait::async_trait;

/// Starts transactions.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Opens a new transaction scope.
    async fn begin(&self) -> Result<Box<dyn TransactionScope>, DomainError>;
}

/// Writes that must succeed or fail together.
#[async_trait]
pub trait TransactionScope: Send {
    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if another account already uses the email
    async fn insert_user(&mut self, user: &User) -> Result<(), DomainError>;

    /// Remove every subscription owned by `owner`, returning how many went.
    async fn delete_subscriptions_by_owner(&mut self, owner: &UserId) -> Result<u64, DomainError>;

    /// Remove an account.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account doesn't exist
    async fn delete_user(&mut self, id: &UserId) -> Result<(), DomainError>;

    /// Makes all writes in this scope durable.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}
