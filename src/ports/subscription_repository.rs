//! Subscription repository port.

use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{RenewalWindow, Subscription};
use async_trait::async_trait;

/// Public identity of a subscription owner, attached to admin listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// A subscription together with its owner's public identity.
#[derive(Debug, Clone)]
pub struct SubscriptionWithOwner {
    pub subscription: Subscription,
    pub owner: OwnerSummary,
}

/// Repository port for Subscription aggregate persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Save a new subscription.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the owner doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Writes the editable fields of an existing subscription and returns
    /// the stored row.
    ///
    /// Owner and status are never written, so an edit made from a stale
    /// copy cannot undo a concurrent cancel.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the subscription doesn't exist
    async fn update(&self, subscription: &Subscription) -> Result<Subscription, DomainError>;

    /// Moves an active subscription to cancelled in one conditional write.
    ///
    /// # Errors
    ///
    /// - `AlreadyCancelled` if the subscription is no longer active
    /// - `SubscriptionNotFound` if the subscription doesn't exist
    async fn mark_cancelled(
        &self,
        id: &SubscriptionId,
        cancelled_at: &Timestamp,
    ) -> Result<Subscription, DomainError>;

    /// Find a subscription by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// Delete a subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the subscription doesn't exist
    async fn delete(&self, id: &SubscriptionId) -> Result<(), DomainError>;

    /// All subscriptions owned by a user, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Subscription>, DomainError>;

    /// Every subscription with its owner, newest first.
    async fn list_all_with_owner(&self) -> Result<Vec<SubscriptionWithOwner>, DomainError>;

    /// Active subscriptions whose renewal date falls in `window`.
    ///
    /// When `owner` is set only that user's subscriptions are returned.
    async fn find_renewing_within(
        &self,
        window: &RenewalWindow,
        owner: Option<&UserId>,
    ) -> Result<Vec<Subscription>, DomainError>;
}
