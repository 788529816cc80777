//! In-memory persistence for tests and local runs.
//!
//! Implements the user and subscription repositories and the unit of work
//! over one shared state map. Transaction scopes stage their writes and
//! apply them under a single write lock on commit. Dropping an uncommitted
//! scope discards the staged writes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{RenewalWindow, Subscription};
use crate::domain::user::{Email, User};
use crate::ports::{
    OwnerSummary, SubscriptionRepository, SubscriptionWithOwner, TransactionScope, UnitOfWork,
    UserRepository,
};

/// Step at which a transaction scope reports a simulated database failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    InsertUser,
    PurgeSubscriptions,
    DeleteUser,
    Commit,
}

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    subscriptions: HashMap<SubscriptionId, Subscription>,
}

/// Shared in-memory store. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
    failure: Option<FailurePoint>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes transaction scopes opened from this handle fail at `point`.
    pub fn with_failure(mut self, point: FailurePoint) -> Self {
        self.failure = Some(point);
        self
    }

    /// Inserts a user directly, bypassing the unit of work.
    pub async fn seed_user(&self, user: User) {
        self.state.write().await.users.insert(*user.id(), user);
    }

    /// Inserts a subscription directly, bypassing owner checks.
    pub async fn seed_subscription(&self, subscription: Subscription) {
        self.state
            .write()
            .await
            .subscriptions
            .insert(*subscription.id(), subscription);
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn subscription_count(&self) -> usize {
        self.state.read().await.subscriptions.len()
    }
}

fn subscription_not_found() -> DomainError {
    DomainError::new(ErrorCode::SubscriptionNotFound, "Subscription not found")
}

fn newest_first(subscriptions: &mut [Subscription]) {
    subscriptions.sort_by(|a, b| b.created_at().cmp(a.created_at()));
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.state.read().await.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(users)
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.users.get_mut(user.id()) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::UserNotFound, "User not found")),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(subscription.user_id()) {
            return Err(DomainError::new(ErrorCode::UserNotFound, "Owner not found"));
        }
        state
            .subscriptions
            .insert(*subscription.id(), subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<Subscription, DomainError> {
        let mut state = self.state.write().await;
        let existing = state
            .subscriptions
            .get_mut(subscription.id())
            .ok_or_else(subscription_not_found)?;
        existing.copy_details_from(subscription);
        Ok(existing.clone())
    }

    async fn mark_cancelled(
        &self,
        id: &SubscriptionId,
        cancelled_at: &Timestamp,
    ) -> Result<Subscription, DomainError> {
        let mut state = self.state.write().await;
        let existing = state
            .subscriptions
            .get_mut(id)
            .ok_or_else(subscription_not_found)?;
        existing.cancel(*cancelled_at)?;
        Ok(existing.clone())
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.state.read().await.subscriptions.get(id).cloned())
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .subscriptions
            .remove(id)
            .map(|_| ())
            .ok_or_else(subscription_not_found)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Subscription>, DomainError> {
        let mut subscriptions: Vec<Subscription> = self
            .state
            .read()
            .await
            .subscriptions
            .values()
            .filter(|s| s.user_id() == owner)
            .cloned()
            .collect();
        newest_first(&mut subscriptions);
        Ok(subscriptions)
    }

    async fn list_all_with_owner(&self) -> Result<Vec<SubscriptionWithOwner>, DomainError> {
        let state = self.state.read().await;
        let mut subscriptions: Vec<Subscription> =
            state.subscriptions.values().cloned().collect();
        newest_first(&mut subscriptions);

        subscriptions
            .into_iter()
            .map(|subscription| {
                let owner = state.users.get(subscription.user_id()).ok_or_else(|| {
                    DomainError::database(format!(
                        "Subscription {} has no owner",
                        subscription.id()
                    ))
                })?;
                Ok(SubscriptionWithOwner {
                    owner: OwnerSummary {
                        id: *owner.id(),
                        name: owner.name().to_string(),
                        email: owner.email().to_string(),
                    },
                    subscription,
                })
            })
            .collect()
    }

    async fn find_renewing_within(
        &self,
        window: &RenewalWindow,
        owner: Option<&UserId>,
    ) -> Result<Vec<Subscription>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .subscriptions
            .values()
            .filter(|s| s.status().is_active())
            .filter(|s| window.contains(s.renewal_date()))
            .filter(|s| owner.map_or(true, |o| s.user_id() == o))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn TransactionScope>, DomainError> {
        Ok(Box::new(InMemoryTransaction {
            state: Arc::clone(&self.state),
            failure: self.failure,
            staged: Vec::new(),
        }))
    }
}

#[derive(Debug)]
enum StagedWrite {
    InsertUser(User),
    PurgeSubscriptions(UserId),
    DeleteUser(UserId),
}

/// Transaction scope over [`InMemoryStore`].
struct InMemoryTransaction {
    state: Arc<RwLock<StoreState>>,
    failure: Option<FailurePoint>,
    staged: Vec<StagedWrite>,
}

impl InMemoryTransaction {
    fn fail_if(&self, point: FailurePoint) -> Result<(), DomainError> {
        if self.failure == Some(point) {
            return Err(DomainError::database(format!(
                "Simulated failure at {:?}",
                point
            )));
        }
        Ok(())
    }

    fn staged_insert(&self, id: &UserId) -> Option<&User> {
        self.staged.iter().find_map(|w| match w {
            StagedWrite::InsertUser(u) if u.id() == id => Some(u),
            _ => None,
        })
    }

    fn staged_delete(&self, id: &UserId) -> bool {
        self.staged
            .iter()
            .any(|w| matches!(w, StagedWrite::DeleteUser(d) if d == id))
    }
}

#[async_trait]
impl TransactionScope for InMemoryTransaction {
    async fn insert_user(&mut self, user: &User) -> Result<(), DomainError> {
        self.fail_if(FailurePoint::InsertUser)?;

        let taken_committed = self
            .state
            .read()
            .await
            .users
            .values()
            .any(|u| u.email() == user.email() && !self.staged_delete(u.id()));
        let taken_staged = self.staged.iter().any(|w| {
            matches!(w, StagedWrite::InsertUser(u) if u.email() == user.email())
        });
        if taken_committed || taken_staged {
            return Err(DomainError::new(ErrorCode::EmailTaken, "User already exists"));
        }

        self.staged.push(StagedWrite::InsertUser(user.clone()));
        Ok(())
    }

    async fn delete_subscriptions_by_owner(&mut self, owner: &UserId) -> Result<u64, DomainError> {
        self.fail_if(FailurePoint::PurgeSubscriptions)?;

        let count = self
            .state
            .read()
            .await
            .subscriptions
            .values()
            .filter(|s| s.user_id() == owner)
            .count();
        self.staged.push(StagedWrite::PurgeSubscriptions(*owner));
        Ok(count as u64)
    }

    async fn delete_user(&mut self, id: &UserId) -> Result<(), DomainError> {
        self.fail_if(FailurePoint::DeleteUser)?;

        let exists = self.state.read().await.users.contains_key(id)
            || self.staged_insert(id).is_some();
        if !exists || self.staged_delete(id) {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }
        self.staged.push(StagedWrite::DeleteUser(*id));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.fail_if(FailurePoint::Commit)?;

        let InMemoryTransaction { state, staged, .. } = *self;
        let mut state = state.write().await;

        // Another scope may have committed the same email since insert_user
        // checked; re-check before applying anything.
        let deleted: Vec<UserId> = staged
            .iter()
            .filter_map(|w| match w {
                StagedWrite::DeleteUser(id) => Some(*id),
                _ => None,
            })
            .collect();
        for write in &staged {
            if let StagedWrite::InsertUser(user) = write {
                let taken = state
                    .users
                    .values()
                    .any(|u| u.email() == user.email() && !deleted.contains(u.id()));
                if taken {
                    return Err(DomainError::new(ErrorCode::EmailTaken, "User already exists"));
                }
            }
        }

        for write in staged {
            match write {
                StagedWrite::InsertUser(user) => {
                    state.users.insert(*user.id(), user);
                }
                StagedWrite::PurgeSubscriptions(owner) => {
                    state.subscriptions.retain(|_, s| s.user_id() != &owner);
                }
                StagedWrite::DeleteUser(id) => {
                    state.users.remove(&id);
                }
            }
        }
        Ok(())
    }
}
