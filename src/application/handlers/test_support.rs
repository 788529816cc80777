//! Shared fixtures for handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::adapters::memory::InMemoryStore;
use crate::domain::foundation::{AuthError, AuthenticatedUser, DomainError, Timestamp, UserId};
use crate::domain::subscription::{
    Category, Currency, Frequency, PaymentMethod, Price, Subscription, SubscriptionDraft,
    SubscriptionName,
};
use crate::domain::user::{Email, User, UserName};
use crate::ports::{IssuedToken, PasswordHasher, SubscriptionRepository, TokenIssuer};

pub fn user(name: &str, email: &str, is_admin: bool) -> User {
    let name = UserName::parse(name).unwrap();
    let email = Email::parse(email).unwrap();
    if is_admin {
        User::register_admin(name, email, "hash".to_string())
    } else {
        User::register(name, email, "hash".to_string())
    }
}

pub fn requester(user: &User) -> AuthenticatedUser {
    AuthenticatedUser::new(
        *user.id(),
        user.email().as_str(),
        user.name().as_str(),
        user.is_admin(),
    )
}

pub fn draft() -> SubscriptionDraft {
    SubscriptionDraft {
        name: SubscriptionName::parse("Netflix").unwrap(),
        price: Price::new(15.99).unwrap(),
        currency: Currency::Usd,
        frequency: Frequency::Monthly,
        category: Category::Entertainment,
        payment_method: PaymentMethod::parse("Credit Card").unwrap(),
        start_date: Timestamp::now().minus_days(5),
        renewal_date: None,
    }
}

pub fn draft_renewing_in_days(days: i64) -> SubscriptionDraft {
    SubscriptionDraft {
        renewal_date: Some(Timestamp::now().plus_days(days)),
        ..draft()
    }
}

/// Seeds Alice (regular) and an admin, returning both.
pub async fn seeded_store() -> (InMemoryStore, User, User) {
    let store = InMemoryStore::new();
    let alice = user("Alice", "alice@example.com", false);
    let admin = user("Admin", "admin@example.com", true);
    store.seed_user(alice.clone()).await;
    store.seed_user(admin.clone()).await;
    (store, alice, admin)
}

pub async fn add_subscription(
    store: &InMemoryStore,
    owner: &UserId,
    draft: SubscriptionDraft,
) -> Subscription {
    let subscription = Subscription::create(*owner, draft, Timestamp::now()).unwrap();
    store.save(&subscription).await.unwrap();
    subscription
}

/// Reversible stand-in for Argon2 so tests stay fast.
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("plain:{}", password))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        Ok(hash == format!("plain:{}", password))
    }
}

/// Issues `token-<user id>` strings, or fails when `fail` is set.
/// Counts the tokens it handed out.
#[derive(Default)]
pub struct FakeTokenIssuer {
    pub fail: bool,
    pub issued: AtomicUsize,
}

impl FakeTokenIssuer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

impl TokenIssuer for FakeTokenIssuer {
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, AuthError> {
        if self.fail {
            return Err(AuthError::service_unavailable("signing key unavailable"));
        }
        self.issued.fetch_add(1, Ordering::SeqCst);
        Ok(IssuedToken {
            token: format!("token-{}", user_id),
            expires_at: Timestamp::now().plus_days(1),
            expires_in_secs: 86_400,
        })
    }
}

/// A user whose password is `password` under [`PlainHasher`].
pub fn user_with_password(name: &str, email: &str, password: &str) -> User {
    User::register(
        UserName::parse(name).unwrap(),
        Email::parse(email).unwrap(),
        format!("plain:{}", password),
    )
}
