//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use secrecy::SecretString;

use crate::application::{
    CancelSubscriptionHandler, CreateAdminHandler, CreateSubscriptionHandler,
    DeleteAccountHandler, DeleteSubscriptionHandler, GetSubscriptionHandler, GetUserHandler,
    ListAllSubscriptionsHandler, ListUserSubscriptionsHandler, ListUsersHandler, SignInHandler,
    SignUpHandler, UpcomingRenewalsHandler, UpdateSubscriptionHandler, UpdateUserHandler,
};
use crate::ports::{
    PasswordHasher, RateLimiter, ReminderScheduler, SessionValidator, SubscriptionRepository,
    TokenIssuer, UnitOfWork, UserRepository,
};

/// Request-shielding switches.
#[derive(Debug, Clone, Copy)]
pub struct ShieldSettings {
    /// Apply the per-IP token bucket.
    pub rate_limit: bool,
    /// Take the client IP from proxy headers instead of the socket.
    pub trust_forwarded: bool,
    /// Reject detected bots (LIVE) instead of only logging them (DRY_RUN).
    pub block_bots: bool,
}

/// Dependencies shared by every request.
///
/// Cloned per request; everything heavy sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub uow: Arc<dyn UnitOfWork>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub sessions: Arc<dyn SessionValidator>,
    pub scheduler: Arc<dyn ReminderScheduler>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub admin_key: SecretString,
    /// Add `Secure` to the session cookie.
    pub secure_cookies: bool,
    pub shield: ShieldSettings,
}

impl AppState {
    pub fn sign_up_handler(&self) -> SignUpHandler {
        SignUpHandler::new(
            self.users.clone(),
            self.uow.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
        )
    }

    pub fn sign_in_handler(&self) -> SignInHandler {
        SignInHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn create_admin_handler(&self) -> CreateAdminHandler {
        CreateAdminHandler::new(
            self.users.clone(),
            self.uow.clone(),
            self.hasher.clone(),
            self.tokens.clone(),
            self.admin_key.clone(),
        )
    }

    pub fn create_subscription_handler(&self) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(self.subscriptions.clone(), self.scheduler.clone())
    }

    pub fn get_subscription_handler(&self) -> GetSubscriptionHandler {
        GetSubscriptionHandler::new(self.subscriptions.clone())
    }

    pub fn update_subscription_handler(&self) -> UpdateSubscriptionHandler {
        UpdateSubscriptionHandler::new(self.subscriptions.clone())
    }

    pub fn delete_subscription_handler(&self) -> DeleteSubscriptionHandler {
        DeleteSubscriptionHandler::new(self.subscriptions.clone())
    }

    pub fn cancel_subscription_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.subscriptions.clone())
    }

    pub fn list_all_subscriptions_handler(&self) -> ListAllSubscriptionsHandler {
        ListAllSubscriptionsHandler::new(self.subscriptions.clone())
    }

    pub fn list_user_subscriptions_handler(&self) -> ListUserSubscriptionsHandler {
        ListUserSubscriptionsHandler::new(self.subscriptions.clone())
    }

    pub fn upcoming_renewals_handler(&self) -> UpcomingRenewalsHandler {
        UpcomingRenewalsHandler::new(self.subscriptions.clone())
    }

    pub fn get_user_handler(&self) -> GetUserHandler {
        GetUserHandler::new(self.users.clone())
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }

    pub fn update_user_handler(&self) -> UpdateUserHandler {
        UpdateUserHandler::new(self.users.clone(), self.hasher.clone())
    }

    pub fn delete_account_handler(&self) -> DeleteAccountHandler {
        DeleteAccountHandler::new(self.users.clone(), self.uow.clone())
    }
}
