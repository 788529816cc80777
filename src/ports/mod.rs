//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `UserRepository` / `SubscriptionRepository` - single-record access
//! - `UnitOfWork` - transactional scope for multi-record writes
//!
//! ## Credentials
//!
//! - `PasswordHasher` - salted one-way hashing
//! - `TokenIssuer` / `SessionValidator` - access token mint and verify
//!
//! ## Outbound
//!
//! - `ReminderScheduler` - reminder workflow trigger
//! - `RateLimiter` - token-bucket request metering

mod password_hasher;
mod rate_limiter;
mod reminder_scheduler;
mod session_validator;
mod subscription_repository;
mod token_issuer;
mod unit_of_work;
mod user_repository;

pub use password_hasher::PasswordHasher;
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitScope,
    RateLimitStatus, RateLimiter,
};
pub use reminder_scheduler::{ReminderScheduler, WorkflowError, WorkflowRunId};
pub use session_validator::SessionValidator;
pub use subscription_repository::{OwnerSummary, SubscriptionRepository, SubscriptionWithOwner};
pub use token_issuer::{IssuedToken, TokenIssuer};
pub use unit_of_work::{TransactionScope, UnitOfWork};
pub use user_repository::UserRepository;
