//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - user accounts
//! - `PostgresSubscriptionRepository` - subscriptions and renewal queries
//! - `PostgresUnitOfWork` - transactional sign-up and account deletion

mod subscription_repository;
mod unit_of_work;
mod user_repository;

pub use subscription_repository::PostgresSubscriptionRepository;
pub use unit_of_work::PostgresUnitOfWork;
pub use user_repository::PostgresUserRepository;
