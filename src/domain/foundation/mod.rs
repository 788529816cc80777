//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, error types, the requester identity
//! and the access policy used across the Subtrack domain.

mod access;
mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use access::{can_access, require_access, OwnedByUser};
pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ErrorKind, ValidationError};
pub use ids::{SubscriptionId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
